// f90nmlrs/src/fortran_types/conversion.rs

//! Type conversion implementations for FortranValue.

use super::value::FortranValue;
use crate::error::F90nmlError;
use crate::namelist::Namelist;

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for FortranValue {
                fn from(value: $ty) -> Self {
                    FortranValue::$variant(value as $cast)
                }
            }
        )*
    };
}

impl_from_scalar! {
    i32 => Integer as i64,
    i64 => Integer as i64,
    u32 => Integer as i64,
    f32 => Real as f64,
    f64 => Real as f64,
}

impl From<bool> for FortranValue {
    fn from(value: bool) -> Self {
        FortranValue::Logical(value)
    }
}

impl From<String> for FortranValue {
    fn from(value: String) -> Self {
        FortranValue::Character(value)
    }
}

impl From<&str> for FortranValue {
    fn from(value: &str) -> Self {
        FortranValue::Character(value.to_string())
    }
}

impl From<(f64, f64)> for FortranValue {
    fn from((real, imag): (f64, f64)) -> Self {
        FortranValue::Complex(real, imag)
    }
}

impl From<Namelist> for FortranValue {
    fn from(value: Namelist) -> Self {
        FortranValue::Group(value)
    }
}

// Arrays of anything convertible, including nested arrays of groups.
impl<T: Into<FortranValue>> From<Vec<T>> for FortranValue {
    fn from(values: Vec<T>) -> Self {
        FortranValue::Array(values.into_iter().map(Into::into).collect())
    }
}

// None becomes Null
impl<T: Into<FortranValue>> From<Option<T>> for FortranValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FortranValue::Null, Into::into)
    }
}

impl TryFrom<FortranValue> for i32 {
    type Error = F90nmlError;

    fn try_from(value: FortranValue) -> Result<Self, Self::Error> {
        let wide = value.as_integer()?;
        i32::try_from(wide).map_err(|_| F90nmlError::TypeConversion {
            from: value.type_name().to_string(),
            to: "i32".to_string(),
            value: wide.to_string(),
        })
    }
}

impl TryFrom<FortranValue> for i64 {
    type Error = F90nmlError;

    fn try_from(value: FortranValue) -> Result<Self, Self::Error> {
        value.as_integer()
    }
}

impl TryFrom<FortranValue> for f64 {
    type Error = F90nmlError;

    fn try_from(value: FortranValue) -> Result<Self, Self::Error> {
        value.as_real()
    }
}

impl TryFrom<FortranValue> for bool {
    type Error = F90nmlError;

    fn try_from(value: FortranValue) -> Result<Self, Self::Error> {
        value.as_logical()
    }
}

impl TryFrom<FortranValue> for String {
    type Error = F90nmlError;

    fn try_from(value: FortranValue) -> Result<Self, Self::Error> {
        match value {
            FortranValue::Character(s) => Ok(s),
            other => Err(F90nmlError::TypeConversion {
                from: other.type_name().to_string(),
                to: "String".to_string(),
                value: other.summary(),
            }),
        }
    }
}

impl TryFrom<FortranValue> for (f64, f64) {
    type Error = F90nmlError;

    fn try_from(value: FortranValue) -> Result<Self, Self::Error> {
        value.as_complex()
    }
}

impl TryFrom<FortranValue> for Namelist {
    type Error = F90nmlError;

    fn try_from(value: FortranValue) -> Result<Self, Self::Error> {
        match value {
            FortranValue::Group(group) => Ok(group),
            other => Err(F90nmlError::TypeConversion {
                from: other.type_name().to_string(),
                to: "Namelist".to_string(),
                value: other.summary(),
            }),
        }
    }
}
