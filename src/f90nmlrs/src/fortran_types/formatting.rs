// f90nmlrs/src/fortran_types/formatting.rs

//! Formatting options and output logic for Fortran values.

use super::value::FortranValue;

/// Formatting options for Fortran value output.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Whether to use uppercase for logical values
    pub uppercase: bool,
    /// Precision for floating-point numbers
    pub float_precision: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            uppercase: false,
            float_precision: None,
        }
    }
}

impl FortranValue {
    /// Format this value as it would appear in a Fortran namelist with basic options.
    pub fn to_fortran_string(&self, uppercase: bool) -> String {
        let options = FormatOptions {
            uppercase,
            ..Default::default()
        };
        self.to_fortran_string_with_options(&options)
    }

    /// Format this value with detailed formatting options.
    ///
    /// Groups have no inline representation. The group writer expands
    /// them into `name%field = value` assignments and refuses value lists
    /// that hold one; here they show as a summary only.
    pub fn to_fortran_string_with_options(&self, options: &FormatOptions) -> String {
        match self {
            FortranValue::Integer(i) => i.to_string(),
            FortranValue::Real(f) => format_real(*f, options),
            FortranValue::Complex(r, i) => {
                format!("({}, {})", format_real(*r, options), format_real(*i, options))
            }
            FortranValue::Logical(b) => format_logical(*b, options),
            FortranValue::Character(s) => format_string(s),
            FortranValue::Array(arr) => arr
                .iter()
                .map(|v| v.to_fortran_string_with_options(options))
                .collect::<Vec<_>>()
                .join(", "),
            FortranValue::Group(_) => self.summary(),
            FortranValue::Null => String::new(),
        }
    }
}

fn format_real(value: f64, options: &FormatOptions) -> String {
    if value.is_infinite() {
        if value > 0.0 {
            "+inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else if value.is_nan() {
        "nan".to_string()
    } else if let Some(precision) = options.float_precision {
        let s = format!("{:.precision$}", value, precision = precision);
        if s.contains('.') {
            s
        } else {
            format!("{}.0", s)
        }
    } else {
        // Debug output always carries a '.' or an exponent, so the value
        // reads back as a real and not an integer.
        format!("{:?}", value)
    }
}

fn format_logical(value: bool, options: &FormatOptions) -> String {
    match (value, options.uppercase) {
        (true, false) => ".true.".to_string(),
        (false, false) => ".false.".to_string(),
        (true, true) => ".TRUE.".to_string(),
        (false, true) => ".FALSE.".to_string(),
    }
}

fn format_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
