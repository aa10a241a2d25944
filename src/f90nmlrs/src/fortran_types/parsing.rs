// src/fortran_types/parsing.rs

//! String parsing functions for Fortran values.

use super::value::FortranValue;
use crate::error::{F90nmlError, Result};

/// Parse a raw value string, detecting its Fortran type.
///
/// Detection order is logical, complex, real, integer, then character.
pub fn parse_fortran_value(value: &str) -> Result<FortranValue> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Ok(FortranValue::Null);
    }

    if let Ok(val) = parse_logical(trimmed) {
        return Ok(val);
    }
    if let Ok(val) = parse_complex(trimmed) {
        return Ok(val);
    }
    if let Ok(val) = parse_integer(trimmed) {
        return Ok(val);
    }
    if let Ok(val) = parse_real(trimmed) {
        return Ok(val);
    }

    Ok(parse_character(trimmed))
}

/// Strip a trailing kind specifier such as `_dp` or `_8`.
fn strip_kind(value: &str) -> &str {
    match value.find('_') {
        Some(pos) => &value[..pos],
        None => value,
    }
}

/// Parse an integer value.
pub fn parse_integer(value: &str) -> Result<FortranValue> {
    strip_kind(value.trim())
        .parse::<i64>()
        .map(FortranValue::Integer)
        .map_err(|_| F90nmlError::invalid_value("", value, "integer"))
}

/// Parse a real value, accepting Fortran `d` exponents (`1.0d0`, `4184.d0`).
pub fn parse_real(value: &str) -> Result<FortranValue> {
    let normalized = strip_kind(value.trim()).to_lowercase().replace('d', "e");

    match normalized.as_str() {
        "+inf" | "inf" | "+infinity" | "infinity" => return Ok(FortranValue::Real(f64::INFINITY)),
        "-inf" | "-infinity" => return Ok(FortranValue::Real(f64::NEG_INFINITY)),
        "nan" | "+nan" | "-nan" => return Ok(FortranValue::Real(f64::NAN)),
        _ => {}
    }

    normalized
        .parse::<f64>()
        .map(FortranValue::Real)
        .map_err(|_| F90nmlError::invalid_value("", value, "real"))
}

/// Parse a complex value written as `(re, im)`.
pub fn parse_complex(value: &str) -> Result<FortranValue> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| F90nmlError::invalid_value("", value, "complex"))?;

    match inner.split(',').collect::<Vec<_>>().as_slice() {
        [re, im] => {
            let re = parse_real(re)?.as_real()?;
            let im = parse_real(im)?.as_real()?;
            Ok(FortranValue::Complex(re, im))
        }
        _ => Err(F90nmlError::invalid_value("", value, "complex")),
    }
}

/// Parse a logical value.
///
/// Dotted forms only need their first letter (`.t`, `.TRUE.`); bare words
/// must be one of `t`, `true`, `f`, `false`.
pub fn parse_logical(value: &str) -> Result<FortranValue> {
    let lower = value.trim().to_lowercase();

    match lower.as_str() {
        "t" | "true" => return Ok(FortranValue::Logical(true)),
        "f" | "false" => return Ok(FortranValue::Logical(false)),
        _ => {}
    }

    if lower.starts_with(".t") {
        Ok(FortranValue::Logical(true))
    } else if lower.starts_with(".f") {
        Ok(FortranValue::Logical(false))
    } else {
        Err(F90nmlError::invalid_value("", value, "logical"))
    }
}

/// Parse a character string, removing delimiters and doubled quotes.
pub fn parse_character(value: &str) -> FortranValue {
    let trimmed = value.trim();

    for quote in ['\'', '"'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            let inner = &trimmed[1..trimmed.len() - 1];
            let doubled: String = [quote, quote].iter().collect();
            return FortranValue::Character(inner.replace(&doubled, &quote.to_string()));
        }
    }

    FortranValue::Character(trimmed.to_string())
}

/// Check whether a string is an optionally signed integer with an optional kind.
pub fn looks_like_integer(value: &str) -> bool {
    let clean = strip_kind(value.trim());
    let digits = clean
        .strip_prefix('+')
        .or_else(|| clean.strip_prefix('-'))
        .unwrap_or(clean);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
