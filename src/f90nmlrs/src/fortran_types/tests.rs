// f90nmlrs/src/fortran_types/tests.rs

//! Tests for Fortran types module.

use super::*;
use crate::namelist::Namelist;

#[test]
fn test_integer_parsing() {
    assert_eq!(parse_integer("42").unwrap(), FortranValue::Integer(42));
    assert_eq!(parse_integer("-123").unwrap(), FortranValue::Integer(-123));
    assert_eq!(parse_integer("42_int64").unwrap(), FortranValue::Integer(42));
    assert!(parse_integer("3.14").is_err());
}

#[test]
fn test_real_parsing() {
    assert_eq!(parse_real("3.14").unwrap(), FortranValue::Real(3.14));
    assert_eq!(parse_real("1.23d4").unwrap(), FortranValue::Real(1.23e4));
    assert_eq!(parse_real("+inf").unwrap(), FortranValue::Real(f64::INFINITY));
    assert!(parse_real("nan").unwrap().as_real().unwrap().is_nan());
}

#[test]
fn test_complex_parsing() {
    assert_eq!(
        parse_complex("(1.5e2, -3.7d-1)").unwrap(),
        FortranValue::Complex(150.0, -0.37)
    );
    assert!(parse_complex("1.0, 2.0").is_err());
    assert!(parse_complex("(1.0)").is_err());
}

#[test]
fn test_logical_parsing() {
    assert_eq!(parse_logical(".true.").unwrap(), FortranValue::Logical(true));
    assert_eq!(parse_logical(".T.").unwrap(), FortranValue::Logical(true));
    assert_eq!(parse_logical("T").unwrap(), FortranValue::Logical(true));
    assert_eq!(parse_logical(".FALSE.").unwrap(), FortranValue::Logical(false));
    assert_eq!(parse_logical("f").unwrap(), FortranValue::Logical(false));
    assert!(parse_logical("tmp").is_err());
}

#[test]
fn test_character_parsing() {
    assert_eq!(parse_character("'hello'"), FortranValue::character("hello"));
    assert_eq!(parse_character("'don''t'"), FortranValue::character("don't"));
    assert_eq!(
        parse_character("\"say \"\"hi\"\"\""),
        FortranValue::character("say \"hi\"")
    );
    assert_eq!(parse_character("bare"), FortranValue::character("bare"));
}

#[test]
fn test_value_formatting() {
    assert_eq!(FortranValue::Integer(42).to_fortran_string(false), "42");
    assert_eq!(FortranValue::Real(2.0).to_fortran_string(false), "2.0");
    assert_eq!(FortranValue::Real(1e-10).to_fortran_string(false), "1e-10");
    assert_eq!(FortranValue::Logical(true).to_fortran_string(false), ".true.");
    assert_eq!(FortranValue::Logical(false).to_fortran_string(true), ".FALSE.");
    assert_eq!(
        FortranValue::character("don't").to_fortran_string(false),
        "'don''t'"
    );
    assert_eq!(
        FortranValue::Complex(1.0, -2.5).to_fortran_string(false),
        "(1.0, -2.5)"
    );
}

#[test]
fn test_float_precision() {
    let options = FormatOptions {
        float_precision: Some(3),
        ..Default::default()
    };
    assert_eq!(
        FortranValue::Real(3.14159).to_fortran_string_with_options(&options),
        "3.142"
    );
    let options = FormatOptions {
        float_precision: Some(0),
        ..Default::default()
    };
    assert_eq!(
        FortranValue::Real(3.0).to_fortran_string_with_options(&options),
        "3.0"
    );
}

#[test]
fn test_conversions() {
    assert_eq!(FortranValue::from(42i32), FortranValue::Integer(42));
    assert_eq!(FortranValue::from(2.5f64), FortranValue::Real(2.5));
    assert_eq!(FortranValue::from("scf"), FortranValue::character("scf"));
    assert_eq!(FortranValue::from(None::<i32>), FortranValue::Null);
    assert_eq!(
        FortranValue::from(vec![1i64, 2]),
        FortranValue::Array(vec![FortranValue::Integer(1), FortranValue::Integer(2)])
    );

    assert_eq!(i32::try_from(FortranValue::Integer(7)).unwrap(), 7);
    assert!(i32::try_from(FortranValue::Integer(i64::MAX)).is_err());
    assert_eq!(f64::try_from(FortranValue::Integer(3)).unwrap(), 3.0);
    assert!(bool::try_from(FortranValue::Integer(1)).is_err());
    assert_eq!(
        String::try_from(FortranValue::character("x")).unwrap(),
        "x".to_string()
    );
}

#[test]
fn test_group_values() {
    let mut group = Namelist::new();
    group.insert("ecutwfc", 30.0);
    let value = FortranValue::from(group.clone());

    assert!(value.is_group());
    assert_eq!(value.type_name(), "group");
    assert_eq!(value.as_group().unwrap(), &group);
    assert!(FortranValue::Integer(1).as_group().is_err());

    let repeated = FortranValue::Array(vec![value.clone(), value]);
    assert!(repeated.is_group_array());
    assert!(!FortranValue::from(vec![1, 2]).is_group_array());
}

#[test]
fn test_summary() {
    let long = FortranValue::character("hello world this is long");
    assert_eq!(long.summary(), "character(\"hello world this ...\")");
    assert_eq!(FortranValue::Null.summary(), "null");
}
