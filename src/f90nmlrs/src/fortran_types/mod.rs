// f90nmlrs/src/fortran_types/mod.rs

//! Fortran data types and their Rust representations.

pub mod conversion;
pub mod formatting;
pub mod parsing;
pub mod value;

#[cfg(test)]
mod tests;

pub use formatting::FormatOptions;
pub use parsing::{
    looks_like_integer, parse_character, parse_complex, parse_fortran_value, parse_integer,
    parse_logical, parse_real,
};
pub use value::FortranValue;
