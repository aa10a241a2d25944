// f90nmlrs/src/lib.rs

//! A Rust-native library for parsing and generating Fortran 90 namelists.
//!
//! This library provides functionality to:
//! - Parse Fortran namelist files into an ordered [`Namelist`] document
//! - Generate Fortran namelist text from the same structure
//! - Handle Fortran scalars, rank-1 arrays, derived types, repeated groups
//! - Convert to and from JSON (`json` feature)

pub mod error;
pub mod findex;
pub mod fortran_types;
pub mod namelist;
pub mod parser;
pub mod scanner;

use fs_err as fs;
use std::io::Write;
use std::path::Path;

pub use error::{F90nmlError, Result};
pub use fortran_types::FortranValue;
pub use namelist::{write_group, Namelist};
pub use parser::Parser;

/// Parse a Fortran namelist from a file path.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), f90nmlrs::F90nmlError> {
///     let nml = f90nmlrs::read("pw.in")?;
///     println!("{:#?}", nml);
///     Ok(())
/// }
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> Result<Namelist> {
    let path = path.as_ref();
    log::debug!("reading namelist from {}", path.display());
    let contents = fs::read_to_string(path)?;
    reads(&contents)
}

/// Parse a Fortran namelist from a string.
///
/// # Examples
///
/// ```
/// fn main() -> Result<(), f90nmlrs::F90nmlError> {
///     let nml = f90nmlrs::reads("&data_nml x=1 y=2.0 z=.true. /")?;
///     assert_eq!(nml.get_group("data_nml").unwrap().get_i64("x"), Some(1));
///     Ok(())
/// }
/// ```
pub fn reads(content: &str) -> Result<Namelist> {
    Parser::new(content)?.parse()
}

/// Write a namelist document to a file.
///
/// # Examples
///
/// ```no_run
/// # use f90nmlrs::Namelist;
/// # fn main() -> Result<(), f90nmlrs::F90nmlError> {
/// let mut nml = Namelist::new();
/// nml.insert_group("control")
///    .insert("calculation", "scf")
///    .insert("nstep", 50)
///    .insert("tprnfor", true);
///
/// f90nmlrs::write(&nml, "pw.in")?;
/// # Ok(())
/// # }
/// ```
pub fn write<P: AsRef<Path>>(nml: &Namelist, path: P) -> Result<()> {
    write_with_options(nml, path, &WriteOptions::default())
}

/// Write a namelist document to a file with specific options.
///
/// Fails with [`F90nmlError::FileAlreadyExists`] unless `options.force`
/// is set or the file does not exist yet.
pub fn write_with_options<P: AsRef<Path>>(
    nml: &Namelist,
    path: P,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();

    if !options.force && path.exists() {
        return Err(F90nmlError::FileAlreadyExists(path.to_path_buf()));
    }

    let mut file = fs::File::create(path)?;
    write_to_writer(nml, &mut file, options)
}

/// Write a namelist document to any writer implementing the Write trait.
pub fn write_to_writer<W: Write>(
    nml: &Namelist,
    writer: &mut W,
    options: &WriteOptions,
) -> Result<()> {
    nml.write_groups(writer, options)?;
    writer.flush()?;
    Ok(())
}

/// Options for controlling namelist output formatting.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Force overwrite existing files
    pub force: bool,
    /// Column width for output formatting
    pub column_width: usize,
    /// Indentation string (spaces or tabs)
    pub indent: String,
    /// Whether to add commas at the end of lines
    pub end_comma: bool,
    /// Whether to use uppercase for group and variable names
    pub uppercase: bool,
    /// Float formatting precision
    pub float_precision: Option<usize>,
    /// Whether to sort namelist groups alphabetically
    pub sort_groups: bool,
    /// Whether to sort variables within groups alphabetically
    pub sort_variables: bool,
    /// Index of the first element of derived-type arrays (Fortran default: 1)
    pub default_start_index: i32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            force: false,
            column_width: 72,
            indent: "    ".to_string(),
            end_comma: false,
            uppercase: false,
            float_precision: None,
            sort_groups: false,
            sort_variables: false,
            default_start_index: 1,
        }
    }
}

#[cfg(feature = "json")]
/// Convert a namelist to JSON string.
pub fn to_json(nml: &Namelist) -> Result<String> {
    serde_json::to_string_pretty(nml).map_err(F90nmlError::from)
}

#[cfg(feature = "json")]
/// Parse a namelist from JSON string.
pub fn from_json(json: &str) -> Result<Namelist> {
    serde_json::from_str(json).map_err(F90nmlError::from)
}
