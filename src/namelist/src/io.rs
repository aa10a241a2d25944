// src/io.rs

//! Reading and writing namelist text.

use crate::error::{NamelistError, Result};
use crate::namelist::Namelist;
use crate::paths;
use crate::transform::TransformOptions;
use crate::value::Value;
use f90nmlrs::FortranValue;
use fs_err as fs;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

impl Namelist {
    /// Decode namelist text into a new namelist.
    pub fn from_string(text: &str) -> Result<Self> {
        let mut namelist = Self::new();
        namelist.read_string(text, false)?;
        Ok(namelist)
    }

    /// Decode a namelist file into a new namelist.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut namelist = Self::new();
        namelist.read(path, false)?;
        Ok(namelist)
    }

    /// Serialize to a string.
    pub fn to_string_with(&self, options: &TransformOptions) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer, options)?;
        String::from_utf8(buffer)
            .map_err(|e| NamelistError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Serialize to a file, creating or truncating it.
    ///
    /// `~`, `$VAR` and `${VAR}` in `path` are expanded.
    pub fn write<P: AsRef<Path>>(&self, path: P, options: &TransformOptions) -> Result<()> {
        let path = paths::expand(path.as_ref());
        log::info!("writing namelist to {}", path.display());
        let mut file = fs::File::create(&path)?;
        self.write_to_writer(&mut file, options)?;
        file.flush()?;
        Ok(())
    }

    /// Serialize to a writer.
    ///
    /// Every top-level entry of the flattened namelist must be a group,
    /// written once, or a sequence of groups, written as repeated groups
    /// of the same name.
    pub fn write_to_writer<W: Write>(&self, writer: &mut W, options: &TransformOptions) -> Result<()> {
        let flat = self.to_flat_namelist(options);
        for (key, value) in flat.iter() {
            match value {
                FortranValue::Group(_) => {}
                FortranValue::Array(items) if !items.is_empty() => {
                    if let Some(other) = items.iter().find(|item| !item.is_group()) {
                        return Err(format_error(key, other));
                    }
                }
                other => return Err(format_error(key, other)),
            }
        }
        flat.write_groups(writer, self.write_options())?;
        Ok(())
    }

    /// Merge the groups of a namelist file into this namelist.
    ///
    /// With `clear`, the dynamic mapping is emptied first. Decoded groups
    /// are stored through [`Namelist::set_field`], so they become nested
    /// namelists and overwrite same-named entries.
    pub fn read<P: AsRef<Path>>(&mut self, path: P, clear: bool) -> Result<()> {
        self.read_expanded(&paths::expand(path.as_ref()), clear)
    }

    /// Merge namelist text into this namelist, through a temporary file.
    pub fn read_string(&mut self, text: &str, clear: bool) -> Result<()> {
        self.read_string_in(&std::env::temp_dir(), text, clear)
    }

    pub(crate) fn read_string_in(&mut self, dir: &Path, text: &str, clear: bool) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("namelist")
            .suffix(".nml")
            .tempfile_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        self.read_expanded(file.path(), clear)
    }

    fn read_expanded(&mut self, path: &Path, clear: bool) -> Result<()> {
        if clear {
            self.clear();
        }
        log::debug!("reading namelist from {}", path.display());
        let flat = f90nmlrs::read(path)?;
        for (name, value) in flat {
            self.set_field(&name, Value::from(value))?;
        }
        Ok(())
    }
}

fn format_error(key: &str, found: &FortranValue) -> NamelistError {
    NamelistError::Format {
        key: key.to_string(),
        found: found.type_name().to_string(),
    }
}

impl fmt::Display for Namelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_string_with(&TransformOptions::default()) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "<unwritable namelist>"),
        }
    }
}

impl FromStr for Namelist {
    type Err = NamelistError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}
