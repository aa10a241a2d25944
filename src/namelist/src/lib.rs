// src/lib.rs

//! Recursive Fortran namelists.
//!
//! A [`Namelist`] is an ordered key/value container whose values may be
//! nested namelists. It layers named field access, declared (reserved)
//! fields and serialization-time transform hooks over the flat codec in
//! [`f90nmlrs`].
//!
//! ```
//! use espressors_namelist::{Namelist, TransformOptions};
//!
//! let mut input = Namelist::from_string("&control calculation = 'scf' /")?;
//! input
//!     .child_mut("control")
//!     .unwrap()
//!     .set_field("nstep", 50)?;
//!
//! let text = input.to_string_with(&TransformOptions::new())?;
//! assert!(text.contains("nstep = 50"));
//! # Ok::<(), espressors_namelist::NamelistError>(())
//! ```

pub mod error;
pub mod fields;
pub mod io;
pub mod namelist;
pub mod paths;
pub mod transform;
pub mod value;

pub use error::{NamelistError, Result};
pub use f90nmlrs::Namelist as FlatNamelist;
pub use f90nmlrs::{FortranValue, WriteOptions};
pub use fields::{NoFields, ReservedFields};
pub use namelist::{Namelist, OverwritePolicy};
pub use transform::{Transform, TransformFn, TransformOptions};
pub use value::Value;
