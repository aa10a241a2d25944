// f90nmlrs/src/namelist/mod.rs

//! Ordered namelist storage and group output.

pub mod core;
pub mod writer;

pub use core::Namelist;
pub use writer::{group_lines, write_group};
