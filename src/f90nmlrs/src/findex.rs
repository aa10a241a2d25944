// f90nmlrs/src/findex.rs

//! Fortran-style rank-1 array indexing.
//!
//! Handles the index part of an assignment target such as `x(3)`,
//! `x(2:5)`, `x(1:9:2)` or `x(:)`, and maps it onto zero-based vector
//! positions given the array's starting index.

use crate::error::{F90nmlError, Result};

/// Largest number of elements an array may grow to while decoding.
pub const MAX_ARRAY_LEN: usize = 1 << 20;

/// The `start:end:stride` triplet of a single index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    /// Starting index (None means implicit)
    pub start: Option<i64>,
    /// Ending index (None means implicit)
    pub end: Option<i64>,
    /// Stride (None means 1)
    pub stride: Option<i64>,
}

impl IndexRange {
    /// Create a new index range.
    pub fn new(start: Option<i64>, end: Option<i64>, stride: Option<i64>) -> Self {
        Self { start, end, stride }
    }

    /// Create a single index.
    pub fn single(index: i64) -> Self {
        Self {
            start: Some(index),
            end: Some(index),
            stride: None,
        }
    }

    /// Create a simple range from start to end.
    pub fn range(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            stride: None,
        }
    }

    /// Check if this is a single element (`x(3)`).
    pub fn is_single(&self) -> bool {
        self.start.is_some() && self.start == self.end && self.stride.is_none()
    }

    /// Zero-based vector positions addressed by this range.
    ///
    /// `count` is the number of values on the right-hand side. A single
    /// index or an open-ended range fills consecutive positions, a closed
    /// range addresses exactly its elements and rejects extra values.
    pub fn positions(&self, variable: &str, first_index: i64, count: usize) -> Result<Vec<usize>> {
        let stride = self.stride.unwrap_or(1);
        if stride <= 0 {
            return Err(self.error(variable, "stride must be positive"));
        }

        let start = self.start.unwrap_or(first_index);
        if start < first_index {
            return Err(self.error(
                variable,
                &format!("index is below the first index {}", first_index),
            ));
        }

        let available = match self.end {
            Some(end) if !self.is_single() => {
                if end < start {
                    return Err(self.error(variable, "end index precedes start index"));
                }
                let len = ((end - start) / stride + 1) as usize;
                if count > len {
                    return Err(self.error(
                        variable,
                        &format!("{} values assigned to {} elements", count, len),
                    ));
                }
                len.min(count)
            }
            _ => count,
        };

        (0..available)
            .map(|i| {
                (i as i64)
                    .checked_mul(stride)
                    .and_then(|offset| start.checked_sub(first_index)?.checked_add(offset))
                    .and_then(|position| usize::try_from(position).ok())
                    .filter(|position| *position < MAX_ARRAY_LEN)
                    .ok_or_else(|| {
                        self.error(
                            variable,
                            &format!("index exceeds the array length limit of {}", MAX_ARRAY_LEN),
                        )
                    })
            })
            .collect()
    }

    fn error(&self, variable: &str, message: &str) -> F90nmlError {
        F90nmlError::invalid_index(variable, self.to_string().as_str(), message)
    }
}

impl std::fmt::Display for IndexRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single() {
            if let Some(start) = self.start {
                return write!(f, "{}", start);
            }
        }
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, ":")?;
        if let Some(end) = self.end {
            write!(f, "{}", end)?;
        }
        if let Some(stride) = self.stride {
            write!(f, ":{}", stride)?;
        }
        Ok(())
    }
}
