//! Status code remapping.
//!
//! Built once from a `SRC:DST,SRC:DST` string. Entries are independent: a
//! remapped code is never looked up again.

use std::collections::HashMap;
use std::num::ParseIntError;

use thiserror::Error;

/// Malformed remap specification.
#[derive(Debug, Error)]
pub enum RemapError {
    /// An entry without the `:` separator.
    #[error("invalid status mapping entry {entry:?}: expected SRC:DST")]
    MissingSeparator { entry: String },

    /// A source or destination that is not an integer.
    #[error("invalid status code {value:?} in status mapping: {source}")]
    InvalidCode {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Immutable status code remap table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRemap {
    mapping: HashMap<i64, i64>,
}

impl StatusRemap {
    /// Parse a specification such as `494:400,529:503`.
    ///
    /// An empty specification is the identity remap.
    pub fn parse(spec: &str) -> Result<Self, RemapError> {
        let mut mapping = HashMap::new();
        if spec.trim().is_empty() {
            return Ok(Self { mapping });
        }

        for entry in spec.split(',') {
            let Some((src, dst)) = entry.split_once(':') else {
                return Err(RemapError::MissingSeparator {
                    entry: entry.to_string(),
                });
            };
            mapping.insert(parse_code(src)?, parse_code(dst)?);
        }
        Ok(Self { mapping })
    }

    /// Replacement for `code`, or `code` itself when no entry exists.
    pub fn apply(&self, code: i64) -> i64 {
        self.mapping.get(&code).copied().unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

fn parse_code(value: &str) -> Result<i64, RemapError> {
    let value = value.trim();
    value.parse().map_err(|source| RemapError::InvalidCode {
        value: value.to_string(),
        source,
    })
}
