//! Media type to file extension table.
//!
//! # Responsibilities
//! - Parse the line-oriented registry file (`type extension` per line)
//! - Map a requested media type to the extension used for page lookup
//!
//! # Design Decisions
//! - The base `type/subtype` is checked with the `mime` grammar after trimming,
//!   so whitespace before `;` is accepted
//! - Parameters are checked but dropped; a repeated name makes the type invalid
//! - An unregistered type is not an error, it yields an empty extension
//! - Registry problems surface at load time, never per request

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use mime::Mime;
use thiserror::Error;

/// Errors raised while loading the registry file.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read mime types registry: {0}")]
    Io(#[from] std::io::Error),

    /// A data line did not hold exactly two fields.
    #[error("invalid line {line} in mime types registry: {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// A media type string that does not follow the media type grammar.
#[derive(Debug, Error)]
pub enum MediaTypeError {
    /// The `type/subtype` part is malformed.
    #[error("invalid media type {media_type:?}: {source}")]
    Invalid {
        media_type: String,
        #[source]
        source: mime::FromStrError,
    },

    /// A parameter is not `name=value` with a token or quoted-string value.
    #[error("invalid parameter in media type {media_type:?}")]
    InvalidParameter { media_type: String },

    /// The same parameter name appears twice, ignoring case.
    #[error("duplicate parameter {name:?} in media type {media_type:?}")]
    DuplicateParameter { media_type: String, name: String },
}

impl MediaTypeError {
    /// The rejected media type string.
    pub fn media_type(&self) -> &str {
        match self {
            Self::Invalid { media_type, .. }
            | Self::InvalidParameter { media_type }
            | Self::DuplicateParameter { media_type, .. } => media_type,
        }
    }
}

/// Immutable mapping from bare `type/subtype` to extension.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    extensions: HashMap<String, String>,
}

impl TypeTable {
    /// Load the registry from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)?;
        let table = Self::from_registry(&content)?;
        tracing::info!(path = %path.display(), types = table.len(), "MIME types registry loaded");
        Ok(table)
    }

    /// Parse registry content.
    ///
    /// Comment lines start with `#`, blank lines are skipped and every other
    /// line must hold exactly a media type and an extension.
    pub fn from_registry(content: &str) -> Result<Self, RegistryError> {
        let mut extensions = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let [media_type, extension] = fields.as_slice() else {
                return Err(RegistryError::MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                });
            };
            extensions.insert(media_type.to_ascii_lowercase(), extension.to_string());
        }
        Ok(Self { extensions })
    }

    /// Build a table from `(media type, extension)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let extensions = entries
            .into_iter()
            .map(|(media_type, ext)| (media_type.as_ref().to_ascii_lowercase(), ext.into()))
            .collect();
        Self { extensions }
    }

    /// Extension registered for `media_type`, or an empty string when the
    /// type parses but is not registered.
    pub fn extension_for(&self, media_type: &str) -> Result<&str, MediaTypeError> {
        let (base, parameters) = match media_type.split_once(';') {
            Some((base, parameters)) => (base, Some(parameters)),
            None => (media_type, None),
        };

        let parsed = Mime::from_str(base.trim()).map_err(|source| MediaTypeError::Invalid {
            media_type: media_type.to_string(),
            source,
        })?;
        if let Some(parameters) = parameters {
            check_parameters(media_type, parameters)?;
        }

        let essence = parsed.essence_str().to_ascii_lowercase();
        Ok(self
            .extensions
            .get(&essence)
            .map(String::as_str)
            .unwrap_or(""))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Check the `name=value` list that follows the first `;`.
///
/// Whitespace is allowed around `;` and `=`, and trailing semicolons are
/// ignored. Names compare case-insensitively.
fn check_parameters(media_type: &str, parameters: &str) -> Result<(), MediaTypeError> {
    let invalid = || MediaTypeError::InvalidParameter {
        media_type: media_type.to_string(),
    };

    let mut seen = HashSet::new();
    let mut rest = parameters;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Ok(());
        }

        let (name, after_name) = split_token(rest);
        if name.is_empty() {
            return Err(invalid());
        }
        let value = after_name
            .trim_start()
            .strip_prefix('=')
            .ok_or_else(invalid)?;
        let after_value = skip_value(value.trim_start()).ok_or_else(invalid)?;

        let name = name.to_ascii_lowercase();
        if !seen.insert(name.clone()) {
            return Err(MediaTypeError::DuplicateParameter {
                media_type: media_type.to_string(),
                name,
            });
        }

        let after_value = after_value.trim_start();
        if after_value.is_empty() {
            return Ok(());
        }
        rest = after_value.strip_prefix(';').ok_or_else(invalid)?;
    }
}

/// Skip a token or quoted-string value, returning what follows it.
fn skip_value(input: &str) -> Option<&str> {
    let Some(quoted) = input.strip_prefix('"') else {
        let (token, rest) = split_token(input);
        return (!token.is_empty()).then_some(rest);
    };

    let mut escaped = false;
    for (index, c) in quoted.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(&quoted[index + 1..]),
            _ => {}
        }
    }
    None
}

fn split_token(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !is_token_char(c))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c)
}
