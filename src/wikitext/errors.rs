//! Error types for the wikitext module.
//!
//! Parsing itself never fails: malformed markup is repaired or truncated where
//! it is found. The errors here cover the remaining fallible surface:
//! - invalid `ParseOptions` (a programmer error, caught by the builder),
//! - lookups that were asked for something that is not there,
//! - serialization of the document model.
//!
//! Exported items:
//! - `WtError` - main error enum.
//! - `Result<T>` - convenient alias `std::result::Result<T, WtError>`.

use std::error::Error;
use std::fmt;

use crate::wikitext::config::ParseOptionsBuilderError;

/// The canonical result type used across the wikitext module.
pub type Result<T> = std::result::Result<T, WtError>;

/// Wikitext error with rich variants.
///
/// - `ParseError` - a value inside the markup could not be interpreted (for
///    example a number in a `{{coord}}` template).
/// - `NotFound` - requested item was not present (sections/arguments/keys).
/// - `IndexOutOfBounds` - asked for the Nth element but the collection was
///    smaller; contains both the requested index and the available length.
/// - `InvalidArgument` - invalid options or a malformed request.
/// - `Serialize` - the JSON form of a node could not be produced.
/// - `Other` - catch-all carrying a message and optional boxed cause.
#[derive(Debug)]
pub enum WtError {
    ParseError {
        msg: String,
    },
    NotFound {
        msg: String,
    },
    IndexOutOfBounds {
        idx: usize,
        len: usize,
    },
    InvalidArgument {
        msg: String,
    },
    Serialize {
        msg: String,
        source: Option<Box<dyn Error + Send + Sync + 'static>>,
    },
    Other {
        msg: String,
        source: Option<Box<dyn Error + Send + Sync + 'static>>,
    },
}

impl WtError {
    /// Construct a parse error with a message.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        WtError::ParseError { msg: msg.into() }
    }

    /// Construct a not-found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        WtError::NotFound { msg: msg.into() }
    }

    /// Construct an index-out-of-bounds error.
    pub fn index_oob(idx: usize, len: usize) -> Self {
        WtError::IndexOutOfBounds { idx, len }
    }

    /// Construct an invalid argument error.
    pub fn invalid_arg<S: Into<String>>(msg: S) -> Self {
        WtError::InvalidArgument { msg: msg.into() }
    }

    /// Generic helper to produce Other(...) with an optional source.
    pub fn other_with_source<E: Error + Send + Sync + 'static>(
        msg: impl Into<String>,
        source: Option<E>,
    ) -> Self {
        WtError::Other {
            msg: msg.into(),
            source: source.map(|e| Box::new(e) as Box<dyn Error + Send + Sync>),
        }
    }

    /// Returns a short, user-friendly description of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            WtError::ParseError { .. } => "ParseError",
            WtError::NotFound { .. } => "NotFound",
            WtError::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            WtError::InvalidArgument { .. } => "InvalidArgument",
            WtError::Serialize { .. } => "Serialize",
            WtError::Other { .. } => "Other",
        }
    }

    /// If the error has an underlying source, return it (if any).
    pub fn source_opt(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WtError::Serialize { source, .. } | WtError::Other { source, .. } => {
                source.as_ref().map(|b| b.as_ref() as &dyn Error)
            }
            _ => None,
        }
    }
}

impl fmt::Display for WtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WtError::ParseError { msg } => write!(f, "Parse error: {}", msg),
            WtError::NotFound { msg } => write!(f, "Not found: {}", msg),
            WtError::IndexOutOfBounds { idx, len } => {
                write!(f, "Index out of bounds: requested {}, length {}", idx, len)
            }
            WtError::InvalidArgument { msg } => write!(f, "Invalid argument: {}", msg),
            WtError::Serialize { msg, source } => {
                if let Some(s) = source {
                    write!(f, "Serialize error: {} (cause: {})", msg, s)
                } else {
                    write!(f, "Serialize error: {}", msg)
                }
            }
            WtError::Other { msg, source } => {
                if let Some(s) = source {
                    write!(f, "{} (cause: {})", msg, s)
                } else {
                    write!(f, "{}", msg)
                }
            }
        }
    }
}

impl Error for WtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source_opt()
    }
}

/* Common conversions to make error propagation ergonomic. */

impl From<serde_json::Error> for WtError {
    fn from(e: serde_json::Error) -> Self {
        WtError::Serialize {
            msg: "json conversion failed".to_string(),
            source: Some(Box::new(e)),
        }
    }
}

impl From<ParseOptionsBuilderError> for WtError {
    fn from(e: ParseOptionsBuilderError) -> Self {
        WtError::invalid_arg(e.to_string())
    }
}

impl From<url::ParseError> for WtError {
    fn from(e: url::ParseError) -> Self {
        WtError::invalid_arg(format!("invalid url: {}", e))
    }
}

impl From<std::num::ParseFloatError> for WtError {
    fn from(e: std::num::ParseFloatError) -> Self {
        WtError::other_with_source("parse float error", Some(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let e = WtError::parse("bad latitude 'north'");
        let s = format!("{}", e);
        assert!(s.starts_with("Parse error"));
        assert!(s.contains("bad latitude"));
        assert_eq!(e.kind(), "ParseError");
    }

    #[test]
    fn display_not_found() {
        let e = WtError::not_found("infobox key 'mayor' missing");
        assert!(format!("{}", e).contains("infobox key 'mayor' missing"));
        assert_eq!(e.kind(), "NotFound");
    }

    #[test]
    fn float_conversion_has_source() {
        let err = "north".parse::<f64>().unwrap_err();
        let e: WtError = err.into();
        assert!(e.source_opt().is_some());
        assert!(format!("{}", e).contains("parse float error"));
    }

    #[test]
    fn json_conversion_is_serialize_kind() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: WtError = err.into();
        assert_eq!(e.kind(), "Serialize");
        assert!(e.source_opt().is_some());
    }
}
