//! Error types for parameter packing and unpacking.
//!
//! This module provides structured error reporting for every public
//! operation in the crate.
//!
//! ## Error Categories
//!
//! - **Identity errors**: unknown set, out-of-range identifier, unknown name
//! - **Grammar errors**: malformed tags, unbalanced brackets, trailing text
//! - **Validation errors**: values outside declared bounds, unmatched range
//!   tables, unknown enum names
//! - **Registration errors**: conflicting set id / prefix combinations
//!
//! Every failure carries the identifiers or text involved so callers can
//! report useful diagnostics without re-parsing the input.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{unpack_element, Error, ErrorKind, PackOptions};
//!
//! let result = unpack_element("nosuch.thing=1", &PackOptions::default());
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     assert_eq!(err.kind(), ErrorKind::InvalidParam);
//! }
//! ```

use crate::id::ParamId;
use crate::value::ValueKind;
use thiserror::Error;

/// Coarse error classification, retrievable per thread via
/// [`last_error`](crate::last_error) after any failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument did not identify a valid set, parameter, tag, field,
    /// or value: malformed grammar, out-of-range identifiers, or a value
    /// outside its declared bounds, ranges, or enum table.
    InvalidParam,
    /// An internal operation failed: formatting, buffer handling, or a
    /// consistency violation.
    FailedOperation,
    /// The operation itself is not valid in the current state, such as a
    /// conflicting registration.
    InvalidOperation,
}

/// Represents all possible errors produced while registering parameter sets
/// or packing/unpacking parameter text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// No registered parameter set matches the requested id and/or prefix.
    #[error("unknown parameter set (id: {set_id:?}, prefix: {prefix:?})")]
    UnknownSet {
        set_id: Option<u32>,
        prefix: Option<String>,
    },

    /// The identifier does not decode to a valid parameter of its set.
    #[error("identifier {0:?} does not address a registered parameter")]
    BadId(ParamId),

    /// Tag outside the allowed `0..=99` window.
    #[error("tag {0} outside the allowed range 0..=99")]
    BadTag(u32),

    /// Name lookup failed against the resolved set's parameter table.
    #[error("unknown parameter name `{0}`")]
    UnknownName(String),

    /// Field lookup failed against a composite parameter's field table.
    #[error("`{param}` has no field `{field}`")]
    UnknownField { param: String, field: String },

    /// A `(child)` suffix named a parameter that is not declared as a child
    /// of the resolved parameter.
    #[error("`{child}` is not a declared child of `{parent}`")]
    NotAChild { parent: String, child: String },

    /// The element's value variant does not match the declared type.
    #[error("type mismatch: declared {expected:?}, value is {found:?}")]
    KindMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    /// Malformed wire text.
    #[error("syntax error in `{text}`: {msg}")]
    Syntax { text: String, msg: String },

    /// Numeric or length value outside the descriptor's declared bounds.
    #[error("value {value} outside declared bounds [{min}, {max}]")]
    OutOfBounds { value: i128, min: i128, max: i128 },

    /// A range table is configured but no entry contains the value.
    #[error("value {0} matches no configured range")]
    NoMatchingRange(i128),

    /// Symbolic enum text with no entry in the enum table.
    #[error("unknown enum name `{0}`")]
    UnknownEnumName(String),

    /// Raw-byte construction with the wrong number of bytes.
    #[error("expected {expected} value bytes, got {found}")]
    WrongByteLen { expected: usize, found: usize },

    /// Registration would pair a set id or prefix with a different partner
    /// than the one already registered.
    #[error(
        "registration conflict: set {set_id} / prefix `{prefix}` clashes with an existing entry"
    )]
    Conflict { set_id: u32, prefix: String },

    /// An element that requires a value was packed or queried without one.
    #[error("parameter `{0}` carries no value")]
    MissingValue(String),

    /// Generic failure with a display message.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error for a slice of wire text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use parampack::Error;
    ///
    /// let err = Error::syntax("p[1", "unterminated tag");
    /// assert!(err.to_string().contains("unterminated tag"));
    /// ```
    pub fn syntax(text: &str, msg: &str) -> Self {
        Error::Syntax {
            text: text.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a generic failure with a display message.
    pub fn message<T: std::fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Maps this error onto the coarse [`ErrorKind`] taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownSet { .. }
            | Error::BadId(_)
            | Error::BadTag(_)
            | Error::UnknownName(_)
            | Error::UnknownField { .. }
            | Error::NotAChild { .. }
            | Error::KindMismatch { .. }
            | Error::Syntax { .. }
            | Error::OutOfBounds { .. }
            | Error::NoMatchingRange(_)
            | Error::UnknownEnumName(_)
            | Error::WrongByteLen { .. }
            | Error::MissingValue(_) => ErrorKind::InvalidParam,
            Error::Conflict { .. } => ErrorKind::InvalidOperation,
            Error::Message(_) => ErrorKind::FailedOperation,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::BadTag(100).kind(), ErrorKind::InvalidParam);
        assert_eq!(
            Error::Conflict {
                set_id: 1,
                prefix: "x".into()
            }
            .kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(
            Error::message("scratch pool exhausted").kind(),
            ErrorKind::FailedOperation
        );
    }

    #[test]
    fn test_display_carries_context() {
        let err = Error::UnknownField {
            param: "link".into(),
            field: "mtu".into(),
        };
        let text = err.to_string();
        assert!(text.contains("link"));
        assert!(text.contains("mtu"));
    }
}
