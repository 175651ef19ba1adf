//! The runtime value container.
//!
//! A [`ParamElement`] is one parameter instance in flight: its identifier,
//! an optional repeat tag, an optional field context (when the element is a
//! field of, or addressed into, a composite bag), and an optional typed
//! value. An element without a value is the "get" query form.
//!
//! Elements own their value; dropping the element drops the value. Cloning
//! is a deep copy and comparison is structural over identifier, tag,
//! context, and value.
//!
//! ## Construction
//!
//! Constructing an element from a native value is not a plain move: the
//! value is packed to text and unpacked back through the descriptor's
//! bounds, range, and enum validation, so an in-memory element obeys
//! exactly the invariants a wire-received one does. A value that would be
//! rejected on unpack cannot be constructed either.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{ParamDef, ParamElement, ParamSetDef, Value, ValueKind};
//!
//! parampack::register_param_set(
//!     &ParamSetDef::new(33, "elem_doc")
//!         .param(ParamDef::new("volume", ValueKind::U8).bounds(0, 100)),
//! )
//! .unwrap();
//!
//! let id = parampack::find_param_set(Some(33), None).unwrap().param_id(0);
//! let elem = ParamElement::with_value(id, 0, Value::U8(55)).unwrap();
//! assert_eq!(elem.value(), Some(&Value::U8(55)));
//!
//! // 101 violates the declared bounds, so it cannot even be constructed.
//! assert!(ParamElement::with_value(id, 0, Value::U8(101)).is_err());
//! ```

use crate::error::Result;
use crate::id::ParamId;
use crate::options::PackOptions;
use crate::scratch;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};

/// Identifies the composite parameter an element belongs to and the field
/// slot it occupies there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// The owning composite ("bag") parameter.
    pub context: ParamId,
    /// The field slot within the owner's field table.
    pub field_id: u32,
}

/// One parameter instance: identifier, tag, optional field context, and
/// optional owned value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamElement {
    pub id: ParamId,
    /// `0` = untagged/singular; `1..=99` = the Nth occurrence of a
    /// repeatable parameter.
    pub tag: u8,
    pub context: Option<FieldRef>,
    pub value: Option<Value>,
}

impl ParamElement {
    /// Creates a valueless element (the "get" query form).
    #[must_use]
    pub fn new(id: ParamId, tag: u8) -> Self {
        ParamElement {
            id,
            tag,
            context: None,
            value: None,
        }
    }

    /// Creates an element from a native value, round-trip validating it
    /// through the descriptor's unpack checks.
    ///
    /// # Errors
    ///
    /// Fails when the identifier does not resolve, the value variant does
    /// not match the declared kind, or the value violates the declared
    /// bounds, ranges, or enum table.
    pub fn with_value(id: ParamId, tag: u8, value: Value) -> Result<Self> {
        let options = PackOptions::default();
        let spec = crate::registry::resolve_spec(id)?;
        let validated = scratch::note(crate::unpack::revalidate(id, &spec, &value, &options))?;
        Ok(ParamElement {
            id,
            tag,
            context: None,
            value: Some(validated),
        })
    }

    /// Creates an element from the value's raw little-endian byte image.
    /// The byte count must equal the declared kind's fixed size exactly.
    pub fn from_bytes(id: ParamId, tag: u8, bytes: &[u8]) -> Result<Self> {
        let spec = crate::registry::resolve_spec(id)?;
        let value = scratch::note(Value::from_bytes(spec.kind, bytes))?;
        Self::with_value(id, tag, value)
    }

    /// Creates a word-array element.
    pub fn array8(id: ParamId, tag: u8, words: Vec<u8>) -> Result<Self> {
        Self::with_value(id, tag, Value::Array8(words))
    }

    /// Creates a 16-bit word-array element.
    pub fn array16(id: ParamId, tag: u8, words: Vec<u16>) -> Result<Self> {
        Self::with_value(id, tag, Value::Array16(words))
    }

    /// Creates a 32-bit word-array element.
    pub fn array32(id: ParamId, tag: u8, words: Vec<u32>) -> Result<Self> {
        Self::with_value(id, tag, Value::Array32(words))
    }

    /// Creates a string/string tuple element.
    pub fn tuple_str(id: ParamId, tag: u8, key: &str, value: &str) -> Result<Self> {
        Self::with_value(
            id,
            tag,
            Value::StrTuple {
                key: key.to_string(),
                value: value.to_string(),
            },
        )
    }

    /// Creates an int/int tuple element.
    pub fn tuple_int(id: ParamId, tag: u8, key: i64, value: i64) -> Result<Self> {
        Self::with_value(id, tag, Value::IntTuple { key, value })
    }

    /// Creates a string/int tuple element.
    pub fn tuple_str_int(id: ParamId, tag: u8, key: &str, value: i64) -> Result<Self> {
        Self::with_value(
            id,
            tag,
            Value::StrIntTuple {
                key: key.to_string(),
                value,
            },
        )
    }

    /// Creates a string/uint8 tuple element.
    pub fn tuple_str_uint8(id: ParamId, tag: u8, key: &str, value: u8) -> Result<Self> {
        Self::with_value(
            id,
            tag,
            Value::StrUint8Tuple {
                key: key.to_string(),
                value,
            },
        )
    }

    /// Stamps the field context this element occupies.
    #[must_use]
    pub fn in_context(mut self, context: ParamId, field_id: u32) -> Self {
        self.context = Some(FieldRef { context, field_id });
        self
    }

    /// Returns the owned value, when present.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Takes the owned value out of the element.
    pub fn take_value(&mut self) -> Option<Value> {
        self.value.take()
    }

    /// Returns the value's kind tag, when a value is present.
    #[must_use]
    pub fn value_kind(&self) -> Option<ValueKind> {
        self.value.as_ref().map(Value::kind)
    }
}
