//! Typed parameter values.
//!
//! This module provides [`Value`], the tagged union carried by parameter
//! elements, and [`ValueKind`], the closed set of supported wire types that
//! descriptors declare.
//!
//! ## Core Types
//!
//! - [`Value`]: one variant per wire type (integer widths, enums, booleans,
//!   strings, word arrays, tuples, nested bags, opaque address)
//! - [`ValueKind`]: the type tag used by descriptors and raw-byte
//!   constructors
//! - [`TupleKey`]: the key half of a tuple value, used by keyed list search
//!
//! Cloning is a deep copy and equality is deep structural equality,
//! including ordered member comparison for bags.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{Value, ValueKind};
//!
//! let v = Value::U16(10);
//! assert_eq!(v.kind(), ValueKind::U16);
//! assert_eq!(v.as_i128(), Some(10));
//! assert_eq!(ValueKind::U16.fixed_size(), 2);
//! assert_eq!(ValueKind::Str.fixed_size(), 0);
//! ```

use crate::list::ParamList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of wire types a parameter can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Enum8,
    Enum16,
    Enum32,
    UEnum8,
    UEnum16,
    UEnum32,
    Bool,
    Bool8,
    Str,
    WideStr,
    Array8,
    Array16,
    Array32,
    StrTuple,
    IntTuple,
    StrIntTuple,
    StrUint8Tuple,
    Bag,
    Address,
}

impl ValueKind {
    /// Fixed in-memory size in bytes for scalar kinds, `0` for
    /// variable-length kinds.
    #[must_use]
    pub const fn fixed_size(self) -> usize {
        match self {
            ValueKind::I8
            | ValueKind::U8
            | ValueKind::Enum8
            | ValueKind::UEnum8
            | ValueKind::Bool
            | ValueKind::Bool8 => 1,
            ValueKind::I16 | ValueKind::U16 | ValueKind::Enum16 | ValueKind::UEnum16 => 2,
            ValueKind::I32 | ValueKind::U32 | ValueKind::Enum32 | ValueKind::UEnum32 => 4,
            ValueKind::I64 | ValueKind::U64 | ValueKind::Address => 8,
            _ => 0,
        }
    }

    /// Returns `true` for kinds rendered as `0x` hexadecimal on the wire
    /// (which also auto-detect a `0x`/`0X` prefix on unpack).
    #[must_use]
    pub const fn is_hex(self) -> bool {
        matches!(
            self,
            ValueKind::U8
                | ValueKind::U16
                | ValueKind::U32
                | ValueKind::U64
                | ValueKind::UEnum8
                | ValueKind::UEnum16
                | ValueKind::UEnum32
                | ValueKind::Address
        )
    }

    /// Returns `true` for the enum kinds, which consult the descriptor's
    /// name table when packing and unpacking.
    #[must_use]
    pub const fn is_enum(self) -> bool {
        matches!(
            self,
            ValueKind::Enum8
                | ValueKind::Enum16
                | ValueKind::Enum32
                | ValueKind::UEnum8
                | ValueKind::UEnum16
                | ValueKind::UEnum32
        )
    }

    /// Word width in bytes for the array kinds.
    #[must_use]
    pub const fn array_word_size(self) -> Option<usize> {
        match self {
            ValueKind::Array8 => Some(1),
            ValueKind::Array16 => Some(2),
            ValueKind::Array32 => Some(4),
            _ => None,
        }
    }
}

/// The key half of a tuple value.
///
/// Keyed list searches compare this payload in addition to the element
/// identifier before accepting a node as a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TupleKey {
    Str(String),
    Int(i64),
}

impl From<&str> for TupleKey {
    fn from(key: &str) -> Self {
        TupleKey::Str(key.to_string())
    }
}

impl From<i64> for TupleKey {
    fn from(key: i64) -> Self {
        TupleKey::Int(key)
    }
}

/// A typed parameter value.
///
/// One variant per [`ValueKind`]. Scalars carry native integers, composite
/// variants own their payloads, and [`Value::Bag`] nests a whole
/// [`ParamList`] subject to the same pack/unpack rules as the outer list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Enum8(i8),
    Enum16(i16),
    Enum32(i32),
    UEnum8(u8),
    UEnum16(u16),
    UEnum32(u32),
    Bool(bool),
    Bool8(u8),
    Str(String),
    WideStr(String),
    Array8(Vec<u8>),
    Array16(Vec<u16>),
    Array32(Vec<u32>),
    StrTuple { key: String, value: String },
    IntTuple { key: i64, value: i64 },
    StrIntTuple { key: String, value: i64 },
    StrUint8Tuple { key: String, value: u8 },
    Bag(ParamList),
    Address(u64),
}

impl Value {
    /// Returns the [`ValueKind`] tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::Enum8(_) => ValueKind::Enum8,
            Value::Enum16(_) => ValueKind::Enum16,
            Value::Enum32(_) => ValueKind::Enum32,
            Value::UEnum8(_) => ValueKind::UEnum8,
            Value::UEnum16(_) => ValueKind::UEnum16,
            Value::UEnum32(_) => ValueKind::UEnum32,
            Value::Bool(_) => ValueKind::Bool,
            Value::Bool8(_) => ValueKind::Bool8,
            Value::Str(_) => ValueKind::Str,
            Value::WideStr(_) => ValueKind::WideStr,
            Value::Array8(_) => ValueKind::Array8,
            Value::Array16(_) => ValueKind::Array16,
            Value::Array32(_) => ValueKind::Array32,
            Value::StrTuple { .. } => ValueKind::StrTuple,
            Value::IntTuple { .. } => ValueKind::IntTuple,
            Value::StrIntTuple { .. } => ValueKind::StrIntTuple,
            Value::StrUint8Tuple { .. } => ValueKind::StrUint8Tuple,
            Value::Bag(_) => ValueKind::Bag,
            Value::Address(_) => ValueKind::Address,
        }
    }

    /// Returns the numeric payload widened to `i128`, for integer, enum,
    /// `Bool8`, and `Address` values. `None` for every other variant.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::I8(v) | Value::Enum8(v) => Some(i128::from(*v)),
            Value::I16(v) | Value::Enum16(v) => Some(i128::from(*v)),
            Value::I32(v) | Value::Enum32(v) => Some(i128::from(*v)),
            Value::I64(v) => Some(i128::from(*v)),
            Value::U8(v) | Value::UEnum8(v) | Value::Bool8(v) => Some(i128::from(*v)),
            Value::U16(v) | Value::UEnum16(v) => Some(i128::from(*v)),
            Value::U32(v) | Value::UEnum32(v) => Some(i128::from(*v)),
            Value::U64(v) | Value::Address(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// If the value is a boolean (`Bool` or `Bool8`), returns it.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Bool8(b) => Some(*b != 0),
            _ => None,
        }
    }

    /// If the value is a string (`Str` or `WideStr`), returns it.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::WideStr(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a bag, returns the nested list.
    #[must_use]
    pub fn as_bag(&self) -> Option<&ParamList> {
        match self {
            Value::Bag(list) => Some(list),
            _ => None,
        }
    }

    /// Mutable access to a bag's nested list.
    pub fn as_bag_mut(&mut self) -> Option<&mut ParamList> {
        match self {
            Value::Bag(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the key half of a tuple value.
    #[must_use]
    pub fn tuple_key(&self) -> Option<TupleKey> {
        match self {
            Value::StrTuple { key, .. }
            | Value::StrIntTuple { key, .. }
            | Value::StrUint8Tuple { key, .. } => Some(TupleKey::Str(key.clone())),
            Value::IntTuple { key, .. } => Some(TupleKey::Int(*key)),
            _ => None,
        }
    }

    /// Writes the value's natural byte image into `buf` when it fits,
    /// returning the required size either way.
    ///
    /// Scalars write little-endian bytes, strings their UTF-8 bytes, and
    /// arrays their little-endian words. Tuples and bags have no byte
    /// image and report size `0`.
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        fn put(buf: &mut [u8], bytes: &[u8]) -> usize {
            if buf.len() >= bytes.len() {
                buf[..bytes.len()].copy_from_slice(bytes);
            }
            bytes.len()
        }

        match self {
            Value::I8(v) | Value::Enum8(v) => put(buf, &v.to_le_bytes()),
            Value::I16(v) | Value::Enum16(v) => put(buf, &v.to_le_bytes()),
            Value::I32(v) | Value::Enum32(v) => put(buf, &v.to_le_bytes()),
            Value::I64(v) => put(buf, &v.to_le_bytes()),
            Value::U8(v) | Value::UEnum8(v) | Value::Bool8(v) => put(buf, &v.to_le_bytes()),
            Value::U16(v) | Value::UEnum16(v) => put(buf, &v.to_le_bytes()),
            Value::U32(v) | Value::UEnum32(v) => put(buf, &v.to_le_bytes()),
            Value::U64(v) | Value::Address(v) => put(buf, &v.to_le_bytes()),
            Value::Bool(v) => put(buf, &[u8::from(*v)]),
            Value::Str(s) | Value::WideStr(s) => put(buf, s.as_bytes()),
            Value::Array8(words) => put(buf, words),
            Value::Array16(words) => {
                let needed = words.len() * 2;
                if buf.len() >= needed {
                    for (chunk, w) in buf.chunks_exact_mut(2).zip(words) {
                        chunk.copy_from_slice(&w.to_le_bytes());
                    }
                }
                needed
            }
            Value::Array32(words) => {
                let needed = words.len() * 4;
                if buf.len() >= needed {
                    for (chunk, w) in buf.chunks_exact_mut(4).zip(words) {
                        chunk.copy_from_slice(&w.to_le_bytes());
                    }
                }
                needed
            }
            _ => 0,
        }
    }

    /// Reconstructs a fixed-size value from its little-endian byte image.
    ///
    /// The byte count must match [`ValueKind::fixed_size`] exactly;
    /// variable-length kinds are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error when `kind` has no fixed size or `bytes` has the
    /// wrong length.
    pub fn from_bytes(kind: ValueKind, bytes: &[u8]) -> crate::Result<Value> {
        let expected = kind.fixed_size();
        if expected == 0 {
            return Err(crate::Error::message(format!(
                "{kind:?} has no fixed-size byte image"
            )));
        }
        if bytes.len() != expected {
            return Err(crate::Error::WrongByteLen {
                expected,
                found: bytes.len(),
            });
        }

        let value = match kind {
            ValueKind::I8 => Value::I8(bytes[0] as i8),
            ValueKind::Enum8 => Value::Enum8(bytes[0] as i8),
            ValueKind::U8 => Value::U8(bytes[0]),
            ValueKind::UEnum8 => Value::UEnum8(bytes[0]),
            ValueKind::Bool => Value::Bool(bytes[0] != 0),
            ValueKind::Bool8 => Value::Bool8(bytes[0]),
            ValueKind::I16 => Value::I16(i16::from_le_bytes([bytes[0], bytes[1]])),
            ValueKind::Enum16 => Value::Enum16(i16::from_le_bytes([bytes[0], bytes[1]])),
            ValueKind::U16 => Value::U16(u16::from_le_bytes([bytes[0], bytes[1]])),
            ValueKind::UEnum16 => Value::UEnum16(u16::from_le_bytes([bytes[0], bytes[1]])),
            ValueKind::I32 => {
                Value::I32(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            ValueKind::Enum32 => {
                Value::Enum32(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            ValueKind::U32 => {
                Value::U32(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            ValueKind::UEnum32 => {
                Value::UEnum32(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            ValueKind::I64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(bytes);
                Value::I64(i64::from_le_bytes(b))
            }
            ValueKind::U64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(bytes);
                Value::U64(u64::from_le_bytes(b))
            }
            ValueKind::Address => {
                let mut b = [0u8; 8];
                b.copy_from_slice(bytes);
                Value::Address(u64::from_le_bytes(b))
            }
            _ => unreachable!("fixed_size() covered every scalar kind"),
        };
        Ok(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Bool8(b) => write!(f, "{}", *b != 0),
            Value::Str(s) | Value::WideStr(s) => write!(f, "{s}"),
            Value::Bag(list) => write!(f, "{{bag:{}}}", list.len()),
            Value::Array8(w) => write!(f, "[{} words]", w.len()),
            Value::Array16(w) => write!(f, "[{} words]", w.len()),
            Value::Array32(w) => write!(f, "[{} words]", w.len()),
            Value::StrTuple { key, value } => write!(f, "{key}:{value}"),
            Value::IntTuple { key, value } => write!(f, "{key}:{value}"),
            Value::StrIntTuple { key, value } => write!(f, "{key}:{value}"),
            Value::StrUint8Tuple { key, value } => write!(f, "{key}/{value}"),
            other => match other.as_i128() {
                Some(n) => write!(f, "{n}"),
                None => write!(f, "?"),
            },
        }
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::I8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::I16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Array8(v)
    }
}

impl From<Vec<u16>> for Value {
    fn from(v: Vec<u16>) -> Self {
        Value::Array16(v)
    }
}

impl From<Vec<u32>> for Value {
    fn from(v: Vec<u32>) -> Self {
        Value::Array32(v)
    }
}

impl From<ParamList> for Value {
    fn from(v: ParamList) -> Self {
        Value::Bag(v)
    }
}
