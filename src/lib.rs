//! # parampack
//!
//! A typed parameter pack/unpack engine for delimited-text IPC and control
//! protocols.
//!
//! ## What does it do?
//!
//! Control links between embedded peers often speak single-line text
//! messages: a handful of named, strongly-typed parameters packed into one
//! delimited string. This crate is the engine behind such links: it keeps
//! the process-wide registry of parameter-set schemas, renders typed values
//! into wire text, and parses incoming text back into validated, typed
//! elements.
//!
//! ## Key Features
//!
//! - **Schema-driven**: register a [`ParamSetDef`] once; every pack and
//!   unpack resolves names, types, bounds, ranges, and enum tables from it
//! - **Typed values**: a closed set of wire types ([`ValueKind`]) — integer
//!   widths, enums, booleans, strings, word arrays, tuples, nested bags,
//!   and opaque addresses
//! - **Composite records**: "bag" parameters nest whole parameter lists,
//!   with field addressing (`name%field`), declared children
//!   (`name%field(child)`), and repeat tags (`name[3]`)
//! - **Strict validation**: bounds and range tables are enforced on every
//!   unpack — and on value construction, which round-trips through the same
//!   checks
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use parampack::{
//!     pack_element, unpack_element, ParamDef, ParamElement, ParamSetDef, PackOptions, Value,
//!     ValueKind,
//! };
//!
//! // Describe and register a parameter set once.
//! parampack::register_param_set(
//!     &ParamSetDef::new(1, "radio")
//!         .param(ParamDef::new("volume", ValueKind::U8).bounds(0, 100))
//!         .param(ParamDef::new("station", ValueKind::Str)),
//! )
//! .unwrap();
//!
//! let set = parampack::find_param_set(Some(1), None).unwrap();
//! let options = PackOptions::default();
//!
//! // Pack a typed element into wire text.
//! let volume = ParamElement::with_value(set.param_id(0), 0, Value::U8(55)).unwrap();
//! let wire = pack_element(&volume, &options).unwrap();
//! assert_eq!(wire, "radio.volume=0x37");
//!
//! // Unpack it back; hex and decimal both decode.
//! let back = unpack_element(&wire, &options).unwrap();
//! assert_eq!(back.element, volume);
//! ```
//!
//! ## Lists and bags
//!
//! Whole messages are lists: [`pack_list`] joins elements with the
//! configured delimiter and [`unpack_list`] splits incoming text
//! escape-aware, keeping brace-quoted bag values atomic. See
//! [`grammar`] for the full wire grammar.
//!
//! ## Errors
//!
//! Every operation returns [`Result`]; the failing kind is also recorded
//! in the calling thread's last-error cell ([`last_error`] /
//! [`clear_last_error`]) so layered callers can report after the fact.

pub mod element;
pub mod error;
pub mod escape;
pub mod grammar;
pub mod id;
pub mod list;
pub mod macros;
pub mod options;
pub mod pack;
pub mod registry;
pub mod schema;
pub mod scratch;
pub mod unpack;
pub mod value;

pub use element::{FieldRef, ParamElement};
pub use error::{Error, ErrorKind, Result};
pub use id::ParamId;
pub use list::ParamList;
pub use options::PackOptions;
pub use pack::{pack_element, pack_list};
pub use registry::{find_param_set, register_param_set, unregister_all_param_sets};
pub use schema::{
    Access, Bounds, EnumTable, FieldDef, ParamDef, ParamSet, ParamSetDef, ParamSpec, RangeEntry,
};
pub use scratch::{clear_last_error, last_error};
pub use unpack::{
    unpack_element, unpack_element_in_context, unpack_element_in_set, unpack_list,
    unpack_list_in_context, Unpacked,
};
pub use value::{TupleKey, Value, ValueKind};

/// Renders the bare textual identifier of a parameter: its set prefix
/// (when `options.with_prefix` is set) and its name.
///
/// # Examples
///
/// ```rust
/// use parampack::{id_to_string, ParamDef, ParamSetDef, PackOptions, ValueKind};
///
/// parampack::register_param_set(
///     &ParamSetDef::new(36, "lib_doc").param(ParamDef::new("mode", ValueKind::U8)),
/// )
/// .unwrap();
///
/// let id = parampack::find_param_set(Some(36), None).unwrap().param_id(0);
/// assert_eq!(id_to_string(id, &PackOptions::default()).unwrap(), "lib_doc.mode");
/// assert_eq!(
///     id_to_string(id, &PackOptions::default().without_prefix()).unwrap(),
///     "mode"
/// );
/// ```
///
/// # Errors
///
/// Fails when the identifier does not resolve against the registry.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn id_to_string(id: ParamId, options: &PackOptions) -> Result<String> {
    scratch::note((|| {
        let mut out = String::new();
        pack::identifier_into(id, options, &mut out)?;
        Ok(out)
    })())
}

/// Resolves an identifier string (prefixed, or bare with a set-id hint)
/// back to its [`ParamId`]. Field and child suffixes resolve to the
/// effective addressed parameter.
///
/// # Errors
///
/// Fails on an unknown prefix, name, field, or child.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn id_from_str(ident: &str, set_hint: Option<u32>, options: &PackOptions) -> Result<ParamId> {
    scratch::note(
        unpack::parse_identifier(
            ident,
            unpack::Hints {
                set_id: set_hint,
                context: None,
            },
            options,
        )
        .map(|resolved| resolved.id),
    )
}

/// Returns a parameter's declared name.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn param_name(id: ParamId) -> Result<String> {
    scratch::note(registry::resolve_spec(id).map(|spec| spec.name))
}

/// Returns a parameter's declared wire type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn param_kind(id: ParamId) -> Result<ValueKind> {
    scratch::note(registry::resolve_spec(id).map(|spec| spec.kind))
}

/// Returns a parameter's fixed in-memory size, `0` for variable-length
/// kinds (use [`Value::copy_to`] to size those).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn param_size(id: ParamId) -> Result<usize> {
    scratch::note(registry::resolve_spec(id).map(|spec| spec.kind.fixed_size()))
}

/// Returns a parameter's declared access flags, filtered through a
/// caller-supplied blacklist: a blacklisted identifier reports no access
/// at all, regardless of its declared flags.
///
/// # Examples
///
/// ```rust
/// use parampack::{param_access, Access, ParamDef, ParamSetDef, ValueKind};
///
/// parampack::register_param_set(
///     &ParamSetDef::new(37, "acl_doc").param(ParamDef::new("secret", ValueKind::Str)),
/// )
/// .unwrap();
///
/// let id = parampack::find_param_set(Some(37), None).unwrap().param_id(0);
/// assert_eq!(param_access(id, &[]).unwrap(), Access::all());
/// assert_eq!(param_access(id, &[id]).unwrap(), Access::none());
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn param_access(id: ParamId, blacklist: &[ParamId]) -> Result<Access> {
    scratch::note(registry::resolve_spec(id).map(|spec| {
        if blacklist.contains(&id) {
            Access::none()
        } else {
            spec.access
        }
    }))
}

/// Returns a parameter's declared default value, when one exists.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn param_default(id: ParamId) -> Result<Option<Value>> {
    scratch::note(registry::resolve_spec(id).map(|spec| spec.default))
}
