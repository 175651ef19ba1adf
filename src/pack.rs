//! Rendering parameter elements to wire text.
//!
//! The packing engine turns one element, or a whole list, into the
//! delimited text form described in [`crate::grammar`]:
//!
//! ```text
//! [prefix '.'] name ['%' field] ['(' child-id ')'] ['[' tag ']'] ['=' value]
//! ```
//!
//! Identifiers come from the registered descriptors; the value rendering is
//! decided by the parameter's declared [`ValueKind`](crate::ValueKind). A
//! valueless element packs as a bare identifier, the "get" query form.
//!
//! Bag values recurse: their member lists pack in *field mode*, where each
//! member is identified by its field name alone and the surrounding braces
//! carry the nesting.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{pack_element, ParamDef, ParamElement, ParamSetDef, PackOptions, Value, ValueKind};
//!
//! parampack::register_param_set(
//!     &ParamSetDef::new(34, "pack_doc").param(ParamDef::new("speed", ValueKind::U16)),
//! )
//! .unwrap();
//!
//! let id = parampack::find_param_set(Some(34), None).unwrap().param_id(0);
//! let elem = ParamElement::with_value(id, 0, Value::U16(10)).unwrap();
//! let text = pack_element(&elem, &PackOptions::default()).unwrap();
//! assert_eq!(text, "pack_doc.speed=0xa");
//! ```

use crate::element::ParamElement;
use crate::error::{Error, Result};
use crate::id::ParamId;
use crate::list::ParamList;
use crate::options::PackOptions;
use crate::registry;
use crate::schema::ParamSpec;
use crate::scratch;
use crate::value::Value;
use std::fmt::Write;

/// The maximum repeat tag.
pub(crate) const MAX_TAG: u8 = 99;

/// Packs one element to wire text.
///
/// # Errors
///
/// Fails when the element's identifier or field context does not resolve,
/// the tag exceeds 99, or the value variant does not match the declared
/// kind.
pub fn pack_element(element: &ParamElement, options: &PackOptions) -> Result<String> {
    scratch::note(pack_element_inner(element, options, false))
}

/// Packs a whole list, inserting the configured delimiter between
/// successive elements.
pub fn pack_list(list: &ParamList, options: &PackOptions) -> Result<String> {
    scratch::note(pack_list_mode(list, options, false))
}

pub(crate) fn pack_list_mode(
    list: &ParamList,
    options: &PackOptions,
    field_mode: bool,
) -> Result<String> {
    let mut out = String::new();
    for (i, element) in list.iter().enumerate() {
        if i > 0 {
            out.push(options.delimiter);
        }
        out.push_str(&pack_element_inner(element, options, field_mode)?);
    }
    Ok(out)
}

fn pack_element_inner(
    element: &ParamElement,
    options: &PackOptions,
    field_mode: bool,
) -> Result<String> {
    let (own_set, own_index) = registry::resolve(element.id)?;
    let own_spec = &own_set.params[own_index];
    if element.tag > MAX_TAG {
        return Err(Error::BadTag(u32::from(element.tag)));
    }

    let mut out = String::new();

    match element.context {
        Some(field_ref) => {
            let (ctx_set, ctx_index) = registry::resolve(field_ref.context)?;
            let ctx_spec = &ctx_set.params[ctx_index];
            let field = ctx_spec
                .field_by_id(field_ref.field_id)
                .ok_or_else(|| Error::UnknownField {
                    param: ctx_spec.name.clone(),
                    field: field_ref.field_id.to_string(),
                })?;

            if field_mode {
                out.push_str(&field.name);
            } else {
                if options.with_prefix {
                    out.push_str(&ctx_set.prefix);
                    out.push('.');
                }
                out.push_str(&ctx_spec.name);
                out.push('%');
                out.push_str(&field.name);
            }

            // An element whose own identifier differs from the field's is a
            // child of that field; its textual self-identifier rides along
            // in parentheses.
            if element.id != field.param {
                scratch::with_scratch(|buf| -> Result<()> {
                    identifier_into(element.id, options, buf)?;
                    out.push('(');
                    out.push_str(buf);
                    out.push(')');
                    Ok(())
                })?;
            }
        }
        None => {
            if field_mode {
                return Err(Error::message(format!(
                    "bag member `{}` carries no field context",
                    own_spec.name
                )));
            }
            if options.with_prefix {
                out.push_str(&own_set.prefix);
                out.push('.');
            }
            out.push_str(&own_spec.name);
        }
    }

    if element.tag > 0 {
        let _ = write!(out, "[{}]", element.tag);
    }

    if let Some(value) = &element.value {
        out.push_str(&pack_value(value, own_spec, options)?);
    }

    Ok(out)
}

/// Renders a value in its `=<text>` wire form, dispatched on the declared
/// kind.
pub(crate) fn pack_value(value: &Value, spec: &ParamSpec, options: &PackOptions) -> Result<String> {
    if value.kind() != spec.kind {
        return Err(Error::KindMismatch {
            expected: spec.kind,
            found: value.kind(),
        });
    }

    let mut out = String::new();
    out.push(options.assign);

    match value {
        Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            let _ = write!(out, "{}", value.as_i128().unwrap_or(0));
        }
        Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) | Value::Address(_) => {
            let _ = write!(out, "0x{:x}", value.as_i128().unwrap_or(0));
        }
        Value::Enum8(_) | Value::Enum16(_) | Value::Enum32(_) => {
            let n = value.as_i128().unwrap_or(0) as i64;
            match spec.enum_name_of(n) {
                Some(name) => out.push_str(name),
                None => {
                    let _ = write!(out, "{n}");
                }
            }
        }
        Value::UEnum8(_) | Value::UEnum16(_) | Value::UEnum32(_) => {
            let n = value.as_i128().unwrap_or(0);
            match spec.enum_name_of(n as i64) {
                Some(name) => out.push_str(name),
                None => {
                    let _ = write!(out, "0x{n:x}");
                }
            }
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Bool8(b) => out.push_str(if *b != 0 { "true" } else { "false" }),
        Value::Str(s) | Value::WideStr(s) => {
            out.push_str(&free_text(s, options));
        }
        Value::Array8(words) => {
            let _ = write!(out, "{:08x}", words.len());
            for w in words {
                let _ = write!(out, "{w:02x}");
            }
        }
        Value::Array16(words) => {
            let _ = write!(out, "{:08x}", words.len());
            for w in words {
                let _ = write!(out, "{w:04x}");
            }
        }
        Value::Array32(words) => {
            let _ = write!(out, "{:08x}", words.len());
            for w in words {
                let _ = write!(out, "{w:08x}");
            }
        }
        Value::StrTuple { key, value } => {
            out.push_str(&tuple_key_text(key, ':', options));
            out.push(':');
            out.push_str(&free_text(value, options));
        }
        Value::IntTuple { key, value } => {
            let _ = write!(out, "{key}:{value}");
        }
        Value::StrIntTuple { key, value } => {
            out.push_str(&tuple_key_text(key, ':', options));
            let _ = write!(out, ":{value}");
        }
        Value::StrUint8Tuple { key, value } => {
            out.push_str(&tuple_key_text(key, '/', options));
            let _ = write!(out, "/{value}");
        }
        Value::Bag(members) => {
            out.push('{');
            out.push_str(&pack_list_mode(members, options, true)?);
            out.push('}');
        }
    }

    Ok(out)
}

/// Writes the bare textual identifier of `id` (optional prefix plus name).
pub(crate) fn identifier_into(id: ParamId, options: &PackOptions, out: &mut String) -> Result<()> {
    let (set, index) = registry::resolve(id)?;
    if options.with_prefix {
        out.push_str(&set.prefix);
        out.push('.');
    }
    out.push_str(&set.params[index].name);
    Ok(())
}

fn free_text(s: &str, options: &PackOptions) -> String {
    escaped_text(s, &options.reserved(), options)
}

fn tuple_key_text(key: &str, separator: char, options: &PackOptions) -> String {
    let reserved = options.reserved();
    let with_sep = [reserved[0], reserved[1], reserved[2], separator];
    escaped_text(key, &with_sep, options)
}

/// Escapes reserved characters, the escape character itself, and boundary
/// whitespace. The first and last characters get an escape when they are
/// whitespace so the receiver's escape-aware trim leaves them intact.
fn escaped_text(s: &str, reserved: &[char], options: &PackOptions) -> String {
    let last = s.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(s.len());
    for (i, ch) in s.chars().enumerate() {
        let boundary_ws = ch.is_whitespace() && (i == 0 || i == last);
        if ch == options.escape || reserved.contains(&ch) || boundary_ws {
            out.push(options.escape);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamDef, ParamSetDef};
    use crate::value::ValueKind;

    fn spec_of(kind: ValueKind) -> ParamSpec {
        ParamSetDef::new(0, "t")
            .param(ParamDef::new("p", kind))
            .normalize()
            .params
            .remove(0)
    }

    #[test]
    fn test_unsigned_renders_bare_hex() {
        let options = PackOptions::default();
        let text = pack_value(&Value::U16(10), &spec_of(ValueKind::U16), &options).unwrap();
        assert_eq!(text, "=0xa");
    }

    #[test]
    fn test_signed_renders_decimal() {
        let options = PackOptions::default();
        let text = pack_value(&Value::I32(-42), &spec_of(ValueKind::I32), &options).unwrap();
        assert_eq!(text, "=-42");
    }

    #[test]
    fn test_enum_renders_symbolic_name() {
        let spec = ParamSetDef::new(0, "t")
            .param(ParamDef::new("p", ValueKind::Enum8).enums([("slow", 1), ("fast", 2)]))
            .normalize()
            .params
            .remove(0);
        let options = PackOptions::default();
        assert_eq!(pack_value(&Value::Enum8(2), &spec, &options).unwrap(), "=fast");
        assert_eq!(pack_value(&Value::Enum8(9), &spec, &options).unwrap(), "=9");
    }

    #[test]
    fn test_array_encoding() {
        let options = PackOptions::default();
        let text = pack_value(
            &Value::Array16(vec![0xab, 0x1234]),
            &spec_of(ValueKind::Array16),
            &options,
        )
        .unwrap();
        assert_eq!(text, "=0000000200ab1234");
    }

    #[test]
    fn test_string_escapes_delimiter() {
        let options = PackOptions::default();
        let text = pack_value(&Value::Str("a,b".into()), &spec_of(ValueKind::Str), &options).unwrap();
        assert_eq!(text, "=a\\,b");
    }

    #[test]
    fn test_tuple_forms() {
        let options = PackOptions::default();
        let st = Value::StrTuple {
            key: "k".into(),
            value: "v".into(),
        };
        assert_eq!(
            pack_value(&st, &spec_of(ValueKind::StrTuple), &options).unwrap(),
            "=k:v"
        );
        let su = Value::StrUint8Tuple {
            key: "lvl".into(),
            value: 7,
        };
        assert_eq!(
            pack_value(&su, &spec_of(ValueKind::StrUint8Tuple), &options).unwrap(),
            "=lvl/7"
        );
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let options = PackOptions::default();
        assert!(matches!(
            pack_value(&Value::U8(1), &spec_of(ValueKind::I8), &options),
            Err(Error::KindMismatch { .. })
        ));
    }
}
