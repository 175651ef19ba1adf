//! Parsing wire text back into parameter elements.
//!
//! The unpacking engine is the strict inverse of [`crate::pack`]: it splits
//! a list into element spans (escape-aware, brace-quoted spans stay
//! atomic), resolves each identifier against the registry, and decodes the
//! value text through the parameter's declared kind with full validation.
//!
//! Identifier resolution tries, in order: a registered `prefix.` lead-in on
//! the text itself, the caller's explicit set-id hint, or the caller's
//! context hint (when unpacking the members of a bag, where the whole
//! identifier is a field name of the context parameter).
//!
//! Validation is never lenient: a value outside its declared bounds, a
//! value matching no entry of a configured range table, an unknown enum
//! name, or numeric text with trailing garbage all abort the operation.
//! When a range table is configured, the id of the matched range is
//! reported through [`Unpacked::range_id`].
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{unpack_element, ParamDef, ParamSetDef, PackOptions, Value, ValueKind};
//!
//! parampack::register_param_set(
//!     &ParamSetDef::new(35, "unpack_doc").param(ParamDef::new("speed", ValueKind::U16)),
//! )
//! .unwrap();
//!
//! let options = PackOptions::default();
//! let hex = unpack_element("unpack_doc.speed=0xA", &options).unwrap();
//! let dec = unpack_element("unpack_doc.speed=10", &options).unwrap();
//! assert_eq!(hex.element.value(), Some(&Value::U16(10)));
//! assert_eq!(hex.element.value(), dec.element.value());
//! ```

use crate::element::{FieldRef, ParamElement};
use crate::error::{Error, Result};
use crate::escape::{
    find_unescaped, matching_close, remove_escape, split_unescaped, trim_escaped,
};
use crate::id::ParamId;
use crate::list::ParamList;
use crate::options::PackOptions;
use crate::pack::{pack_value, MAX_TAG};
use crate::registry;
use crate::schema::ParamSpec;
use crate::scratch;
use crate::value::{Value, ValueKind};

/// The result of unpacking one element: the element itself plus the id of
/// the matched range-table entry (`0` when the parameter has no range
/// table).
#[derive(Clone, Debug, PartialEq)]
pub struct Unpacked {
    pub element: ParamElement,
    pub range_id: i32,
}

/// Resolution hints for identifiers that carry no registered prefix.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Hints {
    pub set_id: Option<u32>,
    pub context: Option<ParamId>,
}

/// Unpacks one element span, resolving the identifier by its `prefix.`
/// lead-in.
pub fn unpack_element(span: &str, options: &PackOptions) -> Result<Unpacked> {
    scratch::note(unpack_span(span, Hints::default(), options))
}

/// Unpacks one element span, falling back to `set_id` when the identifier
/// carries no registered prefix.
pub fn unpack_element_in_set(span: &str, set_id: u32, options: &PackOptions) -> Result<Unpacked> {
    scratch::note(unpack_span(
        span,
        Hints {
            set_id: Some(set_id),
            context: None,
        },
        options,
    ))
}

/// Unpacks one element span as a member of the composite parameter
/// `context`: the whole identifier is a field name of that parameter.
pub fn unpack_element_in_context(
    span: &str,
    context: ParamId,
    options: &PackOptions,
) -> Result<Unpacked> {
    scratch::note(unpack_span(
        span,
        Hints {
            set_id: None,
            context: Some(context),
        },
        options,
    ))
}

/// Unpacks a whole delimited list. Any failing span aborts the operation
/// and discards all already-built elements.
pub fn unpack_list(text: &str, options: &PackOptions) -> Result<ParamList> {
    scratch::note(unpack_list_hints(text, Hints::default(), options))
}

/// List variant of [`unpack_element_in_context`], used for bag bodies.
pub fn unpack_list_in_context(
    text: &str,
    context: ParamId,
    options: &PackOptions,
) -> Result<ParamList> {
    scratch::note(unpack_list_hints(
        text,
        Hints {
            set_id: None,
            context: Some(context),
        },
        options,
    ))
}

pub(crate) fn unpack_list_hints(
    text: &str,
    hints: Hints,
    options: &PackOptions,
) -> Result<ParamList> {
    let text = trim_escaped(text, options.escape);
    if text.is_empty() {
        return Ok(ParamList::new());
    }
    let mut list = ParamList::new();
    for span in split_unescaped(text, options.delimiter, options.escape) {
        let span = trim_escaped(span, options.escape);
        if span.is_empty() {
            return Err(Error::syntax(text, "empty element between delimiters"));
        }
        list.push(unpack_span(span, hints, options)?.element);
    }
    Ok(list)
}

fn unpack_span(span: &str, hints: Hints, options: &PackOptions) -> Result<Unpacked> {
    let span = trim_escaped(span, options.escape);
    if span.is_empty() {
        return Err(Error::syntax(span, "empty element"));
    }

    let (ident_text, value_text) = match find_unescaped(span, options.assign, options.escape) {
        Some(pos) => (
            &span[..pos],
            Some(&span[pos + options.assign.len_utf8()..]),
        ),
        None => (span, None),
    };

    let resolved = parse_identifier(trim_escaped(ident_text, options.escape), hints, options)?;
    let mut element = ParamElement::new(resolved.id, resolved.tag);
    element.context = resolved.context;

    let mut range_id = 0;
    if let Some(value_text) = value_text {
        let spec = registry::resolve_spec(resolved.id)?;
        let (value, matched) = unpack_value(resolved.id, &spec, value_text, options)?;
        element.value = Some(value);
        range_id = matched;
    }

    Ok(Unpacked { element, range_id })
}

/// A fully resolved identifier string.
pub(crate) struct ResolvedIdent {
    pub id: ParamId,
    pub tag: u8,
    pub context: Option<FieldRef>,
}

pub(crate) fn parse_identifier(
    ident: &str,
    hints: Hints,
    options: &PackOptions,
) -> Result<ResolvedIdent> {
    let escape = options.escape;
    let mut rest = ident;

    // `[tag]` suffix.
    let mut tag = 0u8;
    if rest.ends_with(']') {
        let open = find_unescaped(rest, '[', escape)
            .ok_or_else(|| Error::syntax(ident, "unmatched `]`"))?;
        if matching_close(rest, open, '[', ']', escape) != Some(rest.len() - 1) {
            return Err(Error::syntax(ident, "malformed tag suffix"));
        }
        let inner = &rest[open + 1..rest.len() - 1];
        let parsed: u32 = inner
            .parse()
            .map_err(|_| Error::syntax(ident, "tag is not a number"))?;
        if parsed > u32::from(MAX_TAG) {
            return Err(Error::BadTag(parsed));
        }
        tag = parsed as u8;
        rest = &rest[..open];
    }

    // `(child)` suffix.
    let mut child_text = None;
    if rest.ends_with(')') {
        let open = find_unescaped(rest, '(', escape)
            .ok_or_else(|| Error::syntax(ident, "unmatched `)`"))?;
        if matching_close(rest, open, '(', ')', escape) != Some(rest.len() - 1) {
            return Err(Error::syntax(ident, "malformed child suffix"));
        }
        child_text = Some(&rest[open + 1..rest.len() - 1]);
        rest = &rest[..open];
    }

    // `%field` suffix.
    let mut field_name = None;
    if let Some(pos) = find_unescaped(rest, '%', escape) {
        field_name = Some(&rest[pos + 1..]);
        rest = &rest[..pos];
    }

    if let Some(ctx_id) = hints.context {
        // Inside a bag the whole base is a field name of the context.
        if field_name.is_some() {
            return Err(Error::syntax(ident, "`%` field suffix not allowed here"));
        }
        let ctx_spec = registry::resolve_spec(ctx_id)?;
        let field = ctx_spec
            .field_by_name(rest)
            .ok_or_else(|| Error::UnknownField {
                param: ctx_spec.name.clone(),
                field: rest.to_string(),
            })?;
        let context = Some(FieldRef {
            context: ctx_id,
            field_id: field.field_id,
        });
        let id = match child_text {
            Some(child) => resolve_child(field.param, child, options)?,
            None => field.param,
        };
        return Ok(ResolvedIdent { id, tag, context });
    }

    let (set, name) = resolve_set_and_name(rest, hints, options)?;
    let (index, spec) = set
        .find_by_name(name)
        .ok_or_else(|| Error::UnknownName(name.to_string()))?;
    let base_id = set.param_id(index);

    let mut id = base_id;
    let mut context = None;
    if let Some(field_name) = field_name {
        let field = spec
            .field_by_name(field_name)
            .ok_or_else(|| Error::UnknownField {
                param: spec.name.clone(),
                field: field_name.to_string(),
            })?;
        context = Some(FieldRef {
            context: base_id,
            field_id: field.field_id,
        });
        id = field.param;
    }

    if let Some(child) = child_text {
        id = resolve_child(id, child, options)?;
    }

    Ok(ResolvedIdent { id, tag, context })
}

/// Resolves a `(child)` identifier against its parent's declared children.
fn resolve_child(parent: ParamId, child_text: &str, options: &PackOptions) -> Result<ParamId> {
    let parent_spec = registry::resolve_spec(parent)?;
    let child_id = resolve_plain(
        child_text,
        Hints {
            set_id: Some(parent.set_id()),
            context: None,
        },
        options,
    )?;
    if !parent_spec.is_declared_child(child_id) {
        return Err(Error::NotAChild {
            parent: parent_spec.name,
            child: child_text.to_string(),
        });
    }
    Ok(child_id)
}

/// Resolves a bare `[prefix.]name` identifier with no suffixes.
fn resolve_plain(ident: &str, hints: Hints, options: &PackOptions) -> Result<ParamId> {
    let (set, name) = resolve_set_and_name(ident, hints, options)?;
    let (index, _) = set
        .find_by_name(name)
        .ok_or_else(|| Error::UnknownName(name.to_string()))?;
    Ok(set.param_id(index))
}

fn resolve_set_and_name<'a>(
    ident: &'a str,
    hints: Hints,
    options: &PackOptions,
) -> Result<(std::sync::Arc<crate::schema::ParamSet>, &'a str)> {
    if let Some(dot) = find_unescaped(ident, '.', options.escape) {
        let prefix = &ident[..dot];
        if let Some(set) = registry::find_param_set(None, Some(prefix)) {
            return Ok((set, &ident[dot + 1..]));
        }
    }
    let set_id = hints.set_id.ok_or_else(|| Error::UnknownSet {
        set_id: None,
        prefix: Some(ident.to_string()),
    })?;
    let set = registry::find_param_set(Some(set_id), None).ok_or(Error::UnknownSet {
        set_id: Some(set_id),
        prefix: None,
    })?;
    Ok((set, ident))
}

/// Decodes value text through the declared kind, returning the value and
/// the matched range id (`0` without a range table).
pub(crate) fn unpack_value(
    own_id: ParamId,
    spec: &ParamSpec,
    text: &str,
    options: &PackOptions,
) -> Result<(Value, i32)> {
    let text = trim_escaped(text, options.escape);
    match spec.kind {
        ValueKind::Bool => match text {
            "true" => Ok((Value::Bool(true), 0)),
            "false" => Ok((Value::Bool(false), 0)),
            _ => Err(Error::syntax(text, "expected `true` or `false`")),
        },
        ValueKind::Str | ValueKind::WideStr => {
            let s = remove_escape(text, options.escape);
            check_bounds_only(spec, s.chars().count() as i128)?;
            let value = if spec.kind == ValueKind::Str {
                Value::Str(s)
            } else {
                Value::WideStr(s)
            };
            Ok((value, 0))
        }
        ValueKind::Array8 | ValueKind::Array16 | ValueKind::Array32 => {
            unpack_array(spec, text).map(|v| (v, 0))
        }
        ValueKind::StrTuple
        | ValueKind::IntTuple
        | ValueKind::StrIntTuple
        | ValueKind::StrUint8Tuple => unpack_tuple(spec.kind, text, options).map(|v| (v, 0)),
        ValueKind::Bag => {
            let close = matching_close(text, 0, '{', '}', options.escape)
                .filter(|&end| end == text.len() - 1)
                .ok_or_else(|| Error::syntax(text, "bag value is not a matched `{...}`"))?;
            let inner = &text[1..close];
            let members = unpack_list_hints(
                inner,
                Hints {
                    set_id: None,
                    context: Some(own_id),
                },
                options,
            )?;
            check_bounds_only(spec, members.len() as i128)?;
            Ok((Value::Bag(members), 0))
        }
        _ => {
            let n = parse_numeric(spec, text)?;
            let range_id = check_bounds_and_ranges(spec, n)?;
            Ok((numeric_value(spec.kind, n), range_id))
        }
    }
}

/// Re-runs a native value through its own wire form, so constructed values
/// obey exactly the unpack-side invariants.
pub(crate) fn revalidate(
    own_id: ParamId,
    spec: &ParamSpec,
    value: &Value,
    options: &PackOptions,
) -> Result<Value> {
    let packed = pack_value(value, spec, options)?;
    let text = packed.strip_prefix(options.assign).unwrap_or(&packed);
    let (validated, _) = unpack_value(own_id, spec, text, options)?;
    Ok(validated)
}

fn parse_numeric(spec: &ParamSpec, text: &str) -> Result<i128> {
    if text.is_empty() {
        return Err(Error::syntax(text, "empty numeric value"));
    }

    if spec.kind.is_enum() {
        if let Some(v) = spec.enum_value_of(text) {
            return Ok(i128::from(v));
        }
    }
    if spec.kind == ValueKind::Bool8 {
        match text {
            "true" => return width_check(spec.kind, 1),
            "false" => return width_check(spec.kind, 0),
            _ => {}
        }
    }

    let accepts_hex = spec.kind.is_hex() || spec.kind == ValueKind::Bool8;
    let n: i128 = if accepts_hex && (text.starts_with("0x") || text.starts_with("0X")) {
        let digits = &text[2..];
        u128::from_str_radix(digits, 16)
            .map(|v| v as i128)
            .map_err(|_| Error::syntax(text, "malformed hexadecimal value"))?
    } else {
        text.parse()
            .map_err(|_| Error::syntax(text, "malformed numeric value"))?
    };

    width_check(spec.kind, n)
}

fn width_check(kind: ValueKind, n: i128) -> Result<i128> {
    let (min, max) = kind_range(kind);
    if n < min || n > max {
        return Err(Error::OutOfBounds { value: n, min, max });
    }
    Ok(n)
}

fn kind_range(kind: ValueKind) -> (i128, i128) {
    match kind {
        ValueKind::I8 | ValueKind::Enum8 => (i128::from(i8::MIN), i128::from(i8::MAX)),
        ValueKind::I16 | ValueKind::Enum16 => (i128::from(i16::MIN), i128::from(i16::MAX)),
        ValueKind::I32 | ValueKind::Enum32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
        ValueKind::I64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
        ValueKind::U8 | ValueKind::UEnum8 | ValueKind::Bool8 => (0, i128::from(u8::MAX)),
        ValueKind::U16 | ValueKind::UEnum16 => (0, i128::from(u16::MAX)),
        ValueKind::U32 | ValueKind::UEnum32 => (0, i128::from(u32::MAX)),
        ValueKind::U64 | ValueKind::Address => (0, i128::from(u64::MAX)),
        _ => (i128::MIN, i128::MAX),
    }
}

fn numeric_value(kind: ValueKind, n: i128) -> Value {
    match kind {
        ValueKind::I8 => Value::I8(n as i8),
        ValueKind::I16 => Value::I16(n as i16),
        ValueKind::I32 => Value::I32(n as i32),
        ValueKind::I64 => Value::I64(n as i64),
        ValueKind::U8 => Value::U8(n as u8),
        ValueKind::U16 => Value::U16(n as u16),
        ValueKind::U32 => Value::U32(n as u32),
        ValueKind::U64 => Value::U64(n as u64),
        ValueKind::Enum8 => Value::Enum8(n as i8),
        ValueKind::Enum16 => Value::Enum16(n as i16),
        ValueKind::Enum32 => Value::Enum32(n as i32),
        ValueKind::UEnum8 => Value::UEnum8(n as u8),
        ValueKind::UEnum16 => Value::UEnum16(n as u16),
        ValueKind::UEnum32 => Value::UEnum32(n as u32),
        ValueKind::Bool8 => Value::Bool8(n as u8),
        ValueKind::Address => Value::Address(n as u64),
        _ => unreachable!("numeric_value only called for numeric kinds"),
    }
}

fn check_bounds_and_ranges(spec: &ParamSpec, n: i128) -> Result<i32> {
    if let Some(bounds) = spec.bounds {
        if !bounds.contains(n) {
            return Err(Error::OutOfBounds {
                value: n,
                min: bounds.min,
                max: bounds.max,
            });
        }
    }
    match &spec.ranges {
        Some(ranges) => ranges
            .iter()
            .find(|r| r.first <= n && n <= r.last)
            .map(|r| r.range_id)
            .ok_or(Error::NoMatchingRange(n)),
        None => Ok(0),
    }
}

fn check_bounds_only(spec: &ParamSpec, n: i128) -> Result<()> {
    if let Some(bounds) = spec.bounds {
        if !bounds.contains(n) {
            return Err(Error::OutOfBounds {
                value: n,
                min: bounds.min,
                max: bounds.max,
            });
        }
    }
    Ok(())
}

fn unpack_array(spec: &ParamSpec, text: &str) -> Result<Value> {
    let word_size = spec
        .kind
        .array_word_size()
        .unwrap_or(1);
    let digits = word_size * 2;

    let header = text
        .get(..8)
        .ok_or_else(|| Error::syntax(text, "missing 8-digit array length"))?;
    let count = usize::from_str_radix(header, 16)
        .map_err(|_| Error::syntax(text, "malformed array length"))?;
    let body = &text[8..];
    if body.len() != count * digits {
        return Err(Error::syntax(text, "array body does not match its length"));
    }

    check_bounds_only(spec, count as i128)?;

    let mut raw = Vec::with_capacity(count);
    for i in 0..count {
        let chunk = body
            .get(i * digits..(i + 1) * digits)
            .ok_or_else(|| Error::syntax(text, "truncated array word"))?;
        let word = u32::from_str_radix(chunk, 16)
            .map_err(|_| Error::syntax(text, "malformed array word"))?;
        raw.push(word);
    }

    Ok(match spec.kind {
        ValueKind::Array8 => Value::Array8(raw.into_iter().map(|w| w as u8).collect()),
        ValueKind::Array16 => Value::Array16(raw.into_iter().map(|w| w as u16).collect()),
        _ => Value::Array32(raw),
    })
}

fn unpack_tuple(kind: ValueKind, text: &str, options: &PackOptions) -> Result<Value> {
    let separator = if kind == ValueKind::StrUint8Tuple {
        '/'
    } else {
        ':'
    };
    let pos = find_unescaped(text, separator, options.escape)
        .ok_or_else(|| Error::syntax(text, "missing tuple separator"))?;
    let key_raw = &text[..pos];
    let val_raw = &text[pos + separator.len_utf8()..];

    let parse_i64 = |s: &str| -> Result<i64> {
        s.parse()
            .map_err(|_| Error::syntax(s, "malformed tuple integer"))
    };

    Ok(match kind {
        ValueKind::StrTuple => Value::StrTuple {
            key: remove_escape(key_raw, options.escape),
            value: remove_escape(val_raw, options.escape),
        },
        ValueKind::IntTuple => Value::IntTuple {
            key: parse_i64(key_raw)?,
            value: parse_i64(val_raw)?,
        },
        ValueKind::StrIntTuple => Value::StrIntTuple {
            key: remove_escape(key_raw, options.escape),
            value: parse_i64(val_raw)?,
        },
        _ => {
            let value: u8 = if let Some(hex) = val_raw.strip_prefix("0x") {
                u8::from_str_radix(hex, 16)
                    .map_err(|_| Error::syntax(val_raw, "malformed tuple byte"))?
            } else {
                val_raw
                    .parse()
                    .map_err(|_| Error::syntax(val_raw, "malformed tuple byte"))?
            };
            Value::StrUint8Tuple {
                key: remove_escape(key_raw, options.escape),
                value,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamDef, ParamSetDef, RangeEntry};

    fn spec_with(def: ParamDef) -> ParamSpec {
        ParamSetDef::new(0, "t").param(def).normalize().params.remove(0)
    }

    fn plain(kind: ValueKind) -> ParamSpec {
        spec_with(ParamDef::new("p", kind))
    }

    fn options() -> PackOptions {
        PackOptions::default()
    }

    #[test]
    fn test_numeric_hex_autodetect() {
        let spec = plain(ValueKind::U16);
        let id = ParamId::new(0, 0);
        for text in ["10", "0xA", "0Xa"] {
            let (value, range) = unpack_value(id, &spec, text, &options()).unwrap();
            assert_eq!(value, Value::U16(10), "text {text:?}");
            assert_eq!(range, 0);
        }
    }

    #[test]
    fn test_numeric_rejects_trailing_garbage() {
        let spec = plain(ValueKind::U16);
        let id = ParamId::new(0, 0);
        assert!(unpack_value(id, &spec, "10q", &options()).is_err());
        assert!(unpack_value(id, &spec, "0x", &options()).is_err());
        assert!(unpack_value(id, &spec, "", &options()).is_err());
    }

    #[test]
    fn test_width_limits() {
        let id = ParamId::new(0, 0);
        assert!(unpack_value(id, &plain(ValueKind::U8), "256", &options()).is_err());
        assert!(unpack_value(id, &plain(ValueKind::U8), "-1", &options()).is_err());
        assert!(unpack_value(id, &plain(ValueKind::I8), "-128", &options()).is_ok());
        assert!(unpack_value(id, &plain(ValueKind::I8), "-129", &options()).is_err());
    }

    #[test]
    fn test_bounds_enforced_not_clamped() {
        let spec = spec_with(ParamDef::new("p", ValueKind::U16).bounds(5, 10));
        let id = ParamId::new(0, 0);
        assert!(unpack_value(id, &spec, "7", &options()).is_ok());
        assert!(matches!(
            unpack_value(id, &spec, "11", &options()),
            Err(Error::OutOfBounds { value: 11, .. })
        ));
    }

    #[test]
    fn test_range_table_reports_matched_id() {
        let spec = spec_with(ParamDef::new("p", ValueKind::U16).ranges(vec![
            RangeEntry::new(0, 9, 1),
            RangeEntry::new(10, 99, 2),
        ]));
        let id = ParamId::new(0, 0);
        assert_eq!(unpack_value(id, &spec, "5", &options()).unwrap().1, 1);
        assert_eq!(unpack_value(id, &spec, "42", &options()).unwrap().1, 2);
        assert!(matches!(
            unpack_value(id, &spec, "100", &options()),
            Err(Error::NoMatchingRange(100))
        ));
    }

    #[test]
    fn test_enum_symbolic_and_numeric() {
        let spec = spec_with(ParamDef::new("p", ValueKind::Enum8).enums([("off", 0), ("on", 1)]));
        let id = ParamId::new(0, 0);
        assert_eq!(
            unpack_value(id, &spec, "on", &options()).unwrap().0,
            Value::Enum8(1)
        );
        assert_eq!(
            unpack_value(id, &spec, "0", &options()).unwrap().0,
            Value::Enum8(0)
        );
        assert!(unpack_value(id, &spec, "blink", &options()).is_err());
    }

    #[test]
    fn test_bool_forms() {
        let id = ParamId::new(0, 0);
        assert_eq!(
            unpack_value(id, &plain(ValueKind::Bool), "true", &options())
                .unwrap()
                .0,
            Value::Bool(true)
        );
        assert!(unpack_value(id, &plain(ValueKind::Bool), "1", &options()).is_err());
        assert_eq!(
            unpack_value(id, &plain(ValueKind::Bool8), "1", &options())
                .unwrap()
                .0,
            Value::Bool8(1)
        );
        assert_eq!(
            unpack_value(id, &plain(ValueKind::Bool8), "false", &options())
                .unwrap()
                .0,
            Value::Bool8(0)
        );
    }

    #[test]
    fn test_string_unescapes_and_checks_length() {
        let id = ParamId::new(0, 0);
        assert_eq!(
            unpack_value(id, &plain(ValueKind::Str), "a\\,b", &options())
                .unwrap()
                .0,
            Value::Str("a,b".into())
        );
        let bounded = spec_with(ParamDef::new("p", ValueKind::Str).bounds(1, 3));
        assert!(unpack_value(id, &bounded, "abcd", &options()).is_err());
    }

    #[test]
    fn test_array_decoding() {
        let id = ParamId::new(0, 0);
        let (value, _) = unpack_value(
            id,
            &plain(ValueKind::Array16),
            "0000000200ab1234",
            &options(),
        )
        .unwrap();
        assert_eq!(value, Value::Array16(vec![0xab, 0x1234]));

        assert!(unpack_value(id, &plain(ValueKind::Array16), "0000000200ab", &options()).is_err());
        assert!(unpack_value(id, &plain(ValueKind::Array16), "0000", &options()).is_err());
        assert_eq!(
            unpack_value(id, &plain(ValueKind::Array8), "00000000", &options())
                .unwrap()
                .0,
            Value::Array8(vec![])
        );
    }

    #[test]
    fn test_tuple_decoding() {
        let id = ParamId::new(0, 0);
        assert_eq!(
            unpack_value(id, &plain(ValueKind::StrTuple), "k:v", &options())
                .unwrap()
                .0,
            Value::StrTuple {
                key: "k".into(),
                value: "v".into()
            }
        );
        assert_eq!(
            unpack_value(id, &plain(ValueKind::StrUint8Tuple), "lvl/7", &options())
                .unwrap()
                .0,
            Value::StrUint8Tuple {
                key: "lvl".into(),
                value: 7
            }
        );
        assert!(unpack_value(id, &plain(ValueKind::StrTuple), "noseparator", &options()).is_err());
    }

    #[test]
    fn test_revalidate_is_the_wire_check() {
        let spec = spec_with(ParamDef::new("p", ValueKind::U16).bounds(0, 100));
        let id = ParamId::new(0, 0);
        assert!(revalidate(id, &spec, &Value::U16(50), &options()).is_ok());
        assert!(revalidate(id, &spec, &Value::U16(200), &options()).is_err());
    }
}
