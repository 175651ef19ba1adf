//! Parameter-set descriptors.
//!
//! A consumer describes each of its parameter families once as a
//! [`ParamSetDef`]: a numeric set id, a short unique prefix, and a dense
//! array of per-parameter [`ParamDef`] descriptors. Registration normalizes
//! the definition into an immutable [`ParamSet`] owned by the registry.
//!
//! ## Legacy layouts
//!
//! Older descriptor tables carried inline min/max bounds and a dense
//! name array instead of the range and enum tables. [`ParamSetDef::normalize`]
//! is the one-time upgrade pass: a pure transform that synthesizes the
//! equivalent tables, leaving the original definition untouched. The
//! synthesized tables live inside the normalized set and are dropped with
//! it at teardown.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{Access, ParamDef, ParamSetDef, ValueKind};
//!
//! let def = ParamSetDef::new(9, "demo")
//!     .param(ParamDef::new("speed", ValueKind::U16).bounds(0, 9000))
//!     .param(ParamDef::new("label", ValueKind::Str).access(Access::read_only()));
//! let set = def.normalize();
//! assert_eq!(set.params.len(), 2);
//! ```

use crate::id::ParamId;
use crate::value::{Value, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered name/value table for enum kinds: insertion order is preserved
/// so symbolic rendering is deterministic.
pub type EnumTable = IndexMap<String, i64>;

/// Inclusive min/max bounds.
///
/// Interpreted against the parameter kind: value bounds for numeric kinds,
/// length bounds for strings and arrays, member-count bounds for bags.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i128,
    pub max: i128,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: i128, max: i128) -> Self {
        Bounds { min, max }
    }

    /// Returns `true` when `value` lies inside the inclusive bounds.
    #[must_use]
    pub const fn contains(&self, value: i128) -> bool {
        self.min <= value && value <= self.max
    }
}

/// One entry of an ordered, non-overlapping integer-range table.
///
/// When a parameter carries a range table, unpacking reports the id of the
/// entry containing the value instead of the plain success code; a value in
/// no entry is a hard failure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeEntry {
    pub first: i128,
    pub last: i128,
    pub range_id: i32,
}

impl RangeEntry {
    #[must_use]
    pub const fn new(first: i128, last: i128, range_id: i32) -> Self {
        RangeEntry {
            first,
            last,
            range_id,
        }
    }
}

/// One slot of a composite ("bag") parameter's field table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field slot id, unique within the owning parameter.
    pub field_id: u32,
    /// Wire name of the field.
    pub name: String,
    /// The field's own parameter identifier (defines the field's type).
    pub param: ParamId,
    /// The composite parameter that owns this field.
    pub context: ParamId,
}

impl FieldDef {
    #[must_use]
    pub fn new(field_id: u32, name: &str, param: ParamId, context: ParamId) -> Self {
        FieldDef {
            field_id,
            name: name.to_string(),
            param,
            context,
        }
    }
}

/// Access-control flags for one parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    pub get: bool,
    pub set: bool,
    pub config: bool,
}

impl Default for Access {
    fn default() -> Self {
        Access {
            get: true,
            set: true,
            config: true,
        }
    }
}

impl Access {
    /// All operations permitted.
    #[must_use]
    pub const fn all() -> Self {
        Access {
            get: true,
            set: true,
            config: true,
        }
    }

    /// Get only.
    #[must_use]
    pub const fn read_only() -> Self {
        Access {
            get: true,
            set: false,
            config: false,
        }
    }

    /// Nothing permitted; also the result for blacklisted parameters.
    #[must_use]
    pub const fn none() -> Self {
        Access {
            get: false,
            set: false,
            config: false,
        }
    }
}

/// Consumer-side descriptor for one parameter.
///
/// Built with the `ParamDef::new(..).bounds(..).ranges(..)` chain. The
/// `legacy_*` fields reproduce the old descriptor layout and only exist to
/// feed the normalization pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub kind: ValueKind,
    pub bounds: Option<Bounds>,
    pub ranges: Option<Vec<RangeEntry>>,
    pub enums: Option<EnumTable>,
    pub fields: Option<Vec<FieldDef>>,
    pub children: Option<Vec<ParamId>>,
    pub access: Access,
    pub default: Option<Value>,
    /// Old-style inline min/max, upgraded into a single-entry range table.
    pub legacy_bounds: Option<(i64, i64)>,
    /// Old-style dense name array, upgraded into an enum table with
    /// `names[i] -> i`.
    pub legacy_enum_names: Option<Vec<String>>,
}

impl ParamDef {
    #[must_use]
    pub fn new(name: &str, kind: ValueKind) -> Self {
        ParamDef {
            name: name.to_string(),
            kind,
            bounds: None,
            ranges: None,
            enums: None,
            fields: None,
            children: None,
            access: Access::default(),
            default: None,
            legacy_bounds: None,
            legacy_enum_names: None,
        }
    }

    #[must_use]
    pub fn bounds(mut self, min: i128, max: i128) -> Self {
        self.bounds = Some(Bounds::new(min, max));
        self
    }

    #[must_use]
    pub fn ranges(mut self, ranges: Vec<RangeEntry>) -> Self {
        self.ranges = Some(ranges);
        self
    }

    #[must_use]
    pub fn enums<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.enums = Some(entries.into_iter().map(|(n, v)| (n.into(), v)).collect());
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: Vec<FieldDef>) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub fn children(mut self, children: Vec<ParamId>) -> Self {
        self.children = Some(children);
        self
    }

    #[must_use]
    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn legacy_bounds(mut self, min: i64, max: i64) -> Self {
        self.legacy_bounds = Some((min, max));
        self
    }

    #[must_use]
    pub fn legacy_enum_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legacy_enum_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Consumer-side descriptor for a whole parameter set.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamSetDef {
    pub set_id: u32,
    pub prefix: String,
    pub params: Vec<ParamDef>,
}

impl ParamSetDef {
    #[must_use]
    pub fn new(set_id: u32, prefix: &str) -> Self {
        ParamSetDef {
            set_id,
            prefix: prefix.to_string(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, def: ParamDef) -> Self {
        self.params.push(def);
        self
    }

    /// The one-time upgrade pass: converts this definition into the
    /// immutable registered form, synthesizing range and enum tables from
    /// the legacy fields where the modern tables are absent.
    #[must_use]
    pub fn normalize(&self) -> ParamSet {
        let params = self
            .params
            .iter()
            .map(|def| {
                let ranges = def.ranges.clone().or_else(|| {
                    def.legacy_bounds.map(|(min, max)| {
                        vec![RangeEntry::new(i128::from(min), i128::from(max), 0)]
                    })
                });
                let enums = def.enums.clone().or_else(|| {
                    def.legacy_enum_names.as_ref().map(|names| {
                        names
                            .iter()
                            .enumerate()
                            .map(|(i, n)| (n.clone(), i as i64))
                            .collect()
                    })
                });
                let bounds = def.bounds.or_else(|| {
                    def.legacy_bounds
                        .map(|(min, max)| Bounds::new(i128::from(min), i128::from(max)))
                });
                ParamSpec {
                    name: def.name.clone(),
                    kind: def.kind,
                    bounds,
                    ranges,
                    enums,
                    fields: def.fields.clone(),
                    children: def.children.clone(),
                    access: def.access,
                    default: def.default.clone(),
                }
            })
            .collect();
        ParamSet {
            set_id: self.set_id,
            prefix: self.prefix.clone(),
            params,
        }
    }
}

/// Registered (normalized) descriptor for one parameter. Immutable after
/// registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ValueKind,
    pub bounds: Option<Bounds>,
    pub ranges: Option<Vec<RangeEntry>>,
    pub enums: Option<EnumTable>,
    pub fields: Option<Vec<FieldDef>>,
    pub children: Option<Vec<ParamId>>,
    pub access: Access,
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Looks up a field slot by id.
    #[must_use]
    pub fn field_by_id(&self, field_id: u32) -> Option<&FieldDef> {
        self.fields
            .as_ref()?
            .iter()
            .find(|f| f.field_id == field_id)
    }

    /// Looks up a field slot by wire name (exact match).
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.fields.as_ref()?.iter().find(|f| f.name == name)
    }

    /// Returns `true` when `id` appears in the declared children table.
    #[must_use]
    pub fn is_declared_child(&self, id: ParamId) -> bool {
        self.children
            .as_ref()
            .is_some_and(|children| children.contains(&id))
    }

    /// Symbolic name for an enum value, when the table knows it.
    #[must_use]
    pub fn enum_name_of(&self, value: i64) -> Option<&str> {
        let table = self.enums.as_ref()?;
        table
            .iter()
            .find_map(|(name, v)| (*v == value).then_some(name.as_str()))
    }

    /// Enum value for a symbolic name.
    #[must_use]
    pub fn enum_value_of(&self, name: &str) -> Option<i64> {
        self.enums.as_ref()?.get(name).copied()
    }
}

/// Registered (normalized) parameter set, shared out of the registry via
/// `Arc`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    pub set_id: u32,
    pub prefix: String,
    pub params: Vec<ParamSpec>,
}

impl ParamSet {
    /// Returns the spec at `index`, when in bounds.
    #[must_use]
    pub fn spec(&self, index: usize) -> Option<&ParamSpec> {
        self.params.get(index)
    }

    /// Exact length-and-content name lookup, returning the slot index and
    /// its spec.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<(usize, &ParamSpec)> {
        self.params
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.name == name)
    }

    /// The identifier addressing slot `index` of this set.
    #[must_use]
    pub fn param_id(&self, index: usize) -> ParamId {
        ParamId::new(self.set_id, index as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_passes_modern_tables_through() {
        let def = ParamSetDef::new(1, "p").param(
            ParamDef::new("mode", ValueKind::Enum8)
                .enums([("off", 0), ("on", 1)])
                .ranges(vec![RangeEntry::new(0, 1, 7)]),
        );
        let set = def.normalize();
        let spec = set.spec(0).unwrap();
        assert_eq!(spec.enum_value_of("on"), Some(1));
        assert_eq!(spec.ranges.as_ref().unwrap()[0].range_id, 7);
    }

    #[test]
    fn test_normalize_upgrades_legacy_bounds() {
        let def = ParamSetDef::new(1, "p")
            .param(ParamDef::new("level", ValueKind::U8).legacy_bounds(0, 15));
        let set = def.normalize();
        let spec = set.spec(0).unwrap();
        assert_eq!(spec.bounds, Some(Bounds::new(0, 15)));
        let ranges = spec.ranges.as_ref().unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!((ranges[0].first, ranges[0].last, ranges[0].range_id), (0, 15, 0));
    }

    #[test]
    fn test_normalize_upgrades_legacy_enum_names() {
        let def = ParamSetDef::new(1, "p")
            .param(ParamDef::new("state", ValueKind::Enum8).legacy_enum_names(["idle", "busy"]));
        let spec = def.normalize().params.remove(0);
        assert_eq!(spec.enum_value_of("idle"), Some(0));
        assert_eq!(spec.enum_value_of("busy"), Some(1));
        assert_eq!(spec.enum_name_of(1), Some("busy"));
    }

    #[test]
    fn test_modern_tables_win_over_legacy() {
        let def = ParamSetDef::new(1, "p").param(
            ParamDef::new("x", ValueKind::U8)
                .ranges(vec![RangeEntry::new(5, 9, 3)])
                .legacy_bounds(0, 1),
        );
        let spec = def.normalize().params.remove(0);
        assert_eq!(spec.ranges.as_ref().unwrap()[0].range_id, 3);
    }

    #[test]
    fn test_field_lookups() {
        let ctx = ParamId::new(1, 0);
        let member = ParamId::new(1, 1);
        let spec = ParamSetDef::new(1, "p")
            .param(
                ParamDef::new("bag", ValueKind::Bag)
                    .fields(vec![FieldDef::new(4, "slot", member, ctx)]),
            )
            .normalize()
            .params
            .remove(0);
        assert_eq!(spec.field_by_id(4).unwrap().name, "slot");
        assert_eq!(spec.field_by_name("slot").unwrap().param, member);
        assert!(spec.field_by_name("other").is_none());
    }
}
