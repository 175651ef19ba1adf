//! Process-wide registry of parameter sets.
//!
//! Consumers register each [`ParamSetDef`] once; the registry runs the
//! legacy-upgrade pass, takes ownership of the normalized [`ParamSet`], and
//! serves lookups by set id, by prefix, or by both. Entries are shared out
//! as `Arc<ParamSet>` so lookups never hold the lock beyond the list scan.
//!
//! Registration is idempotent for an exact `(set id, prefix)` pair and a
//! hard failure when either half is already paired with a different
//! partner.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{find_param_set, register_param_set, ParamDef, ParamSetDef, ValueKind};
//!
//! let def = ParamSetDef::new(31, "reg_doc")
//!     .param(ParamDef::new("x", ValueKind::U8));
//! register_param_set(&def).unwrap();
//!
//! let set = find_param_set(None, Some("reg_doc")).unwrap();
//! assert_eq!(set.set_id, 31);
//! assert!(find_param_set(Some(31), Some("other")).is_none());
//! ```

use crate::error::{Error, Result};
use crate::id::ParamId;
use crate::schema::{ParamSet, ParamSetDef, ParamSpec};
use crate::scratch;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::debug;

const MAX_SET_ID: u32 = 0xff;
const MAX_SET_LEN: usize = 0xfffe;

/// The registry list. Insertion-ordered; at most one entry per set id and
/// one per prefix.
pub struct Registry {
    sets: Vec<Arc<ParamSet>>,
}

impl Registry {
    fn new() -> Self {
        Registry { sets: Vec::new() }
    }

    /// The global registry (lazily initialized).
    fn global() -> &'static RwLock<Registry> {
        static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();
        REGISTRY.get_or_init(|| RwLock::new(Registry::new()))
    }

    fn register(&mut self, def: &ParamSetDef) -> Result<Arc<ParamSet>> {
        if def.set_id > MAX_SET_ID {
            return Err(Error::message(format!(
                "set id {} exceeds the encodable maximum {MAX_SET_ID}",
                def.set_id
            )));
        }
        if def.prefix.is_empty() {
            return Err(Error::message("parameter-set prefix must not be empty"));
        }
        if def.params.len() > MAX_SET_LEN {
            return Err(Error::message(format!(
                "set holds {} parameters, more than the encodable {MAX_SET_LEN}",
                def.params.len()
            )));
        }
        for param in &def.params {
            if let Some(ranges) = &param.ranges {
                let ordered = ranges.windows(2).all(|w| w[0].last < w[1].first)
                    && ranges.iter().all(|r| r.first <= r.last);
                if !ordered {
                    return Err(Error::message(format!(
                        "range table of `{}` is not ordered and non-overlapping",
                        param.name
                    )));
                }
            }
        }

        for existing in &self.sets {
            let same_id = existing.set_id == def.set_id;
            let same_prefix = existing.prefix == def.prefix;
            if same_id && same_prefix {
                return Ok(existing.clone());
            }
            if same_id || same_prefix {
                return Err(Error::Conflict {
                    set_id: def.set_id,
                    prefix: def.prefix.clone(),
                });
            }
        }

        let set = Arc::new(def.normalize());
        debug!(set_id = set.set_id, prefix = %set.prefix, params = set.params.len(),
            "registered parameter set");
        self.sets.push(set.clone());
        Ok(set)
    }

    fn find(&self, set_id: Option<u32>, prefix: Option<&str>) -> Option<Arc<ParamSet>> {
        if set_id.is_none() && prefix.is_none() {
            return None;
        }
        self.sets
            .iter()
            .find(|set| {
                let id_ok = set_id.map_or(true, |id| set.set_id == id);
                let prefix_ok = prefix.map_or(true, |p| set.prefix == p);
                id_ok && prefix_ok
            })
            .cloned()
    }

    fn clear(&mut self) {
        debug!(count = self.sets.len(), "unregistering all parameter sets");
        self.sets.clear();
    }
}

/// Registers a parameter set, running the legacy-upgrade pass and taking
/// ownership of the normalized descriptor.
///
/// Registering the exact same `(set id, prefix)` pair again is a no-op and
/// returns the already-registered set.
///
/// # Errors
///
/// Fails when the set id or prefix is already registered under a different
/// partner, or when the definition itself is malformed (unencodable set id,
/// empty prefix, unordered range table).
pub fn register_param_set(def: &ParamSetDef) -> Result<Arc<ParamSet>> {
    scratch::note(
        Registry::global()
            .write()
            .expect("registry lock poisoned")
            .register(def),
    )
}

/// Looks up a registered set by id, prefix, or both.
///
/// With both supplied, both must match the same entry; with one, that one
/// alone decides. No match is `None`, not an error.
#[must_use]
pub fn find_param_set(set_id: Option<u32>, prefix: Option<&str>) -> Option<Arc<ParamSet>> {
    Registry::global()
        .read()
        .expect("registry lock poisoned")
        .find(set_id, prefix)
}

/// Drops every registered set and its normalized descriptor tables.
/// Intended for teardown and tests.
pub fn unregister_all_param_sets() {
    Registry::global()
        .write()
        .expect("registry lock poisoned")
        .clear();
}

/// Resolves an identifier to its owning set and zero-based slot index.
pub(crate) fn resolve(id: ParamId) -> Result<(Arc<ParamSet>, usize)> {
    let index = id.index().ok_or(Error::BadId(id))?;
    let set = find_param_set(Some(id.set_id()), None).ok_or(Error::UnknownSet {
        set_id: Some(id.set_id()),
        prefix: None,
    })?;
    if index >= set.params.len() {
        return Err(Error::BadId(id));
    }
    Ok((set, index))
}

/// Resolves an identifier directly to its spec, cloning out of the shared
/// set so no lock or `Arc` escapes.
pub(crate) fn resolve_spec(id: ParamId) -> Result<ParamSpec> {
    let (set, index) = resolve(id)?;
    Ok(set.params[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamDef;
    use crate::value::ValueKind;

    fn demo_set(set_id: u32, prefix: &str) -> ParamSetDef {
        ParamSetDef::new(set_id, prefix).param(ParamDef::new("x", ValueKind::U8))
    }

    #[test]
    fn test_register_idempotent() {
        let def = demo_set(200, "reg_idem");
        let a = register_param_set(&def).unwrap();
        let b = register_param_set(&def).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_register_conflicts() {
        register_param_set(&demo_set(201, "reg_conf_a")).unwrap();
        // Same id, different prefix.
        assert!(matches!(
            register_param_set(&demo_set(201, "reg_conf_b")),
            Err(Error::Conflict { .. })
        ));
        // Same prefix, different id.
        assert!(matches!(
            register_param_set(&demo_set(202, "reg_conf_a")),
            Err(Error::Conflict { .. })
        ));
    }

    #[test]
    fn test_find_by_either_or_both() {
        register_param_set(&demo_set(203, "reg_find")).unwrap();
        assert!(find_param_set(Some(203), None).is_some());
        assert!(find_param_set(None, Some("reg_find")).is_some());
        assert!(find_param_set(Some(203), Some("reg_find")).is_some());
        assert!(find_param_set(Some(203), Some("reg_other")).is_none());
        assert!(find_param_set(Some(255), None).is_none());
    }

    #[test]
    fn test_register_rejects_malformed_defs() {
        assert!(register_param_set(&demo_set(300, "reg_wide")).is_err());
        assert!(register_param_set(&ParamSetDef::new(204, "")).is_err());

        let bad_ranges = ParamSetDef::new(205, "reg_ranges").param(
            ParamDef::new("x", ValueKind::U8).ranges(vec![
                crate::schema::RangeEntry::new(0, 10, 0),
                crate::schema::RangeEntry::new(5, 20, 1),
            ]),
        );
        assert!(register_param_set(&bad_ranges).is_err());
    }

    #[test]
    fn test_resolve_bounds_checks() {
        register_param_set(&demo_set(206, "reg_resolve")).unwrap();
        assert!(resolve(ParamId::new(206, 0)).is_ok());
        assert!(matches!(
            resolve(ParamId::new(206, 1)),
            Err(Error::BadId(_))
        ));
        assert!(matches!(
            resolve(ParamId::UNDEFINED),
            Err(Error::BadId(_))
        ));
        assert!(matches!(
            resolve(ParamId::new(207, 0)),
            Err(Error::UnknownSet { .. })
        ));
    }
}
