//! Insertion-ordered parameter collections and their query algebra.
//!
//! A [`ParamList`] appends elements in arrival order and preserves that
//! order through packing, cloning, and comparison. The query surface keys
//! on identifier, tag, field context, or tuple key:
//!
//! - identifier queries also match any *declared child* of the queried
//!   parameter, not just exact identifier equality;
//! - `*_from` variants continue a previous search from a given position;
//! - `find_all` clones every match, in original order, into an independent
//!   result list;
//! - tuple-key searches compare the tuple payload's key as well, with an
//!   optional wildcard-key fallback.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{ParamElement, ParamId, ParamList};
//!
//! let id = ParamId::new(5, 0);
//! let mut list = ParamList::new();
//! list.push(ParamElement::new(id, 1));
//! list.push(ParamElement::new(id, 2));
//!
//! assert_eq!(list.count(id), 2);
//! assert_eq!(list.find_tagged(id, 2).unwrap().tag, 2);
//! ```

use crate::element::ParamElement;
use crate::id::ParamId;
use crate::value::TupleKey;
use serde::{Deserialize, Serialize};

/// An insertion-ordered list of parameter elements.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamList(Vec<ParamElement>);

impl ParamList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        ParamList(Vec::new())
    }

    /// Creates an empty list with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ParamList(Vec::with_capacity(capacity))
    }

    /// Appends an element at the end of the list.
    pub fn push(&mut self, element: ParamElement) {
        self.0.push(element);
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the element at `index`, when in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParamElement> {
        self.0.get(index)
    }

    /// Iterates the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParamElement> {
        self.0.iter()
    }

    /// Mutably iterates the elements in insertion order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ParamElement> {
        self.0.iter_mut()
    }

    /// Finds the first element matching `id` (or a declared child of it).
    #[must_use]
    pub fn find(&self, id: ParamId) -> Option<&ParamElement> {
        self.find_from(id, 0).map(|(_, e)| e)
    }

    /// Continues an identifier search from `start`, returning the match
    /// position for the next continuation.
    #[must_use]
    pub fn find_from(&self, id: ParamId, start: usize) -> Option<(usize, &ParamElement)> {
        let matcher = IdMatcher::new(id);
        self.0
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, e)| matcher.matches(e.id))
    }

    /// Finds the first element matching `id` with exactly tag `tag`.
    #[must_use]
    pub fn find_tagged(&self, id: ParamId, tag: u8) -> Option<&ParamElement> {
        self.find_tagged_from(id, tag, 0).map(|(_, e)| e)
    }

    /// Continues a tag-qualified search from `start`.
    #[must_use]
    pub fn find_tagged_from(
        &self,
        id: ParamId,
        tag: u8,
        start: usize,
    ) -> Option<(usize, &ParamElement)> {
        let matcher = IdMatcher::new(id);
        self.0
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, e)| e.tag == tag && matcher.matches(e.id))
    }

    /// Finds the first element occupying field `field_id` of the composite
    /// parameter `context`.
    #[must_use]
    pub fn find_field(&self, context: ParamId, field_id: u32) -> Option<&ParamElement> {
        self.0.iter().find(|e| {
            e.context
                .is_some_and(|f| f.context == context && f.field_id == field_id)
        })
    }

    /// Tag-qualified variant of [`ParamList::find_field`].
    #[must_use]
    pub fn find_field_tagged(
        &self,
        context: ParamId,
        field_id: u32,
        tag: u8,
    ) -> Option<&ParamElement> {
        self.0.iter().find(|e| {
            e.tag == tag
                && e.context
                    .is_some_and(|f| f.context == context && f.field_id == field_id)
        })
    }

    /// Clones every element matching `id` (or a declared child of it) into
    /// a new list, preserving the original order.
    #[must_use]
    pub fn find_all(&self, id: ParamId) -> ParamList {
        let matcher = IdMatcher::new(id);
        ParamList(
            self.0
                .iter()
                .filter(|e| matcher.matches(e.id))
                .cloned()
                .collect(),
        )
    }

    /// Counts the elements matching `id` (or a declared child of it).
    #[must_use]
    pub fn count(&self, id: ParamId) -> usize {
        let matcher = IdMatcher::new(id);
        self.0.iter().filter(|e| matcher.matches(e.id)).count()
    }

    /// Finds the first element matching `id` whose tuple value carries
    /// exactly `key`.
    #[must_use]
    pub fn find_tuple(&self, id: ParamId, key: &TupleKey) -> Option<&ParamElement> {
        let matcher = IdMatcher::new(id);
        self.0.iter().find(|e| {
            matcher.matches(e.id)
                && e.value
                    .as_ref()
                    .and_then(|v| v.tuple_key())
                    .is_some_and(|k| k == *key)
        })
    }

    /// Tuple-key search with wildcard fallback: when no element carries
    /// `key`, the search repeats with `wildcard`.
    #[must_use]
    pub fn find_tuple_or(
        &self,
        id: ParamId,
        key: &TupleKey,
        wildcard: &TupleKey,
    ) -> Option<&ParamElement> {
        self.find_tuple(id, key)
            .or_else(|| self.find_tuple(id, wildcard))
    }
}

/// Identifier matcher: exact identifier or any declared child of it.
///
/// The queried parameter's children table is fetched from the registry
/// once per search, not once per node.
struct IdMatcher {
    id: ParamId,
    children: Option<Vec<ParamId>>,
}

impl IdMatcher {
    fn new(id: ParamId) -> Self {
        let children = crate::registry::resolve_spec(id)
            .ok()
            .and_then(|spec| spec.children);
        IdMatcher { id, children }
    }

    fn matches(&self, candidate: ParamId) -> bool {
        candidate == self.id
            || self
                .children
                .as_ref()
                .is_some_and(|children| children.contains(&candidate))
    }
}

impl IntoIterator for ParamList {
    type Item = ParamElement;
    type IntoIter = std::vec::IntoIter<ParamElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a ParamElement;
    type IntoIter = std::slice::Iter<'a, ParamElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<ParamElement> for ParamList {
    fn from_iter<T: IntoIterator<Item = ParamElement>>(iter: T) -> Self {
        ParamList(iter.into_iter().collect())
    }
}

impl Extend<ParamElement> for ParamList {
    fn extend<T: IntoIterator<Item = ParamElement>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
