//! Global coordinate collection
//!
//! [`GlobalCoords`] is an insertion-ordered, name-keyed collection of
//! `(physical_type, value)` entries describing coordinates that apply to a
//! whole data cube. When attached to a [`WcsHost`], every read also sees the
//! host's dropped world dimensions as derived entries.
//!
//! # Merged view
//!
//! Reads go through a merged view computed on each access:
//!
//! 1. derived entries, in the order the host's WCS reports its dropped axes;
//! 2. explicit entries overlaid on top. A name already present keeps its
//!    derived position but takes the explicit type and value. New names are
//!    appended in insertion order.
//!
//! Only explicit entries can be added or removed.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Weak;
use tracing::{debug, warn};

use crate::error::CoordsError;
use crate::physical_type::validate_physical_types;
use crate::units::Quantity;
use crate::value::CoordValue;
use crate::wcs::WcsHost;

/// A physical type paired with a coordinate value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordEntry<V = CoordValue> {
    pub physical_type: Option<String>,
    pub value: V,
}

impl<V> CoordEntry<V> {
    pub fn new(physical_type: Option<String>, value: V) -> Self {
        Self { physical_type, value }
    }
}

impl<V: fmt::Display> fmt::Display for CoordEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.physical_type {
            Some(t) => write!(f, "({}, {})", t, self.value),
            None => write!(f, "(None, {})", self.value),
        }
    }
}

/// Ordered (name, entry) pairs
type Entries<V> = Vec<(String, CoordEntry<V>)>;

/// Insert or overwrite in place, keeping the position of existing names
fn upsert<V>(entries: &mut Entries<V>, name: &str, entry: CoordEntry<V>) {
    match entries.iter_mut().find(|(n, _)| n == name) {
        Some((_, existing)) => *existing = entry,
        None => entries.push((name.to_string(), entry)),
    }
}

/// Coordinates applying to a whole cube
pub struct GlobalCoords<V = CoordValue> {
    parent: Option<Weak<dyn WcsHost>>,
    internal: Entries<V>,
}

impl<V> Default for GlobalCoords<V> {
    fn default() -> Self {
        Self {
            parent: None,
            internal: Vec::new(),
        }
    }
}

impl<V: Clone> Clone for GlobalCoords<V> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            internal: self.internal.clone(),
        }
    }
}

impl<V> GlobalCoords<V> {
    /// An empty collection with no parent
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty collection that reads derived coordinates from `parent`
    ///
    /// The handle is weak: once the parent is dropped the collection behaves
    /// as if it were standalone.
    pub fn attached(parent: Weak<dyn WcsHost>) -> Self {
        Self {
            parent: Some(parent),
            internal: Vec::new(),
        }
    }

    /// Whether this collection holds a parent handle (live or not)
    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    /// Number of explicitly added coordinates
    pub fn explicit_len(&self) -> usize {
        self.internal.len()
    }

    /// Remove an explicitly added coordinate
    ///
    /// Derived coordinates cannot be removed.
    pub fn remove(&mut self, name: &str) -> Result<CoordEntry<V>, CoordsError> {
        let index = self
            .internal
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| CoordsError::NotFound(name.to_string()))?;

        let (_, entry) = self.internal.remove(index);
        debug!(name, remaining = self.internal.len(), "Removed global coordinate");
        Ok(entry)
    }
}

impl<V: fmt::Display> GlobalCoords<V> {
    /// Add a new coordinate
    ///
    /// `physical_type` must be an IVOA UCD1+ word, a `custom:` string, or
    /// `None` when unknown. Fails without modifying the collection if the
    /// name is already explicitly present or the physical type is invalid.
    pub fn add(&mut self, name: impl Into<String>, physical_type: Option<&str>, coord: V) -> Result<(), CoordsError> {
        let name = name.into();
        if let Some((_, existing)) = self.internal.iter().find(|(n, _)| *n == name) {
            return Err(CoordsError::DuplicateName {
                name,
                existing: existing.to_string(),
            });
        }

        validate_physical_types([physical_type])?;

        debug!(%name, ?physical_type, "Added global coordinate");
        self.internal
            .push((name, CoordEntry::new(physical_type.map(str::to_string), coord)));
        Ok(())
    }
}

impl<V: Clone + From<Quantity>> GlobalCoords<V> {
    /// Entries derived from the parent's dropped world dimensions
    fn derived(&self) -> Entries<V> {
        let Some(host) = self.parent.as_ref().and_then(Weak::upgrade) else {
            return Vec::new();
        };
        let Some(dropped) = host.wcs().and_then(|wcs| wcs.dropped_world_dimensions()) else {
            return Vec::new();
        };
        let Some(unit) = dropped.world_axis_units().first() else {
            return Vec::new();
        };

        // Every dropped value is combined with the first unit
        if dropped.world_axis_units().iter().any(|u| u != unit) {
            let units: Vec<&str> = dropped.world_axis_units().iter().map(|u| u.as_str()).collect();
            warn!(?units, applied = unit.as_str(), "Dropped world axes declare different units, applying the first to all");
        }

        let mut entries = Vec::with_capacity(dropped.len());
        let axes = dropped
            .value()
            .iter()
            .zip(dropped.world_axis_names())
            .zip(dropped.world_axis_physical_types());

        for (axis, ((value, name), physical_type)) in axes.enumerate() {
            let display_name = name
                .as_deref()
                .filter(|n| !n.is_empty())
                .or(physical_type.as_deref());

            let Some(display_name) = display_name else {
                warn!(axis, "Dropped world axis has neither a name nor a physical type, skipping");
                continue;
            };

            let value = V::from(Quantity::new(*value, unit.clone()));
            upsert(&mut entries, display_name, CoordEntry::new(physical_type.clone(), value));
        }

        entries
    }

    /// Derived entries overlaid with explicit ones
    fn all_coords(&self) -> Entries<V> {
        let mut merged = self.derived();
        if merged.is_empty() {
            return self.internal.clone();
        }

        for (name, entry) in &self.internal {
            upsert(&mut merged, name, entry.clone());
        }
        merged
    }

    /// Value of the named coordinate
    pub fn get(&self, name: &str) -> Result<V, CoordsError> {
        self.entry(name)
            .map(|entry| entry.value)
            .ok_or_else(|| CoordsError::KeyNotFound(name.to_string()))
    }

    /// Physical type and value of the named coordinate
    pub fn entry(&self, name: &str) -> Option<CoordEntry<V>> {
        self.all_coords()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.all_coords().iter().any(|(n, _)| n == name)
    }

    /// Names in merged order
    ///
    /// The view is computed when this is called; call again to see later
    /// changes.
    pub fn keys(&self) -> Keys {
        let names: Vec<String> = self.all_coords().into_iter().map(|(name, _)| name).collect();
        Keys {
            inner: names.into_iter(),
        }
    }

    /// `(name, value)` pairs in merged order
    pub fn items(&self) -> Vec<(String, V)> {
        self.all_coords()
            .into_iter()
            .map(|(name, entry)| (name, entry.value))
            .collect()
    }

    /// `(name, entry)` pairs in merged order
    pub fn entries(&self) -> Vec<(String, CoordEntry<V>)> {
        self.all_coords()
    }

    pub fn len(&self) -> usize {
        self.all_coords().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical type of every coordinate, by name
    pub fn physical_types(&self) -> HashMap<String, Option<String>> {
        self.all_coords()
            .into_iter()
            .map(|(name, entry)| (name, entry.physical_type))
            .collect()
    }

    /// A standalone copy holding only coordinates of the given physical type
    ///
    /// Matching is exact; `None` selects coordinates with no physical type.
    pub fn filter_by_physical_type(&self, physical_type: Option<&str>) -> GlobalCoords<V> {
        let internal: Entries<V> = self
            .all_coords()
            .into_iter()
            .filter(|(_, entry)| entry.physical_type.as_deref() == physical_type)
            .collect();

        debug!(?physical_type, matched = internal.len(), "Filtered global coordinates");
        GlobalCoords { parent: None, internal }
    }
}

/// Iterator over coordinate names, see [`GlobalCoords::keys`]
#[derive(Debug)]
pub struct Keys {
    inner: std::vec::IntoIter<String>,
}

impl Iterator for Keys {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys {}

impl<'a, V: Clone + From<Quantity>> IntoIterator for &'a GlobalCoords<V> {
    type Item = String;
    type IntoIter = Keys;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

impl<V: Clone + From<Quantity> + fmt::Display> fmt::Display for GlobalCoords<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self
            .items()
            .iter()
            .map(|(name, value)| format!("({:?}, {})", name, value))
            .collect();
        write!(f, "GlobalCoords([{}])", items.join(", "))
    }
}

impl<V: Clone + From<Quantity> + fmt::Display> fmt::Debug for GlobalCoords<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<GlobalCoords at {:p}>", self)?;
        write!(f, "{}", self)
    }
}
