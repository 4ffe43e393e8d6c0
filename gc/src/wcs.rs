//! World coordinate system collaborators
//!
//! A [`crate::GlobalCoords`] attached to a host asks it for its low-level WCS
//! and, through that, for the world dimensions that were sliced out of the
//! data array. Those dropped dimensions become derived coordinates.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::WcsError;
use crate::units::Unit;

/// World axes dropped from a WCS, as parallel per-axis sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDroppedWorldDimensions")]
pub struct DroppedWorldDimensions {
    value: Vec<f64>,
    world_axis_names: Vec<Option<String>>,
    world_axis_physical_types: Vec<Option<String>>,
    world_axis_units: Vec<Unit>,
}

#[derive(Deserialize)]
struct RawDroppedWorldDimensions {
    #[serde(default)]
    value: Vec<f64>,
    #[serde(default)]
    world_axis_names: Vec<Option<String>>,
    #[serde(default)]
    world_axis_physical_types: Vec<Option<String>>,
    #[serde(default)]
    world_axis_units: Vec<Unit>,
}

impl TryFrom<RawDroppedWorldDimensions> for DroppedWorldDimensions {
    type Error = WcsError;

    fn try_from(raw: RawDroppedWorldDimensions) -> Result<Self, Self::Error> {
        Self::new(
            raw.value,
            raw.world_axis_names,
            raw.world_axis_physical_types,
            raw.world_axis_units,
        )
    }
}

impl DroppedWorldDimensions {
    /// Build a record, checking the per-axis sequences line up
    ///
    /// Units are not per-axis: only the first one is ever applied, so any
    /// non-zero number of units is accepted.
    pub fn new(
        value: Vec<f64>,
        world_axis_names: Vec<Option<String>>,
        world_axis_physical_types: Vec<Option<String>>,
        world_axis_units: Vec<Unit>,
    ) -> Result<Self, WcsError> {
        let expected = value.len();
        if world_axis_names.len() != expected {
            return Err(WcsError::LengthMismatch {
                field: "world_axis_names",
                expected,
                found: world_axis_names.len(),
            });
        }
        if world_axis_physical_types.len() != expected {
            return Err(WcsError::LengthMismatch {
                field: "world_axis_physical_types",
                expected,
                found: world_axis_physical_types.len(),
            });
        }
        if expected > 0 && world_axis_units.is_empty() {
            return Err(WcsError::MissingUnit(expected));
        }

        Ok(Self {
            value,
            world_axis_names,
            world_axis_physical_types,
            world_axis_units,
        })
    }

    /// A record with no dropped axes
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    pub fn world_axis_names(&self) -> &[Option<String>] {
        &self.world_axis_names
    }

    pub fn world_axis_physical_types(&self) -> &[Option<String>] {
        &self.world_axis_physical_types
    }

    pub fn world_axis_units(&self) -> &[Unit] {
        &self.world_axis_units
    }
}

/// The low-level WCS interface consulted for derived coordinates
pub trait LowLevelWcs: Send + Sync {
    /// World dimensions sliced out of the data, if this WCS tracks them
    fn dropped_world_dimensions(&self) -> Option<DroppedWorldDimensions>;
}

/// An object that may carry a WCS, typically the owner of a collection
pub trait WcsHost: Send + Sync {
    fn wcs(&self) -> Option<Arc<dyn LowLevelWcs>>;
}

/// A WCS whose dropped dimensions are set directly
#[derive(Debug, Default)]
pub struct StaticWcs {
    dropped: RwLock<Option<DroppedWorldDimensions>>,
}

impl StaticWcs {
    pub fn new(dropped: Option<DroppedWorldDimensions>) -> Self {
        Self {
            dropped: RwLock::new(dropped),
        }
    }

    /// Replace the dropped dimensions record
    pub fn set_dropped(&self, dropped: Option<DroppedWorldDimensions>) {
        *self.dropped.write().unwrap_or_else(PoisonError::into_inner) = dropped;
    }
}

impl LowLevelWcs for StaticWcs {
    fn dropped_world_dimensions(&self) -> Option<DroppedWorldDimensions> {
        self.dropped.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds() -> Unit {
        Unit::parse("s").unwrap()
    }

    #[test]
    fn test_new_accepts_aligned_sequences() {
        let dropped = DroppedWorldDimensions::new(
            vec![5.0, 6.0],
            vec![Some("time".to_string()), None],
            vec![Some("time".to_string()), Some("em.wl".to_string())],
            vec![seconds()],
        )
        .unwrap();

        assert_eq!(dropped.len(), 2);
        assert!(!dropped.is_empty());
        assert_eq!(dropped.world_axis_units().len(), 1);
    }

    #[test]
    fn test_new_rejects_mismatched_names() {
        let err = DroppedWorldDimensions::new(vec![5.0, 6.0], vec![None], vec![None, None], vec![seconds()]).unwrap_err();
        assert_eq!(
            err,
            WcsError::LengthMismatch {
                field: "world_axis_names",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_mismatched_physical_types() {
        let err = DroppedWorldDimensions::new(vec![5.0], vec![None], vec![], vec![seconds()]).unwrap_err();
        assert!(matches!(
            err,
            WcsError::LengthMismatch {
                field: "world_axis_physical_types",
                ..
            }
        ));
    }

    #[test]
    fn test_new_requires_a_unit_for_values() {
        let err = DroppedWorldDimensions::new(vec![5.0], vec![None], vec![None], vec![]).unwrap_err();
        assert_eq!(err, WcsError::MissingUnit(1));

        assert!(DroppedWorldDimensions::new(vec![], vec![], vec![], vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_validates() {
        let yaml = "value: [5]\nworld_axis_names: [~]\nworld_axis_physical_types: [time]\nworld_axis_units: [s]\n";
        let dropped: DroppedWorldDimensions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(dropped.value(), &[5.0]);
        assert_eq!(dropped.world_axis_names(), &[None::<String>]);

        let bad = "value: [5, 6]\nworld_axis_names: [~]\nworld_axis_physical_types: [time, time]\nworld_axis_units: [s]\n";
        let result: Result<DroppedWorldDimensions, _> = serde_yaml::from_str(bad);
        assert!(result.unwrap_err().to_string().contains("world_axis_names"));
    }

    #[test]
    fn test_static_wcs_replace() {
        let wcs = StaticWcs::new(None);
        assert!(wcs.dropped_world_dimensions().is_none());

        wcs.set_dropped(Some(DroppedWorldDimensions::empty()));
        assert_eq!(wcs.dropped_world_dimensions(), Some(DroppedWorldDimensions::empty()));
    }
}
