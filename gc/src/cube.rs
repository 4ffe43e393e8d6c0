//! A minimal data cube host
//!
//! `Cube` owns its [`GlobalCoords`] while the collection keeps only a weak
//! handle back to the cube, so the cube's WCS is consulted on every read
//! without a reference cycle.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::coords::GlobalCoords;
use crate::wcs::{LowLevelWcs, WcsHost};

pub struct Cube {
    wcs: RwLock<Option<Arc<dyn LowLevelWcs>>>,
    global_coords: RwLock<GlobalCoords>,
}

impl Cube {
    /// Create a cube whose global coordinates are attached to it
    pub fn new(wcs: Option<Arc<dyn LowLevelWcs>>) -> Arc<Self> {
        Arc::new_cyclic(|cube: &Weak<Cube>| {
            let parent: Weak<dyn WcsHost> = cube.clone();
            Self {
                wcs: RwLock::new(wcs),
                global_coords: RwLock::new(GlobalCoords::attached(parent)),
            }
        })
    }

    /// Replace the cube's WCS
    pub fn set_wcs(&self, wcs: Option<Arc<dyn LowLevelWcs>>) {
        *self.wcs.write().unwrap_or_else(PoisonError::into_inner) = wcs;
    }

    pub fn global_coords(&self) -> RwLockReadGuard<'_, GlobalCoords> {
        self.global_coords.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn global_coords_mut(&self) -> RwLockWriteGuard<'_, GlobalCoords> {
        self.global_coords.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WcsHost for Cube {
    fn wcs(&self) -> Option<Arc<dyn LowLevelWcs>> {
        self.wcs.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube")
            .field("has_wcs", &self.wcs().is_some())
            .field("global_coords", &self.global_coords().to_string())
            .finish()
    }
}
