//! YAML cube descriptions
//!
//! ```yaml
//! wcs:
//!   dropped_world_dimensions:
//!     value: [5.0]
//!     world_axis_names: [~]
//!     world_axis_physical_types: [time]
//!     world_axis_units: [s]
//! coords:
//!   - name: distance
//!     physical_type: pos.distance
//!     value: { value: 1.0, unit: AU }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cube::Cube;
use crate::error::DocumentError;
use crate::value::CoordValue;
use crate::wcs::{DroppedWorldDimensions, LowLevelWcs, StaticWcs};

/// The `wcs` section of a cube description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WcsDocument {
    #[serde(default)]
    pub dropped_world_dimensions: Option<DroppedWorldDimensions>,
}

/// One explicitly added coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordDocument {
    pub name: String,
    #[serde(default)]
    pub physical_type: Option<String>,
    pub value: CoordValue,
}

/// A cube and its global coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CubeDocument {
    #[serde(default)]
    pub wcs: Option<WcsDocument>,
    #[serde(default)]
    pub coords: Vec<CoordDocument>,
}

impl CubeDocument {
    pub fn from_yaml(content: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a cube description file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_yaml(&content)?;
        info!(path = %path.display(), coords = document.coords.len(), "Loaded cube document");
        Ok(document)
    }

    /// Build the cube, adding coordinates in document order
    pub fn into_cube(self) -> Result<Arc<Cube>, DocumentError> {
        let wcs = self.wcs.map(|wcs| -> Arc<dyn LowLevelWcs> {
            Arc::new(StaticWcs::new(wcs.dropped_world_dimensions))
        });
        let cube = Cube::new(wcs);

        {
            let mut coords = cube.global_coords_mut();
            for coord in self.coords {
                debug!(name = %coord.name, "Adding coordinate from document");
                coords
                    .add(coord.name.clone(), coord.physical_type.as_deref(), coord.value)
                    .map_err(|source| DocumentError::Coords {
                        name: coord.name,
                        source,
                    })?;
            }
        }

        Ok(cube)
    }
}
