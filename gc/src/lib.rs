//! GlobalCoords - coordinates that apply to a whole data cube
//!
//! A [`GlobalCoords`] collection stores named `(physical_type, value)` entries
//! in insertion order. Physical types are checked against the IVOA UCD1+
//! vocabulary (or the `custom:` escape). When attached to a host with a WCS,
//! the world dimensions sliced out of the data show up as derived entries,
//! recomputed on every read and shadowed by explicit entries of the same name.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use globalcoords::{Cube, DroppedWorldDimensions, Quantity, StaticWcs, Unit};
//!
//! let dropped = DroppedWorldDimensions::new(
//!     vec![5.0],
//!     vec![None],
//!     vec![Some("time".to_string())],
//!     vec![Unit::parse("s")?],
//! )?;
//! let cube = Cube::new(Some(Arc::new(StaticWcs::new(Some(dropped)))));
//!
//! cube.global_coords_mut()
//!     .add("distance", Some("pos.distance"), Quantity::new(1.0, Unit::parse("AU")?).into())?;
//!
//! let coords = cube.global_coords();
//! assert_eq!(coords.keys().collect::<Vec<_>>(), vec!["time", "distance"]);
//! assert_eq!(coords.get("time")?.to_string(), "5 s");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod coords;
pub mod cube;
pub mod document;
pub mod error;
pub mod physical_type;
pub mod units;
pub mod value;
pub mod wcs;

pub use coords::{CoordEntry, GlobalCoords, Keys};
pub use cube::Cube;
pub use document::{CoordDocument, CubeDocument};
pub use error::{CoordsError, DocumentError, PhysicalTypeError, UnitError, WcsError};
pub use physical_type::{CUSTOM_PREFIX, is_valid_physical_type, ucd1p_words, validate_physical_types};
pub use units::{Quantity, Unit};
pub use value::{CoordValue, QuantityVector};
pub use wcs::{DroppedWorldDimensions, LowLevelWcs, StaticWcs, WcsHost};
