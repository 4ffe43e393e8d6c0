//! Integration tests for global coordinates attached to a cube
//!
//! These exercise the public API the way a cube owner would use it.

use std::sync::Arc;

use globalcoords::{
    CoordValue, CoordsError, Cube, DroppedWorldDimensions, GlobalCoords, Quantity, QuantityVector, StaticWcs, Unit,
};

fn unit(s: &str) -> Unit {
    Unit::parse(s).expect("valid unit")
}

fn seconds(value: f64) -> CoordValue {
    Quantity::new(value, unit("s")).into()
}

fn time_axis(value: f64) -> DroppedWorldDimensions {
    DroppedWorldDimensions::new(vec![value], vec![None], vec![Some("time".to_string())], vec![unit("s")])
        .expect("aligned axes")
}

// =============================================================================
// Attached mode
// =============================================================================

#[test]
fn test_dropped_time_axis_then_explicit_override() {
    let cube = Cube::new(Some(Arc::new(StaticWcs::new(Some(time_axis(5.0))))));

    {
        let coords = cube.global_coords();
        assert_eq!(coords.get("time").unwrap(), seconds(5.0));
        assert_eq!(coords.physical_types().get("time"), Some(&Some("time".to_string())));
    }

    cube.global_coords_mut()
        .add("time", Some("custom:x"), CoordValue::from("override"))
        .unwrap();

    let coords = cube.global_coords();
    assert_eq!(coords.get("time").unwrap(), CoordValue::from("override"));
    assert_eq!(coords.physical_types()["time"], Some("custom:x".to_string()));
    assert_eq!(coords.len(), 1);
}

#[test]
fn test_removing_override_reveals_derived_value() {
    let cube = Cube::new(Some(Arc::new(StaticWcs::new(Some(time_axis(5.0))))));
    cube.global_coords_mut()
        .add("time", Some("time"), seconds(7.0))
        .unwrap();
    assert_eq!(cube.global_coords().get("time").unwrap(), seconds(7.0));

    cube.global_coords_mut().remove("time").unwrap();
    assert_eq!(cube.global_coords().get("time").unwrap(), seconds(5.0));

    let err = cube.global_coords_mut().remove("time").unwrap_err();
    assert!(matches!(err, CoordsError::NotFound(_)));
}

#[test]
fn test_wcs_updates_are_seen_without_refresh() {
    let wcs = Arc::new(StaticWcs::new(Some(time_axis(5.0))));
    let cube = Cube::new(Some(wcs.clone()));

    assert_eq!(cube.global_coords().get("time").unwrap(), seconds(5.0));

    wcs.set_dropped(Some(time_axis(6.0)));
    assert_eq!(cube.global_coords().get("time").unwrap(), seconds(6.0));
}

#[test]
fn test_named_axes_use_their_name() {
    let dropped = DroppedWorldDimensions::new(
        vec![656.3, 10.0],
        vec![Some("line centre".to_string()), None],
        vec![Some("em.wl".to_string()), Some("pos.eq.dec".to_string())],
        vec![unit("nm")],
    )
    .unwrap();
    let cube = Cube::new(Some(Arc::new(StaticWcs::new(Some(dropped)))));
    let coords = cube.global_coords();

    assert_eq!(
        coords.keys().collect::<Vec<_>>(),
        vec!["line centre", "pos.eq.dec"]
    );
    assert_eq!(
        coords.get("line centre").unwrap(),
        CoordValue::from(Quantity::new(656.3, unit("nm")))
    );
}

#[test]
fn test_filter_on_attached_cube() {
    let cube = Cube::new(Some(Arc::new(StaticWcs::new(Some(time_axis(5.0))))));
    cube.global_coords_mut()
        .add("exposure", Some("time.duration"), seconds(2.0))
        .unwrap();
    cube.global_coords_mut()
        .add("wavelengths", Some("em.wl"), QuantityVector::new(vec![171.0, 193.0], unit("Angstrom")).into())
        .unwrap();

    let filtered = cube.global_coords().filter_by_physical_type(Some("time"));
    assert!(!filtered.is_attached());
    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["time"]);

    drop(cube);
    assert_eq!(filtered.get("time").unwrap(), seconds(5.0));
}

// =============================================================================
// Standalone mode
// =============================================================================

#[test]
fn test_standalone_view_equals_explicit_store() {
    let mut coords: GlobalCoords = GlobalCoords::new();
    coords.add("a", Some("time"), seconds(1.0)).unwrap();
    coords.add("b", Some("em.wl"), Quantity::new(5.0, unit("nm")).into()).unwrap();
    coords.remove("a").unwrap();
    coords.add("c", None, CoordValue::from("label")).unwrap();

    assert_eq!(coords.len(), coords.explicit_len());
    assert_eq!(coords.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    assert_eq!(coords.to_string(), r#"GlobalCoords([("b", 5 nm), ("c", label)])"#);
}

/// A coordinate type other than the default value type
#[derive(Debug, Clone, PartialEq)]
struct Seconds(f64);

impl From<Quantity> for Seconds {
    fn from(q: Quantity) -> Self {
        Seconds(q.to(&Unit::parse("s").unwrap()).map(|q| q.value).unwrap_or(f64::NAN))
    }
}

impl std::fmt::Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[test]
fn test_custom_value_type() {
    let mut coords: GlobalCoords<Seconds> = GlobalCoords::new();
    coords.add("t", Some("time"), Seconds(1.5)).unwrap();

    assert_eq!(coords.get("t").unwrap(), Seconds(1.5));
    assert_eq!(coords.to_string(), r#"GlobalCoords([("t", 1.5s)])"#);

    let err = coords.add("t", None, Seconds(2.0)).unwrap_err();
    assert!(err.to_string().ends_with("t: (time, 1.5s)"));
}
