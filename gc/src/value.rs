//! Default coordinate value type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::{Quantity, Unit};

/// Several values sharing one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityVector {
    pub values: Vec<f64>,
    pub unit: Unit,
}

impl QuantityVector {
    pub fn new(values: Vec<f64>, unit: Unit) -> Self {
        Self { values, unit }
    }
}

impl fmt::Display for QuantityVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(", "))?;
        if !self.unit.is_dimensionless() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

/// A coordinate value as stored in a [`crate::GlobalCoords`]
///
/// Deserializes from `{value, unit}`, `{values, unit}`, a bare number, a
/// boolean or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordValue {
    Quantity(Quantity),
    Vector(QuantityVector),
    Number(f64),
    Flag(bool),
    Text(String),
}

impl CoordValue {
    /// The scalar quantity, if this is one
    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            CoordValue::Quantity(q) => Some(q),
            _ => None,
        }
    }
}

impl From<Quantity> for CoordValue {
    fn from(q: Quantity) -> Self {
        CoordValue::Quantity(q)
    }
}

impl From<QuantityVector> for CoordValue {
    fn from(v: QuantityVector) -> Self {
        CoordValue::Vector(v)
    }
}

impl From<f64> for CoordValue {
    fn from(n: f64) -> Self {
        CoordValue::Number(n)
    }
}

impl From<bool> for CoordValue {
    fn from(b: bool) -> Self {
        CoordValue::Flag(b)
    }
}

impl From<&str> for CoordValue {
    fn from(s: &str) -> Self {
        CoordValue::Text(s.to_string())
    }
}

impl From<String> for CoordValue {
    fn from(s: String) -> Self {
        CoordValue::Text(s)
    }
}

impl fmt::Display for CoordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordValue::Quantity(q) => write!(f, "{}", q),
            CoordValue::Vector(v) => write!(f, "{}", v),
            CoordValue::Number(n) => write!(f, "{}", n),
            CoordValue::Flag(b) => write!(f, "{}", b),
            CoordValue::Text(s) => write!(f, "{}", s),
        }
    }
}
