//! Units and quantities
//!
//! Unit strings follow the common generic notation: named units with optional
//! SI prefixes (`km`, `nm`, `keV`), products separated by spaces, `.` or `*`,
//! `/` placing the following terms in the denominator, and integer powers written as
//! `**n`, `^n` or a trailing signed integer (`s-1`, `m2`).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::error::UnitError;

/// Exponents over length, mass, time, current, temperature, amount,
/// luminous intensity and plane angle
type Dimensions = [i8; 8];

const NONE: Dimensions = [0; 8];

struct UnitDef {
    symbol: &'static str,
    scale: f64,
    dims: Dimensions,
    prefixable: bool,
}

const fn def(symbol: &'static str, scale: f64, dims: Dimensions, prefixable: bool) -> UnitDef {
    UnitDef {
        symbol,
        scale,
        dims,
        prefixable,
    }
}

const L: Dimensions = [1, 0, 0, 0, 0, 0, 0, 0];
const M: Dimensions = [0, 1, 0, 0, 0, 0, 0, 0];
const T: Dimensions = [0, 0, 1, 0, 0, 0, 0, 0];
const ANGLE: Dimensions = [0, 0, 0, 0, 0, 0, 0, 1];
const ENERGY: Dimensions = [2, 1, -2, 0, 0, 0, 0, 0];
const POWER: Dimensions = [2, 1, -3, 0, 0, 0, 0, 0];
const MAG_FIELD: Dimensions = [0, 1, -2, -1, 0, 0, 0, 0];

const ARCSEC: f64 = PI / 180.0 / 3600.0;

static UNITS: &[UnitDef] = &[
    def("m", 1.0, L, true),
    def("g", 1e-3, M, true),
    def("s", 1.0, T, true),
    def("A", 1.0, [0, 0, 0, 1, 0, 0, 0, 0], true),
    def("K", 1.0, [0, 0, 0, 0, 1, 0, 0, 0], true),
    def("mol", 1.0, [0, 0, 0, 0, 0, 1, 0, 0], true),
    def("cd", 1.0, [0, 0, 0, 0, 0, 0, 1, 0], true),
    def("rad", 1.0, ANGLE, true),
    def("sr", 1.0, [0, 0, 0, 0, 0, 0, 0, 2], false),
    def("deg", PI / 180.0, ANGLE, false),
    def("arcmin", PI / 180.0 / 60.0, ANGLE, false),
    def("arcsec", ARCSEC, ANGLE, false),
    def("mas", ARCSEC * 1e-3, ANGLE, false),
    def("Hz", 1.0, [0, 0, -1, 0, 0, 0, 0, 0], true),
    def("N", 1.0, [1, 1, -2, 0, 0, 0, 0, 0], true),
    def("Pa", 1.0, [-1, 1, -2, 0, 0, 0, 0, 0], true),
    def("J", 1.0, ENERGY, true),
    def("W", 1.0, POWER, true),
    def("C", 1.0, [0, 0, 1, 1, 0, 0, 0, 0], true),
    def("V", 1.0, [2, 1, -3, -1, 0, 0, 0, 0], true),
    def("ohm", 1.0, [2, 1, -3, -2, 0, 0, 0, 0], true),
    def("F", 1.0, [-2, -1, 4, 2, 0, 0, 0, 0], true),
    def("Wb", 1.0, [2, 1, -2, -1, 0, 0, 0, 0], true),
    def("T", 1.0, MAG_FIELD, true),
    def("G", 1e-4, MAG_FIELD, true),
    def("eV", 1.602176634e-19, ENERGY, true),
    def("erg", 1e-7, ENERGY, false),
    def("Jy", 1e-26, [0, 1, -2, 0, 0, 0, 0, 0], true),
    def("Angstrom", 1e-10, L, false),
    def("AA", 1e-10, L, false),
    def("AU", 1.495978707e11, L, false),
    def("au", 1.495978707e11, L, false),
    def("pc", 3.0856775814913673e16, L, true),
    def("lyr", 9.460730472580800e15, L, false),
    def("l", 1e-3, [3, 0, 0, 0, 0, 0, 0, 0], true),
    def("min", 60.0, T, false),
    def("h", 3600.0, T, false),
    def("d", 86400.0, T, false),
    def("yr", 31_557_600.0, T, true),
    def("solRad", 6.957e8, L, false),
    def("solMass", 1.988409870698051e30, M, false),
    def("solLum", 3.828e26, POWER, false),
    def("earthRad", 6.3781e6, L, false),
    def("jupiterRad", 7.1492e7, L, false),
    def("ct", 1.0, NONE, false),
    def("pix", 1.0, NONE, false),
];

static PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
];

/// Resolve a symbol, trying exact names before prefixed ones
fn lookup(symbol: &str) -> Option<(f64, Dimensions)> {
    if let Some(unit) = UNITS.iter().find(|u| u.symbol == symbol) {
        return Some((unit.scale, unit.dims));
    }

    PREFIXES.iter().find_map(|(prefix, factor)| {
        let rest = symbol.strip_prefix(prefix)?;
        UNITS
            .iter()
            .find(|u| u.prefixable && u.symbol == rest)
            .map(|u| (u.scale * factor, u.dims))
    })
}

/// A physical unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Unit {
    text: String,
    scale: f64,
    dims: Dimensions,
}

impl Unit {
    /// The dimensionless unit
    pub fn dimensionless() -> Self {
        Self {
            text: String::new(),
            scale: 1.0,
            dims: NONE,
        }
    }

    /// Parse a unit expression
    pub fn parse(expr: &str) -> Result<Self, UnitError> {
        let trimmed = expr.trim();
        if trimmed.is_empty() || trimmed == "dimensionless" || trimmed == "one" {
            return Ok(Self::dimensionless());
        }

        let malformed = || UnitError::Malformed(expr.to_string());

        // (symbol, power) in order of first appearance
        let mut factors: Vec<(String, i32)> = Vec::new();
        let normalized = trimmed.replace("**", "^");

        for (i, part) in normalized.split('/').enumerate() {
            let sign = if i == 0 { 1 } else { -1 };
            let tokens: Vec<&str> = part
                .split(|c: char| c.is_whitespace() || c == '*' || c == '.')
                .filter(|t| !t.is_empty())
                .collect();

            if tokens.is_empty() {
                return Err(malformed());
            }

            for token in tokens {
                if i == 0 && token == "1" {
                    continue;
                }
                let (symbol, power) = split_power(token).ok_or_else(malformed)?;
                // Powers must stay negatable so the denominator can be rendered
                let power = power
                    .checked_mul(sign)
                    .filter(|p| p.checked_neg().is_some())
                    .ok_or_else(malformed)?;
                match factors.iter_mut().find(|(s, _)| s == symbol) {
                    Some((_, p)) => {
                        *p = p
                            .checked_add(power)
                            .filter(|p| p.checked_neg().is_some())
                            .ok_or_else(malformed)?
                    }
                    None => factors.push((symbol.to_string(), power)),
                }
            }
        }

        factors.retain(|(_, p)| *p != 0);

        let mut scale = 1.0;
        let mut dims = NONE;
        for (symbol, power) in &factors {
            let (unit_scale, unit_dims) = lookup(symbol).ok_or_else(|| UnitError::Unknown(symbol.clone()))?;
            scale *= unit_scale.powi(*power);
            for (d, u) in dims.iter_mut().zip(unit_dims.iter()) {
                let exponent = i32::from(*u)
                    .checked_mul(*power)
                    .and_then(|e| e.checked_add(i32::from(*d)))
                    .ok_or_else(malformed)?;
                *d = i8::try_from(exponent).map_err(|_| malformed())?;
            }
        }

        Ok(Self {
            text: canonical_text(&factors),
            scale,
            dims,
        })
    }

    /// Canonical text of this unit (empty when dimensionless)
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dims == NONE && self.text.is_empty()
    }

    /// Whether both units measure the same dimensions
    pub fn is_equivalent(&self, other: &Unit) -> bool {
        self.dims == other.dims
    }

    /// Factor converting a value in this unit into `target`
    pub fn conversion_factor(&self, target: &Unit) -> Result<f64, UnitError> {
        if !self.is_equivalent(target) {
            return Err(UnitError::Incompatible {
                from: self.text.clone(),
                to: target.text.clone(),
            });
        }
        Ok(self.scale / target.scale)
    }
}

/// Split `m2`, `s-1`, `km^3` into symbol and power
fn split_power(token: &str) -> Option<(&str, i32)> {
    let (base, exponent) = match token.split_once('^') {
        Some((base, exponent)) => (base, exponent),
        None => {
            let digits_start = token
                .char_indices()
                .rev()
                .take_while(|(_, c)| c.is_ascii_digit())
                .last()
                .map(|(i, _)| i)
                .unwrap_or(token.len());
            let start = match token[..digits_start].chars().last() {
                Some('-' | '+') if digits_start < token.len() => digits_start - 1,
                _ => digits_start,
            };
            (&token[..start], &token[start..])
        }
    };

    if base.is_empty() || !base.chars().all(|c| c.is_alphabetic()) {
        return None;
    }
    if exponent.is_empty() {
        return Some((base, 1));
    }
    exponent.parse().ok().map(|p| (base, p))
}

fn canonical_text(factors: &[(String, i32)]) -> String {
    let render = |symbol: &str, power: i32| {
        if power == 1 {
            symbol.to_string()
        } else {
            format!("{}{}", symbol, power)
        }
    };

    let numerator: Vec<String> = factors.iter().filter(|(_, p)| *p > 0).map(|(s, p)| render(s, *p)).collect();
    let denominator: Vec<String> = factors.iter().filter(|(_, p)| *p < 0).map(|(s, p)| render(s, -p)).collect();

    let top = if numerator.is_empty() && !denominator.is_empty() {
        "1".to_string()
    } else {
        numerator.join(" ")
    };

    if denominator.is_empty() {
        top
    } else {
        format!("{} / {}", top, denominator.join(" / "))
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Unit {}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.text
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A numeric value with a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Convert into an equivalent unit
    pub fn to(&self, unit: &Unit) -> Result<Quantity, UnitError> {
        let factor = self.unit.conversion_factor(unit)?;
        Ok(Quantity::new(self.value * factor, unit.clone()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}
