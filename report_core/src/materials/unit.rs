//! Units of measurement for material quantities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit a material quantity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Square metre
    Sqm,
    Kg,
    /// Each / count
    Unit,
    /// Cubic metre
    M3,
    Ton,
    Liter,
    Meter,
    Piece,
}

impl Unit {
    /// Abbreviation as printed in tables
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Sqm => "m²",
            Unit::Kg => "kg",
            Unit::Unit => "unit",
            Unit::M3 => "m³",
            Unit::Ton => "t",
            Unit::Liter => "L",
            Unit::Meter => "m",
            Unit::Piece => "pc",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let u: Unit = serde_json::from_str("\"m3\"").unwrap();
        assert_eq!(u, Unit::M3);
        assert_eq!(serde_json::to_string(&Unit::Sqm).unwrap(), "\"sqm\"");
        assert!(serde_json::from_str::<Unit>("\"gallon\"").is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Unit::M3.to_string(), "m³");
        assert_eq!(Unit::Piece.symbol(), "pc");
    }
}
