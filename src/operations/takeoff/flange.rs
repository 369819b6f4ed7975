use serde::{Deserialize, Serialize};

use crate::part::Diameter;

/// Metric bolt size used on a flange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoltSize {
    M8,
    M10,
}

/// Bolt pattern of a round duct flange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlangeSpec {
    pub diameter: Diameter,
    /// Bolt holes per flange pair (one joint).
    pub hole_count: u32,
    pub bolt_size: BoltSize,
}

/// Looks up the flange bolt pattern for a duct diameter.
#[must_use]
pub fn flange_spec(diameter: Diameter) -> FlangeSpec {
    let (hole_count, bolt_size) = match diameter {
        0..=150 => (6, BoltSize::M8),
        151..=300 => (8, BoltSize::M8),
        301..=500 => (12, BoltSize::M10),
        _ => (16, BoltSize::M10),
    };
    FlangeSpec {
        diameter,
        hole_count,
        bolt_size,
    }
}
