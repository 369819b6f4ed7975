mod builder;
mod connector;
mod store;

pub use builder::{
    PartTemplate, DEFAULT_DAMPER_LENGTH, DEFAULT_REDUCER_LENGTH, DEFAULT_STRAIGHT_LENGTH,
};
pub use connector::{connectors, intersection_points, Connector, ConnectorRole, IntersectionPoint};
pub use hit_test::contains_point;
pub use store::PartStore;

use serde::{Deserialize, Serialize};

use crate::math::{normalize_degrees, rotate_deg, Point2, Vector2};

/// Nominal duct diameter in whole millimetres.
pub type Diameter = u32;

slotmap::new_key_type! {
    /// Unique identifier for a duct part in a [`PartStore`].
    pub struct PartId;
}

slotmap::new_key_type! {
    /// Identifier shared by parts that move together as one rigid placement.
    pub struct GroupId;
}

/// Shape of a duct part together with its kind-specific parameters.
///
/// Lengths are millimetres, angles are degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PartKind {
    Straight {
        length: f64,
    },
    Elbow90 {
        leg_length: f64,
    },
    /// Elbow with an arbitrary bend angle (90 behaves like [`PartKind::Elbow90`]).
    AdjustableElbow {
        leg_length: f64,
        angle: f64,
    },
    Reducer {
        length: f64,
        diameter2: Diameter,
    },
    Tee {
        length: f64,
        branch_length: f64,
    },
    TeeReducer {
        length: f64,
        branch_length: f64,
        diameter2: Diameter,
        diameter3: Diameter,
    },
    YBranch {
        length: f64,
        branch_length: f64,
        angle: f64,
    },
    YBranchReducer {
        length: f64,
        branch_length: f64,
        angle: f64,
        diameter2: Diameter,
        diameter3: Diameter,
    },
    Cap,
    Damper {
        length: f64,
    },
    /// A kind tag this crate does not know, kept so loaded layouts still work.
    #[serde(other)]
    Unknown,
}

impl PartKind {
    /// Returns the kind name used in logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Straight { .. } => "Straight",
            Self::Elbow90 { .. } => "Elbow90",
            Self::AdjustableElbow { .. } => "AdjustableElbow",
            Self::Reducer { .. } => "Reducer",
            Self::Tee { .. } => "Tee",
            Self::TeeReducer { .. } => "TeeReducer",
            Self::YBranch { .. } => "YBranch",
            Self::YBranchReducer { .. } => "YBranchReducer",
            Self::Cap => "Cap",
            Self::Damper { .. } => "Damper",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns whether the kind has a branch tap (three connectors).
    #[must_use]
    pub fn is_branching(&self) -> bool {
        matches!(
            self,
            Self::Tee { .. } | Self::TeeReducer { .. } | Self::YBranch { .. } | Self::YBranchReducer { .. }
        )
    }
}

/// A duct part placed in the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuctPart {
    pub id: PartId,
    pub group_id: GroupId,
    /// World position of the part's local origin.
    pub position: Point2,
    /// Rotation in degrees, kept in `[0, 360)`.
    pub rotation: f64,
    /// Primary diameter in whole millimetres. Loading a layout whose diameter
    /// is negative or fractional fails rather than passing the value through.
    pub diameter: Diameter,
    /// Mirrors branch and elbow geometry, and reverses reducers.
    #[serde(default)]
    pub flipped: bool,
    /// Air-system label, e.g. `SA-1`.
    #[serde(default = "default_system_name")]
    pub system_name: String,
    pub kind: PartKind,
}

pub(crate) fn default_system_name() -> String {
    "SA-1".to_owned()
}

impl DuctPart {
    /// Maps an offset in the part's local frame into world space.
    ///
    /// The flip mirrors local y, then the offset is rotated and translated.
    #[must_use]
    pub fn to_world(&self, local: &Vector2) -> Point2 {
        let mirrored = if self.flipped {
            Vector2::new(local.x, -local.y)
        } else {
            *local
        };
        self.position + rotate_deg(&mirrored, self.rotation)
    }

    /// Maps a world point into the part's local frame.
    #[must_use]
    pub fn to_local(&self, world: &Point2) -> Vector2 {
        let v = rotate_deg(&(world - self.position), -self.rotation);
        if self.flipped {
            Vector2::new(v.x, -v.y)
        } else {
            v
        }
    }

    /// Adds `degrees` to the rotation, wrapping into `[0, 360)`.
    pub fn rotate_by(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(self.rotation + degrees);
    }

    /// Moves the part by a world-space delta.
    pub fn translate(&mut self, delta: &Vector2) {
        self.position += *delta;
    }

    /// Toggles the mirror flag.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Returns the straight length for `Straight` parts.
    #[must_use]
    pub fn straight_length(&self) -> Option<f64> {
        match self.kind {
            PartKind::Straight { length } => Some(length),
            _ => None,
        }
    }

    /// Computes the connectors of this part in world space.
    #[must_use]
    pub fn connectors(&self) -> Vec<Connector> {
        connectors(self)
    }

    /// Computes the axis intersection points of this part in world space.
    #[must_use]
    pub fn intersection_points(&self) -> Vec<IntersectionPoint> {
        intersection_points(self)
    }

    /// Returns whether `world` lies on the part.
    #[must_use]
    pub fn contains_point(&self, world: &Point2) -> bool {
        contains_point(self, world)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn straight(length: f64) -> DuctPart {
        let mut store = PartStore::new();
        let id = store.add(PartTemplate::straight(200, length));
        store.part(id).unwrap().clone()
    }

    #[test]
    fn rotation_wraps_after_full_turn() {
        let mut part = straight(400.0);
        part.rotation = 30.0;
        for _ in 0..8 {
            part.rotate_by(45.0);
        }
        assert_relative_eq!(part.rotation, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn quarter_turn_bump_wraps() {
        let mut part = straight(400.0);
        part.rotation = 300.0;
        part.rotate_by(90.0);
        assert_relative_eq!(part.rotation, 30.0);
    }

    #[test]
    fn local_world_round_trip_with_flip() {
        let mut part = straight(400.0);
        part.position = Point2::new(50.0, -20.0);
        part.rotation = 135.0;
        part.flipped = true;
        let local = Vector2::new(12.0, 34.0);
        let back = part.to_local(&part.to_world(&local));
        assert_relative_eq!(back, local, epsilon = 1e-9);
    }

    #[test]
    fn unknown_kind_deserializes() {
        let kind: PartKind = serde_json::from_str(r#"{"type":"Bellmouth"}"#).unwrap();
        assert_eq!(kind, PartKind::Unknown);
        let kind: PartKind =
            serde_json::from_str(r#"{"type":"Reducer","length":300.0,"diameter2":150}"#).unwrap();
        assert_eq!(
            kind,
            PartKind::Reducer {
                length: 300.0,
                diameter2: 150
            }
        );
    }

    #[test]
    fn non_integral_diameter_is_rejected_on_load() {
        let mut store = PartStore::new();
        let id = store.add(PartTemplate::cap(150));
        let json = serde_json::to_value(store.part(id).unwrap()).unwrap();
        let back: DuctPart = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back.diameter, 150);

        for bad in [serde_json::json!(-150), serde_json::json!(150.5)] {
            let mut value = json.clone();
            value["diameter"] = bad;
            assert!(serde_json::from_value::<DuctPart>(value).is_err());
        }
    }

    #[test]
    fn branching_kinds() {
        assert!(PartKind::Tee {
            length: 300.0,
            branch_length: 150.0
        }
        .is_branching());
        assert!(!PartKind::Cap.is_branching());
    }
}
