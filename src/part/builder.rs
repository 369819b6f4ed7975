use crate::math::{normalize_degrees, Point2};

use super::{default_system_name, Diameter, DuctPart, GroupId, PartId, PartKind};

/// Default straight length for a freshly placed duct.
pub const DEFAULT_STRAIGHT_LENGTH: f64 = 400.0;

/// Default body length for reducers.
pub const DEFAULT_REDUCER_LENGTH: f64 = 300.0;

/// Default body length for dampers.
pub const DEFAULT_DAMPER_LENGTH: f64 = 200.0;

/// A part description waiting for an identity.
///
/// [`super::PartStore::add`] turns a template into a [`DuctPart`] with a
/// fresh [`PartId`] and [`GroupId`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartTemplate {
    pub kind: PartKind,
    pub diameter: Diameter,
    pub position: Point2,
    pub rotation: f64,
    pub flipped: bool,
    pub system_name: String,
}

impl PartTemplate {
    /// Creates a template of the given kind at the origin.
    #[must_use]
    pub fn new(kind: PartKind, diameter: Diameter) -> Self {
        Self {
            kind,
            diameter,
            position: Point2::origin(),
            rotation: 0.0,
            flipped: false,
            system_name: default_system_name(),
        }
    }

    #[must_use]
    pub fn straight(diameter: Diameter, length: f64) -> Self {
        Self::new(PartKind::Straight { length }, diameter)
    }

    /// Straight duct at the length a freshly placed one gets.
    #[must_use]
    pub fn default_straight(diameter: Diameter) -> Self {
        Self::straight(diameter, DEFAULT_STRAIGHT_LENGTH)
    }

    /// 90° elbow whose legs are as long as the diameter.
    #[must_use]
    pub fn elbow90(diameter: Diameter) -> Self {
        Self::new(
            PartKind::Elbow90 {
                leg_length: f64::from(diameter),
            },
            diameter,
        )
    }

    #[must_use]
    pub fn adjustable_elbow(diameter: Diameter, angle: f64) -> Self {
        Self::new(
            PartKind::AdjustableElbow {
                leg_length: f64::from(diameter),
                angle,
            },
            diameter,
        )
    }

    /// Reducer from `diameter` down to `diameter2`.
    #[must_use]
    pub fn reducer(diameter: Diameter, diameter2: Diameter) -> Self {
        Self::new(
            PartKind::Reducer {
                length: DEFAULT_REDUCER_LENGTH,
                diameter2,
            },
            diameter,
        )
    }

    /// Reducer stepping down one 50 mm size.
    #[must_use]
    pub fn reducer_one_size(diameter: Diameter) -> Self {
        Self::reducer(diameter, diameter.saturating_sub(50))
    }

    #[must_use]
    pub fn tee(diameter: Diameter) -> Self {
        let d = f64::from(diameter);
        Self::new(
            PartKind::Tee {
                length: 2.0 * d,
                branch_length: d,
            },
            diameter,
        )
    }

    #[must_use]
    pub fn tee_reducer(diameter: Diameter, diameter2: Diameter, diameter3: Diameter) -> Self {
        let d = f64::from(diameter);
        Self::new(
            PartKind::TeeReducer {
                length: 2.0 * d,
                branch_length: d,
                diameter2,
                diameter3,
            },
            diameter,
        )
    }

    #[must_use]
    pub fn y_branch(diameter: Diameter, angle: f64) -> Self {
        let d = f64::from(diameter);
        Self::new(
            PartKind::YBranch {
                length: 2.0 * d,
                branch_length: d,
                angle,
            },
            diameter,
        )
    }

    #[must_use]
    pub fn y_branch_reducer(
        diameter: Diameter,
        diameter2: Diameter,
        diameter3: Diameter,
        angle: f64,
    ) -> Self {
        let d = f64::from(diameter);
        Self::new(
            PartKind::YBranchReducer {
                length: 2.0 * d,
                branch_length: d,
                angle,
                diameter2,
                diameter3,
            },
            diameter,
        )
    }

    #[must_use]
    pub fn cap(diameter: Diameter) -> Self {
        Self::new(PartKind::Cap, diameter)
    }

    #[must_use]
    pub fn damper(diameter: Diameter) -> Self {
        Self::new(
            PartKind::Damper {
                length: DEFAULT_DAMPER_LENGTH,
            },
            diameter,
        )
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point2::new(x, y);
        self
    }

    /// Sets the rotation in degrees (normalized).
    #[must_use]
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = normalize_degrees(degrees);
        self
    }

    #[must_use]
    pub fn flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    #[must_use]
    pub fn system(mut self, name: impl Into<String>) -> Self {
        self.system_name = name.into();
        self
    }

    pub(crate) fn into_part(self, id: PartId, group_id: GroupId) -> DuctPart {
        DuctPart {
            id,
            group_id,
            position: self.position,
            rotation: normalize_degrees(self.rotation),
            diameter: self.diameter,
            flipped: self.flipped,
            system_name: self.system_name,
            kind: self.kind,
        }
    }
}
