//! Measurements anchored to part connectors and intersection points.

use serde::{Deserialize, Serialize};

use crate::math::{distance, Point2};
use crate::part::{DuctPart, PartId, PartKind};

/// Which point of a part a dimension end is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorPoint {
    Connector(usize),
    Intersection(usize),
}

/// One end of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub part: PartId,
    pub point: AnchorPoint,
}

impl Anchor {
    #[must_use]
    pub fn connector(part: PartId, index: usize) -> Self {
        Self {
            part,
            point: AnchorPoint::Connector(index),
        }
    }

    #[must_use]
    pub fn intersection(part: PartId, index: usize) -> Self {
        Self {
            part,
            point: AnchorPoint::Intersection(index),
        }
    }
}

/// A measurement between two anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub p1: Anchor,
    pub p2: Anchor,
    /// Value in millimetres as recorded when the dimension was placed.
    pub value: f64,
}

impl Dimension {
    /// Creates a dimension whose value is the current anchor distance.
    ///
    /// Returns `None` if either anchor no longer resolves.
    pub fn measured<'a, I>(p1: Anchor, p2: Anchor, parts: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DuctPart> + Clone,
    {
        let a = resolve_dimension_point(&p1, parts.clone())?;
        let b = resolve_dimension_point(&p2, parts)?;
        Some(Self {
            p1,
            p2,
            value: distance(&a, &b),
        })
    }

    /// Returns whether either end is attached to `part`.
    #[must_use]
    pub fn references(&self, part: PartId) -> bool {
        self.p1.part == part || self.p2.part == part
    }

    /// Returns the straight whose two ends this dimension spans.
    ///
    /// Such a dimension is the straight's own length, so editing its value
    /// resizes the duct.
    pub fn straight_span<'a, I>(&self, parts: I) -> Option<PartId>
    where
        I: IntoIterator<Item = &'a DuctPart>,
    {
        if self.p1.part != self.p2.part {
            return None;
        }
        let ends = matches!(
            (self.p1.point, self.p2.point),
            (AnchorPoint::Connector(0), AnchorPoint::Connector(1))
                | (AnchorPoint::Connector(1), AnchorPoint::Connector(0))
        );
        let part = parts.into_iter().find(|p| p.id == self.p1.part)?;
        (ends && matches!(part.kind, PartKind::Straight { .. })).then_some(part.id)
    }

    /// Resolves both ends against the current parts.
    pub fn endpoints<'a, I>(&self, parts: I) -> Option<(Point2, Point2)>
    where
        I: IntoIterator<Item = &'a DuctPart> + Clone,
    {
        let a = resolve_dimension_point(&self.p1, parts.clone())?;
        let b = resolve_dimension_point(&self.p2, parts)?;
        Some((a, b))
    }
}

/// Resolves an anchor to its current world position.
///
/// Returns `None` when the anchored part no longer exists. An index the part
/// does not have falls back to the part position.
pub fn resolve_dimension_point<'a, I>(anchor: &Anchor, parts: I) -> Option<Point2>
where
    I: IntoIterator<Item = &'a DuctPart>,
{
    let Some(part) = parts.into_iter().find(|p| p.id == anchor.part) else {
        tracing::warn!(part = ?anchor.part, "dimension references a missing part");
        return None;
    };
    Some(anchor_position(part, anchor.point))
}

pub(crate) fn anchor_position(part: &DuctPart, point: AnchorPoint) -> Point2 {
    let found = match point {
        AnchorPoint::Connector(i) => part
            .connectors()
            .into_iter()
            .find(|c| c.index == i)
            .map(|c| c.position),
        AnchorPoint::Intersection(i) => part
            .intersection_points()
            .into_iter()
            .find(|p| p.index == i)
            .map(|p| p.position),
    };
    found.unwrap_or(part.position)
}
