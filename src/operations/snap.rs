use serde::{Deserialize, Serialize};

use crate::config::{SnapConfig, SnapPolicy};
use crate::math::Vector2;
use crate::part::{connectors, Connector, DuctPart, GroupId, PartId};

/// The connector pair chosen by a snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapMatch {
    /// The part being snapped onto.
    pub part: PartId,
    /// Connector index on [`SnapMatch::part`].
    pub connector: usize,
    /// The moving part whose connector locks on.
    pub moving_part: PartId,
    /// Connector index on [`SnapMatch::moving_part`].
    pub moving_connector: usize,
}

/// Outcome of a snap search.
///
/// `(dx, dy)` is the extra translation that puts the moving connector exactly
/// on the matched one. Without a match it is zero and `distance` is infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// Distance between the two connectors before the correction.
    pub distance: f64,
    pub dx: f64,
    pub dy: f64,
    pub matched: Option<SnapMatch>,
}

impl SnapResult {
    /// A result carrying no match.
    #[must_use]
    pub fn none() -> Self {
        Self {
            distance: f64::INFINITY,
            dx: 0.0,
            dy: 0.0,
            matched: None,
        }
    }

    /// Returns the snap correction as a vector.
    #[must_use]
    pub fn delta(&self) -> Vector2 {
        Vector2::new(self.dx, self.dy)
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}

/// Finds the connector pair that should lock a dragged group onto its
/// surroundings.
///
/// The moving group's connectors are taken at their proposed position
/// (current position plus `delta`) and compared with the connectors of every
/// part outside the group. The closest pair wins if its distance is strictly
/// below `threshold_px / zoom`; the first pair met at that distance wins ties,
/// walking moving parts, then candidate parts, then their connectors, all in
/// input order.
#[derive(Debug, Clone, Copy)]
pub struct FindBestSnap {
    group: GroupId,
    delta: Vector2,
    threshold_px: f64,
    zoom: f64,
    policy: SnapPolicy,
}

impl FindBestSnap {
    /// Creates a snap query with the default threshold at zoom 1.
    #[must_use]
    pub fn new(group: GroupId, delta: Vector2) -> Self {
        let config = SnapConfig::default();
        Self {
            group,
            delta,
            threshold_px: config.threshold_px,
            zoom: 1.0,
            policy: config.policy,
        }
    }

    /// Sets the on-screen catch radius and the zoom it is measured at.
    #[must_use]
    pub fn threshold(mut self, threshold_px: f64, zoom: f64) -> Self {
        self.threshold_px = threshold_px;
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: SnapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Applies threshold and policy from a [`SnapConfig`].
    #[must_use]
    pub fn with_config(self, config: &SnapConfig, zoom: f64) -> Self {
        self.threshold(config.threshold_px, zoom).policy(config.policy)
    }

    /// Runs the search over `parts`.
    pub fn execute<'a, I>(&self, parts: I) -> SnapResult
    where
        I: IntoIterator<Item = &'a DuctPart>,
    {
        let mut moving: Vec<(PartId, Vec<Connector>)> = Vec::new();
        let mut others: Vec<(PartId, Vec<Connector>)> = Vec::new();
        for part in parts {
            let mut conns = connectors(part);
            if part.group_id == self.group {
                for c in &mut conns {
                    c.position += self.delta;
                }
                moving.push((part.id, conns));
            } else {
                others.push((part.id, conns));
            }
        }

        let threshold = self.threshold_px / self.zoom;
        let limit_sq = threshold * threshold;
        let mut best_sq = f64::INFINITY;
        let mut best = SnapResult::none();

        for (moving_id, moving_conns) in &moving {
            for (other_id, other_conns) in &others {
                for mc in moving_conns {
                    for oc in other_conns {
                        if !self.policy.allows(mc.diameter, oc.diameter) {
                            continue;
                        }
                        let d = oc.position - mc.position;
                        let dist_sq = d.norm_squared();
                        if dist_sq < limit_sq && dist_sq < best_sq {
                            best_sq = dist_sq;
                            best = SnapResult {
                                distance: dist_sq.sqrt(),
                                dx: d.x,
                                dy: d.y,
                                matched: Some(SnapMatch {
                                    part: *other_id,
                                    connector: oc.index,
                                    moving_part: *moving_id,
                                    moving_connector: mc.index,
                                }),
                            };
                        }
                    }
                }
            }
        }

        if let Some(m) = &best.matched {
            tracing::debug!(
                target_part = ?m.part,
                moving_part = ?m.moving_part,
                distance = best.distance,
                "snap match"
            );
        }
        best
    }
}

/// Finds the best snap for `group` moved by `delta`; see [`FindBestSnap`].
pub fn find_best_snap<'a, I>(
    group: GroupId,
    delta: Vector2,
    parts: I,
    threshold_px: f64,
    zoom: f64,
) -> SnapResult
where
    I: IntoIterator<Item = &'a DuctPart>,
{
    FindBestSnap::new(group, delta)
        .threshold(threshold_px, zoom)
        .execute(parts)
}
