use serde::{Deserialize, Serialize};

use crate::math::{Point2, Vector2};

use super::{Diameter, DuctPart, PartKind};

/// Which duct run a connector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorRole {
    /// An end of the main run.
    Main,
    /// The tap of a tee or Y-branch.
    Branch,
}

/// A joint point on a part where another part may couple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Index local to the owning part, starting at 0.
    pub index: usize,
    /// World position.
    pub position: Point2,
    /// Duct diameter at this end.
    pub diameter: Diameter,
    pub role: ConnectorRole,
}

/// The point where the axes of an elbow or branch fitting meet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint {
    pub index: usize,
    pub position: Point2,
}

/// Connector geometry before the part transform is applied.
struct LocalConnector {
    offset: Vector2,
    diameter: Diameter,
    role: ConnectorRole,
}

impl LocalConnector {
    fn main(x: f64, y: f64, diameter: Diameter) -> Self {
        Self {
            offset: Vector2::new(x, y),
            diameter,
            role: ConnectorRole::Main,
        }
    }

    fn branch(offset: Vector2, diameter: Diameter) -> Self {
        Self {
            offset,
            diameter,
            role: ConnectorRole::Branch,
        }
    }
}

/// Run ends at `±length/2` plus a tap at `angle` degrees from the run.
fn branch_connectors(
    length: f64,
    branch_length: f64,
    angle: f64,
    d1: Diameter,
    d2: Diameter,
    d3: Diameter,
) -> Vec<LocalConnector> {
    let (s, c) = angle.to_radians().sin_cos();
    vec![
        LocalConnector::main(-length / 2.0, 0.0, d1),
        LocalConnector::main(length / 2.0, 0.0, d2),
        LocalConnector::branch(Vector2::new(c, s) * branch_length, d3),
    ]
}

fn local_connectors(part: &DuctPart) -> Vec<LocalConnector> {
    let d = part.diameter;
    match part.kind {
        PartKind::Straight { length } | PartKind::Damper { length } => vec![
            LocalConnector::main(-length / 2.0, 0.0, d),
            LocalConnector::main(length / 2.0, 0.0, d),
        ],
        PartKind::Elbow90 { leg_length } => vec![
            LocalConnector::main(0.0, leg_length, d),
            LocalConnector::main(leg_length, 0.0, d),
        ],
        PartKind::AdjustableElbow { leg_length, angle } => {
            let (s, c) = angle.to_radians().sin_cos();
            vec![
                LocalConnector::main(-leg_length * c, leg_length * s, d),
                LocalConnector::main(leg_length, 0.0, d),
            ]
        }
        PartKind::Reducer { length, diameter2 } => {
            let (start, end) = if part.flipped {
                (diameter2, d)
            } else {
                (d, diameter2)
            };
            vec![
                LocalConnector::main(0.0, 0.0, start),
                LocalConnector::main(length, 0.0, end),
            ]
        }
        PartKind::Tee {
            length,
            branch_length,
        } => branch_connectors(length, branch_length, 90.0, d, d, d),
        PartKind::TeeReducer {
            length,
            branch_length,
            diameter2,
            diameter3,
        } => branch_connectors(length, branch_length, 90.0, d, diameter2, diameter3),
        PartKind::YBranch {
            length,
            branch_length,
            angle,
        } => branch_connectors(length, branch_length, angle, d, d, d),
        PartKind::YBranchReducer {
            length,
            branch_length,
            angle,
            diameter2,
            diameter3,
        } => branch_connectors(length, branch_length, angle, d, diameter2, diameter3),
        PartKind::Cap => vec![LocalConnector::main(0.0, 0.0, d)],
        PartKind::Unknown => {
            tracing::trace!(id = ?part.id, "unknown part kind, using single fallback connector");
            vec![LocalConnector::main(0.0, 0.0, d)]
        }
    }
}

/// Computes the connectors of `part` in world coordinates.
///
/// Every part yields at least one connector: straights and dampers two,
/// elbows and reducers two, tees and Y-branches three, caps and unknown kinds
/// one at the part position.
#[must_use]
pub fn connectors(part: &DuctPart) -> Vec<Connector> {
    local_connectors(part)
        .into_iter()
        .enumerate()
        .map(|(index, local)| Connector {
            index,
            position: part.to_world(&local.offset),
            diameter: local.diameter,
            role: local.role,
        })
        .collect()
}

/// Computes the axis intersection points of `part` in world coordinates.
///
/// Elbows report their corner, tees and Y-branches their centre; other kinds
/// have none.
#[must_use]
pub fn intersection_points(part: &DuctPart) -> Vec<IntersectionPoint> {
    let has_corner = matches!(
        part.kind,
        PartKind::Elbow90 { .. } | PartKind::AdjustableElbow { .. }
    ) || part.kind.is_branching();
    if !has_corner {
        return Vec::new();
    }
    vec![IntersectionPoint {
        index: 0,
        position: part.to_world(&Vector2::zeros()),
    }]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::distance;
    use crate::part::{PartStore, PartTemplate};

    fn build(template: PartTemplate) -> DuctPart {
        let mut store = PartStore::new();
        let id = store.add(template);
        store.part(id).unwrap().clone()
    }

    #[test]
    fn straight_connectors_span_length_at_any_rotation() {
        for step in 0..24 {
            let rotation = f64::from(step) * 15.0;
            let part = build(PartTemplate::straight(150, 1234.0).at(40.0, -75.0).rotated(rotation));
            let conns = connectors(&part);
            assert_eq!(conns.len(), 2);
            let d = distance(&conns[0].position, &conns[1].position);
            assert_relative_eq!(d, 1234.0, epsilon = 1e-9);
            assert!(conns.iter().all(|c| c.diameter == 150));
        }
    }

    #[test]
    fn straight_endpoints_rotate_about_position() {
        let part = build(PartTemplate::straight(200, 400.0).at(100.0, 100.0).rotated(90.0));
        let conns = connectors(&part);
        assert_relative_eq!(conns[0].position, Point2::new(100.0, -100.0), epsilon = 1e-9);
        assert_relative_eq!(conns[1].position, Point2::new(100.0, 300.0), epsilon = 1e-9);
    }

    #[test]
    fn elbow90_legs() {
        let part = build(PartTemplate::elbow90(150).at(10.0, 20.0));
        let conns = connectors(&part);
        assert_eq!(conns.len(), 2);
        assert_relative_eq!(conns[0].position, Point2::new(10.0, 170.0), epsilon = 1e-9);
        assert_relative_eq!(conns[1].position, Point2::new(160.0, 20.0), epsilon = 1e-9);
        let corner = intersection_points(&part);
        assert_relative_eq!(corner[0].position, Point2::new(10.0, 20.0));
    }

    #[test]
    fn adjustable_elbow_at_ninety_matches_elbow90() {
        let fixed = build(PartTemplate::elbow90(200).rotated(45.0));
        let adjustable = build(PartTemplate::adjustable_elbow(200, 90.0).rotated(45.0));
        for (a, b) in connectors(&fixed).iter().zip(connectors(&adjustable).iter()) {
            assert_relative_eq!(a.position, b.position, epsilon = 1e-9);
        }
    }

    #[test]
    fn reducer_flip_swaps_end_diameters() {
        let part = build(PartTemplate::reducer(200, 150));
        let conns = connectors(&part);
        assert_eq!((conns[0].diameter, conns[1].diameter), (200, 150));
        assert_relative_eq!(conns[1].position, Point2::new(300.0, 0.0));

        let flipped = build(PartTemplate::reducer(200, 150).flipped(true));
        let conns = connectors(&flipped);
        assert_eq!((conns[0].diameter, conns[1].diameter), (150, 200));
    }

    #[test]
    fn tee_reducer_roles_and_diameters() {
        let part = build(PartTemplate::tee_reducer(250, 200, 100));
        let conns = connectors(&part);
        assert_eq!(conns.len(), 3);
        assert_eq!(conns[0].role, ConnectorRole::Main);
        assert_eq!(conns[1].role, ConnectorRole::Main);
        assert_eq!(conns[2].role, ConnectorRole::Branch);
        assert_eq!(
            conns.iter().map(|c| c.diameter).collect::<Vec<_>>(),
            vec![250, 200, 100]
        );
        // Tap points straight up from the centre.
        assert_relative_eq!(conns[2].position, Point2::new(0.0, 250.0), epsilon = 1e-9);
    }

    #[test]
    fn damper_has_two_main_ends() {
        let part = build(PartTemplate::damper(150).at(100.0, 0.0));
        let conns = connectors(&part);
        assert_eq!(conns.len(), 2);
        assert!(conns
            .iter()
            .all(|c| c.diameter == 150 && c.role == ConnectorRole::Main));
        assert_relative_eq!(conns[0].position, Point2::new(0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(conns[1].position, Point2::new(200.0, 0.0), epsilon = 1e-9);
        assert!(intersection_points(&part).is_empty());
    }

    #[test]
    fn y_branch_reducer_diameters_and_tap() {
        let part = build(PartTemplate::y_branch_reducer(300, 250, 150, 45.0));
        let conns = connectors(&part);
        assert_eq!(
            conns.iter().map(|c| (c.diameter, c.role)).collect::<Vec<_>>(),
            vec![
                (300, ConnectorRole::Main),
                (250, ConnectorRole::Main),
                (150, ConnectorRole::Branch),
            ]
        );
        assert_relative_eq!(conns[0].position, Point2::new(-300.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(conns[1].position, Point2::new(300.0, 0.0), epsilon = 1e-9);
        let leg = 300.0 / 2f64.sqrt();
        assert_relative_eq!(conns[2].position, Point2::new(leg, leg), epsilon = 1e-9);
        assert_eq!(intersection_points(&part).len(), 1);
    }

    #[test]
    fn y_branch_flip_mirrors_tap() {
        let part = build(PartTemplate::y_branch(200, 45.0));
        let mirrored = build(PartTemplate::y_branch(200, 45.0).flipped(true));
        let tap = connectors(&part)[2].position;
        let tap_m = connectors(&mirrored)[2].position;
        assert!(tap.y > 0.0);
        assert_relative_eq!(tap_m, Point2::new(tap.x, -tap.y), epsilon = 1e-9);
    }

    #[test]
    fn cap_and_unknown_have_single_connector() {
        let cap = build(PartTemplate::cap(150).at(5.0, 6.0));
        let unknown = build(PartTemplate::new(PartKind::Unknown, 150).at(5.0, 6.0));
        for part in [cap, unknown] {
            let conns = connectors(&part);
            assert_eq!(conns.len(), 1);
            assert_relative_eq!(conns[0].position, Point2::new(5.0, 6.0));
            assert!(intersection_points(&part).is_empty());
        }
    }
}
