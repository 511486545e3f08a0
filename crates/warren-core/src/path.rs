//! Corridor path planning
//!
//! Joins two doors with a polyline containing at most one 90° bend. Each end
//! leaves its wall with a mandatory straight run so corridors meet rooms
//! perpendicularly instead of sprawling diagonally.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;
use crate::room::Door;

/// Points closer than this are treated as coincident.
pub(crate) const POINT_TOLERANCE: f32 = 1e-3;

/// A planned corridor route from one door to another.
///
/// Transient: validated, then either committed as geometry or discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPlan {
    /// Ground-level polyline from the source door to the target door.
    /// Always at least 3 points.
    pub points: Vec<Vec3>,
    /// The single 90° bend, if the route needs one.
    pub corner: Option<Vec3>,
}

impl PathPlan {
    pub fn has_corner(&self) -> bool {
        self.corner.is_some()
    }

    /// Total polyline length.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

/// Plan a route between two doors.
///
/// Both ends first advance `initial_straight` units along their door's
/// facing. If the two advanced points already line up the route is a direct
/// join; otherwise one corner is inserted. Of the two candidate corners the
/// source door's facing axis decides: a north/south door extends its Z leg
/// first, an east/west door its X leg.
pub fn plan_path(source: &Door, target: &Door, initial_straight: f32) -> PathPlan {
    let p0 = source.position;
    let p1 = p0 + source.facing.offset() * initial_straight;
    let p4 = target.position;
    let p3 = p4 + target.facing.offset() * initial_straight;

    if p1.approx_eq(p3, POINT_TOLERANCE) {
        return PathPlan {
            points: vec![p0, p1, p4],
            corner: None,
        };
    }

    if (p1.x - p3.x).abs() <= POINT_TOLERANCE || (p1.z - p3.z).abs() <= POINT_TOLERANCE {
        return PathPlan {
            points: vec![p0, p1, p3, p4],
            corner: None,
        };
    }

    let corner = if source.facing.is_north_south() {
        Vec3::new(p1.x, 0.0, p3.z)
    } else {
        Vec3::new(p3.x, 0.0, p1.z)
    };

    let mut points = vec![p0, p1, corner, p3, p4];
    points.dedup_by(|a, b| a.approx_eq(*b, POINT_TOLERANCE));
    PathPlan {
        points,
        corner: Some(corner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{Direction, DoorId, RoomId};

    fn door(x: f32, z: f32, facing: Direction) -> Door {
        Door {
            id: DoorId(0),
            room: RoomId(0),
            position: Vec3::new(x, 0.0, z),
            facing,
            connected: false,
            opening: [
                crate::scene::PieceId(0),
                crate::scene::PieceId(0),
                crate::scene::PieceId(0),
            ],
            prop: None,
        }
    }

    #[test]
    fn test_facing_doors_meet_without_bend() {
        // Two doors 8 apart facing each other: straight-out points coincide.
        let a = door(0.0, 0.0, Direction::East);
        let b = door(8.0, 0.0, Direction::West);
        let plan = plan_path(&a, &b, 4.0);
        assert_eq!(plan.points.len(), 3);
        assert!(!plan.has_corner());
        assert!(plan.points[1].approx_eq(Vec3::new(4.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_aligned_doors_join_straight() {
        // Straight-out points share a Z coordinate: four points, no bend.
        let a = door(0.0, 0.0, Direction::East);
        let b = door(20.0, 0.0, Direction::West);
        let plan = plan_path(&a, &b, 4.0);
        assert_eq!(plan.points.len(), 4);
        assert!(!plan.has_corner());
    }

    #[test]
    fn test_offset_doors_get_one_bend() {
        let a = door(0.0, 0.0, Direction::East);
        let b = door(20.0, 15.0, Direction::South);
        let plan = plan_path(&a, &b, 4.0);
        assert!(plan.has_corner());
        assert_eq!(plan.points.len(), 5);
        // East-facing source extends its X leg first.
        let corner = plan.corner.unwrap();
        assert!(corner.approx_eq(Vec3::new(20.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_corner_choice_follows_source_axis() {
        let a = door(0.0, 0.0, Direction::North);
        let b = door(20.0, 15.0, Direction::West);
        let plan = plan_path(&a, &b, 4.0);
        // North-facing source extends its Z leg first: corner keeps p1.x.
        let corner = plan.corner.unwrap();
        assert!(corner.approx_eq(Vec3::new(0.0, 0.0, 15.0), 1e-5));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let a = door(3.0, -7.0, Direction::South);
        let b = door(-12.0, -30.0, Direction::East);
        let first = plan_path(&a, &b, 4.0);
        let second = plan_path(&a, &b, 4.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_sums_segments() {
        let a = door(0.0, 0.0, Direction::East);
        let b = door(8.0, 0.0, Direction::West);
        let plan = plan_path(&a, &b, 4.0);
        assert!((plan.length() - 8.0).abs() < 1e-5);
    }
}
