//! Corridor geometry
//!
//! Turns a validated route into floor, ceiling, and wall pieces. Straight
//! runs that meet a corner are shortened by half the corridor width so their
//! walls stop at the corner patch instead of crossing it; the committed
//! overlap record always keeps the full, un-shortened extents.

use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::GenParams;
use crate::geometry::{Bounds, Vec3};
use crate::overlap::{corner_volume, segment_volume};
use crate::path::{PathPlan, POINT_TOLERANCE};
use crate::room::DoorId;
use crate::scene::{Piece, PieceKind, Scene};

/// Two perpendicular unit directions have a dot product below this.
const TURN_DOT_EPS: f32 = 0.1;

/// Book-keeping for one committed corridor: the doors it joins and the
/// slices it appended to the committed run/corner bounds lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorridorRecord {
    pub source: DoorId,
    pub target: DoorId,
    pub runs: Range<usize>,
    pub corners: Range<usize>,
}

/// Commit a route: emit its geometry and append its footprint to the
/// permanent overlap record.
pub(crate) fn commit_corridor(
    plan: &PathPlan,
    params: &GenParams,
    scene: &mut Scene,
    committed_runs: &mut Vec<Bounds>,
    committed_corners: &mut Vec<Bounds>,
) {
    let points: Vec<Vec3> = prune(&plan.points);
    if points.len() < 2 {
        return;
    }

    // A genuine 90° turn at an interior point, detected from the incoming
    // and outgoing directions. Handles any number of bends so repair-phase
    // routes reuse the same commit path.
    let is_corner: Vec<bool> = (0..points.len())
        .map(|i| {
            if i == 0 || i + 1 == points.len() {
                return false;
            }
            let d_in = (points[i] - points[i - 1]).normalized();
            let d_out = (points[i + 1] - points[i]).normalized();
            d_in.dot(d_out).abs() < TURN_DOT_EPS
        })
        .collect();

    let width = params.corridor_width;
    let height = params.corridor_height;

    for i in 0..points.len() - 1 {
        committed_runs.push(segment_volume(points[i], points[i + 1], width, height));

        let dir = (points[i + 1] - points[i]).normalized();
        let mut start = points[i];
        let mut end = points[i + 1];
        if is_corner[i] {
            start = start + dir * (width / 2.0);
        }
        if is_corner[i + 1] {
            end = end - dir * (width / 2.0);
        }
        if start.distance(end) > POINT_TOLERANCE {
            emit_run(start, end, params, scene);
        }
    }

    for i in 1..points.len() - 1 {
        if !is_corner[i] {
            continue;
        }
        committed_corners.push(corner_volume(points[i], width, height));
        let d_in = (points[i] - points[i - 1]).normalized();
        let d_out = (points[i + 1] - points[i]).normalized();
        emit_corner(points[i], d_in, d_out, params, scene);
    }
}

/// Drop consecutive coincident points.
fn prune(points: &[Vec3]) -> Vec<Vec3> {
    let mut pruned: Vec<Vec3> = Vec::with_capacity(points.len());
    for &p in points {
        if pruned
            .last()
            .is_none_or(|last| !last.approx_eq(p, POINT_TOLERANCE))
        {
            pruned.push(p);
        }
    }
    pruned
}

/// Floor, ceiling, and both side walls for one straight run.
fn emit_run(start: Vec3, end: Vec3, params: &GenParams, scene: &mut Scene) {
    let w = params.corridor_width;
    let h = params.corridor_height;
    let t = params.wall_thickness;
    let dir = (end - start).normalized();
    let perp = Vec3::new(dir.z, 0.0, -dir.x);
    let len = start.distance(end);
    let mid = (start + end) * 0.5;

    let horizontal = |y_center: f32| {
        Bounds::new(
            Vec3::new(mid.x, y_center, mid.z),
            oriented_size(dir, len, t, w),
        )
    };
    scene.spawn(Piece {
        kind: PieceKind::Floor,
        bounds: horizontal(-t / 2.0),
        walkable: true,
        room: None,
    });
    scene.spawn(Piece {
        kind: PieceKind::Ceiling,
        bounds: horizontal(h + t / 2.0),
        walkable: false,
        room: None,
    });

    for side in [-1.0f32, 1.0] {
        let offset = perp * (side * (w / 2.0 + t / 2.0));
        scene.spawn(Piece {
            kind: PieceKind::Wall,
            bounds: Bounds::new(
                Vec3::new(mid.x + offset.x, h / 2.0, mid.z + offset.z),
                oriented_size(dir, len, h, t),
            ),
            walkable: false,
            room: None,
        });
    }
}

/// Square floor/ceiling patch plus the two outer walls of a turn.
///
/// The outside of the turn is past the patch along the incoming axis and
/// behind the turn on the outgoing axis, so the wall aligned with the
/// outgoing run offsets along `d_in` and the wall aligned with the incoming
/// run offsets along `-d_out`.
fn emit_corner(corner: Vec3, d_in: Vec3, d_out: Vec3, params: &GenParams, scene: &mut Scene) {
    let w = params.corridor_width;
    let h = params.corridor_height;
    let t = params.wall_thickness;

    let patch = |y_center: f32| {
        Bounds::new(
            Vec3::new(corner.x, y_center, corner.z),
            Vec3::new(w, t, w),
        )
    };
    scene.spawn(Piece {
        kind: PieceKind::Floor,
        bounds: patch(-t / 2.0),
        walkable: true,
        room: None,
    });
    scene.spawn(Piece {
        kind: PieceKind::Ceiling,
        bounds: patch(h + t / 2.0),
        walkable: false,
        room: None,
    });

    let wall_offset = w / 2.0 + t / 2.0;
    for (along, offset_dir) in [(d_out, d_in), (d_in, -d_out)] {
        let center = corner + offset_dir * wall_offset;
        scene.spawn(Piece {
            kind: PieceKind::Wall,
            bounds: Bounds::new(
                Vec3::new(center.x, h / 2.0, center.z),
                oriented_size(along, w, h, t),
            ),
            walkable: false,
            room: None,
        });
    }
}

/// Box size for a piece whose long axis follows `dir`: `len` along the run,
/// `across` perpendicular to it, `y` vertical.
fn oriented_size(dir: Vec3, len: f32, y: f32, across: f32) -> Vec3 {
    if dir.x.abs() >= dir.z.abs() {
        Vec3::new(len, y, across)
    } else {
        Vec3::new(across, y, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(points: Vec<Vec3>, corner: Option<Vec3>) -> (Scene, Vec<Bounds>, Vec<Bounds>) {
        let params = GenParams::default();
        let mut scene = Scene::new();
        let mut runs = Vec::new();
        let mut corners = Vec::new();
        let plan = PathPlan { points, corner };
        commit_corridor(&plan, &params, &mut scene, &mut runs, &mut corners);
        (scene, runs, corners)
    }

    #[test]
    fn test_straight_run_pieces() {
        let (scene, runs, corners) = commit(
            vec![Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)],
            None,
        );
        assert_eq!(runs.len(), 1);
        assert!(corners.is_empty());
        // One floor, one ceiling, two walls.
        assert_eq!(scene.len(), 4);
        let floors: Vec<_> = scene
            .iter()
            .filter(|(_, p)| p.kind == PieceKind::Floor)
            .collect();
        assert_eq!(floors.len(), 1);
        assert_eq!(floors[0].1.bounds.size.x, 20.0);
        let walls: Vec<_> = scene
            .iter()
            .filter(|(_, p)| p.kind == PieceKind::Wall)
            .collect();
        assert_eq!(walls.len(), 2);
        // Walls flank the run at half width plus half thickness.
        let zs: Vec<f32> = walls.iter().map(|(_, p)| p.bounds.center.z).collect();
        assert!(zs.contains(&2.75) && zs.contains(&-2.75));
    }

    #[test]
    fn test_bend_shortens_runs_but_not_record() {
        let corner = Vec3::new(20.0, 0.0, 0.0);
        let (scene, runs, corners) = commit(
            vec![Vec3::ZERO, corner, Vec3::new(20.0, 0.0, 16.0)],
            Some(corner),
        );
        assert_eq!(runs.len(), 2);
        assert_eq!(corners.len(), 1);
        // The overlap record keeps the full extents.
        assert_eq!(runs[0].size.x, 20.0);
        assert_eq!(runs[1].size.z, 16.0);
        assert_eq!(corners[0].size.x, 5.0);
        assert_eq!(corners[0].size.z, 5.0);

        // Emitted floors stop half a corridor width short of the corner.
        let mut floor_lens: Vec<f32> = scene
            .iter()
            .filter(|(_, p)| p.kind == PieceKind::Floor)
            .map(|(_, p)| p.bounds.size.x.max(p.bounds.size.z))
            .collect();
        floor_lens.sort_by(f32::total_cmp);
        // Corner patch (5), then the two shortened runs.
        assert_eq!(floor_lens, vec![5.0, 13.5, 17.5]);
    }

    #[test]
    fn test_corner_outer_walls_sit_outside_turn() {
        // Incoming east, turning north: outside is +X and -Z of the corner.
        let corner = Vec3::new(20.0, 0.0, 0.0);
        let (scene, _, _) = commit(
            vec![Vec3::ZERO, corner, Vec3::new(20.0, 0.0, 16.0)],
            Some(corner),
        );
        let walls: Vec<_> = scene
            .iter()
            .filter(|(_, p)| p.kind == PieceKind::Wall)
            .map(|(_, p)| p.bounds)
            .collect();
        // 2 per run + 2 corner walls.
        assert_eq!(walls.len(), 6);
        let east = walls
            .iter()
            .find(|b| (b.center.x - 22.75).abs() < 1e-4 && b.center.z.abs() < 1e-4);
        assert!(east.is_some(), "missing outer wall past the corner on +X");
        assert_eq!(east.unwrap().size.z, 5.0);
        let south = walls
            .iter()
            .find(|b| (b.center.z + 2.75).abs() < 1e-4 && (b.center.x - 20.0).abs() < 1e-4);
        assert!(south.is_some(), "missing outer wall behind the turn on -Z");
        assert_eq!(south.unwrap().size.x, 5.0);
    }

    #[test]
    fn test_coincident_points_pruned() {
        let (scene, runs, _) = commit(
            vec![
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
            ],
            None,
        );
        assert_eq!(runs.len(), 1);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn test_collinear_joint_is_not_a_corner() {
        let (_, runs, corners) = commit(
            vec![
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(25.0, 0.0, 0.0),
            ],
            None,
        );
        assert_eq!(runs.len(), 2);
        assert!(corners.is_empty());
    }
}
