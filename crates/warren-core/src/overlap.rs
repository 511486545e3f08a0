//! Corridor overlap validation
//!
//! Decides whether a candidate route can be committed. Every straight
//! segment's swept volume, and the bend's footprint if there is one, must
//! keep the configured clearance from every room (other than the two being
//! joined), every committed corridor run, and every committed corner. This
//! runs strictly before commit; committed geometry is never re-validated.

use crate::config::GenParams;
use crate::geometry::{Bounds, Vec3};
use crate::path::PathPlan;
use crate::room::{Room, RoomId};

/// Swept volume of a straight corridor segment between two ground points,
/// sized by the corridor cross-section and oriented along the segment's
/// dominant axis.
pub(crate) fn segment_volume(a: Vec3, b: Vec3, width: f32, height: f32) -> Bounds {
    let dx = (b.x - a.x).abs();
    let dz = (b.z - a.z).abs();
    let center = Vec3::new((a.x + b.x) / 2.0, height / 2.0, (a.z + b.z) / 2.0);
    if dx >= dz {
        Bounds::new(center, Vec3::new(dx, height, width))
    } else {
        Bounds::new(center, Vec3::new(width, height, dz))
    }
}

/// Footprint of a corridor bend: a corridor-width square column.
pub(crate) fn corner_volume(corner: Vec3, width: f32, height: f32) -> Bounds {
    Bounds::new(
        Vec3::new(corner.x, height / 2.0, corner.z),
        Vec3::new(width, height, width),
    )
}

/// Test a candidate route against all committed geometry.
///
/// Returns true if anything overlaps (the route must be rejected). The two
/// endpoint rooms are exempt: a corridor necessarily touches the rooms it
/// joins.
pub fn path_overlaps(
    plan: &PathPlan,
    source_room: RoomId,
    target_room: RoomId,
    rooms: &[Room],
    committed_runs: &[Bounds],
    committed_corners: &[Bounds],
    params: &GenParams,
) -> bool {
    let clearance = params.corridor_clearance;

    let mut volumes: Vec<Bounds> = plan
        .points
        .windows(2)
        .filter(|pair| pair[0].distance(pair[1]) > crate::path::POINT_TOLERANCE)
        .map(|pair| segment_volume(pair[0], pair[1], params.corridor_width, params.corridor_height))
        .collect();
    if let Some(corner) = plan.corner {
        volumes.push(corner_volume(
            corner,
            params.corridor_width,
            params.corridor_height,
        ));
    }

    for volume in &volumes {
        let swept = volume.expanded(clearance);
        if rooms
            .iter()
            .filter(|r| r.id != source_room && r.id != target_room)
            .any(|r| r.bounds.intersects(&swept))
        {
            return true;
        }
        if committed_runs.iter().any(|b| b.intersects(&swept)) {
            return true;
        }
        if committed_corners.iter().any(|b| b.intersects(&swept)) {
            return true;
        }
    }
    false
}
