//! Wall and door synthesis
//!
//! Builds the four wall faces of a room, each with a centered door opening:
//! two flanking pillars, a lintel above the opening, and a frame prop. The
//! door records handles to the three wall pieces so cleanup can demolish
//! exactly those if the door is never used.

use crate::config::GenParams;
use crate::geometry::{Bounds, Vec3};
use crate::room::{Direction, Door, DoorId, Room, RoomId};
use crate::scene::{Piece, PieceKind, Scene};

/// Build a room's floor, walls, and doors from its placed footprint.
///
/// Cannot fail: `GenParams::validate` guarantees the opening is narrower
/// than any wall and shorter than the wall height.
pub(crate) fn synthesize_room(
    id: RoomId,
    bounds: Bounds,
    params: &GenParams,
    doors: &mut Vec<Option<Door>>,
    scene: &mut Scene,
) -> Room {
    let center = Vec3::new(bounds.center.x, 0.0, bounds.center.z);
    let t = params.wall_thickness;

    let floor = scene.spawn(Piece {
        kind: PieceKind::Floor,
        bounds: Bounds::new(
            Vec3::new(center.x, -t / 2.0, center.z),
            Vec3::new(bounds.size.x, t, bounds.size.z),
        ),
        walkable: true,
        room: Some(id),
    });

    let mut room = Room {
        id,
        bounds,
        height: params.room_height,
        doors: Vec::with_capacity(4),
        floor,
    };

    for facing in Direction::ALL {
        let door_id = DoorId(doors.len() as u32);
        let door = build_wall(&room, door_id, facing, params, scene);
        room.doors.push(door_id);
        doors.push(Some(door));
    }

    room
}

/// Build one wall face with a centered opening; returns the door record.
fn build_wall(
    room: &Room,
    id: DoorId,
    facing: Direction,
    params: &GenParams,
    scene: &mut Scene,
) -> Door {
    let center = room.center();
    let t = params.wall_thickness;
    let h = room.height;
    let opening_h = params.opening_height();
    let dw = params.door_width;

    // Wall length runs along X for north/south faces, along Z for east/west.
    let (length, half_out) = if facing.is_north_south() {
        (room.width(), room.depth() / 2.0)
    } else {
        (room.depth(), room.width() / 2.0)
    };
    let wall_center = center + facing.offset() * half_out;
    let pillar_w = (length - dw) / 2.0;

    // Offsets of the two pillar centers along the wall's length axis.
    let pillar_off = length / 2.0 - pillar_w / 2.0;

    let piece_at = |along: f32, y_center: f32, len: f32, height: f32, kind: PieceKind| {
        let (size, offset) = if facing.is_north_south() {
            (Vec3::new(len, height, t), Vec3::new(along, 0.0, 0.0))
        } else {
            (Vec3::new(t, height, len), Vec3::new(0.0, 0.0, along))
        };
        Piece {
            kind,
            bounds: Bounds::new(
                Vec3::new(
                    wall_center.x + offset.x,
                    y_center,
                    wall_center.z + offset.z,
                ),
                size,
            ),
            walkable: false,
            room: Some(room.id),
        }
    };

    let left = scene.spawn(piece_at(-pillar_off, h / 2.0, pillar_w, h, PieceKind::Pillar));
    let right = scene.spawn(piece_at(pillar_off, h / 2.0, pillar_w, h, PieceKind::Pillar));
    let lintel = scene.spawn(piece_at(
        0.0,
        opening_h + (h - opening_h) / 2.0,
        dw,
        h - opening_h,
        PieceKind::Lintel,
    ));

    let mut frame = piece_at(0.0, opening_h / 2.0, dw, opening_h, PieceKind::DoorFrame);
    frame.bounds.size = if facing.is_north_south() {
        Vec3::new(dw, opening_h, t / 2.0)
    } else {
        Vec3::new(t / 2.0, opening_h, dw)
    };
    // The frame is dressing on the opening, not an obstacle.
    frame.walkable = true;
    let prop = scene.spawn(frame);

    Door {
        id,
        room: room.id,
        position: wall_center,
        facing,
        connected: false,
        opening: [left, right, lintel],
        prop: Some(prop),
    }
}

/// Footprint bounds for a room centered at `(x, z)`: half a unit above floor
/// level with the fixed 1-unit vertical extent used by all overlap tests.
pub(crate) fn footprint(x: f32, z: f32, width: f32, depth: f32) -> Bounds {
    Bounds::new(Vec3::new(x, 0.5, z), Vec3::new(width, 1.0, depth))
}

/// Bounds of a full (un-opened) wall panel for the given facing, used when
/// sealing an unused door.
pub(crate) fn solid_wall_bounds(room: &Room, facing: Direction, params: &GenParams) -> Bounds {
    let center = room.center();
    let t = params.wall_thickness;
    let h = room.height;
    let (length, half_out) = if facing.is_north_south() {
        (room.width(), room.depth() / 2.0)
    } else {
        (room.depth(), room.width() / 2.0)
    };
    let wall_center = center + facing.offset() * half_out;
    let size = if facing.is_north_south() {
        Vec3::new(length, h, t)
    } else {
        Vec3::new(t, h, length)
    };
    Bounds::new(Vec3::new(wall_center.x, h / 2.0, wall_center.z), size)
}
