//! Door cleanup
//!
//! After connectivity settles, every door no corridor consumed is sealed:
//! its opening pieces and prop are demolished and a single solid wall panel
//! is rebuilt over the full wall extent, parented to the owning room. A
//! finished level has no openings into the void.

use crate::generator::Generator;
use crate::scene::{Piece, PieceKind};
use crate::walls;

/// Demolish and seal every unconnected door.
pub(crate) fn seal_unused_doors(generator: &mut Generator) {
    let mut sealed = 0;
    for slot in 0..generator.doors.len() {
        let keep = match &generator.doors[slot] {
            Some(door) => door.connected,
            None => true,
        };
        if keep {
            continue;
        }
        let Some(door) = generator.doors[slot].take() else {
            continue;
        };

        for piece in door.opening {
            generator.scene.destroy(piece);
        }
        if let Some(prop) = door.prop {
            generator.scene.destroy(prop);
        }

        let room_idx = door.room.0 as usize;
        let bounds = walls::solid_wall_bounds(
            &generator.rooms[room_idx],
            door.facing,
            &generator.params,
        );
        let room_id = generator.rooms[room_idx].id;
        generator.scene.spawn(Piece {
            kind: PieceKind::Wall,
            bounds,
            walkable: false,
            room: Some(room_id),
        });
        generator.rooms[room_idx].doors.retain(|&id| id != door.id);
        sealed += 1;
    }

    generator.report.doors_sealed = sealed;
    log::debug!("sealed {sealed} unused door(s)");
}
