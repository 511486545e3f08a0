//! Rooms, doors, and cardinal directions

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geometry::{Bounds, Vec3};
use crate::scene::PieceId;

/// Cardinal facing of a room wall and its door.
///
/// The integer encoding (1..4) is part of the serialized layout contract.
/// North is +Z, East is +X.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    North = 1,
    East = 2,
    South = 3,
    West = 4,
}

impl Direction {
    /// All four directions, in wall-synthesis order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit vector pointing out of a wall with this facing.
    pub fn offset(self) -> Vec3 {
        match self {
            Direction::North => Vec3::new(0.0, 0.0, 1.0),
            Direction::East => Vec3::new(1.0, 0.0, 0.0),
            Direction::South => Vec3::new(0.0, 0.0, -1.0),
            Direction::West => Vec3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Whether this facing runs along the Z axis.
    pub fn is_north_south(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Index of a room in the generator's room list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

/// Index of a door in the generator's door arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorId(pub u32);

/// An axis-aligned rectangular room.
///
/// `bounds` is the footprint used for separation and corridor overlap tests:
/// centered at half a unit above floor level with a fixed 1-unit vertical
/// extent. The walls' real height is `height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub bounds: Bounds,
    pub height: f32,
    /// Doors in synthesis order (north, east, south, west) until cleanup
    /// drops the unconnected ones.
    pub doors: Vec<DoorId>,
    /// The room's floor slab.
    pub floor: PieceId,
}

impl Room {
    /// Footprint center at ground level.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.bounds.center.x, 0.0, self.bounds.center.z)
    }

    /// Extent along X.
    pub fn width(&self) -> f32 {
        self.bounds.size.x
    }

    /// Extent along Z.
    pub fn depth(&self) -> f32 {
        self.bounds.size.z
    }
}

/// A door opening in a room wall.
///
/// Created by wall synthesis (exactly one per wall). `connected` flips to
/// true when a corridor consumes the door and never flips back; a door feeds
/// at most one corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: DoorId,
    pub room: RoomId,
    /// Point on the owning wall at ground level.
    pub position: Vec3,
    pub facing: Direction,
    pub connected: bool,
    /// Wall pieces displaced by the opening: two pillars and the lintel.
    /// Demolished together if the door is never connected.
    pub opening: [PieceId; 3],
    /// Decorative frame prop, demolished with the opening.
    pub prop: Option<PieceId>,
}
