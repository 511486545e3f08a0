//! Emitted level geometry
//!
//! Everything the generator builds is an axis-aligned box piece held in a
//! slot arena. Handles stay stable across removals, so a door can keep
//! pointers to the wall pieces its opening displaced and demolish exactly
//! those later.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::geometry::Bounds;
use crate::room::RoomId;

/// Stable handle to a piece in the [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// What a piece is, for downstream consumers (rendering, navigation).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum PieceKind {
    /// Horizontal walkable slab.
    Floor = 0,
    /// Horizontal overhead slab.
    Ceiling = 1,
    /// Full wall panel.
    Wall = 2,
    /// Wall section flanking a door opening.
    Pillar = 3,
    /// Wall section above a door opening.
    Lintel = 4,
    /// Decorative frame prop around a door opening.
    DoorFrame = 5,
}

/// One axis-aligned box of level geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub bounds: Bounds,
    /// Whether navigation may treat the top surface as walkable. Walls,
    /// pillars, and lintels are obstacles.
    pub walkable: bool,
    /// Owning room, if the piece belongs to one. Corridor geometry has none.
    pub room: Option<RoomId>,
}

/// Arena of emitted geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pieces: Vec<Option<Piece>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a piece, returning its stable handle.
    pub fn spawn(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len() as u32);
        self.pieces.push(Some(piece));
        id
    }

    /// Remove a piece. Returns false if the slot was already vacated.
    pub fn destroy(&mut self, id: PieceId) -> bool {
        match self.pieces.get_mut(id.0 as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    /// Live pieces with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (PieceId(i as u32), p)))
    }

    /// Number of live pieces.
    pub fn len(&self) -> usize {
        self.pieces.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outbound navigation-mesh interface.
///
/// Called once per generation, after cleanup, with the finished scene. The
/// bake is opaque to the generator and assumed synchronous.
pub trait NavMeshBaker {
    fn bake(&mut self, scene: &Scene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, Vec3};

    fn slab() -> Piece {
        Piece {
            kind: PieceKind::Floor,
            bounds: Bounds::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
            walkable: true,
            room: None,
        }
    }

    #[test]
    fn test_spawn_and_get() {
        let mut scene = Scene::new();
        let id = scene.spawn(slab());
        assert_eq!(scene.get(id).unwrap().kind, PieceKind::Floor);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_destroy_vacates_slot() {
        let mut scene = Scene::new();
        let a = scene.spawn(slab());
        let b = scene.spawn(slab());
        assert!(scene.destroy(a));
        assert!(!scene.destroy(a));
        assert!(scene.get(a).is_none());
        // Handles issued later are unaffected.
        assert!(scene.get(b).is_some());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_iter_skips_vacated() {
        let mut scene = Scene::new();
        let a = scene.spawn(slab());
        scene.spawn(slab());
        scene.destroy(a);
        assert_eq!(scene.iter().count(), 1);
        assert!(scene.iter().all(|(id, _)| id != a));
    }
}
