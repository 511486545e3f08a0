//! warren-core: procedural room-and-corridor level generation
//!
//! Places non-overlapping rectangular rooms inside a square area, cuts a
//! centered door opening into each wall, and joins the rooms with a network
//! of collision-free corridors (straight or single-bend). Connectivity is
//! grown shortest-edge-first, then repaired so every room has at least two
//! connections, then closed with one extra corridor between the first and
//! last room so the layout is not a pure tree.
//!
//! Construct a [`Generator`] per run, call [`Generator::generate`], then
//! read the rooms, doors, scene, and report:
//!
//! ```
//! use warren_core::{GenParams, Generator};
//!
//! let mut generator = Generator::new(GenParams::default(), 42).unwrap();
//! let rooms_placed = generator.generate(None).rooms_placed;
//! assert_eq!(rooms_placed, generator.rooms().len());
//! ```
//!
//! Generation is fail-soft: rooms that do not fit and connections that
//! cannot be routed are recorded in the [`GenerationReport`] and the run
//! completes with what it has.

mod cleanup;
mod config;
mod connect;
mod corridor;
mod generator;
mod geometry;
mod overlap;
mod path;
mod rng;
mod room;
mod scene;
mod walls;

pub use config::{ConfigError, GenParams, MAX_DOOR_FRACTION, PLACEMENT_RETRIES};
pub use corridor::CorridorRecord;
pub use generator::{GenerationReport, Generator, Layout};
pub use geometry::{Bounds, Vec3};
pub use overlap::path_overlaps;
pub use path::{plan_path, PathPlan};
pub use rng::GenRng;
pub use room::{Direction, Door, DoorId, Room, RoomId};
pub use scene::{NavMeshBaker, Piece, PieceId, PieceKind, Scene};
