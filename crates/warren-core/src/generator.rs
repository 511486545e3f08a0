//! Generation orchestrator
//!
//! A [`Generator`] owns all state for one run: parameters, RNG, the scene
//! arena, rooms, doors, and the committed corridor footprints. Construct a
//! fresh one per level; nothing persists between runs. The phases execute
//! strictly in order (placement, connectivity, cleanup, navigation bake)
//! and the structured report is the completion signal.

use serde::{Deserialize, Serialize};

use crate::cleanup;
use crate::config::{ConfigError, GenParams, PLACEMENT_RETRIES};
use crate::connect;
use crate::corridor::CorridorRecord;
use crate::geometry::Bounds;
use crate::rng::GenRng;
use crate::room::{Door, DoorId, Room, RoomId};
use crate::scene::{NavMeshBaker, Scene};
use crate::walls;

/// Outcome summary of one generation run.
///
/// Everything the fail-soft phases would otherwise only log is recorded
/// here so callers and tests can assert on structure instead of log text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub rooms_requested: usize,
    pub rooms_placed: usize,
    /// Rooms abandoned after exhausting the placement retry budget.
    pub rooms_skipped: usize,
    /// Corridors committed while growing the spanning network.
    pub spanning_corridors: usize,
    /// Corridors committed by the second-connection repair pass.
    pub repair_corridors: usize,
    /// Whether the closing corridor between the first and last room landed.
    pub loop_closed: bool,
    /// Rooms the spanning phase could not reach.
    pub unreachable_rooms: Vec<RoomId>,
    /// Rooms left with fewer than two connections after repair.
    pub under_connected_rooms: Vec<RoomId>,
    /// Unused doors sealed back into solid wall.
    pub doors_sealed: usize,
    pub nav_baked: bool,
}

/// Serializable snapshot of a finished layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub params: GenParams,
    pub rooms: Vec<Room>,
    /// Surviving doors (all connected once cleanup has run).
    pub doors: Vec<Door>,
    /// The corridor network as door-to-door edges.
    pub corridors: Vec<CorridorRecord>,
    pub report: GenerationReport,
}

/// One level-generation run.
pub struct Generator {
    pub(crate) params: GenParams,
    pub(crate) rng: GenRng,
    pub(crate) scene: Scene,
    pub(crate) rooms: Vec<Room>,
    /// Door arena; cleanup vacates the slots of sealed doors.
    pub(crate) doors: Vec<Option<Door>>,
    /// Footprints of every committed straight run, un-shortened.
    pub(crate) run_bounds: Vec<Bounds>,
    /// Footprints of every committed corner.
    pub(crate) corner_bounds: Vec<Bounds>,
    pub(crate) corridors: Vec<CorridorRecord>,
    pub(crate) report: GenerationReport,
    generated: bool,
}

impl Generator {
    /// Validate the parameters and set up an empty run.
    pub fn new(params: GenParams, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let report = GenerationReport {
            seed,
            rooms_requested: params.num_rooms,
            ..GenerationReport::default()
        };
        Ok(Self {
            params,
            rng: GenRng::new(seed),
            scene: Scene::new(),
            rooms: Vec::new(),
            doors: Vec::new(),
            run_bounds: Vec::new(),
            corner_bounds: Vec::new(),
            corridors: Vec::new(),
            report,
            generated: false,
        })
    }

    /// Run the full pipeline: place rooms, connect them, seal unused doors,
    /// bake navigation. Runs once; repeated calls return the existing
    /// report unchanged.
    ///
    /// Generation never aborts: placement and connectivity degrade
    /// gracefully and report what they had to give up.
    pub fn generate(&mut self, baker: Option<&mut dyn NavMeshBaker>) -> &GenerationReport {
        if self.generated {
            log::warn!("generate called twice; returning the existing report");
            return &self.report;
        }
        log::info!(
            "generating level: {} rooms requested (seed {})",
            self.params.num_rooms,
            self.rng.seed()
        );

        self.place_rooms();
        connect::connect_rooms(self);
        cleanup::seal_unused_doors(self);

        match baker {
            Some(baker) => {
                baker.bake(&self.scene);
                self.report.nav_baked = true;
            }
            None => log::error!("no navigation baker configured; skipping bake"),
        }

        self.generated = true;
        log::info!(
            "generation complete: {} rooms, {} corridors, {} doors sealed",
            self.report.rooms_placed,
            self.report.spanning_corridors + self.report.repair_corridors
                + usize::from(self.report.loop_closed),
            self.report.doors_sealed
        );
        &self.report
    }

    /// Rejection-sampling placement: sample a footprint inside the area and
    /// accept it only if, grown by the separation margin, it clears every
    /// room already placed. Each accepted room is walled and doored
    /// immediately.
    fn place_rooms(&mut self) {
        let half = self.params.area_size / 2.0;
        for _ in 0..self.params.num_rooms {
            let mut placed = false;
            for _ in 0..PLACEMENT_RETRIES {
                let w = self
                    .rng
                    .range_f32(self.params.room_size_min, self.params.room_size_max);
                let d = self
                    .rng
                    .range_f32(self.params.room_size_min, self.params.room_size_max);
                let x = self.rng.range_f32(-half + w / 2.0, half - w / 2.0);
                let z = self.rng.range_f32(-half + d / 2.0, half - d / 2.0);

                let candidate = walls::footprint(x, z, w, d);
                let grown = candidate.expanded(self.params.min_room_separation);
                if self.rooms.iter().any(|r| r.bounds.intersects(&grown)) {
                    continue;
                }

                let id = RoomId(self.rooms.len() as u32);
                let room =
                    walls::synthesize_room(id, candidate, &self.params, &mut self.doors, &mut self.scene);
                self.rooms.push(room);
                placed = true;
                break;
            }
            if !placed {
                log::warn!(
                    "no space for another room after {PLACEMENT_RETRIES} attempts; continuing with {}",
                    self.rooms.len()
                );
                self.report.rooms_skipped += 1;
            }
        }
        self.report.rooms_placed = self.rooms.len();
    }

    pub fn params(&self) -> &GenParams {
        &self.params
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Look up a door; `None` once cleanup has sealed it.
    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    /// All live doors.
    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter().flatten()
    }

    /// Committed straight-run footprints, for overlap auditing.
    pub fn committed_runs(&self) -> &[Bounds] {
        &self.run_bounds
    }

    /// Committed corner footprints, for overlap auditing.
    pub fn committed_corners(&self) -> &[Bounds] {
        &self.corner_bounds
    }

    /// Every committed corridor, in commit order.
    pub fn corridors(&self) -> &[CorridorRecord] {
        &self.corridors
    }

    /// Snapshot the finished layout for serialization.
    pub fn layout(&self) -> Layout {
        Layout {
            params: self.params.clone(),
            rooms: self.rooms.clone(),
            doors: self.doors().cloned().collect(),
            corridors: self.corridors.clone(),
            report: self.report.clone(),
        }
    }
}
