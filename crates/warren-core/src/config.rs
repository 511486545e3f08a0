//! Generation parameters
//!
//! Every knob the generator accepts, with defaults that produce a mid-sized
//! level. Parameters are validated once up front; generation itself never
//! fails on configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-room retry budget for rejection-sampling placement.
pub const PLACEMENT_RETRIES: usize = 200;

/// A door opening may take up at most this fraction of the shortest room side.
pub const MAX_DOOR_FRACTION: f32 = 0.8;

/// Generation parameters.
///
/// Lengths are world units. The placement area is a square of `area_size`
/// per side centered on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenParams {
    /// Number of rooms to attempt to place.
    pub num_rooms: usize,
    /// Minimum room width/depth.
    pub room_size_min: f32,
    /// Maximum room width/depth.
    pub room_size_max: f32,
    /// Side length of the square placement area.
    pub area_size: f32,
    /// Minimum gap between any two room footprints.
    pub min_room_separation: f32,
    /// Wall height of rooms.
    pub room_height: f32,
    /// Width of door openings.
    pub door_width: f32,
    /// Corridor interior width.
    pub corridor_width: f32,
    /// Corridor interior height.
    pub corridor_height: f32,
    /// Thickness of emitted walls, floors, and ceilings.
    pub wall_thickness: f32,
    /// Margin kept between a corridor and any unrelated geometry.
    pub corridor_clearance: f32,
    /// Mandatory straight run leaving each door, perpendicular to its wall.
    pub initial_straight: f32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            num_rooms: 10,
            room_size_min: 12.0,
            room_size_max: 20.0,
            area_size: 140.0,
            min_room_separation: 10.0,
            room_height: 4.0,
            door_width: 5.0,
            corridor_width: 5.0,
            corridor_height: 3.0,
            wall_thickness: 0.5,
            corridor_clearance: 1.0,
            initial_straight: 4.0,
        }
    }
}

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("room count must be at least 1")]
    NoRooms,

    #[error("room size range is invalid: min {min} > max {max}")]
    BadSizeRange { min: f32, max: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("door width {door_width} exceeds {max_fraction} of the smallest room side {min_side}")]
    DoorTooWide {
        door_width: f32,
        max_fraction: f32,
        min_side: f32,
    },

    #[error("placement area {area_size} cannot hold a room of size {room_size_max}")]
    AreaTooSmall { area_size: f32, room_size_max: f32 },

    #[error("room height {room_height} leaves no lintel above the door opening")]
    RoomTooLow { room_height: f32 },
}

impl GenParams {
    /// Check the parameter set for degenerate values.
    ///
    /// A door opening wider than [`MAX_DOOR_FRACTION`] of the smallest
    /// possible room side would produce negative-width wall pillars, so that
    /// case is rejected here rather than clamped silently during synthesis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        for (name, value) in [
            ("room_size_min", self.room_size_min),
            ("area_size", self.area_size),
            ("min_room_separation", self.min_room_separation),
            ("room_height", self.room_height),
            ("door_width", self.door_width),
            ("corridor_width", self.corridor_width),
            ("corridor_height", self.corridor_height),
            ("wall_thickness", self.wall_thickness),
            ("corridor_clearance", self.corridor_clearance),
            ("initial_straight", self.initial_straight),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.room_size_min > self.room_size_max {
            return Err(ConfigError::BadSizeRange {
                min: self.room_size_min,
                max: self.room_size_max,
            });
        }
        if self.door_width > MAX_DOOR_FRACTION * self.room_size_min {
            return Err(ConfigError::DoorTooWide {
                door_width: self.door_width,
                max_fraction: MAX_DOOR_FRACTION,
                min_side: self.room_size_min,
            });
        }
        if self.room_size_max > self.area_size {
            return Err(ConfigError::AreaTooSmall {
                area_size: self.area_size,
                room_size_max: self.room_size_max,
            });
        }
        // The lintel occupies the top unit of the wall; the opening below it
        // must have positive height.
        if self.room_height <= 1.0 {
            return Err(ConfigError::RoomTooLow {
                room_height: self.room_height,
            });
        }
        Ok(())
    }

    /// Height of a door opening: full wall height minus the lintel band.
    pub fn opening_height(&self) -> f32 {
        self.room_height - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GenParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_rooms_rejected() {
        let params = GenParams {
            num_rooms: 0,
            ..GenParams::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NoRooms));
    }

    #[test]
    fn test_bad_size_range_rejected() {
        let params = GenParams {
            room_size_min: 20.0,
            room_size_max: 12.0,
            ..GenParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::BadSizeRange { .. })
        ));
    }

    #[test]
    fn test_wide_door_rejected() {
        // A 10-unit door in a room that can be 12 units wide leaves pillars,
        // but exceeds the 0.8 fraction cap.
        let params = GenParams {
            door_width: 10.0,
            ..GenParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::DoorTooWide { .. })
        ));
    }

    #[test]
    fn test_low_room_rejected() {
        let params = GenParams {
            room_height: 0.9,
            ..GenParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositive { .. }) | Err(ConfigError::RoomTooLow { .. })
        ));
        let params = GenParams {
            room_height: 1.0,
            ..GenParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::RoomTooLow { room_height: 1.0 })
        );
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let params = GenParams {
            corridor_width: -5.0,
            ..GenParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositive {
                name: "corridor_width",
                ..
            })
        ));
    }
}
