//! Simulation tuning and floor parameters.

use serde::{Deserialize, Serialize};

/// Player sight radius, in cells.
pub const FOV_RADIUS: i32 = 8;
/// Extra cost for pathing through a cell held by a blocking entity.
pub const CROWD_PENALTY: i32 = 10;
/// Step weight for an orthogonal move.
pub const CARDINAL_COST: i32 = 2;
/// Step weight for a diagonal move.
pub const DIAGONAL_COST: i32 = 3;

/// Cost model used by monster pathfinding.
///
/// A lower `crowd_penalty` makes monsters queue behind each other in
/// corridors; a higher one sends them on longer detours around the crowd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCosts {
    pub cardinal: i32,
    pub diagonal: i32,
    pub crowd_penalty: i32,
}

impl Default for PathCosts {
    fn default() -> Self {
        Self {
            cardinal: CARDINAL_COST,
            diagonal: DIAGONAL_COST,
            crowd_penalty: CROWD_PENALTY,
        }
    }
}

/// Settings that travel with a [`World`](crate::World) and are saved with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub fov_radius: i32,
    pub paths: PathCosts,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fov_radius: FOV_RADIUS,
            paths: PathCosts::default(),
        }
    }
}

/// Size and population limits handed to the floor generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorParams {
    pub map_width: i32,
    pub map_height: i32,
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_monsters_per_room: u32,
    pub max_items_per_room: u32,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 43,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            max_monsters_per_room: 2,
            max_items_per_room: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_tuning() {
        let c = SimConfig::default();
        assert_eq!(c.fov_radius, 8);
        assert_eq!(c.paths.cardinal, 2);
        assert_eq!(c.paths.diagonal, 3);
        assert_eq!(c.paths.crowd_penalty, 10);
        assert!(c.paths.diagonal < 2 * c.paths.cardinal);
    }

    #[test]
    fn config_reads_from_json() {
        let json = r#"{"fov_radius":6,"paths":{"cardinal":2,"diagonal":3,"crowd_penalty":25}}"#;
        let c: SimConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.fov_radius, 6);
        assert_eq!(c.paths.crowd_penalty, 25);

        let params = FloorParams::default();
        let back: FloorParams =
            serde_json::from_str(&serde_json::to_string(&params).unwrap()).unwrap();
        assert_eq!(back, params);
    }
}
