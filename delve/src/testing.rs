//! Fixtures shared by the unit tests.

use delve_core::{Point, Range};

use crate::config::SimConfig;
use crate::entity::{Entity, EntityId, EntityIds, MapId, prototypes};
use crate::gamemap::GameMap;
use crate::tile;
use crate::world::{FloorGenerator, FloorRequest, GeneratedFloor, World};

/// A walled rectangle with an open floor inside.
pub fn open_map(id: MapId, width: i32, height: i32) -> GameMap {
    let mut map = GameMap::new(id, width, height);
    map.fill_area(Range::new(1, 1, width - 1, height - 1), tile::FLOOR);
    map
}

/// A world on an open map with the player at `player_pos` and FOV computed.
pub fn open_world(width: i32, height: i32, player_pos: Point) -> World {
    let mut ids = EntityIds::default();
    let mut map = open_map(MapId(0), width, height);
    let player = map.spawn(&mut ids, &prototypes::player(), player_pos);
    let mut world = World::from_parts(map, player, ids, SimConfig::default(), 0xD3_17E);
    world.update_fov();
    world
}

pub fn spawn(world: &mut World, prototype: Entity, pos: Point) -> EntityId {
    world.spawn(&prototype, pos)
}

/// Deterministic floor: one big room, stairs in the far corner, two
/// monsters and a potion away from the start.
#[derive(Debug, Default)]
pub struct Arena;

impl Arena {
    pub const START: Point = Point::new(2, 2);
}

impl FloorGenerator for Arena {
    fn generate(&mut self, request: FloorRequest<'_>) -> GeneratedFloor {
        let w = request.params.map_width;
        let h = request.params.map_height;
        let mut map = open_map(request.map, w, h);

        let stairs = Point::new(w - 3, h - 3);
        map.set_tile(stairs, tile::DOWN_STAIRS);
        map.downstairs = stairs;

        map.spawn(request.ids, &prototypes::orc(), Point::new(w - 6, 3));
        map.spawn(request.ids, &prototypes::troll(), Point::new(w - 6, h - 6));
        map.spawn(request.ids, &prototypes::health_potion(), Point::new(5, 5));

        GeneratedFloor {
            map,
            player_start: Self::START,
        }
    }
}
