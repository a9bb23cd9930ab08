//! The game session: current floor, player, message log and turn driver.

use delve_core::Point;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::{Action, ActionError};
use crate::colors;
use crate::config::{FloorParams, SimConfig};
use crate::entity::{Entity, EntityId, EntityIds, MapId};
use crate::gamemap::GameMap;
use crate::message_log::MessageLog;
use crate::scheduler;
use crate::visibility;

/// A broken reference in the entity graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("player {0} is not on the current map")]
    MissingPlayer(EntityId),
    #[error("entity {entity} points at {found} but lives on {expected}")]
    WrongMap {
        entity: EntityId,
        expected: MapId,
        found: MapId,
    },
    #[error("entity {id} is stored under key {key}")]
    KeyMismatch { key: EntityId, id: EntityId },
}

/// What the floor generator is asked to build.
pub struct FloorRequest<'a> {
    pub params: &'a FloorParams,
    /// 1-based depth.
    pub floor: u32,
    /// Id the new map must carry.
    pub map: MapId,
    /// Allocator for the entities the generator places.
    pub ids: &'a mut EntityIds,
    pub seed: u64,
}

/// A freshly built floor, without the player.
pub struct GeneratedFloor {
    pub map: GameMap,
    pub player_start: Point,
}

/// Builds dungeon floors. Layout is entirely up to the implementation.
pub trait FloorGenerator {
    fn generate(&mut self, request: FloorRequest<'_>) -> GeneratedFloor;
}

/// Entire mutable state of one game.
///
/// Entities refer to their map and the world refers to the player by id,
/// so a `World` is a plain tree of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub map: GameMap,
    pub player: EntityId,
    pub log: MessageLog,
    pub current_floor: u32,
    pub params: FloorParams,
    pub config: SimConfig,
    pub seed: u64,
    /// Completed player turns.
    pub turn: u64,
    ids: EntityIds,
    next_map: u32,
}

impl World {
    /// Assemble a world around a map that already holds the player.
    pub fn from_parts(
        map: GameMap,
        player: EntityId,
        ids: EntityIds,
        config: SimConfig,
        seed: u64,
    ) -> Self {
        let next_map = map.id.0 + 1;
        Self {
            map,
            player,
            log: MessageLog::new(),
            current_floor: 1,
            params: FloorParams::default(),
            config,
            seed,
            turn: 0,
            ids,
            next_map,
        }
    }

    /// Build floor 1 and place a copy of `player` at its start.
    pub fn new_game(
        config: SimConfig,
        params: FloorParams,
        player: &Entity,
        generator: &mut impl FloorGenerator,
        seed: u64,
    ) -> Result<Self, LinkError> {
        let mut ids = EntityIds::default();
        let floor = generator.generate(FloorRequest {
            params: &params,
            floor: 1,
            map: MapId(0),
            ids: &mut ids,
            seed,
        });
        let mut map = floor.map;
        map.check_links()?;
        let player_id = map.spawn(&mut ids, player, floor.player_start);

        let mut world = World::from_parts(map, player_id, ids, config, seed);
        world.params = params;
        world.check_links()?;
        world.update_fov();
        world.log.add_message(
            "Hello and welcome, adventurer, to yet another dungeon!",
            colors::WELCOME_TEXT,
            true,
        );
        info!("new game on {} with seed {seed}", world.map.id);
        Ok(world)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.map.entity(self.player)
    }

    pub fn player_pos(&self) -> Option<Point> {
        self.player().map(|e| e.pos)
    }

    /// Place a copy of `prototype` on the current map.
    pub fn spawn(&mut self, prototype: &Entity, pos: Point) -> EntityId {
        self.map.spawn(&mut self.ids, prototype, pos)
    }

    /// Recompute the player's view of the current map.
    pub fn update_fov(&mut self) {
        if let Some(origin) = self.player_pos() {
            visibility::update_fov(&mut self.map, origin, self.config.fov_radius);
        }
    }

    /// Resolve one player action. On success the turn passes: monsters act
    /// and the view is refreshed. On failure nothing has happened and the
    /// error is for the caller to show.
    pub fn handle_player_action(&mut self, action: Action) -> Result<(), ActionError> {
        let player = self.player;
        if !self.player().is_some_and(Entity::is_alive) {
            return Err(ActionError::Dead(player));
        }
        action.perform(self, player)?;
        self.turn += 1;
        scheduler::run_enemy_turns(self);
        self.update_fov();
        Ok(())
    }

    /// Go one floor down. The old map is dropped and replaced by the one
    /// `generator` builds; the player keeps its id and stats.
    pub fn descend(&mut self, generator: &mut impl FloorGenerator) -> Result<(), LinkError> {
        let floor = self.current_floor + 1;
        let map_id = MapId(self.next_map);
        let GeneratedFloor {
            mut map,
            player_start,
        } = generator.generate(FloorRequest {
            params: &self.params,
            floor,
            map: map_id,
            ids: &mut self.ids,
            seed: self.seed,
        });
        map.check_links()?;

        let mut player = self
            .map
            .remove(self.player)
            .ok_or(LinkError::MissingPlayer(self.player))?;
        player.pos = player_start;
        map.insert(player);

        self.map = map;
        self.next_map += 1;
        self.current_floor = floor;
        self.update_fov();
        self.log
            .add_message("You descend the staircase.", colors::DESCEND, true);
        info!("descended to floor {floor} ({map_id})");
        Ok(())
    }

    /// Whether the player stands on the current floor's stairs.
    pub fn on_downstairs(&self) -> bool {
        self.player_pos() == Some(self.map.downstairs)
    }

    /// Verify every id reference in the world.
    pub fn check_links(&self) -> Result<(), LinkError> {
        self.map.check_links()?;
        if self.player().is_none() {
            return Err(LinkError::MissingPlayer(self.player));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prototypes;
    use crate::testing::{self, Arena};
    use crate::tile;

    fn new_game() -> World {
        World::new_game(
            SimConfig::default(),
            FloorParams::default(),
            &prototypes::player(),
            &mut Arena::default(),
            42,
        )
        .unwrap()
    }

    #[test]
    fn new_game_places_player_and_sees() {
        let world = new_game();
        assert_eq!(world.current_floor, 1);
        assert_eq!(world.player_pos(), Some(Arena::START));
        assert!(world.map.is_visible(Arena::START));
        assert!(world.map.is_explored(Arena::START));
        assert_eq!(world.player().unwrap().map, world.map.id);
        assert!(world.check_links().is_ok());
        assert_eq!(
            world.log.last().unwrap().full_text(),
            "Hello and welcome, adventurer, to yet another dungeon!"
        );
    }

    #[test]
    fn failed_player_action_passes_no_turn() {
        let mut world = new_game();
        let pos = world.player_pos().unwrap();
        world.map.set_tile(pos.shift(0, -1), tile::WALL);
        let err = world.handle_player_action(Action::Move { dx: 0, dy: -1 });
        assert_eq!(err, Err(ActionError::Blocked));
        assert_eq!(world.turn, 0);
        assert_eq!(world.player_pos(), Some(pos));
    }

    #[test]
    fn player_action_runs_a_full_turn() {
        let mut world = testing::open_world(20, 20, Point::new(3, 3));
        let orc = testing::spawn(&mut world, prototypes::orc(), Point::new(8, 3));
        world.update_fov();

        world.handle_player_action(Action::Move { dx: 1, dy: 0 }).unwrap();

        assert_eq!(world.turn, 1);
        assert_eq!(world.player_pos(), Some(Point::new(4, 3)));
        // The orc saw the player and stepped closer.
        assert_eq!(world.map.entity(orc).unwrap().pos, Point::new(7, 3));
        assert!(world.map.is_visible(Point::new(12, 3)));
    }

    #[test]
    fn dead_player_cannot_act() {
        let mut world = testing::open_world(8, 8, Point::new(3, 3));
        let player = world.player;
        if let Some(a) = world.map.entity_mut(player).and_then(Entity::as_actor_mut) {
            a.fighter.set_hp(0);
        }
        assert_eq!(
            world.handle_player_action(Action::Wait),
            Err(ActionError::Dead(player))
        );
    }

    #[test]
    fn descend_swaps_the_map() {
        let mut world = new_game();
        let player = world.player;
        let old_map = world.map.id;
        let hp_before = world.player().unwrap().as_actor().unwrap().fighter.hp();

        world.descend(&mut Arena::default()).unwrap();

        assert_eq!(world.current_floor, 2);
        assert_ne!(world.map.id, old_map);
        assert_eq!(world.player, player);
        let p = world.player().unwrap();
        assert_eq!(p.map, world.map.id);
        assert_eq!(p.pos, Arena::START);
        assert_eq!(p.as_actor().unwrap().fighter.hp(), hp_before);
        assert!(world.map.is_visible(Arena::START));
        assert!(world.check_links().is_ok());
        assert_eq!(
            world.log.last().unwrap().full_text(),
            "You descend the staircase."
        );

        // Ids keep growing across floors.
        let monster_ids: Vec<_> = world
            .map
            .actors()
            .filter(|e| e.id != player)
            .map(|e| e.id)
            .collect();
        assert!(monster_ids.iter().all(|&id| id > player));
    }

    #[test]
    fn stairs_position_is_tracked() {
        let mut world = new_game();
        assert!(!world.on_downstairs());
        let stairs = world.map.downstairs;
        let player = world.player;
        if let Some(e) = world.map.entity_mut(player) {
            e.pos = stairs;
        }
        assert!(world.on_downstairs());
    }

    #[test]
    fn missing_player_breaks_links() {
        let mut world = new_game();
        let player = world.player;
        world.map.remove(player);
        assert_eq!(world.check_links(), Err(LinkError::MissingPlayer(player)));
    }
}
