//! Entities: stable ids, the shared entity record and its kinds.

use std::fmt;

use delve_core::{Color, Point};
use serde::{Deserialize, Serialize};

use crate::ai::Ai;
use crate::colors;
use crate::combat::Fighter;
use crate::level::Level;

/// Identity of an entity, unique across every floor of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Id carried by prototypes that were never placed on a map.
    pub const UNSET: EntityId = EntityId(u32::MAX);
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a floor map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MapId(pub u32);

impl MapId {
    pub const UNSET: MapId = MapId(u32::MAX);
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map {}", self.0)
    }
}

/// Entity id allocator. Saved with the world so ids never repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Draw layering. Later variants are drawn on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// What an entity is, beyond its position and looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Actor(Actor),
    Item,
}

/// A positioned object on exactly one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Owning map. Kept in sync by [`GameMap::insert`](crate::GameMap::insert).
    pub map: MapId,
    pub name: String,
    pub ch: char,
    pub color: Color,
    pub pos: Point,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Entity {
    /// An unplaced actor. Actors block movement.
    pub fn actor(
        name: &str,
        ch: char,
        color: Color,
        ai: Option<Ai>,
        fighter: Fighter,
        level: Level,
    ) -> Self {
        Self {
            id: EntityId::UNSET,
            map: MapId::UNSET,
            name: name.to_string(),
            ch,
            color,
            pos: Point::ZERO,
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(Actor { ai, fighter, level }),
        }
    }

    /// An unplaced item. Items never block.
    pub fn item(name: &str, ch: char, color: Color) -> Self {
        Self {
            id: EntityId::UNSET,
            map: MapId::UNSET,
            name: name.to_string(),
            ch,
            color,
            pos: Point::ZERO,
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item,
        }
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(a) => Some(a),
            EntityKind::Item => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(a) => Some(a),
            EntityKind::Item => None,
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, EntityKind::Item)
    }

    /// Whether this is an actor with hit points left.
    pub fn is_alive(&self) -> bool {
        self.as_actor().is_some_and(Actor::is_alive)
    }
}

/// Actor component: behavior slot, combat stats and experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// `None` for inert actors, corpses and the player.
    pub ai: Option<Ai>,
    pub fighter: Fighter,
    pub level: Level,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.fighter.hp() > 0
    }
}

/// Prototype entities cloned onto maps by [`GameMap::spawn`](crate::GameMap::spawn).
pub mod prototypes {
    use super::*;

    pub fn player() -> Entity {
        Entity::actor(
            "Player",
            '@',
            colors::PLAYER,
            None,
            Fighter::new(30, 1, 2),
            Level::new(200),
        )
    }

    pub fn orc() -> Entity {
        Entity::actor(
            "Orc",
            'o',
            colors::ORC,
            Some(Ai::hostile()),
            Fighter::new(10, 0, 3),
            Level::giving(35),
        )
    }

    pub fn troll() -> Entity {
        Entity::actor(
            "Troll",
            'T',
            colors::TROLL,
            Some(Ai::hostile()),
            Fighter::new(16, 1, 4),
            Level::giving(100),
        )
    }

    pub fn health_potion() -> Entity {
        Entity::item("Health Potion", '!', Color::from_rgb(127, 0, 255))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut ids = EntityIds::default();
        assert_eq!(ids.allocate(), EntityId(0));
        assert_eq!(ids.allocate(), EntityId(1));
        assert_eq!(ids.allocate(), EntityId(2));
    }

    #[test]
    fn prototypes_are_unplaced() {
        let orc = prototypes::orc();
        assert_eq!(orc.id, EntityId::UNSET);
        assert_eq!(orc.map, MapId::UNSET);
        assert!(orc.blocks_movement);
        assert!(orc.is_alive());
        assert!(orc.as_actor().is_some_and(|a| a.ai.is_some()));

        let potion = prototypes::health_potion();
        assert!(potion.is_item());
        assert!(!potion.blocks_movement);
        assert!(!potion.is_alive());
    }

    #[test]
    fn render_order_layers() {
        assert!(RenderOrder::Corpse < RenderOrder::Item);
        assert!(RenderOrder::Item < RenderOrder::Actor);
    }
}
