//! The grid map: tiles, visibility overlays and the entities on a floor.

use std::collections::BTreeMap;

use delve_core::{Glyph, Grid, Point, Range};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityIds, MapId};
use crate::tile::{self, Tile};
use crate::world::LinkError;

/// One dungeon floor.
///
/// Entities are keyed by id, so iteration order is ascending id. Lookups
/// that could match several entities on one cell return the first in that
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    pub id: MapId,
    pub(crate) tiles: Grid<Tile>,
    pub(crate) visible: Grid<bool>,
    pub(crate) explored: Grid<bool>,
    entities: BTreeMap<EntityId, Entity>,
    pub downstairs: Point,
}

impl GameMap {
    /// A solid-wall map of the given size.
    pub fn new(id: MapId, width: i32, height: i32) -> Self {
        Self {
            id,
            tiles: Grid::new(width, height, tile::WALL),
            visible: Grid::new(width, height, false),
            explored: Grid::new(width, height, false),
            entities: BTreeMap::new(),
            downstairs: Point::ZERO,
        }
    }

    pub fn width(&self) -> i32 {
        self.tiles.width()
    }

    pub fn height(&self) -> i32 {
        self.tiles.height()
    }

    pub fn bounds(&self) -> Range {
        self.tiles.bounds()
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.tiles.contains(p)
    }

    // -------------------------------------------------------------------
    // Tiles
    // -------------------------------------------------------------------

    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.tiles.at(p)
    }

    pub fn set_tile(&mut self, p: Point, t: Tile) {
        self.tiles.set(p, t);
    }

    /// Set every cell of `area` (clipped to the map) to `t`.
    pub fn fill_area(&mut self, area: Range, t: Tile) {
        for p in area.iter() {
            self.tiles.set(p, t);
        }
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Whether `p` is inside the map and walkable.
    pub fn walkable(&self, p: Point) -> bool {
        self.tiles.at(p).is_some_and(|t| t.walkable)
    }

    pub fn transparent(&self, p: Point) -> bool {
        self.tiles.at(p).is_some_and(|t| t.transparent)
    }

    // -------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------

    pub fn is_visible(&self, p: Point) -> bool {
        self.visible.at(p).copied().unwrap_or(false)
    }

    pub fn is_explored(&self, p: Point) -> bool {
        self.explored.at(p).copied().unwrap_or(false)
    }

    pub fn visible(&self) -> &Grid<bool> {
        &self.visible
    }

    pub fn explored(&self) -> &Grid<bool> {
        &self.explored
    }

    // -------------------------------------------------------------------
    // Entities
    // -------------------------------------------------------------------

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Add `entity` to this map, taking it over as owner.
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        entity.map = self.id;
        let id = entity.id;
        self.entities.insert(id, entity);
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Place a copy of `prototype` at `pos` under a fresh id.
    pub fn spawn(&mut self, ids: &mut EntityIds, prototype: &Entity, pos: Point) -> EntityId {
        let mut entity = prototype.clone();
        entity.id = ids.allocate();
        entity.pos = pos;
        self.insert(entity)
    }

    /// Living actors. Evaluated on each call since actors can die mid-turn.
    pub fn actors(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values().filter(|e| e.is_alive())
    }

    pub fn items(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values().filter(|e| e.is_item())
    }

    pub fn blocking_entity_at(&self, p: Point) -> Option<&Entity> {
        self.entities
            .values()
            .find(|e| e.blocks_movement && e.pos == p)
    }

    pub fn actor_at(&self, p: Point) -> Option<&Entity> {
        self.actors().find(|e| e.pos == p)
    }

    // -------------------------------------------------------------------
    // Renderer views
    // -------------------------------------------------------------------

    /// Tile look at `p`: lit in view, dark when remembered, shroud otherwise.
    pub fn glyph_at(&self, p: Point) -> Glyph {
        match self.tiles.at(p) {
            Some(t) if self.is_visible(p) => t.light,
            Some(t) if self.is_explored(p) => t.dark,
            _ => tile::SHROUD,
        }
    }

    /// Entities in view, bottom layer first.
    pub fn render_list(&self) -> Vec<&Entity> {
        let mut list: Vec<&Entity> = self
            .entities
            .values()
            .filter(|e| self.is_visible(e.pos))
            .collect();
        list.sort_by_key(|e| e.render_order);
        list
    }

    /// Verify that every entity agrees with its key and points back here.
    pub fn check_links(&self) -> Result<(), LinkError> {
        for (&key, e) in &self.entities {
            if key != e.id {
                return Err(LinkError::KeyMismatch { key, id: e.id });
            }
            if e.map != self.id {
                return Err(LinkError::WrongMap {
                    entity: e.id,
                    expected: self.id,
                    found: e.map,
                });
            }
        }
        Ok(())
    }
}
