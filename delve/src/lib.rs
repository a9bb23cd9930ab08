//! **delve** — turn-based simulation kernel for a grid roguelike.
//!
//! The kernel decides what every monster does each turn, how far the player
//! sees, where actors may walk, and how a whole game is checkpointed.
//! Rendering, input and dungeon layout stay outside: the host drives a
//! [`World`] with [`Action`]s, reads the map back for drawing, and supplies
//! floors through [`FloorGenerator`].
//!
//! One turn:
//!
//! 1. [`World::handle_player_action`] resolves the player's action.
//! 2. [`scheduler::run_enemy_turns`] lets each monster's [`Ai`] act.
//! 3. [`visibility::update_fov`] recomputes the visible and explored sets.
//!
//! Entities reference their map, and the world references the player, by
//! id only, so [`save::save`] / [`save::load`] work on a plain value tree.

pub mod action;
pub mod ai;
pub mod colors;
pub mod combat;
pub mod config;
pub mod entity;
pub mod gamemap;
pub mod level;
pub mod message_log;
pub mod pathing;
pub mod save;
pub mod scheduler;
pub mod tile;
pub mod visibility;
pub mod world;

#[cfg(test)]
mod testing;

pub use action::{Action, ActionError};
pub use ai::{Ai, ConfusedAi, HostileAi, SteadyAi};
pub use combat::Fighter;
pub use config::{FloorParams, PathCosts, SimConfig};
pub use entity::{Actor, Entity, EntityId, EntityIds, EntityKind, MapId, RenderOrder};
pub use gamemap::GameMap;
pub use level::Level;
pub use message_log::{Message, MessageLog};
pub use save::{SAVE_VERSION, SaveError};
pub use tile::Tile;
pub use world::{FloorGenerator, FloorRequest, GeneratedFloor, LinkError, World};
