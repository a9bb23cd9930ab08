//! Actions actors take on their turn.

use delve_core::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat;
use crate::entity::EntityId;
use crate::world::World;

/// An action that could not be carried out. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("That way is blocked.")]
    Blocked,
    #[error("Nothing to attack.")]
    NothingToAttack,
    #[error("entity {0} is not on the current map")]
    MissingActor(EntityId),
    #[error("entity {0} is dead")]
    Dead(EntityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Wait,
    Move { dx: i32, dy: i32 },
    Melee { dx: i32, dy: i32 },
    /// Move, or attack whatever actor stands in the way.
    Bump { dx: i32, dy: i32 },
}

impl Action {
    pub fn perform(self, world: &mut World, actor: EntityId) -> Result<(), ActionError> {
        let origin = world
            .map
            .entity(actor)
            .map(|e| e.pos)
            .ok_or(ActionError::MissingActor(actor))?;

        match self {
            Action::Wait => Ok(()),
            Action::Move { dx, dy } => {
                let dest = origin.shift(dx, dy);
                if !world.map.walkable(dest) || world.map.blocking_entity_at(dest).is_some() {
                    return Err(ActionError::Blocked);
                }
                if let Some(e) = world.map.entity_mut(actor) {
                    e.pos = dest;
                }
                Ok(())
            }
            Action::Melee { dx, dy } => {
                let target = target_at(world, origin.shift(dx, dy))
                    .ok_or(ActionError::NothingToAttack)?;
                combat::melee(world, actor, target)
            }
            Action::Bump { dx, dy } => {
                if target_at(world, origin.shift(dx, dy)).is_some() {
                    Action::Melee { dx, dy }.perform(world, actor)
                } else {
                    Action::Move { dx, dy }.perform(world, actor)
                }
            }
        }
    }
}

fn target_at(world: &World, p: Point) -> Option<EntityId> {
    world.map.actor_at(p).map(|e| e.id)
}
