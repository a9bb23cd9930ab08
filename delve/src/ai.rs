//! Monster behavior state machine.
//!
//! Each actor owns its automaton in its AI slot. `Hostile` chases the
//! player along a cached path; `Confused` stumbles around for a few turns
//! and then hands the slot back to the behavior it replaced.

use std::collections::VecDeque;

use delve_core::Point;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionError};
use crate::entity::{Actor, Entity, EntityId};
use crate::pathing;
use crate::world::World;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ai {
    Hostile(HostileAi),
    Confused(ConfusedAi),
}

/// Behaviors a confusion can wrap. Excludes `Confused` so confusion never
/// nests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SteadyAi {
    Hostile(HostileAi),
}

impl From<SteadyAi> for Ai {
    fn from(ai: SteadyAi) -> Self {
        match ai {
            SteadyAi::Hostile(h) => Ai::Hostile(h),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostileAi {
    /// Cells still to walk, front first.
    pub path: VecDeque<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusedAi {
    pub previous: Option<SteadyAi>,
    pub turns_remaining: u32,
}

/// Outcome of one decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Act(Action),
    /// Confusion wore off: install this behavior and do nothing else.
    Revert(Option<SteadyAi>),
}

impl Ai {
    pub fn hostile() -> Self {
        Ai::Hostile(HostileAi::default())
    }

    pub fn decide(&mut self, me: &Entity, world: &World, rng: &mut impl Rng) -> Decision {
        match self {
            Ai::Hostile(h) => Decision::Act(h.decide(me, world)),
            Ai::Confused(c) => c.decide(rng),
        }
    }
}

impl HostileAi {
    pub fn decide(&mut self, me: &Entity, world: &World) -> Action {
        let Some(target) = world.player_pos() else {
            return Action::Wait;
        };
        let d = target - me.pos;
        let distance = d.x.abs().max(d.y.abs());

        if world.map.is_visible(me.pos) {
            if distance <= 1 {
                return Action::Melee { dx: d.x, dy: d.y };
            }
            self.path = pathing::path_to(&world.map, me.pos, target, &world.config.paths).into();
        }

        match self.path.pop_front() {
            Some(next) => Action::Move {
                dx: next.x - me.pos.x,
                dy: next.y - me.pos.y,
            },
            None => Action::Wait,
        }
    }
}

impl ConfusedAi {
    pub fn decide(&mut self, rng: &mut impl Rng) -> Decision {
        if self.turns_remaining == 0 {
            return Decision::Revert(self.previous.take());
        }
        let d = Point::COMPASS[rng.random_range(0..Point::COMPASS.len())];
        self.turns_remaining -= 1;
        Decision::Act(Action::Bump { dx: d.x, dy: d.y })
    }
}

impl Actor {
    /// Confuse this actor for `turns` turns. An actor that is already
    /// confused keeps the behavior it will return to; only the count changes.
    pub fn confuse(&mut self, turns: u32) {
        let previous = match self.ai.take() {
            Some(Ai::Confused(c)) => c.previous,
            Some(Ai::Hostile(h)) => Some(SteadyAi::Hostile(h)),
            None => None,
        };
        self.ai = Some(Ai::Confused(ConfusedAi {
            previous,
            turns_remaining: turns,
        }));
    }
}

/// Run one turn of `id`'s behavior.
///
/// The automaton is lifted out of its slot while it decides so it can read
/// the world freely, and put back before its action runs.
pub fn take_turn(world: &mut World, id: EntityId, rng: &mut impl Rng) -> Result<(), ActionError> {
    let Some(mut ai) = world
        .map
        .entity_mut(id)
        .and_then(Entity::as_actor_mut)
        .and_then(|a| a.ai.take())
    else {
        return Ok(());
    };

    let decision = match world.map.entity(id) {
        Some(me) => ai.decide(me, world, rng),
        None => return Err(ActionError::MissingActor(id)),
    };

    match decision {
        Decision::Act(action) => {
            set_ai(world, id, Some(ai));
            action.perform(world, id)
        }
        Decision::Revert(previous) => {
            set_ai(world, id, previous.map(Ai::from));
            if let Some(e) = world.map.entity(id) {
                let text = format!("The {} is no longer confused.", e.name);
                debug!("{id} recovers from confusion");
                world.log.add(text);
            }
            Ok(())
        }
    }
}

fn set_ai(world: &mut World, id: EntityId, ai: Option<Ai>) {
    if let Some(a) = world.map.entity_mut(id).and_then(Entity::as_actor_mut) {
        a.ai = ai;
    }
}
