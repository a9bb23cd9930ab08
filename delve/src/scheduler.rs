//! Enemy turn processing.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::ai;
use crate::entity::{Entity, EntityId};
use crate::world::World;

/// Give every living non-player actor with a behavior one turn, in
/// ascending id order.
///
/// A failed action only costs that actor its turn: the error is logged at
/// debug level and processing moves on to the next actor.
pub fn run_enemy_turns(world: &mut World) {
    let mut rng = SmallRng::seed_from_u64(tick_seed(world.seed, world.turn));
    let player = world.player;
    let ids: Vec<EntityId> = world
        .map
        .actors()
        .filter(|e| e.id != player)
        .map(|e| e.id)
        .collect();

    for id in ids {
        // Earlier actors may have killed this one.
        let acting = world
            .map
            .entity(id)
            .and_then(Entity::as_actor)
            .is_some_and(|a| a.is_alive() && a.ai.is_some());
        if !acting {
            continue;
        }
        if let Err(err) = ai::take_turn(world, id, &mut rng) {
            debug!("turn {}: {id} did nothing: {err}", world.turn);
        }
    }
}

/// Random stream for one tick, derived from the game seed.
fn tick_seed(seed: u64, turn: u64) -> u64 {
    seed ^ turn.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
