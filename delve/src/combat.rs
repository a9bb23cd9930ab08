//! Melee resolution and death.
//!
//! Damage is flat: attacker power minus defender defense, floored at zero.

use serde::{Deserialize, Serialize};

use crate::action::ActionError;
use crate::colors;
use crate::entity::{EntityId, RenderOrder};
use crate::world::World;

/// Hit points and combat stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    hp: i32,
    pub max_hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
}

impl Fighter {
    pub fn new(hp: i32, base_defense: i32, base_power: i32) -> Self {
        Self {
            hp,
            max_hp: hp,
            base_defense,
            base_power,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Set hit points, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    pub fn defense(&self) -> i32 {
        self.base_defense
    }

    pub fn power(&self) -> i32 {
        self.base_power
    }

    /// Restore up to `amount` hit points; returns how many were restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.hp == self.max_hp {
            return 0;
        }
        let before = self.hp;
        self.set_hp(self.hp + amount);
        self.hp - before
    }
}

/// `attacker` hits `target` once.
pub fn melee(world: &mut World, attacker: EntityId, target: EntityId) -> Result<(), ActionError> {
    let (attacker_name, power) = {
        let e = world.map.entity(attacker).ok_or(ActionError::MissingActor(attacker))?;
        let a = e.as_actor().ok_or(ActionError::MissingActor(attacker))?;
        (e.name.clone(), a.fighter.power())
    };
    let (target_name, defense) = {
        let e = world.map.entity(target).ok_or(ActionError::NothingToAttack)?;
        let a = e.as_actor().ok_or(ActionError::NothingToAttack)?;
        (e.name.clone(), a.fighter.defense())
    };

    let damage = power - defense;
    let desc = format!("{attacker_name} attacks {target_name}");
    let color = if attacker == world.player {
        colors::PLAYER_ATK
    } else {
        colors::ENEMY_ATK
    };

    if damage <= 0 {
        world
            .log
            .add_message(format!("{desc} but does no damage."), color, true);
        return Ok(());
    }

    world
        .log
        .add_message(format!("{desc} for {damage} hit points."), color, true);
    let killed = match world.map.entity_mut(target).and_then(|e| e.as_actor_mut()) {
        Some(a) => {
            let was_alive = a.is_alive();
            a.fighter.set_hp(a.fighter.hp() - damage);
            was_alive && !a.is_alive()
        }
        None => false,
    };
    if killed {
        die(world, target);
    }
    Ok(())
}

/// Turn an actor into a corpse and award its experience to the player.
pub fn die(world: &mut World, id: EntityId) {
    let is_player = id == world.player;
    let Some(e) = world.map.entity_mut(id) else {
        return;
    };

    let (message, color) = if is_player {
        ("You died!".to_string(), colors::PLAYER_DIE)
    } else {
        (format!("{} is dead!", e.name), colors::ENEMY_DIE)
    };

    e.ch = '%';
    e.color = colors::CORPSE;
    e.blocks_movement = false;
    e.render_order = RenderOrder::Corpse;
    e.name = format!("remains of {}", e.name);
    let xp = match e.as_actor_mut() {
        Some(a) => {
            a.ai = None;
            a.level.xp_given
        }
        None => 0,
    };

    world.log.add_message(message, color, true);

    if !is_player {
        let player = world.player;
        if let Some(p) = world.map.entity_mut(player).and_then(|e| e.as_actor_mut()) {
            p.level.add_xp(xp, &mut world.log);
        }
    }
}
