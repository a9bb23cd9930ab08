//! Experience and character levels.

use serde::{Deserialize, Serialize};

use crate::entity::Actor;
use crate::message_log::MessageLog;

/// Experience track of an actor.
///
/// Monsters carry `level_up_base == 0`, which keeps them from ever gaining
/// experience; they only hand out `xp_given` when they die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub current_level: i32,
    pub current_xp: i32,
    pub level_up_base: i32,
    pub level_up_factor: i32,
    pub xp_given: i32,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            current_level: 1,
            current_xp: 0,
            level_up_base: 0,
            level_up_factor: 150,
            xp_given: 0,
        }
    }
}

impl Level {
    /// A track that can level up, starting at level 1.
    pub fn new(level_up_base: i32) -> Self {
        Self {
            level_up_base,
            ..Self::default()
        }
    }

    /// A monster track worth `xp_given` on death.
    pub fn giving(xp_given: i32) -> Self {
        Self {
            xp_given,
            ..Self::default()
        }
    }

    pub fn experience_to_next_level(&self) -> i32 {
        self.level_up_base + self.current_level * self.level_up_factor
    }

    pub fn requires_level_up(&self) -> bool {
        self.current_xp > self.experience_to_next_level()
    }

    pub fn add_xp(&mut self, xp: i32, log: &mut MessageLog) {
        if xp == 0 || self.level_up_base == 0 {
            return;
        }
        self.current_xp += xp;
        log.add(format!("You gain {xp} experience points!"));
        if self.requires_level_up() {
            log.add(format!("You advance to level {}!", self.current_level + 1));
        }
    }

    pub fn increase_level(&mut self) {
        self.current_xp -= self.experience_to_next_level();
        self.current_level += 1;
    }
}

/// Level-up rewards. Each one raises the level by one.
impl Actor {
    pub fn increase_max_hp(&mut self, amount: i32, log: &mut MessageLog) {
        self.fighter.max_hp += amount;
        let hp = self.fighter.hp() + amount;
        self.fighter.set_hp(hp);
        log.add("Your health improves!");
        self.level.increase_level();
    }

    pub fn increase_power(&mut self, amount: i32, log: &mut MessageLog) {
        self.fighter.base_power += amount;
        log.add("You feel stronger!");
        self.level.increase_level();
    }

    pub fn increase_defense(&mut self, amount: i32, log: &mut MessageLog) {
        self.fighter.base_defense += amount;
        log.add("Your movements are getting swifter!");
        self.level.increase_level();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prototypes;

    #[test]
    fn threshold_grows_with_level() {
        let mut lvl = Level::new(200);
        assert_eq!(lvl.experience_to_next_level(), 350);
        lvl.current_level = 3;
        assert_eq!(lvl.experience_to_next_level(), 650);
    }

    #[test]
    fn monsters_never_gain_xp() {
        let mut log = MessageLog::new();
        let mut lvl = Level::giving(35);
        lvl.add_xp(100, &mut log);
        assert_eq!(lvl.current_xp, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn zero_xp_is_ignored() {
        let mut log = MessageLog::new();
        let mut lvl = Level::new(200);
        lvl.add_xp(0, &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn crossing_the_threshold_announces_level_up() {
        let mut log = MessageLog::new();
        let mut lvl = Level::new(200);
        lvl.add_xp(350, &mut log);
        assert!(!lvl.requires_level_up());
        assert_eq!(log.len(), 1);

        lvl.add_xp(1, &mut log);
        assert!(lvl.requires_level_up());
        let texts: Vec<_> = log.messages().iter().map(|m| m.full_text()).collect();
        assert_eq!(
            texts,
            [
                "You gain 350 experience points!",
                "You gain 1 experience points!",
                "You advance to level 2!",
            ]
        );

        lvl.increase_level();
        assert_eq!(lvl.current_level, 2);
        assert_eq!(lvl.current_xp, 1);
    }

    #[test]
    fn rewards_raise_stats_and_level() {
        let mut log = MessageLog::new();
        let mut player = prototypes::player();
        let actor = player.as_actor_mut().unwrap();
        actor.level.current_xp = 400;

        actor.increase_max_hp(20, &mut log);
        assert_eq!(actor.fighter.max_hp, 50);
        assert_eq!(actor.fighter.hp(), 50);
        assert_eq!(actor.level.current_level, 2);
        assert_eq!(actor.level.current_xp, 50);

        actor.increase_power(1, &mut log);
        assert_eq!(actor.fighter.power(), 3);
        actor.increase_defense(1, &mut log);
        assert_eq!(actor.fighter.defense(), 2);
        assert_eq!(actor.level.current_level, 4);
        assert_eq!(log.len(), 3);
    }
}
