//! Climb achievements.
//!
//! Height and coin milestones, each firing at most once per session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Milestone identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    Height50,
    Height100,
    Height200,
    Height400,
    Coins10,
    Coins25,
    Coins50,
}

impl Achievement {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Height50 => "Off the Ground",
            Self::Height100 => "Head in the Clouds",
            Self::Height200 => "Thin Air",
            Self::Height400 => "Stratosphere",
            Self::Coins10 => "Pocket Change",
            Self::Coins25 => "Treasure Hunter",
            Self::Coins50 => "Dragon's Hoard",
        }
    }

    fn reached(&self, max_height: f32, coins: u32) -> bool {
        match self {
            Self::Height50 => max_height >= 50.0,
            Self::Height100 => max_height >= 100.0,
            Self::Height200 => max_height >= 200.0,
            Self::Height400 => max_height >= 400.0,
            Self::Coins10 => coins >= 10,
            Self::Coins25 => coins >= 25,
            Self::Coins50 => coins >= 50,
        }
    }

    pub fn all() -> [Achievement; 7] {
        [
            Self::Height50,
            Self::Height100,
            Self::Height200,
            Self::Height400,
            Self::Coins10,
            Self::Coins25,
            Self::Coins50,
        ]
    }
}

/// Tracks which milestones have already fired
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AchievementBank {
    unlocked: HashSet<Achievement>,
}

impl AchievementBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Evaluate every locked milestone against the session counters,
    /// returning the ones that fired this call
    pub fn check(&mut self, max_height: f32, coins: u32) -> Vec<Achievement> {
        let mut fired = Vec::new();
        for achievement in Achievement::all() {
            if !self.unlocked.contains(&achievement) && achievement.reached(max_height, coins) {
                self.unlocked.insert(achievement);
                fired.push(achievement);
            }
        }
        fired
    }
}
