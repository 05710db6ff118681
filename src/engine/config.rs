use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BAND_HEIGHT, FRONTIER_MARGIN, PLAYER_HEIGHT};
use crate::generation::GeneratorTuning;
use crate::physics::RuleSet;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed simulation config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("band height must be positive, got {0}")]
    BandHeight(f32),
    #[error("frontier margin must be positive, got {0}")]
    FrontierMargin(f32),
    #[error("step bounds must satisfy 0 < min <= max, got [{0}, {1}]")]
    StepBounds(f32, f32),
    #[error("{0} must lie in [0, 1], got {1}")]
    Probability(&'static str, f64),
}

/// Top-level simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub seed: u64,
    pub ruleset: RuleSet,
    /// Player eye position at session start
    pub spawn: [f32; 3],
    /// Vertical extent of each generated band
    pub band_height: f32,
    /// Generation triggers within this distance of the frontier
    pub frontier_margin: f32,
    pub tuning: GeneratorTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ruleset: RuleSet::Extended,
            spawn: [0.0, PLAYER_HEIGHT + 0.5, 0.0],
            band_height: BAND_HEIGHT,
            frontier_margin: FRONTIER_MARGIN,
            tuning: GeneratorTuning::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band_height <= 0.0 {
            return Err(ConfigError::BandHeight(self.band_height));
        }
        if self.frontier_margin <= 0.0 {
            return Err(ConfigError::FrontierMargin(self.frontier_margin));
        }
        let t = &self.tuning;
        // A non-advancing cursor would stall the tick loop
        if t.step_min <= 0.0 || t.step_max < t.step_min {
            return Err(ConfigError::StepBounds(t.step_min, t.step_max));
        }
        for (name, p) in [
            ("stepping_stone_prob", t.stepping_stone_prob),
            ("moving_prob", t.moving_prob),
            ("bounce_prob", t.bounce_prob),
            ("power_up_prob", t.power_up_prob),
            ("coin_prob_base", t.coin_prob_base),
            ("coin_prob_max", t.coin_prob_max),
            ("model_prob_low", t.model_prob_low),
            ("model_prob_high", t.model_prob_high),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Probability(name, p));
            }
        }
        Ok(())
    }
}
