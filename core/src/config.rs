use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SimError};
use crate::field::Alliance;
use crate::tasks::Task;

/// Success probabilities for one alliance. Every field is required when loaded from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub auto_leave_prob: f64,
    pub auto_coral_l1_prob: f64,
    pub auto_algae_processor_prob: f64,
    pub teleop_algae_processor_prob: f64,
    pub teleop_algae_net_prob: f64,
    pub teleop_coral_l3_prob: f64,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            auto_leave_prob: 1.0,
            auto_coral_l1_prob: 0.9,
            auto_algae_processor_prob: 0.8,
            teleop_algae_processor_prob: 0.8,
            teleop_algae_net_prob: 0.4,
            teleop_coral_l3_prob: 0.5,
        }
    }
}

impl TeamConfig {
    pub fn uniform(p: f64) -> Self {
        Self {
            auto_leave_prob: p,
            auto_coral_l1_prob: p,
            auto_algae_processor_prob: p,
            teleop_algae_processor_prob: p,
            teleop_algae_net_prob: p,
            teleop_coral_l3_prob: p,
        }
    }

    /// Configured base probability. The net shot is dampened later, in the engine.
    pub fn probability(&self, task: Task) -> f64 {
        match task {
            Task::LeaveStartLine => self.auto_leave_prob,
            Task::AutoCoralL1 => self.auto_coral_l1_prob,
            Task::AutoAlgaeProcessor => self.auto_algae_processor_prob,
            Task::TeleopAlgaeProcessor => self.teleop_algae_processor_prob,
            Task::AlgaeNet => self.teleop_algae_net_prob,
            Task::CoralL3 => self.teleop_coral_l3_prob,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("auto_leave_prob", self.auto_leave_prob),
            ("auto_coral_l1_prob", self.auto_coral_l1_prob),
            ("auto_algae_processor_prob", self.auto_algae_processor_prob),
            ("teleop_algae_processor_prob", self.teleop_algae_processor_prob),
            ("teleop_algae_net_prob", self.teleop_algae_net_prob),
            ("teleop_coral_l3_prob", self.teleop_coral_l3_prob),
        ]
    }

    pub fn validate(&self, team: Alliance) -> Result<()> {
        for (field, value) in self.fields() {
            // NaN fails the range check too.
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfiguration { team, field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    pub red: TeamConfig,
    pub blue: TeamConfig,
}

impl MatchConfig {
    pub fn symmetric(team: TeamConfig) -> Self {
        Self { red: team, blue: team }
    }

    pub fn team(&self, alliance: Alliance) -> &TeamConfig {
        match alliance {
            Alliance::Red => &self.red,
            Alliance::Blue => &self.blue,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.red.validate(Alliance::Red)?;
        self.blue.validate(Alliance::Blue)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// How the autonomous tasks of one robot resolve within a single second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskResolution {
    /// Attempts run in order and the first success ends the robot's turn.
    #[default]
    FirstSuccess,
    /// Every task draws on its own; all successes score and the last one labels the second.
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationModel {
    /// No positions are tracked or reported.
    Untracked,
    /// Relocate anywhere on the field after each task.
    Field,
    /// Relocate inside the alliance's zone for the task.
    #[default]
    Zoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimOptions {
    #[serde(default)]
    pub resolution: TaskResolution,
    #[serde(default = "default_cooldowns")]
    pub cooldowns: bool,
    #[serde(default)]
    pub locations: LocationModel,
}

fn default_cooldowns() -> bool {
    true
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            resolution: TaskResolution::FirstSuccess,
            cooldowns: true,
            locations: LocationModel::Zoned,
        }
    }
}

impl SimOptions {
    /// First-generation behaviour: independent auto draws, no cooldowns, no positions.
    pub fn legacy() -> Self {
        Self {
            resolution: TaskResolution::Independent,
            cooldowns: false,
            locations: LocationModel::Untracked,
        }
    }

    pub fn with_resolution(mut self, resolution: TaskResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_cooldowns(mut self, cooldowns: bool) -> Self {
        self.cooldowns = cooldowns;
        self
    }

    pub fn with_locations(mut self, locations: LocationModel) -> Self {
        self.locations = locations;
        self
    }
}
