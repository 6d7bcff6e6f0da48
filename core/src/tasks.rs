use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::field::ZoneKind;
use crate::AUTO_SECONDS;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Auto,
    Teleop,
}

impl Period {
    /// Period a 1-based match second falls in.
    pub fn at(second: u32) -> Self {
        if second <= AUTO_SECONDS {
            Period::Auto
        } else {
            Period::Teleop
        }
    }

    /// Tasks available in the period, in attempt order.
    pub fn tasks(self) -> [Task; 3] {
        match self {
            Period::Auto => Task::AUTO,
            Period::Teleop => Task::TELEOP,
        }
    }
}

/// Everything a robot can score with. The two processor drops share a label
/// but carry different cooldowns, so they stay distinct variants.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    LeaveStartLine,
    AutoCoralL1,
    AutoAlgaeProcessor,
    TeleopAlgaeProcessor,
    AlgaeNet,
    CoralL3,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::LeaveStartLine,
        Task::AutoCoralL1,
        Task::AutoAlgaeProcessor,
        Task::TeleopAlgaeProcessor,
        Task::AlgaeNet,
        Task::CoralL3,
    ];

    /// Attempt order during the autonomous period.
    pub const AUTO: [Task; 3] = [
        Task::LeaveStartLine,
        Task::AutoCoralL1,
        Task::AutoAlgaeProcessor,
    ];

    /// Attempt order during teleop.
    pub const TELEOP: [Task; 3] = [Task::TeleopAlgaeProcessor, Task::AlgaeNet, Task::CoralL3];

    pub fn label(self) -> &'static str {
        match self {
            Task::LeaveStartLine => "Leaves start line",
            Task::AutoCoralL1 => "Scores coral on L1",
            Task::AutoAlgaeProcessor | Task::TeleopAlgaeProcessor => "Drops algae in processor",
            Task::AlgaeNet => "Shoots algae into net",
            Task::CoralL3 => "Scores coral on L3",
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Task::LeaveStartLine | Task::AutoCoralL1 => 3,
            Task::AutoAlgaeProcessor | Task::TeleopAlgaeProcessor => 6,
            Task::AlgaeNet | Task::CoralL3 => 4,
        }
    }

    /// Seconds the robot stays busy after completing the task, inclusive.
    pub fn cooldown(self) -> RangeInclusive<u32> {
        match self {
            Task::LeaveStartLine => 1..=2,
            Task::AutoCoralL1 => 3..=5,
            Task::AutoAlgaeProcessor => 5..=7,
            Task::TeleopAlgaeProcessor => 5..=10,
            Task::AlgaeNet => 7..=12,
            Task::CoralL3 => 5..=8,
        }
    }

    pub fn zone(self) -> ZoneKind {
        match self {
            Task::LeaveStartLine | Task::AutoCoralL1 | Task::CoralL3 => ZoneKind::Coral,
            Task::AutoAlgaeProcessor | Task::TeleopAlgaeProcessor => ZoneKind::Processor,
            Task::AlgaeNet => ZoneKind::Barge,
        }
    }

    /// Teleop tasks open only on seconds divisible by this window.
    pub fn teleop_window(self) -> Option<u32> {
        match self {
            Task::TeleopAlgaeProcessor => Some(5),
            Task::AlgaeNet => Some(7),
            Task::CoralL3 => Some(10),
            _ => None,
        }
    }

    pub fn is_open(self, second: u32) -> bool {
        self.teleop_window().map_or(true, |w| second % w == 0)
    }
}
