pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod tasks;

pub use analytics::{run_batch, AllianceSummary, BatchReport, MatchSummary, Outcome, ScoreStats};
pub use config::{LocationModel, MatchConfig, SimOptions, TaskResolution, TeamConfig};
pub use engine::{
    effective_net_probability, simulate, simulate_with, RobotState, Simulation, TeamSnapshot,
    TeamState, Timeline, TimelineEntry,
};
pub use error::{Result, SimError};
pub use field::{Alliance, Point, Zone, ZoneKind, ZoneTable};
pub use tasks::{Period, Task};

/// Match timing, in simulated seconds.
pub const MATCH_SECONDS: u32 = 150;
pub const AUTO_SECONDS: u32 = 15;

pub const ROBOTS_PER_TEAM: usize = 3;
/// The field is a square of this side length.
pub const FIELD_SIZE: f64 = 10.0;

/// Net-shot dampening per successful shot, and the floor it cannot push below.
pub const NET_DAMPING: f64 = 0.05;
pub const NET_FLOOR: f64 = 0.1;
