use hdrhistogram::Histogram;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{MatchConfig, SimOptions};
use crate::engine::{Simulation, Timeline};
use crate::error::{Result, SimError};
use crate::field::Alliance;
use crate::tasks::Task;

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    RedWin,
    BlueWin,
    Tie,
}

impl Outcome {
    pub fn from_scores(red: u32, blue: u32) -> Self {
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Outcome::RedWin,
            std::cmp::Ordering::Less => Outcome::BlueWin,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct AllianceSummary {
    pub score: u32,
    pub net_fills: u32,
    pub task_counts: BTreeMap<&'static str, u32>,
}

/// Post-match digest of a single timeline.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct MatchSummary {
    pub red: AllianceSummary,
    pub blue: AllianceSummary,
    pub outcome: Outcome,
}

impl MatchSummary {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let (red_score, blue_score) = timeline.final_scores();
        let tally = |alliance: Alliance, score: u32| {
            let mut task_counts = BTreeMap::new();
            let mut net_fills = 0;
            for task in timeline.iter().flat_map(|e| e.team(alliance).actions).flatten() {
                if task == Task::AlgaeNet {
                    net_fills += 1;
                }
                *task_counts.entry(task_key(task)).or_insert(0) += 1;
            }
            AllianceSummary {
                score,
                net_fills,
                task_counts,
            }
        };
        Self {
            red: tally(Alliance::Red, red_score),
            blue: tally(Alliance::Blue, blue_score),
            outcome: Outcome::from_scores(red_score, blue_score),
        }
    }

    pub fn alliance(&self, alliance: Alliance) -> &AllianceSummary {
        match alliance {
            Alliance::Red => &self.red,
            Alliance::Blue => &self.blue,
        }
    }
}

fn task_key(task: Task) -> &'static str {
    match task {
        Task::LeaveStartLine => "leave_start_line",
        Task::AutoCoralL1 => "auto_coral_l1",
        Task::AutoAlgaeProcessor => "auto_algae_processor",
        Task::TeleopAlgaeProcessor => "teleop_algae_processor",
        Task::AlgaeNet => "algae_net",
        Task::CoralL3 => "coral_l3",
    }
}

#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct ScoreStats {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
}

impl ScoreStats {
    fn from_histogram(h: &Histogram<u64>) -> Self {
        Self {
            min: h.min(),
            max: h.max(),
            mean: h.mean(),
            p50: h.value_at_quantile(0.50),
            p90: h.value_at_quantile(0.90),
            p99: h.value_at_quantile(0.99),
        }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct BatchReport {
    pub runs: u32,
    pub red: ScoreStats,
    pub blue: ScoreStats,
    /// Absolute score difference.
    pub margin: ScoreStats,
    pub red_wins: u32,
    pub blue_wins: u32,
    pub ties: u32,
}

impl BatchReport {
    pub fn win_rate(&self, alliance: Alliance) -> f64 {
        let wins = match alliance {
            Alliance::Red => self.red_wins,
            Alliance::Blue => self.blue_wins,
        };
        wins as f64 / self.runs as f64
    }
}

struct ScoreHistograms {
    red: Histogram<u64>,
    blue: Histogram<u64>,
    margin: Histogram<u64>,
}

impl ScoreHistograms {
    fn new() -> Result<Self> {
        let make = || Histogram::<u64>::new(3).map_err(|e| SimError::Histogram(format!("{e:?}")));
        Ok(Self {
            red: make()?,
            blue: make()?,
            margin: make()?,
        })
    }

    fn record(&mut self, red: u32, blue: u32) -> Result<()> {
        let margin = red.abs_diff(blue);
        for (h, v) in [
            (&mut self.red, red),
            (&mut self.blue, blue),
            (&mut self.margin, margin),
        ] {
            h.record(u64::from(v))
                .map_err(|e| SimError::Histogram(format!("{e:?}")))?;
        }
        Ok(())
    }
}

/// Plays `runs` matches with seeds `base_seed, base_seed + 1, ...` and aggregates final scores.
pub fn run_batch(
    config: &MatchConfig,
    options: &SimOptions,
    runs: u32,
    base_seed: u64,
) -> Result<BatchReport> {
    if runs == 0 {
        return Err(SimError::EmptyBatch);
    }
    config.validate()?;

    let mut hist = ScoreHistograms::new()?;
    let (mut red_wins, mut blue_wins, mut ties) = (0, 0, 0);

    for i in 0..runs {
        let seed = base_seed.wrapping_add(u64::from(i));
        let timeline = Simulation::with_seed(*config, *options, seed)?.run();
        let (red, blue) = timeline.final_scores();
        hist.record(red, blue)?;
        match Outcome::from_scores(red, blue) {
            Outcome::RedWin => red_wins += 1,
            Outcome::BlueWin => blue_wins += 1,
            Outcome::Tie => ties += 1,
        }
    }

    let report = BatchReport {
        runs,
        red: ScoreStats::from_histogram(&hist.red),
        blue: ScoreStats::from_histogram(&hist.blue),
        margin: ScoreStats::from_histogram(&hist.margin),
        red_wins,
        blue_wins,
        ties,
    };
    log::info!(
        "batch of {runs}: red p50 {} / blue p50 {}, wins {red_wins}-{blue_wins} ({ties} ties)",
        report.red.p50,
        report.blue.p50
    );
    Ok(report)
}
