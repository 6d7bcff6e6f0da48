use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};

use crate::config::{LocationModel, MatchConfig, SimOptions, TaskResolution, TeamConfig};
use crate::error::Result;
use crate::field::{start_positions, Alliance, Point, Zone, ZoneTable};
use crate::tasks::{Period, Task};
use crate::{MATCH_SECONDS, NET_DAMPING, NET_FLOOR, ROBOTS_PER_TEAM};

/// Net-shot probability after `fills` successful shots. Dampening never pushes it
/// below the floor, and the floor never lifts it above the configured base: a
/// plain `max(0.1, ..)` would give a team configured at 0.0 a 10% net chance,
/// so an all-zero configuration could still score.
pub fn effective_net_probability(base: f64, fills: u32) -> f64 {
    (base - NET_DAMPING * fills as f64).max(NET_FLOOR.min(base))
}

fn attempt<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotState {
    /// The robot sits out every second strictly before this one.
    pub busy_until: u32,
    pub location: Option<Point>,
}

impl RobotState {
    pub fn is_available(&self, second: u32) -> bool {
        self.busy_until <= second
    }
}

#[derive(Debug, Clone)]
pub struct TeamState {
    pub alliance: Alliance,
    pub score: u32,
    pub net_fills: u32,
    pub robots: [RobotState; ROBOTS_PER_TEAM],
    zones: ZoneTable,
}

impl TeamState {
    pub fn new(alliance: Alliance, options: &SimOptions) -> Self {
        let tracked = options.locations != LocationModel::Untracked;
        let robots = start_positions(alliance).map(|p| RobotState {
            busy_until: 0,
            location: tracked.then_some(p),
        });
        Self {
            alliance,
            score: 0,
            net_fills: 0,
            robots,
            zones: ZoneTable::for_alliance(alliance),
        }
    }

    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    /// Advances every robot of the alliance through one second, in index order.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        second: u32,
        config: &TeamConfig,
        options: &SimOptions,
        rng: &mut R,
    ) -> TeamSnapshot {
        let mut actions = [None; ROBOTS_PER_TEAM];
        for (idx, action) in actions.iter_mut().enumerate() {
            *action = self.act(idx, second, config, options, rng);
        }

        let locations = match (
            self.robots[0].location,
            self.robots[1].location,
            self.robots[2].location,
        ) {
            (Some(a), Some(b), Some(c)) => Some([a, b, c]),
            _ => None,
        };

        TeamSnapshot {
            actions,
            locations,
            score: self.score,
        }
    }

    fn act<R: Rng + ?Sized>(
        &mut self,
        idx: usize,
        second: u32,
        config: &TeamConfig,
        options: &SimOptions,
        rng: &mut R,
    ) -> Option<Task> {
        if !self.robots[idx].is_available(second) {
            return None;
        }

        let period = Period::at(second);
        let chosen = if period == Period::Auto {
            match options.resolution {
                TaskResolution::FirstSuccess => period
                    .tasks()
                    .into_iter()
                    .find(|task| attempt(rng, config.probability(*task))),
                TaskResolution::Independent => {
                    let mut last = None;
                    for task in period.tasks() {
                        if attempt(rng, config.probability(task)) {
                            if let Some(earlier) = last {
                                self.score_task(idx, earlier, second);
                            }
                            last = Some(task);
                        }
                    }
                    last
                }
            }
        } else {
            let net = effective_net_probability(config.teleop_algae_net_prob, self.net_fills);
            period.tasks().into_iter().find(|task| {
                let p = match task {
                    Task::AlgaeNet => net,
                    _ => config.probability(*task),
                };
                task.is_open(second) && attempt(rng, p)
            })
        };

        let chosen = chosen?;
        self.score_task(idx, chosen, second);
        self.settle(idx, chosen, second, options, rng);
        Some(chosen)
    }

    fn score_task(&mut self, idx: usize, task: Task, second: u32) {
        self.score += task.points();
        if task == Task::AlgaeNet {
            self.net_fills += 1;
        }
        log::trace!(
            "t={second} {} robot {idx}: {} (+{}, total {})",
            self.alliance,
            task.label(),
            task.points(),
            self.score
        );
    }

    /// Cooldown and relocation for the task that labels the robot's second.
    fn settle<R: Rng + ?Sized>(
        &mut self,
        idx: usize,
        task: Task,
        second: u32,
        options: &SimOptions,
        rng: &mut R,
    ) {
        if options.cooldowns {
            self.robots[idx].busy_until = second + rng.gen_range(task.cooldown());
        }
        let zone = match options.locations {
            LocationModel::Untracked => return,
            LocationModel::Field => Zone::FIELD,
            LocationModel::Zoned => *self.zones.get(task.zone()),
        };
        self.robots[idx].location = Some(zone.sample(rng));
    }
}

fn serialize_labels<S: Serializer>(
    actions: &[Option<Task>; ROBOTS_PER_TEAM],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(actions.iter().map(|a| a.map_or("", Task::label)))
}

/// One alliance's view of a single second.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSnapshot {
    /// Serialized as display labels, "" for an idle robot.
    #[serde(serialize_with = "serialize_labels")]
    pub actions: [Option<Task>; ROBOTS_PER_TEAM],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<[Point; ROBOTS_PER_TEAM]>,
    pub score: u32,
}

impl TeamSnapshot {
    /// Display labels, with "" for a robot that did nothing.
    pub fn action_labels(&self) -> [&'static str; ROBOTS_PER_TEAM] {
        self.actions.map(|a| a.map_or("", Task::label))
    }

    pub fn points_scored(&self) -> u32 {
        self.actions.iter().flatten().map(|t| t.points()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub second: u32,
    pub red: TeamSnapshot,
    pub blue: TeamSnapshot,
}

impl TimelineEntry {
    pub fn team(&self, alliance: Alliance) -> &TeamSnapshot {
        match alliance {
            Alliance::Red => &self.red,
            Alliance::Blue => &self.blue,
        }
    }
}

/// The finished match, one entry per second in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a 1-based second.
    pub fn at(&self, second: u32) -> Option<&TimelineEntry> {
        let idx = usize::try_from(second.checked_sub(1)?).ok()?;
        self.entries.get(idx)
    }

    /// (red, blue)
    pub fn final_scores(&self) -> (u32, u32) {
        self.entries
            .last()
            .map_or((0, 0), |e| (e.red.score, e.blue.score))
    }

    pub fn score_curve(&self, alliance: Alliance) -> Vec<u32> {
        self.entries.iter().map(|e| e.team(alliance).score).collect()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEntry;
    type IntoIter = std::slice::Iter<'a, TimelineEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

pub struct Simulation<R: Rng> {
    /// Last simulated second; 0 before the first step.
    pub second: u32,
    pub red: TeamState,
    pub blue: TeamState,
    config: MatchConfig,
    options: SimOptions,
    rng: R,
    entries: Vec<TimelineEntry>,
}

impl<R: Rng> Simulation<R> {
    pub fn new(config: MatchConfig, options: SimOptions, rng: R) -> Result<Self> {
        config.validate()?;
        log::debug!("starting match: {options:?}");
        Ok(Self {
            second: 0,
            red: TeamState::new(Alliance::Red, &options),
            blue: TeamState::new(Alliance::Blue, &options),
            config,
            options,
            rng,
            entries: Vec::with_capacity(MATCH_SECONDS as usize),
        })
    }

    pub fn team(&self, alliance: Alliance) -> &TeamState {
        match alliance {
            Alliance::Red => &self.red,
            Alliance::Blue => &self.blue,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.second >= MATCH_SECONDS
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Simulates the next second. Returns false once the match is over.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        let second = self.second + 1;
        let red = self
            .red
            .tick(second, &self.config.red, &self.options, &mut self.rng);
        let blue = self
            .blue
            .tick(second, &self.config.blue, &self.options, &mut self.rng);
        self.entries.push(TimelineEntry { second, red, blue });
        self.second = second;
        true
    }

    pub fn run(mut self) -> Timeline {
        while self.step() {}
        log::debug!(
            "match finished: red {} / blue {} (net fills {} / {})",
            self.red.score,
            self.blue.score,
            self.red.net_fills,
            self.blue.net_fills
        );
        Timeline {
            entries: self.entries,
        }
    }
}

impl Simulation<StdRng> {
    pub fn with_seed(config: MatchConfig, options: SimOptions, seed: u64) -> Result<Self> {
        Self::new(config, options, StdRng::seed_from_u64(seed))
    }
}

/// Runs a full match with the default (zoned, cooldown-bearing, first-success) engine.
pub fn simulate<R: Rng + ?Sized>(config: &MatchConfig, rng: &mut R) -> Result<Timeline> {
    simulate_with(config, &SimOptions::default(), rng)
}

pub fn simulate_with<R: Rng + ?Sized>(
    config: &MatchConfig,
    options: &SimOptions,
    rng: &mut R,
) -> Result<Timeline> {
    Ok(Simulation::new(*config, *options, rng)?.run())
}
