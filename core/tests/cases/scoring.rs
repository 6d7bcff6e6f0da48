use crate::common::{self, TestHarness};
use reefsim_core::*;

fn bare() -> SimOptions {
    SimOptions::default()
        .with_cooldowns(false)
        .with_locations(LocationModel::Untracked)
}

#[test]
fn test_certain_auto_first_success_only_leaves() {
    let h = TestHarness::uniform(1.0).options(bare());
    let timeline = h.run(1);

    let after_auto = timeline.at(AUTO_SECONDS).unwrap();
    // 3 robots x 15 seconds x leave (3 pts)
    assert_eq!(after_auto.red.score, 135);
    assert_eq!(after_auto.blue.score, 135);
    for entry in timeline.iter().take(AUTO_SECONDS as usize) {
        assert_eq!(entry.red.action_labels(), ["Leaves start line"; 3]);
    }
    common::assert_increments_match_actions(&timeline);
}

#[test]
fn test_certain_auto_independent_scores_every_task() {
    let h = TestHarness::uniform(1.0).options(bare().with_resolution(TaskResolution::Independent));
    let timeline = h.run(1);

    let after_auto = timeline.at(AUTO_SECONDS).unwrap();
    // 3 robots x 15 seconds x (3 + 3 + 6)
    assert_eq!(after_auto.red.score, 540);
    assert_eq!(after_auto.blue.score, 540);
    // Last success labels the second.
    assert_eq!(after_auto.red.action_labels(), ["Drops algae in processor"; 3]);
}

#[test]
fn test_legacy_preset_matches_independent_auto() {
    let legacy = TestHarness::uniform(1.0).options(SimOptions::legacy()).run(9);
    assert_eq!(legacy.at(AUTO_SECONDS).unwrap().red.score, 540);
    assert!(legacy.iter().all(|e| e.red.locations.is_none()));
}

#[test]
fn test_teleop_windows_with_certain_processor() {
    // Net disabled so teleop is deterministic: processor fires on every t % 5 == 0.
    let h = TestHarness::uniform(1.0)
        .options(bare())
        .both(|t| t.teleop_algae_net_prob = 0.0);
    let timeline = h.run(3);

    for entry in timeline.iter().skip(AUTO_SECONDS as usize) {
        let expected = if entry.second % 5 == 0 {
            "Drops algae in processor"
        } else {
            ""
        };
        assert_eq!(entry.blue.action_labels(), [expected; 3], "t={}", entry.second);
    }
    // 135 from auto, then 27 processor seconds x 3 robots x 6
    assert_eq!(timeline.final_scores(), (621, 621));
}

#[test]
fn test_coral_l3_only_on_tenth_seconds() {
    let h = TestHarness::uniform(0.0)
        .options(bare())
        .both(|t| t.teleop_coral_l3_prob = 1.0);
    let timeline = h.run(4);

    for entry in &timeline {
        let fired = entry.red.actions.iter().flatten().count();
        if entry.second > AUTO_SECONDS && entry.second % 10 == 0 {
            assert_eq!(fired, 3);
            assert_eq!(entry.red.actions[0], Some(Task::CoralL3));
        } else {
            assert_eq!(fired, 0);
        }
    }
    // seconds 20, 30, ..., 150
    assert_eq!(timeline.final_scores(), (14 * 3 * 4, 14 * 3 * 4));
}

#[test]
fn test_zero_probabilities_never_score() {
    for options in [SimOptions::default(), SimOptions::legacy()] {
        let timeline = TestHarness::uniform(0.0).options(options).run(11);
        assert_eq!(timeline.final_scores(), (0, 0));
        for entry in &timeline {
            assert_eq!(entry.red.action_labels(), [""; 3]);
            assert_eq!(entry.blue.action_labels(), [""; 3]);
        }
    }
}

#[test]
fn test_net_fills_dampen_future_shots() {
    let h = TestHarness::uniform(0.0)
        .options(bare())
        .both(|t| t.teleop_algae_net_prob = 1.0);
    let mut sim = h.sim(5);
    while sim.step() {}

    // Only the very first shot (t=21, robot 0) is undamped.
    let first = &sim.entries()[20];
    assert_eq!(first.second, 21);
    assert_eq!(first.red.actions[0], Some(Task::AlgaeNet));

    let fills = sim.red.net_fills;
    let shots = sim
        .entries()
        .iter()
        .flat_map(|e| e.red.actions)
        .flatten()
        .filter(|t| *t == Task::AlgaeNet)
        .count() as u32;
    assert_eq!(fills, shots);
    assert!(fills < 19 * 3, "dampening should cause some misses");
    assert!(effective_net_probability(1.0, fills) >= NET_FLOOR);
}

#[test]
fn test_red_and_blue_are_independent() {
    let mut h = TestHarness::uniform(1.0).options(bare());
    h.config.blue = TeamConfig::uniform(0.0);
    let timeline = h.run(8);

    let (red, blue) = timeline.final_scores();
    assert!(red > 0);
    assert_eq!(blue, 0);
}
