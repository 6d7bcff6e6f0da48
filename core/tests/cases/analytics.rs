use crate::common::TestHarness;
use reefsim_core::*;

#[test]
fn test_summary_counts_match_timeline() {
    let timeline = TestHarness::new().run(31);
    let summary = MatchSummary::from_timeline(&timeline);
    let (red, blue) = timeline.final_scores();

    assert_eq!(summary.red.score, red);
    assert_eq!(summary.blue.score, blue);
    assert_eq!(summary.outcome, Outcome::from_scores(red, blue));

    for alliance in Alliance::ALL {
        let s = summary.alliance(alliance);
        let actions: u32 = timeline
            .iter()
            .map(|e| e.team(alliance).actions.iter().flatten().count() as u32)
            .sum();
        assert_eq!(s.task_counts.values().sum::<u32>(), actions);
        assert_eq!(
            s.task_counts.get("algae_net").copied().unwrap_or(0),
            s.net_fills
        );
    }
}

#[test]
fn test_batch_report_with_zero_probabilities() {
    let h = TestHarness::uniform(0.0);
    let report = run_batch(&h.config, &h.options, 25, 0).unwrap();
    assert_eq!(report.runs, 25);
    assert_eq!(report.ties, 25);
    assert_eq!(report.red.max, 0);
    assert_eq!(report.margin.p99, 0);
}

#[test]
fn test_batch_favours_stronger_alliance() {
    let mut h = TestHarness::new();
    h.config.blue = TeamConfig::uniform(0.1);
    let report = run_batch(&h.config, &h.options, 50, 7).unwrap();

    assert_eq!(report.red_wins + report.blue_wins + report.ties, 50);
    assert!(report.win_rate(Alliance::Red) > 0.9);
    assert!(report.red.p50 > report.blue.p50);
    assert!(report.red.min <= report.red.p50 && report.red.p50 <= report.red.max);
}

#[test]
fn test_batch_rejects_empty_and_invalid() {
    let h = TestHarness::new();
    assert!(matches!(
        run_batch(&h.config, &h.options, 0, 0),
        Err(SimError::EmptyBatch)
    ));

    let mut bad = h.config;
    bad.blue.auto_leave_prob = f64::NAN;
    assert!(matches!(
        run_batch(&bad, &h.options, 3, 0),
        Err(SimError::InvalidConfiguration { .. })
    ));
}
