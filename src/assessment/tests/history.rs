use super::common::*;
use crate::assessment::history::EvaluationHistory;
use std::num::NonZeroUsize;

#[test]
fn all_returns_snapshots_in_insertion_order() {
    let mut history = EvaluationHistory::unbounded();
    let snapshots = vec![
        snapshot(7.0, 20.0, 5.0, 0),
        snapshot(6.2, 26.0, 7.5, 5),
        snapshot(8.8, 9.0, 0.4, 10),
    ];

    for entry in &snapshots {
        history.append(entry.clone());
    }

    assert_eq!(history.len(), snapshots.len());
    assert!(history.all().eq(snapshots.iter()));
    assert_eq!(history.latest(), snapshots.last());
}

#[test]
fn all_is_restartable_and_read_only() {
    let mut history = EvaluationHistory::unbounded();
    history.append(snapshot(7.0, 20.0, 5.0, 0));
    history.append(snapshot(7.1, 21.0, 4.0, 1));

    let view = history.all();
    let first_pass: Vec<_> = view.clone().collect();
    let second_pass: Vec<_> = view.collect();

    assert_eq!(first_pass, second_pass);
    assert_eq!(history.all().count(), 2);
}

#[test]
fn identical_snapshots_are_not_merged() {
    let mut history = EvaluationHistory::unbounded();
    let repeated = snapshot(7.0, 20.0, 5.0, 0);

    history.append(repeated.clone());
    history.append(repeated.clone());
    history.append(repeated);

    assert_eq!(history.len(), 3);
    assert_eq!(history.evicted(), 0);
}

#[test]
fn unbounded_history_keeps_every_entry() {
    let mut history = EvaluationHistory::unbounded();
    for offset in 0..1_000 {
        history.append(snapshot(7.0, 20.0, 5.0, offset));
    }

    assert_eq!(history.len(), 1_000);
    assert!(history.limit().is_none());
}

#[test]
fn bounded_history_drops_oldest_and_counts_evictions() {
    let limit = NonZeroUsize::new(3).expect("non-zero");
    let mut history = EvaluationHistory::bounded(limit);

    for offset in 0..5 {
        history.append(snapshot(7.0, 20.0, f64::from(offset as u8), offset));
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.evicted(), 2);
    let retained: Vec<i64> = history
        .all()
        .map(|entry| (entry.recorded_at - timestamp(0)).num_minutes())
        .collect();
    assert_eq!(retained, vec![2, 3, 4]);
}

#[test]
fn bounded_history_never_exceeds_its_limit() {
    let limit = NonZeroUsize::new(1).expect("non-zero");
    let mut history = EvaluationHistory::with_limit(Some(limit));

    for offset in 0..40 {
        history.append(snapshot(7.0, 20.0, 5.0, offset));
        assert!(history.len() <= limit.get(), "len {} after {offset}", history.len());
    }

    assert_eq!(history.evicted(), 39);
    let payload = serde_json::to_value(&history).expect("history serializes");
    assert_eq!(payload["entries"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["limit"], 1);
    assert_eq!(payload["evicted"], 39);
}

#[test]
fn series_is_index_aligned_with_entries() {
    let mut history = EvaluationHistory::unbounded();
    let first = snapshot(7.0, 20.0, 5.0, 0);
    let second = snapshot(5.5, 30.0, 8.0, 15);
    history.append(first.clone());
    history.append(second.clone());

    let series = history.series();

    assert_eq!(series.recorded_at, vec![first.recorded_at, second.recorded_at]);
    assert_eq!(
        series.bloom_probability,
        vec![
            first.scores.bloom_probability,
            second.scores.bloom_probability
        ]
    );
    assert_eq!(series.sri, vec![first.scores.sri, second.scores.sri]);
    assert_eq!(series.water_quality_index.len(), 2);
    assert_eq!(series.pollution_probability.len(), 2);
}

#[test]
fn csv_export_writes_header_and_one_row_per_snapshot() {
    let mut history = EvaluationHistory::unbounded();
    history.append(snapshot(7.0, 20.0, 5.0, 0));
    history.append(snapshot(6.0, 12.0, 1.0, 30));

    let mut buffer = Vec::new();
    history.write_csv(&mut buffer).expect("csv export succeeds");
    let text = String::from_utf8(buffer).expect("utf-8 csv");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "recorded_at,ph,temperature,turbidity,bloom_probability,pollution_probability,water_quality_index,sri"
    );
    assert!(lines[1].starts_with("2025-06-01T08:00:00.000Z,7.0,20.0,5.0,"));
    assert!(lines[2].starts_with("2025-06-01T08:30:00.000Z,6.0,12.0,1.0,"));
}

#[test]
fn csv_export_of_empty_history_is_header_only() {
    let history = EvaluationHistory::unbounded();
    let mut buffer = Vec::new();
    history.write_csv(&mut buffer).expect("csv export succeeds");

    assert_eq!(String::from_utf8(buffer).expect("utf-8").lines().count(), 1);
}
