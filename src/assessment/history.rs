use super::domain::EvaluationSnapshot;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::io::Write;
use std::num::NonZeroUsize;

/// Ordered, append-only record of evaluations for one session.
///
/// Unbounded unless built with [`EvaluationHistory::bounded`], in which case the
/// oldest snapshot is dropped once the cap is reached and counted in
/// [`EvaluationHistory::evicted`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationHistory {
    entries: VecDeque<EvaluationSnapshot>,
    limit: Option<NonZeroUsize>,
    evicted: u64,
}

impl EvaluationHistory {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(limit: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.get()),
            limit: Some(limit),
            evicted: 0,
        }
    }

    pub fn with_limit(limit: Option<NonZeroUsize>) -> Self {
        limit.map_or_else(Self::unbounded, Self::bounded)
    }

    /// Record a snapshot. Identical consecutive snapshots are kept as-is.
    pub fn append(&mut self, snapshot: EvaluationSnapshot) {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit.get() {
                self.entries.pop_front();
                self.evicted += 1;
            }
        }
        self.entries.push_back(snapshot);
    }

    /// Every retained snapshot, oldest first.
    pub fn all(&self) -> vec_deque::Iter<'_, EvaluationSnapshot> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&EvaluationSnapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Column-oriented view for time-series charts.
    pub fn series(&self) -> HistorySeries {
        let mut series = HistorySeries::with_capacity(self.entries.len());
        for snapshot in &self.entries {
            series.recorded_at.push(snapshot.recorded_at);
            series
                .bloom_probability
                .push(snapshot.scores.bloom_probability);
            series
                .pollution_probability
                .push(snapshot.scores.pollution_probability);
            series
                .water_quality_index
                .push(snapshot.scores.water_quality_index);
            series.sri.push(snapshot.scores.sri);
        }
        series
    }

    /// Write the history as CSV, header first, one row per snapshot.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(HistoryRow::HEADERS)?;
        for snapshot in &self.entries {
            csv_writer.serialize(HistoryRow::from(snapshot))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Per-metric trend vectors, index-aligned with `recorded_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySeries {
    pub recorded_at: Vec<DateTime<Utc>>,
    pub bloom_probability: Vec<f64>,
    pub pollution_probability: Vec<f64>,
    pub water_quality_index: Vec<f64>,
    pub sri: Vec<f64>,
}

impl HistorySeries {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            recorded_at: Vec::with_capacity(capacity),
            bloom_probability: Vec::with_capacity(capacity),
            pollution_probability: Vec::with_capacity(capacity),
            water_quality_index: Vec::with_capacity(capacity),
            sri: Vec::with_capacity(capacity),
        }
    }
}

#[derive(Debug, Serialize)]
struct HistoryRow {
    recorded_at: String,
    ph: f64,
    temperature: f64,
    turbidity: f64,
    bloom_probability: f64,
    pollution_probability: f64,
    water_quality_index: f64,
    sri: f64,
}

impl HistoryRow {
    const HEADERS: [&'static str; 8] = [
        "recorded_at",
        "ph",
        "temperature",
        "turbidity",
        "bloom_probability",
        "pollution_probability",
        "water_quality_index",
        "sri",
    ];
}

impl From<&EvaluationSnapshot> for HistoryRow {
    fn from(snapshot: &EvaluationSnapshot) -> Self {
        Self {
            recorded_at: snapshot
                .recorded_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            ph: snapshot.inputs.ph(),
            temperature: snapshot.inputs.temperature(),
            turbidity: snapshot.inputs.turbidity(),
            bloom_probability: snapshot.scores.bloom_probability,
            pollution_probability: snapshot.scores.pollution_probability,
            water_quality_index: snapshot.scores.water_quality_index,
            sri: snapshot.scores.sri,
        }
    }
}
