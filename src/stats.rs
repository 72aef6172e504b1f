//! Command usage statistics.
//!
//! Append-only history of who ran which command and when, kept behind its
//! own lock so recording never contends with market queries. Aggregation
//! (per-window counts, per-actor tallies) happens at read time; the raw
//! history is never compacted.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub actor: String,
    pub at: DateTime<Utc>,
}

/// Per-command aggregate over a time window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageSummary {
    pub total: usize,
    pub in_window: usize,
    pub distinct_actors: usize,
    /// Most frequent actor over the whole history, with their count.
    pub top_actor: Option<(String, usize)>,
}

/// Shared usage-history store.
#[derive(Debug, Default)]
pub struct UsageStats {
    history: RwLock<HashMap<String, Vec<UsageRecord>>>,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one invocation of `command` by `actor`.
    pub fn record(&self, command: &str, actor: &str) {
        let mut history = self.history.write().expect("usage history lock poisoned");
        history
            .entry(command.to_string())
            .or_default()
            .push(UsageRecord {
                actor: actor.to_string(),
                at: Utc::now(),
            });
    }

    pub fn total(&self, command: &str) -> usize {
        self.history
            .read()
            .expect("usage history lock poisoned")
            .get(command)
            .map(|records| records.len())
            .unwrap_or(0)
    }

    /// Aggregate one command's history against `window` back from now.
    pub fn summarize(&self, command: &str, window: Duration) -> UsageSummary {
        let history = self.history.read().expect("usage history lock poisoned");
        let records = match history.get(command) {
            Some(records) => records,
            None => return UsageSummary::default(),
        };
        let cutoff = Utc::now() - window;

        let mut by_actor: HashMap<&str, usize> = HashMap::new();
        let mut in_window = 0;
        for record in records {
            *by_actor.entry(record.actor.as_str()).or_default() += 1;
            if record.at >= cutoff {
                in_window += 1;
            }
        }
        // Alphabetical tie-break keeps the summary reproducible.
        let top_actor = by_actor
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(actor, count)| (actor.to_string(), *count));

        UsageSummary {
            total: records.len(),
            in_window,
            distinct_actors: by_actor.len(),
            top_actor,
        }
    }

    /// One formatted line per command, sorted by name.
    pub fn summary_lines(&self, window: Duration) -> Vec<String> {
        let mut commands: Vec<String> = {
            let history = self.history.read().expect("usage history lock poisoned");
            history.keys().cloned().collect()
        };
        commands.sort();

        let hours = window.num_hours();
        commands
            .iter()
            .map(|command| {
                let summary = self.summarize(command, window);
                let top = match &summary.top_actor {
                    Some((actor, count)) => format!("{} ({})", actor, count),
                    None => "-".to_string(),
                };
                format!(
                    "{}: {} total, {} in last {}h, {} users, top: {}",
                    command, summary.total, summary.in_window, hours, summary.distinct_actors, top
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate_per_command() {
        let stats = UsageStats::new();
        stats.record("overview", "alice");
        stats.record("overview", "bob");
        stats.record("find", "alice");

        assert_eq!(stats.total("overview"), 2);
        assert_eq!(stats.total("find"), 1);
        assert_eq!(stats.total("routes"), 0);
    }

    #[test]
    fn summary_counts_window_and_actors() {
        let stats = UsageStats::new();
        stats.record("overview", "alice");
        stats.record("overview", "alice");
        stats.record("overview", "bob");

        let summary = stats.summarize("overview", Duration::hours(24));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.in_window, 3);
        assert_eq!(summary.distinct_actors, 2);
        assert_eq!(summary.top_actor, Some(("alice".to_string(), 2)));
    }

    #[test]
    fn zero_width_window_excludes_fresh_records_from_count() {
        let stats = UsageStats::new();
        stats.record("export", "alice");
        let summary = stats.summarize("export", Duration::hours(-1));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.in_window, 0);
    }

    #[test]
    fn summary_lines_are_sorted_and_formatted() {
        let stats = UsageStats::new();
        stats.record("routes", "alice");
        stats.record("find", "bob");

        let lines = stats.summary_lines(Duration::hours(1));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("find:"));
        assert!(lines[1].starts_with("routes:"));
        assert!(lines[0].contains("1 total"));
    }

    #[test]
    fn unknown_command_summary_is_empty() {
        let stats = UsageStats::new();
        assert_eq!(stats.summarize("nothing", Duration::hours(1)), UsageSummary::default());
    }
}
