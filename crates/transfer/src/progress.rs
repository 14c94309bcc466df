use std::collections::HashMap;

/// Percentage after `completed` of `total` chunks have been accepted.
///
/// `round(100 * completed / total)`. Reaches exactly 100 only once every
/// chunk is in, and never decreases as `completed` grows.
pub fn progress_percent(completed: u32, total: u32) -> u8 {
    debug_assert!(total > 0 && completed <= total);
    ((100.0 * f64::from(completed) / f64::from(total)).round()) as u8
}

/// Per-file upload percentages, aggregated into one overall figure.
///
/// Owned by a single submission attempt and written only by the
/// orchestrator's event consumer, so plain maps suffice.
#[derive(Debug, Default)]
pub struct ProgressTable {
    entries: HashMap<String, u8>,
}

impl ProgressTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file at 0%, so the overall mean accounts for it before
    /// its first chunk completes.
    pub fn register(&mut self, file_id: &str) {
        self.entries.entry(file_id.to_string()).or_insert(0);
    }

    /// Records the latest percentage for a file.
    pub fn set(&mut self, file_id: &str, percent: u8) {
        self.entries.insert(file_id.to_string(), percent);
    }

    /// Percentage for one file, if tracked.
    pub fn get(&self, file_id: &str) -> Option<u8> {
        self.entries.get(file_id).copied()
    }

    /// Arithmetic mean of all tracked percentages; 0 when nothing is tracked.
    pub fn overall(&self) -> u8 {
        if self.entries.is_empty() {
            return 0;
        }
        let sum: u32 = self.entries.values().map(|&p| u32::from(p)).sum();
        (f64::from(sum) / self.entries.len() as f64).round() as u8
    }

    /// Number of tracked files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
