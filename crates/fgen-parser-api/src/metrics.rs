use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics collected during parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserMetrics {
    /// Headers parsed to completion
    pub files_parsed: usize,

    /// Non-empty lines produced by the preprocessor
    pub lines_read: usize,

    /// Line fragments handed to the rule table
    pub fragments_dispatched: usize,

    /// Constructs reported to listeners
    pub constructs_recognized: usize,

    /// Unmatched lines merged with their successor
    pub line_merges: usize,

    /// Unmatched text dropped at end of input
    pub fragments_discarded: usize,

    /// Total time spent parsing
    #[serde(with = "duration_serde")]
    pub total_parse_time: Duration,
}

// Helper module for serializing Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_micros() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_micros(micros))
    }
}

impl Default for ParserMetrics {
    fn default() -> Self {
        Self {
            files_parsed: 0,
            lines_read: 0,
            fragments_dispatched: 0,
            constructs_recognized: 0,
            line_merges: 0,
            fragments_discarded: 0,
            total_parse_time: Duration::ZERO,
        }
    }
}

impl ParserMetrics {
    /// Average parse time per file
    pub fn avg_parse_time(&self) -> Duration {
        if self.files_parsed == 0 {
            Duration::ZERO
        } else {
            self.total_parse_time / self.files_parsed as u32
        }
    }

    /// Fraction of dispatched fragments that needed a merge (0.0 to 1.0)
    pub fn merge_rate(&self) -> f64 {
        if self.fragments_dispatched == 0 {
            0.0
        } else {
            self.line_merges as f64 / self.fragments_dispatched as f64
        }
    }

    /// Merge another metrics object into this one
    pub fn merge(&mut self, other: &ParserMetrics) {
        self.files_parsed += other.files_parsed;
        self.lines_read += other.lines_read;
        self.fragments_dispatched += other.fragments_dispatched;
        self.constructs_recognized += other.constructs_recognized;
        self.line_merges += other.line_merges;
        self.fragments_discarded += other.fragments_discarded;
        self.total_parse_time += other.total_parse_time;
    }
}
