//! Append-only mission log shared by both phases.

use serde::{Deserialize, Serialize};

/// Ordered transcript of operator-facing messages for one mission.
///
/// Entries are only ever appended; insertion order is significant and the
/// transcript is persisted verbatim by the archive at mission end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionLog {
    entries: Vec<String>,
}

impl MissionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the transcript.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    /// The full transcript in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended since a previously observed length.
    #[must_use]
    pub fn since(&self, mark: usize) -> &[String] {
        &self.entries[mark.min(self.entries.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut log = MissionLog::new();
        log.push("primeiro");
        log.push(String::from("segundo"));
        assert_eq!(log.entries(), ["primeiro", "segundo"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn since_returns_tail_and_tolerates_stale_marks() {
        let mut log = MissionLog::new();
        log.push("a");
        let mark = log.len();
        log.push("b");
        assert_eq!(log.since(mark), ["b"]);
        assert!(log.since(99).is_empty());
    }
}
