use crate::prize::PrizeName;
use std::collections::VecDeque;
use std::fmt;

pub const HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    prize_name: PrizeName,
}

impl HistoryEntry {
    pub fn new(prize_name: PrizeName) -> Self {
        Self { prize_name }
    }

    pub fn prize_name(&self) -> &PrizeName {
        &self.prize_name
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Congratulations! You won {}", self.prize_name)
    }
}

/// Most recent winners first, never more than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_latest_twenty_newest_first() {
        let mut ledger = HistoryLedger::new();
        for i in 0..25 {
            ledger.append(HistoryEntry::new(PrizeName::new(format!("prize {i}"))));
        }

        assert_eq!(ledger.len(), HISTORY_CAPACITY);
        let names: Vec<String> = ledger.iter().map(|e| e.prize_name().to_string()).collect();
        let expected: Vec<String> = (5..25).rev().map(|i| format!("prize {i}")).collect();
        assert_eq!(names, expected);
        assert_eq!(ledger.latest().unwrap().prize_name().as_str(), "prize 24");
    }

    #[test]
    fn test_entry_display() {
        let entry = HistoryEntry::new(PrizeName::from("Sleep"));
        assert_eq!(entry.to_string(), "Congratulations! You won Sleep");
    }
}
