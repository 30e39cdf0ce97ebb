//! Per-actor threat (aggro) table.

use crate::state::ActorId;

/// One hostile target and what it has accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatEntry {
    pub target: ActorId,
    pub hate: i64,
    pub damage: i64,
}

/// Insertion-ordered collection of threat entries.
///
/// Hate only moves through the explicit operations below. Entries keep the
/// position at which they were first inserted, so ties in hate resolve to the
/// earliest target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatTable {
    entries: Vec<ThreatEntry>,
}

impl ThreatTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, target: ActorId) -> &mut ThreatEntry {
        let index = match self.entries.iter().position(|e| e.target == target) {
            Some(index) => index,
            None => {
                self.entries.push(ThreatEntry {
                    target,
                    hate: 0,
                    damage: 0,
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Accumulates damage and hate for `target`, creating the entry if needed.
    pub fn add(&mut self, target: ActorId, damage: i64, hate: i64) {
        let entry = self.entry_mut(target);
        entry.damage = entry.damage.saturating_add(damage);
        entry.hate = entry.hate.saturating_add(hate).max(0);
    }

    /// Records a first sighting as (0 damage, 1 hate). Does nothing if the
    /// target already has an entry.
    pub fn notice(&mut self, target: ActorId) -> bool {
        if self.contains(target) {
            return false;
        }
        self.entries.push(ThreatEntry {
            target,
            hate: 1,
            damage: 0,
        });
        true
    }

    /// Lifts hate for `target` to at least `hate`. Never lowers it.
    pub fn raise_to(&mut self, target: ActorId, hate: i64) {
        let entry = self.entry_mut(target);
        entry.hate = entry.hate.max(hate);
    }

    pub fn contains(&self, target: ActorId) -> bool {
        self.entries.iter().any(|e| e.target == target)
    }

    /// Hate for `target`, 0 when unknown.
    pub fn hate_of(&self, target: ActorId) -> i64 {
        self.get(target).map_or(0, |e| e.hate)
    }

    pub fn get(&self, target: ActorId) -> Option<&ThreatEntry> {
        self.entries.iter().find(|e| e.target == target)
    }

    /// Target with the highest positive hate; ties go to the earliest entry.
    pub fn most_hated(&self) -> Option<ActorId> {
        let mut best: Option<&ThreatEntry> = None;
        for entry in self.entries.iter().filter(|e| e.hate > 0) {
            if best.is_none_or(|b| entry.hate > b.hate) {
                best = Some(entry);
            }
        }
        best.map(|e| e.target)
    }

    /// Drops the entry for `target` (death, disconnect, explicit stop).
    pub fn remove(&mut self, target: ActorId) -> Option<ThreatEntry> {
        let index = self.entries.iter().position(|e| e.target == target)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThreatEntry> {
        self.entries.iter()
    }

    /// Targets in insertion order.
    pub fn targets(&self) -> Vec<ActorId> {
        self.entries.iter().map(|e| e.target).collect()
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

    const A: ActorId = ActorId(1);
    const B: ActorId = ActorId(2);
    const C: ActorId = ActorId(3);

    #[test]
    fn most_hated_picks_maximum() {
        let mut table = ThreatTable::new();
        table.add(A, 0, 10);
        table.add(B, 0, 25);
        assert_eq!(table.most_hated(), Some(B));

        table.remove(B);
        assert_eq!(table.most_hated(), Some(A));
    }

    #[test]
    fn ties_resolve_to_earliest_insertion() {
        let mut table = ThreatTable::new();
        table.add(C, 0, 7);
        table.add(A, 0, 7);
        table.add(B, 0, 7);
        assert_eq!(table.most_hated(), Some(C));
    }

    #[test]
    fn notice_is_idempotent() {
        let mut table = ThreatTable::new();
        assert!(table.notice(A));
        table.add(A, 40, 40);
        assert!(!table.notice(A));
        assert_eq!(table.len(), 1);
        assert_eq!(table.hate_of(A), 41);
    }

    #[test]
    fn zero_hate_entries_are_never_most_hated() {
        let mut table = ThreatTable::new();
        table.add(A, 5, 0);
        assert_eq!(table.most_hated(), None);
    }

    #[test]
    fn raise_to_never_lowers() {
        let mut table = ThreatTable::new();
        table.add(A, 0, 50);
        table.raise_to(A, 20);
        assert_eq!(table.hate_of(A), 50);
        table.raise_to(B, 30);
        assert_eq!(table.hate_of(B), 30);
        assert_eq!(table.targets(), vec![A, B]);
    }
}
