use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::adversary::AdversaryKind;

/// Points for one landed hit: damage scaled by the attacker's current combo.
///
/// Negative damage scores nothing.
pub fn hit_points(damage: i32, combo: u32) -> u64 {
    damage.max(0) as u64 * combo as u64
}

/// Match score plus the defeated ledger, in defeat order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    ledger: Vec<AdversaryKind>,
}

impl Scoreboard {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ledger(&self) -> &[AdversaryKind] {
        &self.ledger
    }

    pub fn add(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Credit a defeat: kind score plus a ledger entry.
    pub fn record_defeat(&mut self, kind: AdversaryKind, points: u64) {
        self.add(points);
        self.ledger.push(kind);
    }

    /// Defeats grouped by kind label.
    pub fn defeated_counts(&self) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for kind in &self.ledger {
            *counts.entry(kind.label().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn clear(&mut self) {
        self.score = 0;
        self.ledger.clear();
    }
}
