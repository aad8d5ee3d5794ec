//! Reward selection
//!
//! The set of reward items the operator has picked for a case, each with its
//! rarity tag and drop-chance percentage. Selection order is preserved so
//! the submitted reward lines match what the operator saw.

use crate::cases::{CHANCE_TOLERANCE, DEFAULT_DROP_CHANCE};
use crate::models::entities::Rarity;

// == Reward Entry ==
/// Per-item editing state inside a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardEntry {
    pub drop_chance: f64,
    pub rarity: Rarity,
}

impl Default for RewardEntry {
    fn default() -> Self {
        Self {
            drop_chance: DEFAULT_DROP_CHANCE,
            rarity: Rarity::Common,
        }
    }
}

// == Reward Selection ==
/// Ordered mapping from item identifier to its reward entry.
#[derive(Debug, Clone, Default)]
pub struct RewardSelection {
    entries: Vec<(String, RewardEntry)>,
}

impl RewardSelection {
    pub fn new() -> Self {
        Self::default()
    }

    // == Toggle ==
    /// Adds the item with default chance and rarity, or removes it if it is
    /// already selected. Returns true when the item is selected afterwards.
    pub fn toggle(&mut self, item_id: &str) -> bool {
        if let Some(pos) = self.position(item_id) {
            self.entries.remove(pos);
            false
        } else {
            self.entries
                .push((item_id.to_string(), RewardEntry::default()));
            true
        }
    }

    // == Field Edits ==
    /// Replaces the drop chance of a selected item. Out-of-range values are
    /// allowed transiently so the operator can type multi-digit numbers;
    /// only submission enforces the sum. Returns false if the item is not
    /// selected.
    pub fn set_chance(&mut self, item_id: &str, value: f64) -> bool {
        match self.position(item_id) {
            Some(pos) => {
                self.entries[pos].1.drop_chance = value;
                true
            }
            None => false,
        }
    }

    /// Replaces the rarity of a selected item. Returns false if the item is
    /// not selected.
    pub fn set_rarity(&mut self, item_id: &str, rarity: Rarity) -> bool {
        match self.position(item_id) {
            Some(pos) => {
                self.entries[pos].1.rarity = rarity;
                true
            }
            None => false,
        }
    }

    // == Totals ==
    /// Exact sum of all drop chances.
    pub fn total_chance(&self) -> f64 {
        self.entries.iter().map(|(_, e)| e.drop_chance).sum()
    }

    /// Sum rounded to one decimal place, as shown next to the form.
    pub fn display_total(&self) -> f64 {
        (self.total_chance() * 10.0).round() / 10.0
    }

    /// True when the chance sum is close enough to 100%.
    pub fn is_complete(&self) -> bool {
        (self.total_chance() - 100.0).abs() <= CHANCE_TOLERANCE
    }

    // == Introspection ==
    pub fn contains(&self, item_id: &str) -> bool {
        self.position(item_id).is_some()
    }

    pub fn get(&self, item_id: &str) -> Option<&RewardEntry> {
        self.position(item_id).map(|pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RewardEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.entries.iter().position(|(id, _)| id == item_id)
    }
}
