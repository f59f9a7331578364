//! Per-player resource ledgers.
//!
//! Counters are signed so that the affordability rule is a single
//! comparison: a delta is affordable when `current + delta >= 0`.  Spending a
//! multi-resource [`Cost`] is check-then-commit: every entry is checked
//! before any counter moves, so a failed reservation never partially
//! deducts.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use rts_core::{PlayerId, ResourceKind};

// ── Cost ──────────────────────────────────────────────────────────────────────

/// A bundle of resource amounts (e.g. 100 gold + 50 wood).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    entries: Vec<(ResourceKind, u32)>,
}

impl Cost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(kind: ResourceKind, amount: u32) -> Self {
        Self::new().with(kind, amount)
    }

    /// Add `amount` of `kind`.  Repeated kinds are merged.
    pub fn with(mut self, kind: ResourceKind, amount: u32) -> Self {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, a)) => *a = a.saturating_add(amount),
            None => self.entries.push((kind, amount)),
        }
        self
    }

    pub fn entries(&self) -> &[(ResourceKind, u32)] {
        &self.entries
    }

    /// `true` when no resource is required.
    pub fn is_free(&self) -> bool {
        self.entries.iter().all(|&(_, a)| a == 0)
    }

    /// Amount of `kind` in this cost (0 if absent).
    pub fn amount(&self, kind: ResourceKind) -> u32 {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |&(_, a)| a)
    }
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Signed resource counters for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    counters: BTreeMap<ResourceKind, i64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, kind: ResourceKind) -> i64 {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    /// `true` if applying `delta` to `kind` keeps the counter non-negative.
    pub fn can_afford(&self, kind: ResourceKind, delta: i64) -> bool {
        self.balance(kind).saturating_add(delta) >= 0
    }

    /// Apply `delta` if affordable.  Returns whether it was applied.
    pub fn apply(&mut self, kind: ResourceKind, delta: i64) -> bool {
        if !self.can_afford(kind, delta) {
            return false;
        }
        let counter = self.counters.entry(kind).or_insert(0);
        *counter = counter.saturating_add(delta);
        true
    }

    /// `true` if every entry of `cost` can be paid.
    pub fn can_afford_cost(&self, cost: &Cost) -> bool {
        cost.entries()
            .iter()
            .all(|&(kind, amount)| self.can_afford(kind, -(amount as i64)))
    }

    /// Deduct all of `cost` or nothing.
    pub fn try_spend(&mut self, cost: &Cost) -> bool {
        if !self.can_afford_cost(cost) {
            return false;
        }
        for &(kind, amount) in cost.entries() {
            let counter = self.counters.entry(kind).or_insert(0);
            *counter -= amount as i64;
        }
        true
    }

    pub fn credit(&mut self, kind: ResourceKind, amount: u32) {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter = counter.saturating_add(amount as i64);
    }

    /// Give back a previously spent `cost`.
    pub fn refund(&mut self, cost: &Cost) {
        for &(kind, amount) in cost.entries() {
            self.credit(kind, amount);
        }
    }

    /// Iterator over `(kind, balance)` in ascending kind order.
    pub fn balances(&self) -> impl Iterator<Item = (ResourceKind, i64)> + '_ {
        self.counters.iter().map(|(&k, &v)| (k, v))
    }
}

// ── Treasury ──────────────────────────────────────────────────────────────────

/// All players' ledgers.  Ledgers are created on first use.
#[derive(Clone, Debug, Default)]
pub struct Treasury {
    ledgers: FxHashMap<PlayerId, Ledger>,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self, player: PlayerId) -> Option<&Ledger> {
        self.ledgers.get(&player)
    }

    pub fn ledger_mut(&mut self, player: PlayerId) -> &mut Ledger {
        self.ledgers.entry(player).or_default()
    }

    pub fn balance(&self, player: PlayerId, kind: ResourceKind) -> i64 {
        self.ledger(player).map_or(0, |l| l.balance(kind))
    }
}
