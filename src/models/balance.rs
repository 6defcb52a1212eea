use crate::models::bill::ParticipantId;
use crate::models::settlement::SettlementPlan;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net balances per participant at a point in time. Positive means the
/// participant is owed money, negative means they owe. Derived from the
/// current bill collection on every read and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    balances: BTreeMap<ParticipantId, Decimal>,
}

impl BalanceSnapshot {
    /// Creates a snapshot with every universe participant at zero, so
    /// participants with no bills still appear.
    pub fn for_universe(universe: &[ParticipantId]) -> Self {
        Self {
            balances: universe
                .iter()
                .map(|p| (p.clone(), Decimal::ZERO))
                .collect(),
        }
    }

    pub fn get(&self, participant: &str) -> Decimal {
        self.balances.get(participant).copied().unwrap_or(Decimal::ZERO)
    }

    /// Credits a participant (they are owed more).
    pub fn credit(&mut self, participant: &str, amount: Decimal) {
        *self
            .balances
            .entry(participant.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Debits a participant (they owe more).
    pub fn debit(&mut self, participant: &str, amount: Decimal) {
        *self
            .balances
            .entry(participant.to_string())
            .or_insert(Decimal::ZERO) -= amount;
    }

    /// Participants owed more than `tolerance`, as (id, amount-owed) pairs.
    pub fn creditors(&self, tolerance: Decimal) -> Vec<(ParticipantId, Decimal)> {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance > tolerance)
            .map(|(p, balance)| (p.clone(), *balance))
            .collect()
    }

    /// Participants owing more than `tolerance`, as (id, amount-owed) pairs
    /// with the amount already made positive.
    pub fn debtors(&self, tolerance: Decimal) -> Vec<(ParticipantId, Decimal)> {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance < -tolerance)
            .map(|(p, balance)| (p.clone(), balance.abs()))
            .collect()
    }

    /// Sum of all balances. Zero (within tolerance) for any closed set of
    /// bills, since every debited share is offset by the payer's credit.
    pub fn total(&self) -> Decimal {
        self.balances.values().sum()
    }

    pub fn is_zero_sum(&self, tolerance: Decimal) -> bool {
        self.total().abs() <= tolerance
    }

    /// True when every balance sits within `tolerance` of zero.
    pub fn is_settled(&self, tolerance: Decimal) -> bool {
        self.balances.values().all(|b| b.abs() <= tolerance)
    }

    /// Applies a settlement plan: each transfer moves money from debtor to
    /// creditor. A correct plan leaves the snapshot settled.
    pub fn apply(&mut self, plan: &SettlementPlan) {
        for transfer in &plan.transfers {
            self.credit(&transfer.from, transfer.amount);
            self.debit(&transfer.to, transfer.amount);
        }
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &Decimal)> + '_ {
        self.balances.iter()
    }
}

impl FromIterator<(ParticipantId, Decimal)> for BalanceSnapshot {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Decimal)>>(iter: I) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}
