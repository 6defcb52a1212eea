use crate::error::{AppError, Result};
use crate::models::bill::ParticipantId;
use crate::models::{BalanceSnapshot, Settlement, SettlementPlan};
use rust_decimal::Decimal;
use tracing::debug;

/// Reduces a balance snapshot to a list of debtor-to-creditor transfers
/// using greedy largest-first matching. Deterministic but not guaranteed to
/// hit the theoretical minimum transfer count.
#[derive(Debug, Clone)]
pub struct SettlementOptimizer {
    tolerance: Decimal,
}

impl Default for SettlementOptimizer {
    fn default() -> Self {
        // 0.01 currency units absorbs decimal division residue
        Self::new(Decimal::new(1, 2))
    }
}

impl SettlementOptimizer {
    pub fn new(tolerance: Decimal) -> Self {
        Self { tolerance }
    }

    /// Produces the transfer list that zeroes every balance in the snapshot.
    ///
    /// Balances within the tolerance of zero count as already settled.
    /// Repeatedly matches the largest remaining creditor with the largest
    /// remaining debtor (ties broken by participant name) and settles the
    /// smaller of the two amounts. Given a zero-sum snapshot both sides
    /// drain together; anything else is an invariant violation.
    pub fn optimize(&self, snapshot: &BalanceSnapshot) -> Result<SettlementPlan> {
        let mut creditors = snapshot.creditors(self.tolerance);
        let mut debtors = snapshot.debtors(self.tolerance);
        let creditor_count = creditors.len();
        let debtor_count = debtors.len();

        let mut transfers = Vec::new();

        while !creditors.is_empty() && !debtors.is_empty() {
            let ci = Self::largest(&creditors);
            let di = Self::largest(&debtors);

            let settled = creditors[ci].1.min(debtors[di].1);
            transfers.push(Settlement::new(
                debtors[di].0.clone(),
                creditors[ci].0.clone(),
                settled,
            ));

            creditors[ci].1 -= settled;
            debtors[di].1 -= settled;

            if creditors[ci].1 <= self.tolerance {
                creditors.swap_remove(ci);
            }
            if debtors[di].1 <= self.tolerance {
                debtors.swap_remove(di);
            }
        }

        if !creditors.is_empty() || !debtors.is_empty() {
            let residual: Decimal = creditors.iter().map(|(_, amount)| *amount).sum::<Decimal>()
                - debtors.iter().map(|(_, amount)| *amount).sum::<Decimal>();
            return Err(AppError::SettlementInvariantViolation { residual });
        }

        debug!(
            transfers = transfers.len(),
            creditors = creditor_count,
            debtors = debtor_count,
            "optimized settlement plan"
        );

        Ok(SettlementPlan::new(transfers, creditor_count, debtor_count))
    }

    /// Index of the entry with the largest remaining amount; ties go to the
    /// lexicographically smallest participant so the output is stable.
    fn largest(entries: &[(ParticipantId, Decimal)]) -> usize {
        entries
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(idx, _)| idx)
            .expect("entries checked non-empty by caller")
    }
}
