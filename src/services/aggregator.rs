use crate::error::Result;
use crate::models::bill::ParticipantId;
use crate::models::{BalanceSnapshot, Bill};
use crate::services::splitter::BillSplitter;
use tracing::debug;

/// Folds a bill collection into one net balance per participant.
#[derive(Debug, Clone, Default)]
pub struct BalanceAggregator {
    splitter: BillSplitter,
}

impl BalanceAggregator {
    pub fn new(splitter: BillSplitter) -> Self {
        Self { splitter }
    }

    /// Computes net balances for every universe participant over `bills`.
    ///
    /// Each payer is credited the full amount they fronted and every
    /// participant is debited their split share, so the snapshot sums to
    /// zero bill-by-bill. Universe members with no bills appear with a zero
    /// balance; participants referenced by a bill but absent from the
    /// universe still appear. Fails fast on the first malformed bill rather
    /// than skipping it and corrupting the totals.
    pub fn aggregate(&self, bills: &[Bill], universe: &[ParticipantId]) -> Result<BalanceSnapshot> {
        let mut snapshot = BalanceSnapshot::for_universe(universe);

        for bill in bills {
            bill.validate(universe)?;
            let shares = self.splitter.split(bill)?;

            snapshot.credit(&bill.paid_by, bill.amount);
            for (participant, share) in &shares {
                snapshot.debit(participant, *share);
            }
        }

        debug!(
            bills = bills.len(),
            participants = snapshot.len(),
            total = %snapshot.total(),
            "aggregated net balances"
        );

        Ok(snapshot)
    }
}
