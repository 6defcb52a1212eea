use crate::config::Settings;
use crate::error::Result;
use crate::models::bill::ParticipantId;
use crate::models::{BalanceSnapshot, Bill, SettlementPlan};
use crate::services::aggregator::BalanceAggregator;
use crate::services::optimizer::SettlementOptimizer;
use crate::services::splitter::{BillSplitter, ShortfallPolicy};
use rust_decimal::Decimal;
use tracing::info;

/// Wires the splitter, aggregator, and optimizer into one engine. Pure and
/// synchronous; holds configuration only, never state between calls.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    aggregator: BalanceAggregator,
    optimizer: SettlementOptimizer,
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(ShortfallPolicy::default(), Decimal::new(1, 2))
    }
}

impl SettlementEngine {
    pub fn new(policy: ShortfallPolicy, tolerance: Decimal) -> Self {
        Self {
            aggregator: BalanceAggregator::new(BillSplitter::new(policy, tolerance)),
            optimizer: SettlementOptimizer::new(tolerance),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.engine.shortfall_policy,
            settings.engine.settlement_tolerance,
        )
    }

    /// Net balances for the current bill collection.
    pub fn balances(&self, bills: &[Bill], universe: &[ParticipantId]) -> Result<BalanceSnapshot> {
        self.aggregator.aggregate(bills, universe)
    }

    /// Transfer list that settles the given snapshot.
    pub fn settlements(&self, snapshot: &BalanceSnapshot) -> Result<SettlementPlan> {
        self.optimizer.optimize(snapshot)
    }

    /// Full pipeline: bills in, net balances and settlement plan out.
    pub fn settle(
        &self,
        bills: &[Bill],
        universe: &[ParticipantId],
    ) -> Result<(BalanceSnapshot, SettlementPlan)> {
        let snapshot = self.aggregator.aggregate(bills, universe)?;
        let plan = self.optimizer.optimize(&snapshot)?;

        info!(
            bills = bills.len(),
            participants = snapshot.len(),
            transfers = plan.transfer_count,
            "settlement computed"
        );

        Ok((snapshot, plan))
    }
}
