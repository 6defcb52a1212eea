use crate::models::bill::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recommended payment from a debtor to a creditor. Derived fresh from
/// a balance snapshot; never persisted independently of the bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    /// Always strictly positive.
    pub amount: Decimal,
}

impl Settlement {
    pub fn new(from: impl Into<ParticipantId>, to: impl Into<ParticipantId>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Result of settlement optimization: the ordered transfer list plus
/// summary figures for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub transfers: Vec<Settlement>,
    pub transfer_count: usize,
    pub total_transferred: Decimal,
    pub creditor_count: usize,
    pub debtor_count: usize,
}

impl SettlementPlan {
    pub fn new(transfers: Vec<Settlement>, creditor_count: usize, debtor_count: usize) -> Self {
        let total_transferred = transfers.iter().map(|t| t.amount).sum();
        Self {
            transfer_count: transfers.len(),
            total_transferred,
            transfers,
            creditor_count,
            debtor_count,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}
