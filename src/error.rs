use rust_decimal::Decimal;
use thiserror::Error;

/// Application-level errors for the settlement engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// A bill failed structural validation before any arithmetic ran.
    #[error("malformed bill {bill_id}: {reason}")]
    MalformedBill { bill_id: String, reason: String },

    /// Every participant on the bill is capped, the caps under-cover the
    /// amount, and the configured shortfall policy refuses the remainder.
    #[error("bill {bill_id} leaves {shortfall} unassigned after applying contribution caps")]
    UnassignedShortfall { bill_id: String, shortfall: Decimal },

    /// Creditors and debtors did not drain together during optimization.
    /// Indicates a defect or a non-zero-sum input, never a user error.
    #[error("settlement invariant violated: residual imbalance of {residual}")]
    SettlementInvariantViolation { residual: Decimal },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn malformed(bill_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedBill {
            bill_id: bill_id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
