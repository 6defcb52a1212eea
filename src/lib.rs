pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;

pub use error::{AppError, Result};
pub use models::{BalanceSnapshot, Bill, ParticipantId, Settlement, SettlementPlan};
pub use services::{BalanceAggregator, BillSplitter, SettlementEngine, SettlementOptimizer, ShortfallPolicy};
