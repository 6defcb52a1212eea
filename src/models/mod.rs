pub mod balance;
pub mod bill;
pub mod settlement;

pub use balance::BalanceSnapshot;
pub use bill::{Bill, ParticipantId};
pub use settlement::{Settlement, SettlementPlan};
