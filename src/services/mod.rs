pub mod aggregator;
pub mod engine;
pub mod optimizer;
pub mod splitter;

pub use aggregator::BalanceAggregator;
pub use engine::SettlementEngine;
pub use optimizer::SettlementOptimizer;
pub use splitter::{BillSplitter, ShortfallPolicy};
