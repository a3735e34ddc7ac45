pub mod export;
pub mod stats;
pub mod transactions;

pub use export::export;
pub use stats::stats;
pub use transactions::transactions;
