pub mod filters;
pub mod table;
pub mod view;

pub use view::Transactions;
