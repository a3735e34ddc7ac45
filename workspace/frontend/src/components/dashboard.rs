pub mod payment_legend;
pub mod stats;
pub mod view;

pub use view::Dashboard;
