pub mod date_picker;
pub mod view;

pub use view::Analytics;
