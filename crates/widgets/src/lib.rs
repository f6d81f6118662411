pub mod config_form;
pub mod stats;
pub mod tabs;

pub use config_form::{ConfigEditor, EditorStatus};
pub use stats::StatsWidget;
pub use tabs::tab_bar;
