pub mod render;

pub use render::{load_report, render_with_config, run_render_command};
