pub mod args;
pub mod commands;
pub mod root;

pub use args::{Args, Commands, RenderArgs, validate_render_args};
pub use root::RootCommand;
