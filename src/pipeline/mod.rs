pub mod orchestrator;
pub mod render;

pub use orchestrator::{Resolved, read_file, resolve_all};
pub use render::{render_json, render_text};
