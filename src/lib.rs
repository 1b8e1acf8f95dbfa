// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod cache;
pub mod celebration;
pub mod config;
pub mod engine;
pub mod program;
pub mod runtime;
pub mod signal;
pub mod util;
