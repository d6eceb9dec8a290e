// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod source;
pub mod ui;
pub mod update;

/// How long the runner waits for an event before yielding a tick
pub const TICK_RATE_MS: u64 = 100;
