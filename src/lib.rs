//! tui-spin (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_spin::{core,term,types}` and
//! holds the thin outer layer around them: configuration, interrupt trapping
//! and the frame loop.

pub use tui_spin_core as core;
pub use tui_spin_term as term;
pub use tui_spin_types as types;

pub mod app;
pub mod cli;
pub mod signal;
