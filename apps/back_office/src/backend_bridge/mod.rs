//! Bridge between the UI thread and the tokio worker that talks to the
//! backend.

pub mod commands;
pub mod runtime;
