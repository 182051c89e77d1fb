//! Bridge between the UI thread and the backend worker that talks to the patients API.

pub mod commands;
pub mod runtime;
