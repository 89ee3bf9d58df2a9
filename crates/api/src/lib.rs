//! # FocusTide App
//!
//! Application root: wires the core services to their infrastructure
//! adapters and exposes the command surface a UI collaborator calls.
//!
//! The binary in this crate runs the background context headless; a
//! foreground view attaches through [`AppContext::attach_foreground`] and
//! drives the timer through the functions in [`commands`].

pub mod commands;
pub mod context;
pub mod logging;

pub use context::AppContext;
