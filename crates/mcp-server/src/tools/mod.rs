//! Hub MCP tool surface.
//!
//! Request/result shapes live in `schemas`, per-tool handlers in `dispatch::router`.

pub mod catalog;
mod dispatch;
mod schemas;
mod templates;

pub use dispatch::HubService;
