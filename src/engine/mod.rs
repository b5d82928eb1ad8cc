//! Orchestration of the paint stages over one owned surface.

/// `CompositingEngine` and the per-call `Generation`.
pub mod compositor;
