//! Engine configuration loaded from JSON with per-field defaults.

/// Color values and their JSON forms.
pub mod color;
/// `ThumbnailConfig` and its sections.
pub mod model;
