//! Pure geometry for the three paint stages: cover-fit, title fitting, icon row.

/// Cover-fit placement of the background image.
pub mod background;
/// Icon-row sizing and slots.
pub mod icons;
/// Title wrapping and font-size fitting.
pub mod typography;
