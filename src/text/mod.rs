//! Font resolution and single-line shaping for the title.

/// Font face resolution.
pub mod font;
/// parley-based single-line shaping.
pub mod shaper;
