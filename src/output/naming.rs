use crate::config::model::OutputFormat;

/// Title lower-cased with every run of characters outside `[a-z0-9]` replaced by a single
/// `_`, trimmed of leading and trailing `_`.
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let kept = out.trim_end_matches('_').len();
    out.truncate(kept);
    out
}

/// Default output file name for a title, e.g. `hello_world_thumbnail.png`.
///
/// A title with no ASCII letters or digits yields `thumbnail.<ext>`.
pub fn thumbnail_file_name(title: &str, format: OutputFormat) -> String {
    let stem = sanitize_title(title);
    if stem.is_empty() {
        format!("thumbnail.{}", format.extension())
    } else {
        format!("{stem}_thumbnail.{}", format.extension())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/naming.rs"]
mod tests;
