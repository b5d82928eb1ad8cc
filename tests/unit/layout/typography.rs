use super::*;

/// Monospace stand-in: every char is half the font size wide.
struct HalfEm;

impl TextMeasure for HalfEm {
    fn measure(&mut self, text: &str, size_px: f64) -> f64 {
        text.chars().count() as f64 * size_px * 0.5
    }
}

fn params() -> TypographyParams {
    TypographyParams::from_config(&FontConfig::default(), Canvas::new(1920, 1080).unwrap())
}

fn candidate_sizes(p: &TypographyParams) -> Vec<f64> {
    let mut out = Vec::new();
    let mut s = p.base_size;
    while s > p.min_size {
        out.push(s);
        s -= p.step;
    }
    out.push(p.min_size);
    out
}

fn spaced_as(total: usize, every: usize) -> String {
    let mut s = String::new();
    for i in 0..total {
        if i > 0 && i % every == 0 {
            s.push(' ');
        }
        s.push('A');
    }
    s
}

#[test]
fn params_resolve_fractions_against_canvas() {
    let p = params();
    assert!((p.max_width - 1632.0).abs() < 1e-9);
    assert!((p.max_height - 486.0).abs() < 1e-9);
    assert_eq!(p.max_lines, 2);
}

#[test]
fn short_title_keeps_base_size() {
    let out = fit_title("Hello World", &params(), &mut HalfEm);
    assert_eq!(out.font_size, 160.0);
    assert_eq!(out.lines, vec!["Hello World".to_string()]);
    assert!(!out.truncated);
}

#[test]
fn steps_down_until_two_lines_fit() {
    let title = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj";
    let out = fit_title(title, &params(), &mut HalfEm);
    assert_eq!(out.font_size, 136.0);
    assert_eq!(
        out.lines,
        vec![
            "aaaa bbbb cccc dddd eeee".to_string(),
            "ffff gggg hhhh iiii jjjj".to_string()
        ]
    );
}

#[test]
fn chosen_size_is_largest_fitting_candidate() {
    let p = params();
    let titles = [
        "Hello World",
        "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj",
        "The quick brown fox jumps over the lazy dog again and again",
        "Rust ownership explained with borrowed references and lifetimes",
        "x",
    ];
    for title in titles {
        let out = fit_title(title, &p, &mut HalfEm);
        let expected = candidate_sizes(&p).into_iter().find(|&s| {
            let lines = wrap_text(title, s, p.max_width, &mut HalfEm);
            lines.len() <= p.max_lines && lines.len() as f64 * s * 1.1 <= p.max_height
        });
        match expected {
            Some(s) => {
                assert_eq!(out.font_size, s, "{title}");
                assert!(!out.truncated);
            }
            None => {
                assert_eq!(out.font_size, p.min_size, "{title}");
                assert!(out.truncated);
            }
        }
        assert!(out.font_size <= p.base_size && out.font_size >= p.min_size);
    }
}

#[test]
fn overflow_falls_back_to_minimum_and_truncates() {
    let p = params();
    let title = spaced_as(200, 5);
    let out = fit_title(&title, &p, &mut HalfEm);
    assert_eq!(out.font_size, p.min_size);
    assert!(out.truncated);
    assert_eq!(out.lines.len(), p.max_lines);

    let full = wrap_text(&title, p.min_size, p.max_width, &mut HalfEm);
    assert!(full.len() > p.max_lines);
    assert_eq!(out.lines[..], full[..p.max_lines]);
}

#[test]
fn wrapping_is_idempotent() {
    let p = params();
    let title = "Building a thumbnail compositor with premultiplied alpha and shadows";
    for size in [160.0, 120.0, 100.0] {
        let lines = wrap_text(title, size, p.max_width, &mut HalfEm);
        let rewrapped = wrap_text(&lines.join(" "), size, p.max_width, &mut HalfEm);
        assert_eq!(lines, rewrapped);
        for line in &lines {
            assert_eq!(
                wrap_text(line, size, p.max_width, &mut HalfEm),
                vec![line.clone()]
            );
        }
    }
}

#[test]
fn overwide_word_stays_alone() {
    let lines = wrap_text("a bbbbbbbbbbbbbbbbbbbb c", 10.0, 50.0, &mut HalfEm);
    assert_eq!(
        lines,
        vec![
            "a".to_string(),
            "bbbbbbbbbbbbbbbbbbbb".to_string(),
            "c".to_string()
        ]
    );
}

#[test]
fn whitespace_runs_collapse_and_empty_title_has_no_lines() {
    let lines = wrap_text("  Hello \t  World  ", 10.0, 1000.0, &mut HalfEm);
    assert_eq!(lines, vec!["Hello World".to_string()]);

    let out = fit_title("   ", &params(), &mut HalfEm);
    assert!(out.lines.is_empty());
    assert_eq!(out.font_size, 160.0);
}

#[test]
fn terminates_when_base_equals_min() {
    let p = TypographyParams {
        base_size: 100.0,
        min_size: 100.0,
        ..params()
    };
    let out = fit_title(&spaced_as(200, 5), &p, &mut HalfEm);
    assert_eq!(out.font_size, 100.0);
    assert!(out.lines.len() <= p.max_lines);
}

#[test]
fn line_centers_are_symmetric_about_center() {
    assert_eq!(line_centers(1, 100.0, 1.2, 540.0), vec![540.0]);
    assert_eq!(line_centers(2, 100.0, 1.2, 540.0), vec![480.0, 600.0]);
    let three = line_centers(3, 50.0, 1.2, 540.0);
    assert!((three[1] - 540.0).abs() < 1e-9);
    assert!(line_centers(0, 100.0, 1.2, 540.0).is_empty());
}
