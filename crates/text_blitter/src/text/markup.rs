//! Inline color markup
//!
//! A directive has the exact form `[COL=r,g,b]` with each component a plain
//! decimal number in `[0, 1]` (`1`, `0.25`, `.5`; no sign, exponent or
//! spaces). Text starts white. Each valid directive ends the current run and
//! starts a new one in its color.
//!
//! Scanning is a two-state machine. `[` switches from `Literal` to
//! `InDirective`; `]` ends the candidate and validates it. A character that
//! can't appear in a directive, a second `[`, end of input, or a candidate that
//! fails validation all fall back to `Literal`, leaving the consumed span in
//! the output untouched. A fallback on `[` immediately opens a new candidate.
//!
//! Runs borrow the input: a run never spans a directive, so each one is a
//! contiguous substring. Zero-length runs are not emitted.

use crate::foundation::math::{white, Vec3};

/// A span of visible text drawn in one color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledRun<'a> {
    /// Visible text, may contain `\n`
    pub text: &'a str,
    /// RGB, each component in `[0, 1]`
    pub color: Vec3,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Literal,
    InDirective { start: usize },
}

const DIRECTIVE_PREFIX: &str = "COL=";

/// Split `text` into colored runs with directives removed
#[must_use]
pub fn parse_markup(text: &str) -> Vec<StyledRun<'_>> {
    let mut runs = Vec::new();
    let mut color = white();
    let mut run_start = 0;
    let mut state = ScanState::Literal;

    for (i, c) in text.char_indices() {
        state = match state {
            ScanState::Literal => open_if_bracket(i, c),
            ScanState::InDirective { start } if c == ']' => {
                if let Some(parsed) = parse_directive(&text[start + 1..i]) {
                    push_run(&mut runs, &text[run_start..start], color);
                    color = parsed;
                    run_start = i + 1;
                } else {
                    log::trace!("Malformed directive kept as text: {:?}", &text[start..=i]);
                }
                ScanState::Literal
            }
            ScanState::InDirective { .. } if is_directive_char(c) => state,
            ScanState::InDirective { .. } => open_if_bracket(i, c),
        };
    }
    push_run(&mut runs, &text[run_start..], color);

    runs
}

/// Visible text of `text` with every valid directive removed
#[must_use]
pub fn strip_markup(text: &str) -> String {
    parse_markup(text).iter().map(|run| run.text).collect()
}

fn open_if_bracket(i: usize, c: char) -> ScanState {
    if c == '[' {
        ScanState::InDirective { start: i }
    } else {
        ScanState::Literal
    }
}

fn is_directive_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',') || DIRECTIVE_PREFIX.contains(c)
}

fn push_run<'a>(runs: &mut Vec<StyledRun<'a>>, text: &'a str, color: Vec3) {
    if !text.is_empty() {
        runs.push(StyledRun { text, color });
    }
}

/// Parse the inside of a bracket pair, e.g. `COL=1,0.5,0`
fn parse_directive(body: &str) -> Option<Vec3> {
    let args = body.strip_prefix(DIRECTIVE_PREFIX)?;
    let mut components = args.split(',').map(parse_component);
    let r = components.next()??;
    let g = components.next()??;
    let b = components.next()??;
    if components.next().is_some() {
        return None;
    }
    Some(Vec3::new(r, g, b))
}

fn parse_component(s: &str) -> Option<f32> {
    let well_formed = s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && s.bytes().filter(|&b| b == b'.').count() <= 1;
    if !well_formed {
        return None;
    }
    s.parse::<f32>().ok().filter(|v| (0.0..=1.0).contains(v))
}
