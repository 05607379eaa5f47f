//! Excerpt selection and highlighting (read path).
//!
//! Given per-line match verdicts, picks a contiguous display window around
//! every best-matching line (the match plus `context_radius` lines on each
//! side), marks matched lines for emphasis, and groups the shown lines into
//! alternating color bands. The pass runs forward once; preceding context is
//! fixed up with a clamped look-back when a best line is hit.

use crate::matches::LineMatches;

/// Cosmetic grouping of contiguous shown lines; bands alternate at group
/// boundaries only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    A,
    B,
}

impl Band {
    fn flip(self) -> Self {
        match self {
            Band::A => Band::B,
            Band::B => Band::A,
        }
    }
}

/// One line of a rendered document. Derived per render call, never kept.
#[derive(Debug, Clone)]
pub struct DisplayLine {
    pub line_no: u32,
    pub text: String,
    pub matched: bool,
    pub shown: bool,
    pub emphasized: bool,
    pub band: Option<Band>,
}

/// Annotate a document's lines with show/emphasis verdicts.
///
/// `whole_file` short-circuits window selection (every line is shown, as
/// when one specific document was requested by id) but emphasis marking is
/// unchanged.
pub fn render(
    lines: &[&str],
    matches: &LineMatches,
    whole_file: bool,
    context_radius: u32,
) -> Vec<DisplayLine> {
    let mut out: Vec<DisplayLine> = Vec::with_capacity(lines.len());
    let mut around: u32 = 0;

    for (i, &line) in lines.iter().enumerate() {
        let line_no = i as u32;
        let matched = matches.matched(line_no);
        let mut shown = whole_file;
        let emphasized = matched;

        if matched {
            shown = whole_file || matches.is_best(line_no);

            if matches.is_best(line_no) && !whole_file {
                // Retroactive context for the lines already emitted,
                // clamped at the start of the document
                let look_back = (context_radius as usize).min(i.saturating_sub(1));
                let len = out.len();
                for prev in out[len - look_back..].iter_mut() {
                    prev.shown = true;
                }
                around = context_radius;
            }
        } else if around > 0 {
            shown = true;
            around -= 1;
        }

        out.push(DisplayLine {
            line_no,
            text: line.to_string(),
            matched,
            shown,
            emphasized,
            band: None,
        });
    }

    assign_bands(&mut out);
    out
}

/// Give each contiguous run of shown lines an alternating band.
fn assign_bands(lines: &mut [DisplayLine]) {
    let mut band = Band::B;
    let mut prev_shown = false;

    for line in lines.iter_mut() {
        if line.shown {
            if !prev_shown {
                band = band.flip();
            }
            line.band = Some(band);
        }
        prev_shown = line.shown;
    }
}

/// The lines selected for display, in original order.
pub fn visible(lines: &[DisplayLine]) -> impl Iterator<Item = &DisplayLine> {
    lines.iter().filter(|l| l.shown)
}

/// Escape a line for HTML output. Must run before any markup wrapping so
/// injected tags are never themselves escaped.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the shown lines as an HTML excerpt, emphasized lines wrapped in
/// `<b>` after escaping.
pub fn excerpt_html(lines: &[DisplayLine]) -> String {
    let rendered: Vec<String> = visible(lines)
        .map(|l| {
            let escaped = escape_html(&l.text);
            if l.emphasized {
                format!("<b>{escaped}</b>")
            } else {
                escaped
            }
        })
        .collect();
    rendered.join("\n")
}
