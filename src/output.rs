//! Terminal formatting for search results.

use crate::engine::protocol::SearchResults;
use crate::highlight::{Band, DisplayLine, visible};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print the result header: totals, timing, paging.
pub fn print_header(results: &SearchResults, page: usize, page_size: usize) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    let pages = if page_size > 0 {
        (results.total as usize).div_ceil(page_size)
    } else {
        1
    };

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(
        stdout,
        "took: {:.1}ms, matching documents: {}, page: {}/{}",
        results.took_ms,
        results.total,
        page + 1,
        pages.max(1)
    )?;
    stdout.reset()?;

    Ok(())
}

/// Print one document's excerpt.
pub fn print_hit(
    id: &str,
    score: f32,
    matched_lines: usize,
    lines: &[DisplayLine],
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(stdout, "{}", id)?;
    stdout.reset()?;
    writeln!(
        stdout,
        "  (score: {:.2}, matching lines: {})",
        score, matched_lines
    )?;

    let mut last_line: Option<u32> = None;
    for line in visible(lines) {
        // Gap separator between non-contiguous groups
        if let Some(last) = last_line {
            if line.line_no > last + 1 {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                writeln!(stdout, "--")?;
                stdout.reset()?;
            }
        }
        last_line = Some(line.line_no);

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{:>5}", line.line_no + 1)?;
        stdout.reset()?;
        write!(stdout, "{}", if line.emphasized { ":" } else { "-" })?;

        if line.emphasized {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        } else if line.band == Some(Band::B) {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        }
        writeln!(stdout, "{}", line.text)?;
        stdout.reset()?;
    }

    writeln!(stdout)?;
    Ok(())
}

/// Print a query failure. The caller reports total as -1 so "query failed"
/// is distinguishable from "zero matches".
pub fn print_error(message: &str) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(stderr, "search failed")?;
    stderr.reset()?;
    writeln!(stderr, ": {}", message)?;
    Ok(())
}
