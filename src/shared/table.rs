//! Plain-text table layout for terminal listings.
//! Widths ignore ANSI color codes so colored cells still line up.

use crate::formatting::FormatContext;
use crate::name::Record;

const MIN_FLEX_WIDTH: usize = 12;

/// Current terminal width, if stdout is a terminal.
pub fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Render rows under `headers`. When the table would exceed `max_width`, the
/// `flex` column is narrowed (down to a floor) and its cells truncated.
pub fn render_table(
    headers: &[&str],
    rows: &[Vec<String>],
    flex: usize,
    max_width: usize,
) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let mut widths: Vec<usize> = headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_len(cell));
        }
    }

    let separators = 3 * (widths.len() - 1);
    let total: usize = widths.iter().sum::<usize>() + separators;
    if total > max_width && flex < widths.len() {
        let others = total - widths[flex];
        widths[flex] = max_width.saturating_sub(others).max(MIN_FLEX_WIDTH);
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let header_line = format_row(&header_cells, &widths, flex);
    let mut out = header_line.clone();
    out.push('\n');
    out.push_str(&"-".repeat(display_len(&header_line)));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths, flex));
    }
    out
}

fn format_row(row: &[String], widths: &[usize], flex: usize) -> String {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            let cell = if i == flex {
                truncate_with_ellipsis(cell, width)
            } else {
                cell.clone()
            };
            let len = display_len(&cell);
            format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
        })
        .collect();
    cells.join(" | ").trim_end().to_string()
}

/// Records as an `ID | Title | Tags` table sized to `max_width`.
pub fn records_table(records: &[Record], ctx: &FormatContext, max_width: usize) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                ctx.format_id(&r.identifier),
                r.comment.clone(),
                ctx.format_tags(&r.tags),
            ]
        })
        .collect();
    render_table(&["ID", "Title", "Tags"], &rows, 1, max_width)
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

/// Visible length of a string, skipping ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}
