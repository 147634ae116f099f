//! Plain-text tables and bars for terminal output.

const MIN_COLUMN_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

impl TableOptions {
    pub const PLAIN: Self = Self {
        max_width: None,
        color: false,
    };
}

/// Render an aligned table. Numeric cells are right-aligned; status words
/// (normal, borderline, high, ...) are colored when `options.color` is set.
/// Cells may already carry ANSI color; widths count visible characters only.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = column_widths(headers, rows);
    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(visible_len(&header_line));

    let mut lines = vec![header_line.trim_end().to_string(), divider];
    for row in rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let clipped = clip(value, *width);
                let padded = pad(&clipped, *width, is_numeric(&clipped));
                if options.color {
                    paint_status(&clipped, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join(SEPARATOR).trim_end().to_string());
    }
    lines.join("\n")
}

/// Two-column key/value listing without a header.
#[must_use]
pub fn render_pairs(pairs: &[(&str, String)], options: TableOptions) -> String {
    let key_width = pairs
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);
    pairs
        .iter()
        .map(|(key, value)| {
            let value = if options.color {
                paint_status(value, value.clone())
            } else {
                value.clone()
            };
            format!("{}{SEPARATOR}{value}", pad(key, key_width, false))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Horizontal bar for a 0-100 value, `width` cells wide.
#[must_use]
pub fn bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Wrap `text` in an ANSI color escape.
#[must_use]
pub fn paint(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| visible_len(cell))
                .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect()
}

/// Narrow the widest shrinkable column one cell at a time until the table
/// fits `max_width` or nothing can shrink further.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if visible_len(value) <= width {
        return value.to_string();
    }
    let mut out: String = strip_ansi(value)
        .chars()
        .take(width.saturating_sub(1))
        .collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_len(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.by_ref().find(|next| *next == 'm');
            continue;
        }
        out.push(ch);
    }
    out
}

fn visible_len(value: &str) -> usize {
    if value.contains('\u{1b}') {
        strip_ansi(value).chars().count()
    } else {
        value.chars().count()
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim().trim_end_matches('%');
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | '/'))
}

/// Color `padded` according to the status word in `plain`.
fn paint_status(plain: &str, padded: String) -> String {
    let code = match plain.trim().to_ascii_lowercase().as_str() {
        "normal" | "low" | "ok" | "stream" | "cache" | "yes" => "32",
        "borderline" | "medium" | "moderate" | "cancelled" => "33",
        "abnormal" | "high" | "error" | "failed" => "31",
        _ => return padded,
    };
    paint(&padded, code)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn columns_align_and_numbers_right_align() {
        let rows = vec![
            vec!["Hemoglobin".to_string(), "13.5".to_string()],
            vec!["WBC".to_string(), "11200".to_string()],
        ];
        let table = render_table(&["marker", "value"], &rows, TableOptions::PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "marker      value");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], format!("Hemoglobin{}13.5", " ".repeat(4)));
        assert_eq!(lines[3], format!("WBC{}11200", " ".repeat(10)));
    }

    #[test]
    fn wide_tables_shrink_and_clip() {
        let rows = vec![vec![
            "Cardiovascular".to_string(),
            "a very long description that will not fit".to_string(),
        ]];
        let options = TableOptions {
            max_width: Some(40),
            color: false,
        };
        let table = render_table(&["category", "detail"], &rows, options);
        assert!(table.lines().all(|line| line.chars().count() <= 40));
        assert!(table.contains('…'));
    }

    #[test]
    fn status_words_are_colored_only_when_enabled() {
        let rows = vec![vec!["Sugar".to_string(), "Abnormal".to_string()]];
        let plain = render_table(&["marker", "status"], &rows, TableOptions::PLAIN);
        assert!(!plain.contains('\u{1b}'));

        let colored = render_table(
            &["marker", "status"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(colored.contains("\u{1b}[31mAbnormal"));
    }

    #[test]
    fn colored_cells_align_by_visible_width() {
        let rows = vec![
            vec![paint("red", "31"), "1".to_string()],
            vec!["plain".to_string(), "2".to_string()],
        ];
        let table = render_table(&["name", "n"], &rows, TableOptions::PLAIN);
        let lines: Vec<String> = table.lines().map(strip_ansi).collect();
        assert_eq!(lines[2].len(), lines[3].len());
    }

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar(0, 10), "░░░░░░░░░░");
        assert_eq!(bar(50, 10), "█████░░░░░");
        assert_eq!(bar(95, 10), "██████████");
        assert_eq!(bar(100, 4), "████");
    }

    #[test]
    fn pairs_align_keys() {
        let out = render_pairs(
            &[("name", "Ada".to_string()), ("severity", "High".to_string())],
            TableOptions::PLAIN,
        );
        assert_eq!(out, "name      Ada\nseverity  High");
    }
}
