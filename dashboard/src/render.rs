//! Plain text rendering of a list view & of a row's details.
use list_manager::{detail::display_value, DetailView, ListState};
use primitives::{Row, SortDirection};

/// Pixels of a column width per rendered character.
const PIXELS_PER_CHAR: u32 = 10;
const MIN_CHARS: usize = 4;

fn chars_for(width: u32) -> usize {
    usize::try_from(width / PIXELS_PER_CHAR)
        .unwrap_or(usize::MAX)
        .max(MIN_CHARS)
}

/// Pads or truncates (with `…`) the text to exactly `chars` characters.
pub fn fit(text: &str, chars: usize) -> String {
    let count = text.chars().count();

    if count <= chars {
        format!("{text}{}", " ".repeat(chars - count))
    } else {
        let mut truncated: String = text.chars().take(chars.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

fn header(state: &ListState, column: &str) -> String {
    let sort = state.sort();
    let is_sorted = state.sortable_field(column) == Some(sort.field);

    match (is_sorted, sort.direction) {
        (true, SortDirection::Asc) => format!("{column} ▲"),
        (true, SortDirection::Desc) => format!("{column} ▼"),
        (false, _) => column.to_string(),
    }
}

/// The visible columns of the rows, one line per row after the header.
pub fn table(state: &ListState, rows: &[Row]) -> String {
    let columns: Vec<(&str, usize)> = state
        .visible_columns()
        .iter()
        .map(|column| (column.as_str(), chars_for(state.width(column))))
        .collect();

    let line = |cells: Vec<String>| cells.join(" | ").trim_end().to_string();

    let mut output = String::new();
    let headers = columns
        .iter()
        .map(|(column, chars)| fit(&header(state, column), *chars))
        .collect();
    output.push_str(&line(headers));
    output.push('\n');

    for row in rows {
        let cells = columns
            .iter()
            .map(|(column, chars)| {
                let value = row
                    .get(column)
                    .map(display_value)
                    .unwrap_or_else(|| "-".to_string());

                fit(&value, *chars)
            })
            .collect();
        output.push_str(&line(cells));
        output.push('\n');
    }

    output
}

/// `Page 2 of 5 (87 rows)`
pub fn footer(state: &ListState, shown: usize) -> String {
    let info = state.page_info();

    format!(
        "Page {} of {} ({} rows, {shown} shown)",
        info.page,
        info.total_pages(),
        info.total
    )
}

/// The details of a single row, a `label: value` line per entry.
pub fn detail(view: &DetailView) -> String {
    let mut output = String::new();

    if let Some(title) = &view.title {
        output.push_str(&format!("# {title}\n"));
    }
    if let Some(tone) = view.tone {
        output.push_str(&format!("[{tone}]\n"));
    }

    let label_chars = view
        .entries
        .iter()
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or_default();

    for entry in &view.entries {
        output.push_str(&format!("{}  {}\n", fit(&entry.label, label_chars), entry.value));
    }

    output
}
