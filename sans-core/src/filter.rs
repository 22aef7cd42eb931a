use crate::protocol::DEFAULT_DIALOG_FILTER;

/// One named entry of a file dialog filter, e.g. `Images (*.png *.jpg)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilterSpec {
    pub name: String,
    pub patterns: Vec<String>,
}

/// Parse a `;;`-separated filter string such as
/// `"Images (*.png *.jpg);;All Files (*)"`.
///
/// An entry without parentheses is used as both the name and a single
/// pattern. An empty string yields the default `All Files (*)` filter.
pub fn parse_filter_string(filter: &str) -> Vec<FileFilterSpec> {
    let specs: Vec<FileFilterSpec> = filter
        .split(";;")
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(parse_entry)
        .collect();

    if specs.is_empty() && filter.trim() != DEFAULT_DIALOG_FILTER {
        return parse_filter_string(DEFAULT_DIALOG_FILTER);
    }
    specs
}

fn parse_entry(entry: &str) -> Option<FileFilterSpec> {
    let (open, close) = match (entry.rfind('('), entry.rfind(')')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => {
            return Some(FileFilterSpec {
                name: entry.to_string(),
                patterns: vec![entry.to_string()],
            })
        }
    };

    let patterns: Vec<String> = entry[open + 1..close]
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if patterns.is_empty() {
        return None;
    }

    let name = entry[..open].trim();
    Some(FileFilterSpec {
        name: if name.is_empty() {
            patterns.join(" ")
        } else {
            entry.to_string()
        },
        patterns,
    })
}
