/// Bridge client injected into every page at document start.
pub const BRIDGE_JS: &str = include_str!("../web/bridge.js");

/// Name of the WebKit script message handler the bridge client posts to
/// (`window.webkit.messageHandlers.sansBridge`).
pub const BRIDGE_HANDLER_NAME: &str = "sansBridge";

/// Build the script that hands a JSON payload to the page's bridge client.
pub fn receive_script(json: &str) -> String {
    format!(
        "window.sansBridge && window.sansBridge.__receive('{}')",
        escape_js_single_quoted(json)
    )
}

/// Escape text for embedding inside a single-quoted JavaScript string literal.
pub fn escape_js_single_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}
