use std::path::Path;

use url::Url;

pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Schemes accepted verbatim even without a `//` authority part.
const OPAQUE_SCHEMES: &[&str] = &["about:", "data:", "file:", "blob:"];

/// Turn user input into a loadable URL.
///
/// Bare `host:port` input (e.g. `localhost:3000`) would otherwise parse as a
/// URL with scheme `localhost`, so anything without `://` or a known opaque
/// scheme is treated as an `http://` address. Absolute paths become `file://`
/// URLs.
pub fn normalize_url(input: &str) -> Result<Url, String> {
    if input.is_empty() {
        return Err("Invalid URL".to_string());
    }
    let input = input.trim();

    if input.starts_with('/') {
        return Url::from_file_path(Path::new(input))
            .map_err(|_| format!("Invalid URL: cannot convert path '{}'", input));
    }

    let lower = input.to_ascii_lowercase();
    let candidate = if input.contains("://") || OPAQUE_SCHEMES.iter().any(|s| lower.starts_with(s))
    {
        input.to_string()
    } else {
        format!("http://{}", input)
    };

    Url::parse(&candidate).map_err(|e| format!("Invalid URL: {}", e))
}
