use serde::{Deserialize, Serialize};

/// Fallback logo when the URL host cannot be determined: a plain
/// letter-tile SVG, inlined as a data URI.
const FALLBACK_LOGO: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNjQiIGhlaWdodD0iNjQiIHZpZXdCb3g9IjAgMCA2NCA2NCIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KPHJlY3Qgd2lkdGg9IjY0IiBoZWlnaHQ9IjY0IiByeD0iOCIgZmlsbD0iIzNCODJGNiIvPgo8dGV4dCB4PSIzMiIgeT0iNDAiIGZvbnQtZmFtaWx5PSJBcmlhbCwgc2Fucy1zZXJpZiIgZm9udC1zaXplPSIyNCIgZm9udC13ZWlnaHQ9ImJvbGQiIGZpbGw9IndoaXRlIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIj5XPC90ZXh0Pgo8L3N2Zz4K";

/// Website record: one entry on the start page grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: String,
    pub name: String,
    pub url: String,
    pub logo: String,
    pub description: String,
}

/// Prefix a scheme when the given URL has none.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Derive a favicon URL from the host of `url`, falling back to an
/// inline placeholder tile when the host cannot be parsed.
pub fn logo_url(url: &str) -> String {
    match url::Url::parse(&normalize_url(url)).ok().and_then(|u| {
        u.host_str()
            .map(|h| format!("https://www.google.com/s2/favicons?domain={}&sz=64", h))
    }) {
        Some(logo) => logo,
        None => FALLBACK_LOGO.to_string(),
    }
}
