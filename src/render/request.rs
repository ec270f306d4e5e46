// ABOUTME: Header lookup seam between the transport layer and the page renderer
// ABOUTME: Detects HTMX partial-update requests from the HX-Request header

use axum::http::HeaderMap;
use std::collections::HashMap;

/// Header set by HTMX on every request it issues.
pub const HX_REQUEST: &str = "HX-Request";

/// Read-only access to inbound request headers.
pub trait HeaderLookup {
    /// Header value by case-insensitive name.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

impl HeaderLookup for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// True when the caller only wants the changed content fragment.
pub fn is_partial_request(headers: &dyn HeaderLookup) -> bool {
    headers.header(HX_REQUEST) == Some("true")
}
