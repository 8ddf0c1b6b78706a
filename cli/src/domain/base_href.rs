//! Base-href rewriting for the deployed entry HTML.
//!
//! The app is served from `/static/luteformobile/` on the Lute server, so the
//! `<base href>` shipped by the build has to point there for relative links
//! to resolve.

use serde::Serialize;

/// Base-href forms a fresh build may ship with. Only these are rewritten on
/// local targets.
pub const BASE_HREF_MARKERS: [&str; 3] = [
    r#"<base href="">"#,
    r#"<base href="/">"#,
    r#"<base href="/luteformobile/">"#,
];

/// Path under which the Lute server exposes the deployed bundle.
pub const DEPLOYED_BASE_PATH: &str = "/static/luteformobile/";

/// Replacement for every marker.
pub const DEPLOYED_BASE_HREF: &str = r#"<base href="/static/luteformobile/">"#;

/// `sed` expression used inside containers. Matches any base-href value,
/// unlike [`BASE_HREF_MARKERS`].
pub const CONTAINER_SED_EXPR: &str = r#"s|<base href=".*">|<base href="/static/luteformobile/">|"#;

/// Result of the base-href step of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseHrefOutcome {
    /// The entry HTML now points at [`DEPLOYED_BASE_PATH`].
    Rewritten,
    /// The entry HTML carries none of the known markers; left untouched.
    NoMarker,
    /// No entry HTML was deployed.
    EntryMissing,
}

/// Replace every known base-href marker in `html`.
///
/// Returns `None` when no marker is present, so callers can skip the write.
#[must_use]
pub fn rewrite_base_href(html: &str) -> Option<String> {
    if !BASE_HREF_MARKERS.iter().any(|m| html.contains(m)) {
        return None;
    }
    let rewritten = BASE_HREF_MARKERS
        .iter()
        .fold(html.to_string(), |acc, marker| {
            acc.replace(marker, DEPLOYED_BASE_HREF)
        });
    Some(rewritten)
}
