use crate::services::config::AuditConfig;
use crate::services::frontmatter;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extensions served verbatim by the site; routes keep them unchanged
/// instead of gaining a trailing slash.
const STATIC_EXTENSIONS: &[&str] = &[
    ".xml",
    ".txt",
    ".json",
    ".css",
    ".js",
    ".ico",
    ".svg",
    ".png",
    ".jpg",
    ".webmanifest",
];

const PAGE_EXTENSIONS: &[&str] = &["md", "markdown", "html"];

/// Normalize an internal URL path to the canonical `/segment/.../` form.
/// Idempotent; `/about`, `/about/` and `/about.html` all map to `/about/`.
pub fn normalize_route(raw: &str) -> String {
    let mut route = raw.trim().to_string();
    if route.is_empty() {
        return "/".to_string();
    }
    if !route.starts_with('/') {
        route.insert(0, '/');
    }
    if route == "/" {
        return route;
    }
    if let Some(stripped) = route.strip_suffix(".html") {
        route = stripped.to_string();
        if route.is_empty() {
            return "/".to_string();
        }
    } else if STATIC_EXTENSIONS.iter().any(|ext| route.ends_with(ext)) {
        return route;
    }
    if !route.ends_with('/') {
        route.push('/');
    }
    route
}

/// Slug for a post filename stem. A `YYYY-MM-DD-` prefix (exactly three
/// hyphen-delimited numeric tokens) is stripped; anything else is used
/// whole, matching how the site itself names post URLs.
pub fn slug_from_stem(stem: &str) -> String {
    let tokens: Vec<&str> = stem.splitn(4, '-').collect();
    if tokens.len() == 4
        && tokens[..3]
            .iter()
            .all(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
    {
        tokens[3].to_string()
    } else {
        stem.to_string()
    }
}

/// Build the set of internal routes the site will serve once built.
///
/// Read-only traversal; listings are sorted so the table is stable across
/// platforms. Malformed front matter never errors, the file just falls
/// back to its filename-derived slug.
pub fn build_routes(config: &AuditConfig) -> anyhow::Result<BTreeSet<String>> {
    let mut routes = BTreeSet::new();
    routes.insert("/".to_string());

    for path in sorted_files(&config.posts_root()) {
        if !is_page_file(&path) {
            continue;
        }
        routes.insert(route_for_document(&path, true));
    }

    for path in sorted_files(&config.site_root) {
        if !is_page_file(&path) {
            continue;
        }
        routes.insert(route_for_document(&path, false));
    }

    Ok(routes)
}

fn route_for_document(path: &Path, date_prefixed: bool) -> String {
    let text = std::fs::read_to_string(path).unwrap_or_default();
    let fm = frontmatter::parse(&text);
    if let Some(permalink) = fm.get("permalink") {
        return normalize_route(permalink);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if stem == "index" {
        return "/".to_string();
    }
    let slug = if date_prefixed {
        slug_from_stem(&stem)
    } else {
        stem
    };
    normalize_route(&slug)
}

fn is_page_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PAGE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Sorted regular-file listing; an absent directory lists as empty.
pub fn sorted_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}
