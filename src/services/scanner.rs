use crate::domain::models::EvidenceItem;
use crate::services::config::{AuditConfig, PERFORMANCE_FLAG_KEYS};
use crate::services::frontmatter::{self, FrontMatter};
use crate::services::imagemeta::{
    self, MANIFEST_ICON_SIZES, SOCIAL_IMAGE_MIN, TOUCH_ICON_MIN,
};
use crate::services::routes::{normalize_route, sorted_files};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Non-production markers that must never survive into published content.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "invalid-url",
    "nonexistent-site",
    "localhost",
    "127.0.0.1",
    "TODO",
    "TBD",
];

// One URL immediately followed by another protocol before the closing
// bracket/whitespace: the signature of careless string concatenation.
static MALFORMED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s)\]]*?https?://[^\s)\]]*").expect("valid regex"));

static MARKDOWN_INTERNAL_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\((/[^)\s]*)\)").expect("valid regex"));

static ATTRIBUTE_INTERNAL_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:href|src)="(/[^"{}]*)""#).expect("valid regex"));

static LIQUID_INTERNAL_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{\{\s*["'](/[^"']*)["']\s*\|\s*relative_url\s*\}\}"#).expect("valid regex")
});

static EXTERNAL_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s)"'<>\]]+"#).expect("valid regex"));

static PRECONNECT_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<link[^>]*rel="preconnect"[^>]*href="([^"]+)""#).expect("valid regex")
});

static APPLE_TOUCH_ICON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<link[^>]*rel="apple-touch-icon"[^>]*href="([^"{}]+)""#).expect("valid regex")
});

/// Structural assertions about the shared templates. Each flag is a plain
/// presence test; a false value means the template family lost the tag.
#[derive(Debug, Default, Clone)]
pub struct TemplateGuards {
    pub viewport_meta: bool,
    pub theme_color_meta: bool,
    pub apple_touch_icon: bool,
    pub manifest_link: bool,
    pub description_meta: bool,
    pub og_title: bool,
    pub og_image: bool,
    pub page_image_guard: bool,
    pub preconnect_hint: bool,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub scanned_files: Vec<String>,
    pub malformed_links: Vec<EvidenceItem>,
    pub placeholder_hits: Vec<EvidenceItem>,
    pub missing_internal_links: Vec<EvidenceItem>,
    pub missing_liquid_internal_links: Vec<EvidenceItem>,
    pub missing_image_dimensions: Vec<EvidenceItem>,
    pub missing_image_alt: Vec<EvidenceItem>,
    pub invalid_boolean_flags: Vec<EvidenceItem>,
    pub social_image_issues: Vec<EvidenceItem>,
    pub icon_issues: Vec<EvidenceItem>,
    pub guards: TemplateGuards,
    pub external_urls: BTreeSet<String>,
    pub preconnect_hosts: BTreeSet<String>,
}

/// Walk the content and template files and run every detector.
///
/// Files are visited in sorted order so evidence ordering is stable across
/// platforms. A file that cannot be read is logged and skipped; it
/// contributes nothing.
pub fn scan_site(config: &AuditConfig, routes: &BTreeSet<String>) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for path in content_files(config) {
        let Some(text) = read_text(&path) else {
            continue;
        };
        let location = config.relative(&path);
        log::debug!("scanning content file {}", location);
        outcome.scanned_files.push(location.clone());

        scan_common_text(&mut outcome, config, routes, &location, &text);

        let fm = frontmatter::parse(&text);
        check_image_metadata(&mut outcome, config, &location, &fm);
        check_boolean_flags(&mut outcome, &location, &fm);
    }

    let mut template_text = String::new();
    for path in template_files(config) {
        let Some(text) = read_text(&path) else {
            continue;
        };
        let location = config.relative(&path);
        log::debug!("scanning template file {}", location);
        outcome.scanned_files.push(location.clone());

        scan_common_text(&mut outcome, config, routes, &location, &text);
        check_touch_icon_size(&mut outcome, config, &location, &text);
        template_text.push_str(&text);
        template_text.push('\n');
    }
    outcome.guards = template_guards(&template_text);

    check_manifest_icons(&mut outcome, config);

    outcome
}

/// Detectors that apply to every scanned file regardless of kind.
fn scan_common_text(
    outcome: &mut ScanOutcome,
    config: &AuditConfig,
    routes: &BTreeSet<String>,
    location: &str,
    text: &str,
) {
    for hit in detect_malformed_links(text) {
        outcome
            .malformed_links
            .push(EvidenceItem::new(location, "malformed_link", &hit));
    }
    for marker in detect_placeholders(text) {
        outcome
            .placeholder_hits
            .push(EvidenceItem::new(location, "placeholder_marker", marker));
    }
    for path in detect_internal_links(text) {
        if !internal_target_exists(config, routes, &path) {
            outcome.missing_internal_links.push(EvidenceItem::new(
                location,
                "missing_internal_link",
                &path,
            ));
        }
    }
    for path in detect_liquid_internal_links(text) {
        if !internal_target_exists(config, routes, &path) {
            outcome.missing_liquid_internal_links.push(EvidenceItem::new(
                location,
                "missing_liquid_internal_link",
                &path,
            ));
        }
    }
    for url in EXTERNAL_URL.find_iter(text) {
        outcome
            .external_urls
            .insert(url.as_str().trim_end_matches(['.', ',']).to_string());
    }
    for cap in PRECONNECT_HINT.captures_iter(text) {
        outcome.preconnect_hosts.insert(cap[1].to_string());
    }
}

pub fn detect_malformed_links(text: &str) -> Vec<String> {
    MALFORMED_LINK
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn detect_placeholders(text: &str) -> Vec<&'static str> {
    PLACEHOLDER_MARKERS
        .iter()
        .copied()
        .filter(|marker| text.contains(marker))
        .collect()
}

pub fn detect_internal_links(text: &str) -> Vec<String> {
    let mut paths: Vec<String> = MARKDOWN_INTERNAL_LINK
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect();
    paths.extend(
        ATTRIBUTE_INTERNAL_LINK
            .captures_iter(text)
            .map(|c| c[1].to_string()),
    );
    paths
}

pub fn detect_liquid_internal_links(text: &str) -> Vec<String> {
    LIQUID_INTERNAL_LINK
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// A site-relative path is valid when it sits under the assets prefix,
/// matches a file on disk, or normalizes into the route table. Fragments
/// and queries address into a page; only the path part is resolved.
pub fn internal_target_exists(
    config: &AuditConfig,
    routes: &BTreeSet<String>,
    path: &str,
) -> bool {
    let path = path.split(['#', '?']).next().unwrap_or(path);
    if path.starts_with(&config.assets_prefix) {
        return true;
    }
    let on_disk = config.site_root.join(path.trim_start_matches('/'));
    if on_disk.exists() {
        return true;
    }
    routes.contains(&normalize_route(path))
}

fn check_image_metadata(
    outcome: &mut ScanOutcome,
    config: &AuditConfig,
    location: &str,
    fm: &FrontMatter,
) {
    let Some(image) = fm.get("image") else {
        return;
    };
    if !(fm.contains("image_width") && fm.contains("image_height")) {
        outcome.missing_image_dimensions.push(EvidenceItem::new(
            location,
            "missing_image_dimensions",
            image,
        ));
    }
    if !fm.contains("image_alt") {
        outcome
            .missing_image_alt
            .push(EvidenceItem::new(location, "missing_image_alt", image));
    }
    check_social_image_size(outcome, config, location, image);
}

fn check_boolean_flags(outcome: &mut ScanOutcome, location: &str, fm: &FrontMatter) {
    for key in PERFORMANCE_FLAG_KEYS {
        let Some(value) = fm.get(key) else { continue };
        if !value.eq_ignore_ascii_case("true") && !value.eq_ignore_ascii_case("false") {
            outcome.invalid_boolean_flags.push(EvidenceItem::new(
                location,
                "invalid_boolean_flag",
                &format!("{}={}", key, value),
            ));
        }
    }
}

/// Social preview images must be large enough for link-preview cards.
fn check_social_image_size(
    outcome: &mut ScanOutcome,
    config: &AuditConfig,
    location: &str,
    image: &str,
) {
    let Some(file) = local_asset(config, image) else {
        return;
    };
    let Some((w, h)) = imagemeta::image_dimensions(&file) else {
        return;
    };
    if w < SOCIAL_IMAGE_MIN.0 || h < SOCIAL_IMAGE_MIN.1 {
        outcome.social_image_issues.push(EvidenceItem::new(
            location,
            "social_image_too_small",
            &format!("{} is {}x{}", image, w, h),
        ));
    }
}

fn check_touch_icon_size(
    outcome: &mut ScanOutcome,
    config: &AuditConfig,
    location: &str,
    text: &str,
) {
    for cap in APPLE_TOUCH_ICON.captures_iter(text) {
        let href = &cap[1];
        let Some(file) = local_asset(config, href) else {
            continue;
        };
        let Some((w, h)) = imagemeta::image_dimensions(&file) else {
            continue;
        };
        if w < TOUCH_ICON_MIN || h < TOUCH_ICON_MIN {
            outcome.icon_issues.push(EvidenceItem::new(
                location,
                "touch_icon_too_small",
                &format!("{} is {}x{}", href, w, h),
            ));
        } else if w != h {
            outcome.icon_issues.push(EvidenceItem::new(
                location,
                "touch_icon_not_square",
                &format!("{} is {}x{}", href, w, h),
            ));
        }
    }
}

/// The web manifest, when present, must offer icons at the standard sizes.
fn check_manifest_icons(outcome: &mut ScanOutcome, config: &AuditConfig) {
    let manifest = ["manifest.webmanifest", "site.webmanifest"]
        .iter()
        .map(|name| config.site_root.join(name))
        .find(|p| p.exists());
    let Some(manifest) = manifest else {
        return;
    };
    let location = config.relative(&manifest);
    let Ok(raw) = std::fs::read_to_string(&manifest) else {
        return;
    };
    outcome.scanned_files.push(location.clone());
    let Ok(v) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return;
    };

    let mut covered: BTreeSet<u32> = BTreeSet::new();
    if let Some(icons) = v.get("icons").and_then(|x| x.as_array()) {
        for icon in icons {
            let Some(src) = icon.get("src").and_then(|x| x.as_str()) else {
                continue;
            };
            let Some(file) = local_asset(config, src) else {
                continue;
            };
            if let Some((w, h)) = imagemeta::image_dimensions(&file) {
                for &size in MANIFEST_ICON_SIZES {
                    if w >= size && h >= size {
                        covered.insert(size);
                    }
                }
            }
        }
    }
    for &size in MANIFEST_ICON_SIZES {
        if !covered.contains(&size) {
            outcome.icon_issues.push(EvidenceItem::new(
                &location,
                "manifest_icon_missing",
                &format!("no probe-verified icon >= {}x{}", size, size),
            ));
        }
    }
}

fn template_guards(text: &str) -> TemplateGuards {
    TemplateGuards {
        viewport_meta: text.contains(r#"name="viewport""#) && text.contains("width=device-width"),
        theme_color_meta: text.contains(r#"name="theme-color""#),
        apple_touch_icon: text.contains(r#"rel="apple-touch-icon""#),
        manifest_link: text.contains(r#"rel="manifest""#),
        description_meta: text.contains(r#"name="description""#),
        og_title: text.contains(r#"property="og:title""#),
        og_image: text.contains(r#"property="og:image""#),
        page_image_guard: text.contains("{% if page.image %}"),
        preconnect_hint: text.contains(r#"rel="preconnect""#),
    }
}

/// Resolve a site-relative image reference to a local file, when it is one.
fn local_asset(config: &AuditConfig, reference: &str) -> Option<PathBuf> {
    if !reference.starts_with('/') || reference.contains("://") {
        return None;
    }
    let file = config.site_root.join(reference.trim_start_matches('/'));
    file.is_file().then_some(file)
}

fn content_files(config: &AuditConfig) -> Vec<PathBuf> {
    let mut files = sorted_files(&config.posts_root());
    files.extend(
        sorted_files(&config.site_root)
            .into_iter()
            .filter(|p| has_extension(p, &["md", "markdown", "html"])),
    );
    files
}

fn template_files(config: &AuditConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in &config.template_dirs {
        files.extend(sorted_files(&config.site_root.join(dir)));
    }
    files
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e))
        .unwrap_or(false)
}

/// Best-effort text read: UTF-8 first, then a permissive single-byte
/// decode. Only an I/O failure skips the file.
fn read_text(path: &Path) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("skipping unreadable file {}: {}", path.display(), e);
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(s) => Some(s),
        Err(e) => Some(e.into_bytes().iter().map(|&b| b as char).collect()),
    }
}
