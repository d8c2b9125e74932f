use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_WEBSITE_URL: &str = "https://zero-times.github.io";

/// Front-matter keys that toggle performance behavior in the templates.
/// Values other than a literal true/false render the toggle inert.
pub const PERFORMANCE_FLAG_KEYS: &[&str] = &[
    "lazy_images",
    "preload_cover",
    "defer_scripts",
    "inline_critical_css",
];

/// Everything the pipeline needs, resolved up front. Components take this
/// by reference instead of reading ambient globals.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub site_root: PathBuf,
    pub website_url: String,
    pub posts_dir: String,
    pub template_dirs: Vec<String>,
    pub assets_prefix: String,
    pub reports_dir: PathBuf,
    pub probe_exclude: Vec<String>,
}

/// Failures while resolving the tool configuration. Site metadata
/// (`_config.yml`) is advisory and never produces these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tool config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default)]
struct ToolConfigFile {
    #[serde(default)]
    site: ToolSite,
    #[serde(default)]
    probe: ToolProbe,
}

#[derive(Debug, Deserialize, Default)]
struct ToolSite {
    url: Option<String>,
    posts_dir: Option<String>,
    assets_prefix: Option<String>,
    reports_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ToolProbe {
    #[serde(default)]
    exclude: Vec<String>,
}

impl AuditConfig {
    /// Resolve the configuration for a site rooted at `site_dir`.
    ///
    /// Precedence: `.sitecheck.toml` (tool config) over `_config.yml`
    /// (site metadata) over built-in defaults. Both files are optional and
    /// read-only; a malformed tool config is a hard error, a malformed
    /// `_config.yml` just contributes nothing.
    pub fn load(site_dir: &str) -> anyhow::Result<Self> {
        let site_root = PathBuf::from(site_dir);
        let tool = load_tool_config(&site_root)?;
        let site_url_from_yaml = site_url_from_config_yml(&site_root);

        let website_url = tool
            .site
            .url
            .or(site_url_from_yaml)
            .unwrap_or_else(|| DEFAULT_WEBSITE_URL.to_string());
        let reports_dir = site_root.join(tool.site.reports_dir.as_deref().unwrap_or("reports"));

        Ok(Self {
            site_root,
            website_url,
            posts_dir: tool.site.posts_dir.unwrap_or_else(|| "_posts".to_string()),
            template_dirs: vec!["_layouts".to_string(), "_includes".to_string()],
            assets_prefix: tool
                .site
                .assets_prefix
                .unwrap_or_else(|| "/assets/".to_string()),
            reports_dir,
            probe_exclude: tool.probe.exclude,
        })
    }

    pub fn posts_root(&self) -> PathBuf {
        self.site_root.join(&self.posts_dir)
    }

    /// Path relative to the site root, for evidence locations.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.site_root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

fn load_tool_config(site_root: &Path) -> Result<ToolConfigFile, ConfigError> {
    let path = site_root.join(".sitecheck.toml");
    if !path.exists() {
        return Ok(ToolConfigFile::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
}

fn site_url_from_config_yml(site_root: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(site_root.join("_config.yml")).ok()?;
    let v: serde_yaml::Value = serde_yaml::from_str(&raw).ok()?;
    v.get("url")
        .and_then(|x| x.as_str())
        .map(|s| s.trim_end_matches('/').to_string())
}
