use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub site: PathBuf,
}

impl TestEnv {
    /// A fixture site that passes every check.
    pub fn green() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let site = make_fixture_site(tmp.path());
        Self { _tmp: tmp, site }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sitecheck").expect("sitecheck binary");
        cmd.arg("--site-dir")
            .arg(self.site.to_str().expect("site path utf8"));
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write_post(&self, name: &str, body: &str) {
        fs::write(self.site.join("_posts").join(name), body).expect("write post");
    }

    pub fn latest_report(&self) -> Value {
        let reports = self.site.join("reports");
        let mut files: Vec<PathBuf> = fs::read_dir(reports)
            .expect("reports dir")
            .flatten()
            .map(|e| e.path())
            .collect();
        files.sort();
        let raw = fs::read_to_string(files.last().expect("at least one report"))
            .expect("read report");
        serde_json::from_str(&raw).expect("valid report json")
    }
}

/// Minimal PNG with the given dimensions; only the header matters.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    data
}

fn make_fixture_site(base: &Path) -> PathBuf {
    let site = base.join("site");
    fs::create_dir_all(site.join("_posts")).expect("posts dir");
    fs::create_dir_all(site.join("_layouts")).expect("layouts dir");
    fs::create_dir_all(site.join("_includes")).expect("includes dir");
    fs::create_dir_all(site.join("assets")).expect("assets dir");

    fs::write(
        site.join("_config.yml"),
        "title: Fixture Blog\nurl: https://fixture.github.io\n",
    )
    .expect("write _config.yml");

    fs::write(
        site.join("_includes/head.html"),
        r##"<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="theme-color" content="#101418">
<meta name="description" content="{{ page.description }}">
<meta property="og:title" content="{{ page.title }}">
{% if page.image %}<meta property="og:image" content="{{ page.image }}">{% endif %}
<link rel="preconnect" href="https://fonts.gstatic.com">
<link rel="apple-touch-icon" href="/assets/apple-touch-icon.png">
<link rel="manifest" href="/manifest.webmanifest">
"##,
    )
    .expect("write head include");

    fs::write(
        site.join("_layouts/default.html"),
        "<!doctype html>\n<html>\n<head>{% include head.html %}</head>\n<body>{{ content }}</body>\n</html>\n",
    )
    .expect("write default layout");

    fs::write(site.join("assets/apple-touch-icon.png"), png_bytes(180, 180))
        .expect("write touch icon");
    fs::write(site.join("assets/icon-192.png"), png_bytes(192, 192)).expect("write icon 192");
    fs::write(site.join("assets/icon-512.png"), png_bytes(512, 512)).expect("write icon 512");
    fs::write(site.join("assets/cover.png"), png_bytes(1200, 630)).expect("write cover");

    fs::write(
        site.join("manifest.webmanifest"),
        serde_json::json!({
            "name": "Fixture Blog",
            "icons": [
                {"src": "/assets/icon-192.png", "sizes": "192x192", "type": "image/png"},
                {"src": "/assets/icon-512.png", "sizes": "512x512", "type": "image/png"}
            ]
        })
        .to_string(),
    )
    .expect("write manifest");

    fs::write(
        site.join("index.md"),
        "---\ntitle: Home\n---\n\n[About](/about/)\n",
    )
    .expect("write index");
    fs::write(
        site.join("about.md"),
        "---\npermalink: /about/\ntitle: About\n---\n\nBack to [home](/)\n",
    )
    .expect("write about page");
    fs::write(
        site.join("_posts/2025-08-20-daily-news.md"),
        "---\ntitle: Notícias do dia\nimage: /assets/cover.png\nimage_alt: Capa do dia\nimage_width: 1200\nimage_height: 630\nlazy_images: true\n---\n\nVeja também a página [Sobre](/about/).\n",
    )
    .expect("write post");

    site
}
