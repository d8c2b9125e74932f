mod common;

use common::TestEnv;
use predicates::str::contains;

#[test]
fn strict_green_tree_exits_zero() {
    let env = TestEnv::green();
    env.cmd().args(["audit", "--strict"]).assert().code(0);
}

#[test]
fn strict_dangling_link_exits_with_reserved_code() {
    let env = TestEnv::green();
    env.write_post(
        "2025-08-21-broken.md",
        "---\ntitle: Quebrado\n---\n\n[gone](/missing-page)\n",
    );

    env.cmd()
        .args(["audit", "--strict"])
        .assert()
        .code(3)
        .stdout(contains("missing_internal_links=1"));
}

#[test]
fn strict_failure_list_names_every_failing_check() {
    let env = TestEnv::green();
    // Lose one SEO guard and add one placeholder hit.
    std::fs::write(
        env.site.join("_includes/head.html"),
        r##"<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="theme-color" content="#101418">
<meta name="description" content="{{ page.description }}">
<meta property="og:title" content="{{ page.title }}">
<link rel="preconnect" href="https://fonts.gstatic.com">
<link rel="apple-touch-icon" href="/assets/apple-touch-icon.png">
<link rel="manifest" href="/manifest.webmanifest">
"##,
    )
    .expect("rewrite head include");
    env.write_post("2025-08-21-todo.md", "---\ntitle: T\n---\n\nTBD\n");

    let out = env
        .cmd()
        .arg("--json")
        .args(["audit", "--strict"])
        .assert()
        .code(3)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("json output");
    assert_eq!(v["ok"], false);
    let failures: Vec<String> = v["data"]["failures"]
        .as_array()
        .expect("failures array")
        .iter()
        .map(|f| f.as_str().expect("failure string").to_string())
        .collect();
    assert!(failures.contains(&"og_image".to_string()));
    assert!(failures.contains(&"page_image_guard".to_string()));
    assert!(failures.contains(&"placeholder_hits=1".to_string()));
}

#[test]
fn strict_report_is_still_written_before_failing() {
    let env = TestEnv::green();
    env.write_post("2025-08-21-todo.md", "---\ntitle: T\n---\n\nTODO later\n");

    env.cmd().args(["audit", "--strict"]).assert().code(3);
    let report = env.latest_report();
    assert_eq!(report["sections"]["broken_links_check"]["score"], 6.0);
}
