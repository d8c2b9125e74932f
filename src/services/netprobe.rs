use crate::domain::models::ProbeResult;
use reqwest::blocking::Client;
use std::collections::BTreeSet;
use std::time::Duration;

/// Lightweight reachability probe: HEAD first, one GET fallback, no
/// retries beyond that. A completed GET counts as reachable whatever its
/// status; only an exhausted fallback is a failure.
pub fn probe_url(client: &Client, url: &str) -> ProbeResult {
    match client.head(url).send().and_then(|r| r.error_for_status()) {
        Ok(resp) => ProbeResult {
            url: url.to_string(),
            status: Some(resp.status().as_u16()),
            ok: true,
            method: "HEAD".to_string(),
            error: None,
        },
        Err(_) => match client.get(url).send() {
            Ok(resp) => ProbeResult {
                url: url.to_string(),
                status: Some(resp.status().as_u16()),
                ok: true,
                method: "GET".to_string(),
                error: None,
            },
            Err(e) => ProbeResult {
                url: url.to_string(),
                status: e.status().map(|s| s.as_u16()),
                ok: false,
                method: "GET".to_string(),
                error: Some(e.to_string()),
            },
        },
    }
}

/// Deterministic sample: first `limit` of the sorted deduplicated URL set,
/// skipping preconnect-hinted hosts and configured exclusions (both would
/// give false failure signals under HEAD/GET).
pub fn sample_urls(
    urls: &BTreeSet<String>,
    preconnect_hosts: &BTreeSet<String>,
    exclude: &[String],
    limit: usize,
) -> Vec<String> {
    urls.iter()
        .filter(|url| !preconnect_hosts.iter().any(|host| url.starts_with(host.as_str())))
        .filter(|url| !exclude.iter().any(|prefix| url.starts_with(prefix.as_str())))
        .take(limit)
        .cloned()
        .collect()
}

pub fn probe_sample(urls: &[String], timeout_secs: f64) -> anyhow::Result<Vec<ProbeResult>> {
    let client = Client::builder()
        .timeout(Duration::from_secs_f64(timeout_secs))
        .build()?;
    Ok(urls.iter().map(|url| probe_url(&client, url)).collect())
}

#[cfg(test)]
mod tests {
    use super::sample_urls;
    use std::collections::BTreeSet;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sample_is_sorted_prefix_with_exclusions() {
        let urls = set(&[
            "https://c.example/z",
            "https://a.example/x",
            "https://fonts.gstatic.com/font.woff2",
            "https://b.example/form",
        ]);
        let preconnect = set(&["https://fonts.gstatic.com"]);
        let exclude = vec!["https://b.example/form".to_string()];

        let sampled = sample_urls(&urls, &preconnect, &exclude, 10);
        assert_eq!(sampled, vec!["https://a.example/x", "https://c.example/z"]);

        let capped = sample_urls(&urls, &preconnect, &exclude, 1);
        assert_eq!(capped, vec!["https://a.example/x"]);
    }
}
