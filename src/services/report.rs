use crate::domain::models::{
    AuditReport, ContentSection, EvidenceItem, Finding, FindingResult, LayoutSection,
    LinksSection, ProbeResult, Sections, SeoSection, Summary,
};
use crate::services::config::AuditConfig;
use crate::services::scanner::ScanOutcome;

pub const MAX_SCORE: f64 = 10.0;

// Two-tier scoring on purpose: a section either holds every one of its
// checks or it drops to the fixed fallback. Reproducibility over nuance.
const PASS_SCORE: f64 = 10.0;
const FALLBACK_SCORE: f64 = 6.0;

fn tier(clean: bool) -> f64 {
    if clean {
        PASS_SCORE
    } else {
        FALLBACK_SCORE
    }
}

fn finding(aspect: &str, result: FindingResult, details: String) -> Finding {
    Finding {
        aspect: aspect.to_string(),
        result,
        details,
    }
}

fn evidence_finding(aspect: &str, items: &[EvidenceItem], clean_details: &str) -> Finding {
    if items.is_empty() {
        finding(aspect, FindingResult::Clean, clean_details.to_string())
    } else {
        finding(
            aspect,
            FindingResult::IssuesFound,
            format!("{} issue(s) recorded", items.len()),
        )
    }
}

fn guard_finding(aspect: &str, present: bool, tag: &str) -> Finding {
    if present {
        finding(aspect, FindingResult::Good, format!("{} present", tag))
    } else {
        finding(
            aspect,
            FindingResult::NeedsImprovement,
            format!("{} missing from shared templates", tag),
        )
    }
}

/// Assemble the full audit report from the scan outcome and the optional
/// probe results. Pure aggregation: deterministic for a fixed file tree
/// when probing is disabled.
pub fn build_report(
    config: &AuditConfig,
    scan: &ScanOutcome,
    probes: Option<Vec<ProbeResult>>,
) -> AuditReport {
    let layout = build_layout_section(scan);
    let links = build_links_section(scan, probes);
    let seo = build_seo_section(scan);
    let content = build_content_section(scan);

    let overall = (layout.score + links.score + seo.score + content.score) / 4.0;
    let overall_score = (overall * 10.0).round() / 10.0;

    let summary = Summary {
        layout: format!("Layout: {}/{}", layout.score, MAX_SCORE),
        links: format!("Link validity: {}/{}", links.score, MAX_SCORE),
        seo: format!("SEO optimization: {}/{}", seo.score, MAX_SCORE),
        content: format!("Content quality: {}/{}", content.score, MAX_SCORE),
    };

    AuditReport {
        audit_timestamp: chrono::Local::now().to_rfc3339(),
        website_url: config.website_url.clone(),
        overall_score,
        max_possible_score: MAX_SCORE,
        sections: Sections {
            layout_assessment: layout,
            broken_links_check: links,
            seo_evaluation: seo,
            content_quality: content,
        },
        summary,
        recommendations: recommendations(),
    }
}

/// Operational reminders, emitted on every run regardless of findings.
fn recommendations() -> Vec<String> {
    vec![
        "Run the audit with --network periodically to sample external link health.".to_string(),
        "Keep social preview images at 1200x630 or larger.".to_string(),
        "Gate publishing on --strict so template regressions block the push.".to_string(),
    ]
}

fn build_layout_section(scan: &ScanOutcome) -> LayoutSection {
    let g = &scan.guards;
    let guards_ok = g.viewport_meta && g.theme_color_meta && g.apple_touch_icon && g.manifest_link;
    let findings = vec![
        guard_finding("Mobile viewport", g.viewport_meta, "viewport meta tag"),
        guard_finding("Theme color", g.theme_color_meta, "theme-color meta tag"),
        guard_finding("Touch icon", g.apple_touch_icon, "apple-touch-icon link"),
        guard_finding("Web app manifest", g.manifest_link, "manifest link"),
        evidence_finding("Icon sizing", &scan.icon_issues, "all probed icons meet minimums"),
    ];

    let template_issues = missing_guard_evidence(&[
        ("viewport_meta", g.viewport_meta),
        ("theme_color_meta", g.theme_color_meta),
        ("apple_touch_icon", g.apple_touch_icon),
        ("manifest_link", g.manifest_link),
    ]);

    LayoutSection {
        score: tier(guards_ok && scan.icon_issues.is_empty()),
        max_score: MAX_SCORE,
        findings,
        template_issues,
        icon_issues: scan.icon_issues.clone(),
    }
}

fn build_links_section(scan: &ScanOutcome, probes: Option<Vec<ProbeResult>>) -> LinksSection {
    let unreachable_urls: Vec<EvidenceItem> = probes
        .iter()
        .flatten()
        .filter(|p| !p.ok)
        .map(|p| {
            EvidenceItem::new(
                "(external)",
                "unreachable_url",
                &format!("{}: {}", p.url, p.error.as_deref().unwrap_or("no response")),
            )
        })
        .collect();

    let probe_finding = match &probes {
        None => finding(
            "External links",
            FindingResult::Skipped,
            "network probing disabled for this run".to_string(),
        ),
        Some(results) => finding(
            "External links",
            FindingResult::Observed,
            format!(
                "{} sampled, {} unreachable",
                results.len(),
                unreachable_urls.len()
            ),
        ),
    };

    let findings = vec![
        evidence_finding(
            "Malformed links",
            &scan.malformed_links,
            "no duplicated-protocol artifacts",
        ),
        evidence_finding(
            "Internal links",
            &scan.missing_internal_links,
            "all markdown/attribute targets resolve",
        ),
        evidence_finding(
            "Templated internal links",
            &scan.missing_liquid_internal_links,
            "all relative_url targets resolve",
        ),
        evidence_finding(
            "Placeholder markers",
            &scan.placeholder_hits,
            "no non-production markers",
        ),
        probe_finding,
    ];

    let clean = scan.malformed_links.is_empty()
        && scan.missing_internal_links.is_empty()
        && scan.missing_liquid_internal_links.is_empty()
        && scan.placeholder_hits.is_empty()
        && unreachable_urls.is_empty();

    LinksSection {
        score: tier(clean),
        max_score: MAX_SCORE,
        findings,
        malformed_links: scan.malformed_links.clone(),
        missing_internal_links: scan.missing_internal_links.clone(),
        missing_liquid_internal_links: scan.missing_liquid_internal_links.clone(),
        placeholder_hits: scan.placeholder_hits.clone(),
        unreachable_urls,
        probed_urls: probes.unwrap_or_default(),
    }
}

fn build_seo_section(scan: &ScanOutcome) -> SeoSection {
    let g = &scan.guards;
    let guards_ok = g.description_meta && g.og_title && g.og_image && g.page_image_guard;
    let findings = vec![
        guard_finding("Meta description", g.description_meta, "description meta tag"),
        guard_finding("Open Graph title", g.og_title, "og:title tag"),
        guard_finding("Open Graph image", g.og_image, "og:image tag"),
        guard_finding(
            "Conditional image tag",
            g.page_image_guard,
            "page.image guard",
        ),
        evidence_finding(
            "Image alt text",
            &scan.missing_image_alt,
            "every declared image has image_alt",
        ),
        evidence_finding(
            "Social preview sizing",
            &scan.social_image_issues,
            "all probed social images meet 1200x630",
        ),
    ];

    let template_issues = missing_guard_evidence(&[
        ("description_meta", g.description_meta),
        ("og_title", g.og_title),
        ("og_image", g.og_image),
        ("page_image_guard", g.page_image_guard),
    ]);

    let clean =
        guards_ok && scan.missing_image_alt.is_empty() && scan.social_image_issues.is_empty();

    SeoSection {
        score: tier(clean),
        max_score: MAX_SCORE,
        findings,
        template_issues,
        missing_image_alt: scan.missing_image_alt.clone(),
        social_image_issues: scan.social_image_issues.clone(),
    }
}

fn build_content_section(scan: &ScanOutcome) -> ContentSection {
    let g = &scan.guards;
    let findings = vec![
        guard_finding("Preconnect hint", g.preconnect_hint, "preconnect link"),
        evidence_finding(
            "Image dimensions",
            &scan.missing_image_dimensions,
            "every declared image has width/height",
        ),
        evidence_finding(
            "Performance flags",
            &scan.invalid_boolean_flags,
            "all toggles are literal booleans",
        ),
        finding(
            "Scanned files",
            FindingResult::Healthy,
            format!("{} files scanned", scan.scanned_files.len()),
        ),
    ];

    let template_issues = missing_guard_evidence(&[("preconnect_hint", g.preconnect_hint)]);

    let clean = g.preconnect_hint
        && scan.missing_image_dimensions.is_empty()
        && scan.invalid_boolean_flags.is_empty();

    ContentSection {
        score: tier(clean),
        max_score: MAX_SCORE,
        findings,
        template_issues,
        missing_image_dimensions: scan.missing_image_dimensions.clone(),
        invalid_boolean_flags: scan.invalid_boolean_flags.clone(),
    }
}

fn missing_guard_evidence(guards: &[(&str, bool)]) -> Vec<EvidenceItem> {
    guards
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| EvidenceItem::new("(templates)", "template_guard_missing", name))
        .collect()
}

/// Flatten the report into named failure codes for strict mode: one entry
/// per failed template guard, one `list=count` entry per non-empty
/// evidence list. Empty means the tree is green.
pub fn failure_codes(report: &AuditReport) -> Vec<String> {
    let mut codes = Vec::new();
    let s = &report.sections;

    for item in s
        .layout_assessment
        .template_issues
        .iter()
        .chain(&s.seo_evaluation.template_issues)
        .chain(&s.content_quality.template_issues)
    {
        codes.push(item.value.clone());
    }

    let counted: [(&str, usize); 10] = [
        ("icon_issues", s.layout_assessment.icon_issues.len()),
        ("malformed_links", s.broken_links_check.malformed_links.len()),
        (
            "missing_internal_links",
            s.broken_links_check.missing_internal_links.len(),
        ),
        (
            "missing_liquid_internal_links",
            s.broken_links_check.missing_liquid_internal_links.len(),
        ),
        ("placeholder_hits", s.broken_links_check.placeholder_hits.len()),
        ("unreachable_urls", s.broken_links_check.unreachable_urls.len()),
        ("missing_image_alt", s.seo_evaluation.missing_image_alt.len()),
        (
            "social_image_issues",
            s.seo_evaluation.social_image_issues.len(),
        ),
        (
            "missing_image_dimensions",
            s.content_quality.missing_image_dimensions.len(),
        ),
        (
            "invalid_boolean_flags",
            s.content_quality.invalid_boolean_flags.len(),
        ),
    ];
    for (name, count) in counted {
        if count > 0 {
            codes.push(format!("{}={}", name, count));
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::{build_report, failure_codes, FALLBACK_SCORE, PASS_SCORE};
    use crate::domain::models::EvidenceItem;
    use crate::services::config::AuditConfig;
    use crate::services::scanner::{ScanOutcome, TemplateGuards};
    use tempfile::TempDir;

    fn test_config() -> (TempDir, AuditConfig) {
        let tmp = TempDir::new().expect("temp dir");
        let cfg = AuditConfig::load(tmp.path().to_str().expect("utf8 path")).expect("config");
        (tmp, cfg)
    }

    fn all_guards() -> TemplateGuards {
        TemplateGuards {
            viewport_meta: true,
            theme_color_meta: true,
            apple_touch_icon: true,
            manifest_link: true,
            description_meta: true,
            og_title: true,
            og_image: true,
            page_image_guard: true,
            preconnect_hint: true,
        }
    }

    #[test]
    fn green_scan_scores_full_marks_everywhere() {
        let (_tmp, cfg) = test_config();
        let scan = ScanOutcome {
            guards: all_guards(),
            ..Default::default()
        };
        let report = build_report(&cfg, &scan, None);
        assert_eq!(report.overall_score, PASS_SCORE);
        assert_eq!(report.sections.layout_assessment.score, PASS_SCORE);
        assert!(failure_codes(&report).is_empty());
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn one_dangling_link_drops_only_the_links_section() {
        let (_tmp, cfg) = test_config();
        let mut scan = ScanOutcome {
            guards: all_guards(),
            ..Default::default()
        };
        scan.missing_internal_links.push(EvidenceItem::new(
            "_posts/p.md",
            "missing_internal_link",
            "/missing-page",
        ));
        let report = build_report(&cfg, &scan, None);
        assert_eq!(report.sections.broken_links_check.score, FALLBACK_SCORE);
        assert_eq!(report.sections.seo_evaluation.score, PASS_SCORE);
        assert_eq!(report.overall_score, 9.0);
        assert_eq!(failure_codes(&report), vec!["missing_internal_links=1"]);
    }

    #[test]
    fn missing_guard_names_appear_as_failure_codes() {
        let (_tmp, cfg) = test_config();
        let mut guards = all_guards();
        guards.og_image = false;
        guards.preconnect_hint = false;
        let scan = ScanOutcome {
            guards,
            ..Default::default()
        };
        let report = build_report(&cfg, &scan, None);
        let codes = failure_codes(&report);
        assert!(codes.contains(&"og_image".to_string()));
        assert!(codes.contains(&"preconnect_hint".to_string()));
    }

    #[test]
    fn scoring_is_deterministic_for_a_fixed_outcome() {
        let (_tmp, cfg) = test_config();
        let scan = ScanOutcome {
            guards: all_guards(),
            ..Default::default()
        };
        let a = build_report(&cfg, &scan, None);
        let b = build_report(&cfg, &scan, None);
        assert_eq!(a.overall_score, b.overall_score);
        assert_eq!(
            a.sections.content_quality.score,
            b.sections.content_quality.score
        );
    }
}
