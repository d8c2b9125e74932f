use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Qualitative verdict attached to a finding. Serialized as the literal
/// report vocabulary, so renames here change the persisted schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingResult {
    Good,
    #[serde(rename = "Needs improvement")]
    NeedsImprovement,
    Improved,
    #[serde(rename = "Needs tuning")]
    NeedsTuning,
    Clean,
    #[serde(rename = "Issues found")]
    IssuesFound,
    Observed,
    Skipped,
    Healthy,
}

/// Human-readable observation. Descriptive only; scoring never reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub aspect: String,
    pub result: FindingResult,
    pub details: String,
}

/// One concrete, machine-checkable defect. `location` is a path relative
/// to the site root for file findings; template-family and probe findings
/// use the synthetic markers `(templates)` and `(external)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub location: String,
    pub issue: String,
    pub value: String,
}

impl EvidenceItem {
    pub fn new(location: &str, issue: &str, value: &str) -> Self {
        Self {
            location: location.to_string(),
            issue: issue.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub url: String,
    pub status: Option<u16>,
    pub ok: bool,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutSection {
    pub score: f64,
    pub max_score: f64,
    pub findings: Vec<Finding>,
    pub template_issues: Vec<EvidenceItem>,
    pub icon_issues: Vec<EvidenceItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinksSection {
    pub score: f64,
    pub max_score: f64,
    pub findings: Vec<Finding>,
    pub malformed_links: Vec<EvidenceItem>,
    pub missing_internal_links: Vec<EvidenceItem>,
    pub missing_liquid_internal_links: Vec<EvidenceItem>,
    pub placeholder_hits: Vec<EvidenceItem>,
    pub unreachable_urls: Vec<EvidenceItem>,
    pub probed_urls: Vec<ProbeResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeoSection {
    pub score: f64,
    pub max_score: f64,
    pub findings: Vec<Finding>,
    pub template_issues: Vec<EvidenceItem>,
    pub missing_image_alt: Vec<EvidenceItem>,
    pub social_image_issues: Vec<EvidenceItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentSection {
    pub score: f64,
    pub max_score: f64,
    pub findings: Vec<Finding>,
    pub template_issues: Vec<EvidenceItem>,
    pub missing_image_dimensions: Vec<EvidenceItem>,
    pub invalid_boolean_flags: Vec<EvidenceItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Sections {
    pub layout_assessment: LayoutSection,
    pub broken_links_check: LinksSection,
    pub seo_evaluation: SeoSection,
    pub content_quality: ContentSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Summary {
    pub layout: String,
    pub links: String,
    pub seo: String,
    pub content: String,
}

/// Top-level aggregate. Built fully in memory before any write; one file is
/// persisted per run and never mutated afterwards.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditReport {
    pub audit_timestamp: String,
    pub website_url: String,
    pub overall_score: f64,
    pub max_possible_score: f64,
    pub sections: Sections,
    pub summary: Summary,
    pub recommendations: Vec<String>,
}
