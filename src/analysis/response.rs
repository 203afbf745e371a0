//! Scoring service response

use serde::{Deserialize, Serialize};

/// Match report produced by the scoring service, passed to presenters untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// 0-100
    pub match_percentage: f64,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub optimization_tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_industry: Option<String>,
}
