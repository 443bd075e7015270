//! Reports and the AI insights derived from them.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// An uploaded medical report with its AI analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Report {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default, rename = "fileUrl")]
    pub file_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "dateSeen")]
    pub date_seen: Option<String>,
    #[serde(default)]
    pub summary: String,
    /// Explanation in English.
    #[serde(default)]
    pub explanation_en: String,
    /// Explanation in Roman Urdu.
    #[serde(default)]
    pub explanation_ro: String,
    #[serde(default)]
    pub suggested_questions: Vec<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

impl Report {
    /// Title if the analysis produced one, else the uploaded filename.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.filename
        } else {
            &self.title
        }
    }

    pub fn summary_or_placeholder(&self) -> &str {
        if self.summary.trim().is_empty() {
            "No summary available"
        } else {
            &self.summary
        }
    }
}

impl Resource for Report {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Per-report analysis shown on the insights view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, rename = "reportTitle")]
    pub report_title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub explanation_en: String,
    #[serde(default)]
    pub explanation_ro: String,
}

impl Resource for Insight {
    fn id(&self) -> &str {
        &self.id
    }
}
