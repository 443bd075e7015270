use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// One vitals entry. Every measurement is optional free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Vital {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub bp: Option<String>,
    #[serde(default)]
    pub sugar: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: String,
}

impl Vital {
    /// `"BP: 120/80 | Sugar: 95 | Weight: 70"`, skipping empty readings.
    pub fn readings(&self) -> String {
        [("BP", &self.bp), ("Sugar", &self.sugar), ("Weight", &self.weight)]
            .into_iter()
            .filter_map(|(label, value)| {
                let value = value.as_deref()?.trim();
                (!value.is_empty()).then(|| format!("{label}: {value}"))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Calendar date part of the ISO timestamp.
    pub fn day(&self) -> &str {
        self.date.split('T').next().unwrap_or(&self.date)
    }
}

impl Resource for Vital {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /vitals/add`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VitalForm {
    pub bp: String,
    pub sugar: String,
    pub weight: String,
    pub note: String,
}

impl VitalForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
