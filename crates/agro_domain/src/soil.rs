use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum NitrogenLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(into)]
pub struct Climate {
    pub region: String,
    pub season: String,
}

impl Climate {
    pub fn new(region: impl Into<String>, season: impl Into<String>) -> Self {
        Self { region: region.into(), season: season.into() }
    }
}

/// Lab-style soil readings for a text-only recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option, into)]
pub struct SoilAnalysisArgs {
    pub ph: f64,
    pub nitrogen_level: NitrogenLevel,
    /// Organic matter, in percent.
    pub organic_matter: f64,
    pub climate: Climate,
    /// Accepted for parity with the photo flow; not part of the prompt.
    pub image_uri: Option<String>,
}

impl SoilAnalysisArgs {
    pub fn new(ph: f64, nitrogen_level: NitrogenLevel, organic_matter: f64, climate: Climate) -> Self {
        Self { ph, nitrogen_level, organic_matter, climate, image_uri: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilRecommendation {
    pub text: String,
    pub top_recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(into)]
pub struct YieldPlanArgs {
    pub crop: String,
    pub area_ha: f64,
    pub location: String,
    pub history: String,
}

impl YieldPlanArgs {
    pub fn new(
        crop: impl Into<String>,
        area_ha: f64,
        location: impl Into<String>,
        history: impl Into<String>,
    ) -> Self {
        Self {
            crop: crop.into(),
            area_ha,
            location: location.into(),
            history: history.into(),
        }
    }
}

/// Structured view of a free-text soil photo analysis. Every field is
/// populated, either from the reply or from a fixed default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilImageAnalysis {
    pub condition_summary: String,
    pub climate_snapshot: String,
    pub recommended_crops: Vec<String>,
    pub rotation_plan: Vec<String>,
    /// The full reply the fields were extracted from.
    pub details: String,
}
