//! Splits a free-text soil photo analysis into named sections.
//!
//! The reply is expected to carry four headed sections, but nothing forces the
//! model to comply. Each section is located independently with a
//! [`SectionRule`]: a set of accepted headings and the headings that end the
//! section body. Sections that cannot be found fall back to fixed defaults.

use agro_domain::SoilImageAnalysis;
use lazy_static::lazy_static;
use regex::Regex;
use strum_macros::Display;
use tracing::debug;

pub const VISUAL_ANALYSIS_UNAVAILABLE: &str = "Visual analysis unavailable.";
pub const DEFAULT_CLIMATE_SNAPSHOT: &str =
    "Seasonal risks: heat/drought/rain vary by region; monitor forecasts.";
pub const DEFAULT_RECOMMENDED_CROPS: [&str; 3] = ["Maize (corn)", "Soybean", "Wheat"];
pub const DEFAULT_ROTATION_PLAN: [&str; 3] = [
    "Year 1: Legume (soybean) to build N",
    "Year 2: Cereal (maize/wheat)",
    "Year 3: Oilseed or root (canola/potato)",
];

const CONDITION_SUMMARY_CHARS: usize = 120;
const MAX_LIST_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Section {
    Condition,
    Climate,
    Crops,
    Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRule {
    pub section: Section,
    /// Accepted headings, most specific first. Matched case-insensitively.
    pub headings: &'static [&'static str],
    /// Line-leading headings that end the body, in addition to a blank line.
    /// An empty set means the body runs to the end of the text.
    pub terminators: &'static [&'static str],
}

/// Rules in search order. A rule only terminates on headings that follow it.
pub const SECTION_RULES: [SectionRule; 4] = [
    SectionRule {
        section: Section::Condition,
        headings: &["Soil condition", "Condition"],
        terminators: &["Climate", "Recommended"],
    },
    SectionRule {
        section: Section::Climate,
        headings: &["Climate snapshot", "Climate"],
        terminators: &["Recommended", "Rotation"],
    },
    SectionRule {
        section: Section::Crops,
        headings: &["Recommended crops", "Crops"],
        terminators: &["Rotation"],
    },
    SectionRule {
        section: Section::Rotation,
        headings: &["Rotation plan", "Rotation"],
        terminators: &[],
    },
];

impl SectionRule {
    /// Builds the pattern whose first capture group is the section body.
    pub fn pattern(&self) -> String {
        let headings = self
            .headings
            .iter()
            .map(|heading| regex::escape(heading))
            .collect::<Vec<_>>()
            .join("|");

        if self.terminators.is_empty() {
            return format!(r"(?i)(?:{headings})[:\-]?\s*([\s\S]*)");
        }

        let ends = std::iter::once(r"\n\n".to_string())
            .chain(
                self.terminators
                    .iter()
                    .map(|heading| format!(r"\n{}", regex::escape(heading))),
            )
            .collect::<Vec<_>>()
            .join("|");

        format!(r"(?i)(?:{headings})[:\-]?\s*([\s\S]*?)(?:{ends})")
    }
}

lazy_static! {
    static ref SECTION_PATTERNS: Vec<(Section, Regex)> = SECTION_RULES
        .iter()
        .map(|rule| {
            let regex = Regex::new(&rule.pattern()).expect("section rule pattern is valid");
            (rule.section, regex)
        })
        .collect();
    static ref CROP_NOISE: Regex = Regex::new(r"\n|\*").expect("crop noise pattern is valid");
    static ref CROP_SEPARATOR: Regex =
        Regex::new(r",|•|\s{2,}").expect("crop separator pattern is valid");
    static ref LINE_SEPARATOR: Regex = Regex::new(r"\n|•").expect("line separator pattern is valid");
}

/// Returns the untrimmed body of `section` in `text`, if its heading and a
/// terminator were found.
pub fn find_section<'a>(section: Section, text: &'a str) -> Option<&'a str> {
    SECTION_PATTERNS
        .iter()
        .find(|(candidate, _)| *candidate == section)
        .and_then(|(_, regex)| regex.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str())
}

/// Crop names are comma, bullet or column separated and may wrap lines.
pub fn split_crops(body: &str) -> Vec<String> {
    let flattened = CROP_NOISE.replace_all(body, " ");
    take_items(CROP_SEPARATOR.split(&flattened))
}

/// One rotation step per line or bullet.
pub fn split_rotation(body: &str) -> Vec<String> {
    take_items(LINE_SEPARATOR.split(body))
}

fn take_items<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .take(MAX_LIST_ITEMS)
        .map(str::to_string)
        .collect()
}

/// Section contents found in a reply; `None` marks a section that will use
/// its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSections {
    pub condition: Option<String>,
    pub climate: Option<String>,
    pub crops: Option<Vec<String>>,
    pub rotation: Option<Vec<String>>,
}

impl ExtractedSections {
    pub fn missing(&self) -> Vec<Section> {
        [
            (Section::Condition, self.condition.is_none()),
            (Section::Climate, self.climate.is_none()),
            (Section::Crops, self.crops.is_none()),
            (Section::Rotation, self.rotation.is_none()),
        ]
        .into_iter()
        .filter_map(|(section, missing)| missing.then_some(section))
        .collect()
    }
}

pub fn extract_sections(text: &str) -> ExtractedSections {
    let prose = |section| {
        find_section(section, text)
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .map(str::to_string)
    };
    let list = |section, split: fn(&str) -> Vec<String>| {
        find_section(section, text)
            .map(split)
            .filter(|items| !items.is_empty())
    };

    ExtractedSections {
        condition: prose(Section::Condition),
        climate: prose(Section::Climate),
        crops: list(Section::Crops, split_crops),
        rotation: list(Section::Rotation, split_rotation),
    }
}

/// Builds the structured analysis for a reply, filling every section that
/// could not be extracted with its default.
pub fn soil_image_analysis(reply: Option<&str>) -> SoilImageAnalysis {
    let reply = reply.filter(|text| !text.is_empty());
    let sections = reply.map(extract_sections).unwrap_or_default();
    let missing = sections.missing();
    if reply.is_some() && !missing.is_empty() {
        let missing = missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        debug!(%missing, "Using defaults for sections missing from reply");
    }
    let details = reply.unwrap_or(VISUAL_ANALYSIS_UNAVAILABLE).to_string();

    SoilImageAnalysis {
        condition_summary: sections
            .condition
            .unwrap_or_else(|| details.chars().take(CONDITION_SUMMARY_CHARS).collect()),
        climate_snapshot: sections
            .climate
            .unwrap_or_else(|| DEFAULT_CLIMATE_SNAPSHOT.to_string()),
        recommended_crops: sections
            .crops
            .unwrap_or_else(|| to_owned_list(&DEFAULT_RECOMMENDED_CROPS)),
        rotation_plan: sections
            .rotation
            .unwrap_or_else(|| to_owned_list(&DEFAULT_ROTATION_PLAN)),
        details,
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_REPLY: &str = "Soil condition: Loamy texture with good drainage and moderate organic matter.
Climate snapshot: Mild spring; watch for excess rain.
Recommended crops: Maize, Soybean, Wheat, Barley
Rotation plan:
- Year 1: Soybean
- Year 2: Maize
- Year 3: Canola
- Year 4: Fallow";

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_pattern_with_terminators() {
        let actual = SECTION_RULES[2].pattern();
        let expected = r"(?i)(?:Recommended crops|Crops)[:\-]?\s*([\s\S]*?)(?:\n\n|\nRotation)";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_pattern_runs_to_end_without_terminators() {
        let actual = SECTION_RULES[3].pattern();
        let expected = r"(?i)(?:Rotation plan|Rotation)[:\-]?\s*([\s\S]*)";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_extract_all_sections() {
        let actual = extract_sections(FULL_REPLY);

        let expected = ExtractedSections {
            condition: Some(
                "Loamy texture with good drainage and moderate organic matter.".to_string(),
            ),
            climate: Some("Mild spring; watch for excess rain.".to_string()),
            crops: Some(strings(&["Maize", "Soybean", "Wheat"])),
            rotation: Some(strings(&[
                "- Year 1: Soybean",
                "- Year 2: Maize",
                "- Year 3: Canola",
            ])),
        };
        assert_eq!(actual, expected);
        assert!(actual.missing().is_empty());
    }

    #[test]
    fn test_blank_line_ends_section() {
        let fixture = "Condition: Sandy and dry.\n\nSome closing remark.\nClimate: Hot";

        let actual = extract_sections(fixture);

        assert_eq!(actual.condition, Some("Sandy and dry.".to_string()));
        assert_eq!(actual.climate, None);
    }

    #[test]
    fn test_earlier_heading_does_not_end_section() {
        let fixture = "Condition: x\nRotation: y\n\nClimate: z";

        let actual = extract_sections(fixture);

        let expected = ExtractedSections {
            condition: Some("x\nRotation: y".to_string()),
            climate: None,
            crops: None,
            rotation: Some(strings(&["y", "Climate: z"])),
        };
        assert_eq!(actual, expected);
        assert_eq!(actual.missing(), vec![Section::Climate, Section::Crops]);
    }

    #[test]
    fn test_section_names() {
        let actual = SECTION_RULES
            .iter()
            .map(|rule| rule.section.to_string())
            .collect::<Vec<_>>();
        assert_eq!(actual, strings(&["condition", "climate", "crops", "rotation"]));
    }

    #[test]
    fn test_headings_are_case_insensitive() {
        let fixture = "SOIL CONDITION: Heavy clay.\nCLIMATE: Wet autumn.\nRECOMMENDED CROPS: Rice\nROTATION: Rice • Vetch";

        let actual = extract_sections(fixture);

        assert_eq!(actual.condition, Some("Heavy clay.".to_string()));
        assert_eq!(actual.climate, Some("Wet autumn.".to_string()));
        assert_eq!(actual.crops, Some(strings(&["Rice"])));
        assert_eq!(actual.rotation, Some(strings(&["Rice", "Vetch"])));
    }

    #[test]
    fn test_condition_without_terminator_is_missing() {
        let fixture = "Condition: Crumbly loam with earthworms";

        let actual = extract_sections(fixture);

        assert_eq!(actual.condition, None);
        assert_eq!(
            actual.missing(),
            vec![Section::Condition, Section::Climate, Section::Crops, Section::Rotation]
        );
    }

    #[test]
    fn test_split_crops_handles_bullets_and_markdown() {
        let fixture = "\n* **Sorghum** • Millet\n* Cowpea, Groundnut";

        let actual = split_crops(fixture);

        let expected = strings(&["Sorghum", "Millet", "Cowpea"]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_split_crops_on_wide_spacing() {
        let actual = split_crops("Oats   Rye   Peas");
        assert_eq!(actual, strings(&["Oats", "Rye", "Peas"]));
    }

    #[test]
    fn test_split_rotation_caps_at_three() {
        let actual = split_rotation("Year 1: Beans\n\nYear 2: Maize\n• Year 3: Canola\nYear 4: Wheat");
        assert_eq!(actual, strings(&["Year 1: Beans", "Year 2: Maize", "Year 3: Canola"]));
    }

    #[test]
    fn test_analysis_from_full_reply() {
        let actual = soil_image_analysis(Some(FULL_REPLY));

        assert_eq!(
            actual.condition_summary,
            "Loamy texture with good drainage and moderate organic matter."
        );
        assert_eq!(actual.climate_snapshot, "Mild spring; watch for excess rain.");
        assert_eq!(actual.recommended_crops, strings(&["Maize", "Soybean", "Wheat"]));
        assert_eq!(actual.rotation_plan.len(), 3);
        assert_eq!(actual.details, FULL_REPLY);
    }

    #[test]
    fn test_analysis_without_headings_uses_defaults() {
        let fixture = "The photo shows pale, sandy topsoil with visible surface crusting after recent irrigation. Moisture looks low across the whole field and organic debris is sparse.";

        let actual = soil_image_analysis(Some(fixture));

        let expected = SoilImageAnalysis {
            condition_summary: fixture.chars().take(120).collect(),
            climate_snapshot: DEFAULT_CLIMATE_SNAPSHOT.to_string(),
            recommended_crops: strings(&DEFAULT_RECOMMENDED_CROPS),
            rotation_plan: strings(&DEFAULT_ROTATION_PLAN),
            details: fixture.to_string(),
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_analysis_without_reply() {
        let actual = soil_image_analysis(None);

        assert_eq!(actual.details, VISUAL_ANALYSIS_UNAVAILABLE);
        assert_eq!(actual.condition_summary, VISUAL_ANALYSIS_UNAVAILABLE);
        assert_eq!(actual.recommended_crops, strings(&DEFAULT_RECOMMENDED_CROPS));
    }

    #[test]
    fn test_analysis_with_empty_reply_matches_missing_reply() {
        assert_eq!(soil_image_analysis(Some("")), soil_image_analysis(None));
    }

    #[test]
    fn test_empty_crop_section_falls_back() {
        let fixture = "Recommended crops: **\nRotation: Year 1: Peas";

        let actual = soil_image_analysis(Some(fixture));

        assert_eq!(actual.recommended_crops, strings(&DEFAULT_RECOMMENDED_CROPS));
        assert_eq!(actual.rotation_plan, strings(&["Year 1: Peas"]));
    }
}
