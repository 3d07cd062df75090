//! Prompt construction for each advisory task.

use crate::{CompletionRequest, ContextMessage, SoilAnalysisArgs, YieldPlanArgs};

const MARKET_ANALYST: &str = "You are an agricultural market analyst. Be concise (<=100 words).";
const AGRONOMIST: &str = "You are an agronomist. Be practical and specific.";
const FARM_PLANNER: &str = "You are a farm planning assistant.";
const VISUAL_AGRONOMIST: &str = "You are an agronomist. Be visual-first and pragmatic.";

const DEMAND_QUESTION: &str = "Give today's global crop demand highlights for staples (rice, wheat, corn, soybean). Include price/demand trend directions only.";

const SOIL_IMAGE_INSTRUCTIONS: &str = "You are given a photograph of bare topsoil. Visually infer likely soil texture (sandy/loam/clay), drainage, organic matter indications, compaction, and moisture. Then:
- Soil condition: 1-2 sentences, practical.
- Climate snapshot: Assume season is current month and general temperate conditions; note risks (heat/drought/excess rain) generically.
- Recommended crops: top 3 globally common crops suited to the inferred soil condition.
- Rotation plan: 3 bullet lines (Year 1-3) including legumes where appropriate.
Return clear text. Keep total under 160 words.";

pub fn demand_summary_prompt() -> CompletionRequest {
    CompletionRequest::default()
        .add_message(ContextMessage::system(MARKET_ANALYST))
        .add_message(ContextMessage::user(DEMAND_QUESTION))
}

pub fn soil_recommendation_prompt(args: &SoilAnalysisArgs) -> CompletionRequest {
    let user = format!(
        "Analyze soil health and recommend top 3 crops.
Soil pH: {}
Nitrogen: {}
Organic matter: {}%
Region: {}
Season: {}
If pH is <5.5 or >8.0, note remediation. Provide bullet summary and a single best crop recommendation.",
        format_number(args.ph),
        args.nitrogen_level,
        format_number(args.organic_matter),
        args.climate.region,
        args.climate.season
    );

    CompletionRequest::default()
        .add_message(ContextMessage::system(AGRONOMIST))
        .add_message(ContextMessage::user(user))
}

pub fn yield_plan_prompt(args: &YieldPlanArgs) -> CompletionRequest {
    let user = format!(
        "Create a concise yield prediction and 3-year rotation plan.
Crop: {}
Area: {} ha
Location: {}
Recent rotation: {}
Include: expected yield range with assumptions (climate normal), inputs recommendation, and rotation schedule (Year1-3). Keep <=150 words.",
        args.crop,
        format_number(args.area_ha),
        args.location,
        args.history
    );

    CompletionRequest::default()
        .add_message(ContextMessage::system(FARM_PLANNER))
        .add_message(ContextMessage::user(user))
}

/// The image itself is never uploaded; only its URI is appended as context.
pub fn soil_image_prompt(image_uri: &str) -> CompletionRequest {
    CompletionRequest::default()
        .add_message(ContextMessage::system(VISUAL_AGRONOMIST))
        .add_message(ContextMessage::user(format!(
            "{SOIL_IMAGE_INSTRUCTIONS}\nImage URI: {image_uri}"
        )))
}

/// Integral values print without a fraction. Magnitudes of `1e21` and above,
/// or below `1e-6`, use exponent form with an explicit sign (`1e+21`).
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}Infinity");
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exponent = format!("{value:e}");
        return match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exponent,
        };
    }
    value.to_string()
}
