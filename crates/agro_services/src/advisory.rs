use std::sync::Arc;

use agro_domain::{
    Advisory, AdvisoryConfig, CompletionRequest, CompletionResponse, HttpInfra, SoilAnalysisArgs,
    SoilImageAnalysis, SoilRecommendation, YieldPlanArgs, demand_summary_prompt,
    soil_image_prompt, soil_recommendation_prompt, yield_plan_prompt,
};
use anyhow::Context as _;
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::sections::soil_image_analysis;

pub const DEMAND_UNAVAILABLE: &str = "Demand data unavailable.";
pub const ANALYSIS_UNAVAILABLE: &str = "No analysis available.";
pub const PLAN_UNAVAILABLE: &str = "No plan generated.";
pub const SEE_ANALYSIS: &str = "See analysis";

lazy_static! {
    // The capture stops at the end of the line.
    static ref BEST_CROP: Regex = Regex::new(r"(?i)Best\s*crop\s*:?\s*([^\n\r\x{2028}\x{2029}]*)")
        .expect("best crop pattern is valid");
}

/// Pulls the single best-crop pick out of a free-text recommendation.
pub fn top_recommendation(text: &str) -> String {
    BEST_CROP
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|pick| pick.as_str().trim())
        .filter(|pick| !pick.is_empty())
        .unwrap_or(SEE_ANALYSIS)
        .to_string()
}

/// Agronomy assistance backed by a remote completion service.
///
/// Every operation sends one request and never fails because of the service:
/// transport errors, non-success statuses, unreadable bodies and missing
/// completions all produce a fallback value marked with
/// [`agro_domain::Origin::Fallback`]. Only a request that cannot be built is
/// reported as an error.
pub struct AdvisoryService<I> {
    infra: Arc<I>,
    config: AdvisoryConfig,
}

impl<I> AdvisoryService<I> {
    pub fn new(infra: Arc<I>, config: AdvisoryConfig) -> Self {
        Self { infra, config }
    }
}

impl<I: HttpInfra> AdvisoryService<I> {
    /// Short market summary for rice, wheat, corn and soybean.
    pub async fn get_today_demand_summary(&self) -> agro_domain::Result<Advisory<String>> {
        let completion = self.complete(demand_summary_prompt()).await?;
        Ok(or_fallback(completion, DEMAND_UNAVAILABLE))
    }

    /// Soil health notes for lab readings plus the single best crop, when the
    /// reply names one.
    pub async fn analyze_soil_and_recommend(
        &self,
        args: &SoilAnalysisArgs,
    ) -> agro_domain::Result<Advisory<SoilRecommendation>> {
        let completion = self.complete(soil_recommendation_prompt(args)).await?;
        Ok(
            or_fallback(completion, ANALYSIS_UNAVAILABLE).map(|text| SoilRecommendation {
                top_recommendation: top_recommendation(&text),
                text,
            }),
        )
    }

    pub async fn get_yield_and_rotation_plan(
        &self,
        args: &YieldPlanArgs,
    ) -> agro_domain::Result<Advisory<String>> {
        let completion = self.complete(yield_plan_prompt(args)).await?;
        Ok(or_fallback(completion, PLAN_UNAVAILABLE))
    }

    /// Asks for a four-part assessment of a soil photo and splits the reply
    /// into sections. Only the URI is sent, not the image.
    pub async fn analyze_soil_image(
        &self,
        image_uri: &str,
    ) -> agro_domain::Result<Advisory<SoilImageAnalysis>> {
        let completion = self.complete(soil_image_prompt(image_uri)).await?;
        let analysis = soil_image_analysis(completion.as_deref());
        Ok(match completion {
            Some(_) => Advisory::service(analysis),
            None => Advisory::fallback(analysis),
        })
    }

    /// Sends `request` and returns the completion text, or `None` when the
    /// service could not provide one.
    async fn complete(&self, request: CompletionRequest) -> agro_domain::Result<Option<String>> {
        let body = Bytes::from(request.to_json()?);
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        debug!(
            url = %self.config.endpoint,
            messages = request.messages.len(),
            "Sending completion request"
        );

        match self.fetch_completion(headers, body).await {
            Ok(Some(text)) => Ok(Some(text)),
            Ok(None) => {
                warn!(url = %self.config.endpoint, "Completion service returned no completion");
                Ok(None)
            }
            Err(error) => {
                warn!(url = %self.config.endpoint, error = ?error, "Completion request failed");
                Ok(None)
            }
        }
    }

    async fn fetch_completion(
        &self,
        headers: HeaderMap,
        body: Bytes,
    ) -> anyhow::Result<Option<String>> {
        let response = self
            .infra
            .http_post(&self.config.endpoint, Some(headers), body)
            .await
            .context("Failed to reach completion service")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Completion service returned status {status}");
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read completion response body")?;
        let response: CompletionResponse =
            serde_json::from_slice(&bytes).context("Failed to parse completion response")?;

        Ok(response.into_text())
    }
}

fn or_fallback(completion: Option<String>, fallback: &str) -> Advisory<String> {
    match completion {
        Some(text) => Advisory::service(text),
        None => Advisory::fallback(fallback.to_string()),
    }
}
