use agro_domain::{
    Advisory, NewRecentSearch, RecentSearch, SoilAnalysisArgs, SoilImageAnalysis,
    SoilRecommendation, YieldPlanArgs,
};

/// Everything the application UI can ask of this workspace.
#[async_trait::async_trait]
pub trait API: Sync + Send {
    /// Today's demand highlights for staple crops
    async fn get_today_demand_summary(&self) -> agro_domain::Result<Advisory<String>>;

    /// Soil health notes and best crop for lab readings
    async fn analyze_soil_and_recommend(
        &self,
        args: &SoilAnalysisArgs,
    ) -> agro_domain::Result<Advisory<SoilRecommendation>>;

    /// Yield estimate and three-year rotation for a field
    async fn get_yield_and_rotation_plan(
        &self,
        args: &YieldPlanArgs,
    ) -> agro_domain::Result<Advisory<String>>;

    /// Sectioned assessment of a soil photo
    async fn analyze_soil_image(
        &self,
        image_uri: &str,
    ) -> agro_domain::Result<Advisory<SoilImageAnalysis>>;

    /// Recent searches, newest first
    async fn read_recent_searches(&self) -> Vec<RecentSearch>;

    /// Records a search; `None` if it could not be stored
    async fn save_recent_search(&self, item: NewRecentSearch) -> Option<RecentSearch>;

    async fn clear_recent_searches(&self) -> bool;
}
