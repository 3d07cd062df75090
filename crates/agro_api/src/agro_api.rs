use std::sync::Arc;

use agro_domain::{
    Advisory, AgroConfig, HttpInfra, KvStoreInfra, NewRecentSearch, RecentSearch,
    SoilAnalysisArgs, SoilImageAnalysis, SoilRecommendation, YieldPlanArgs,
};
use agro_infra::{AgroHttpService, CacacheKvStore, Environment, MemoryKvStore};
use agro_services::{AdvisoryService, RecencyService};

use crate::API;

pub struct AgroAPI<H, S> {
    advisory: AdvisoryService<H>,
    recency: RecencyService<S>,
}

impl<H, S> AgroAPI<H, S> {
    pub fn new(http: Arc<H>, store: Arc<S>, config: AgroConfig) -> Self {
        Self {
            advisory: AdvisoryService::new(http, config.advisory),
            recency: RecencyService::new(store, config.recency),
        }
    }
}

impl AgroAPI<AgroHttpService, CacacheKvStore> {
    /// Wires the HTTP transport and the durable store under
    /// `environment.store_dir`.
    pub fn init(environment: &Environment) -> anyhow::Result<Self> {
        let http = Arc::new(AgroHttpService::new(&environment.config.advisory.http)?);
        let store = Arc::new(CacacheKvStore::open(&environment.store_dir));
        Ok(Self::new(http, store, environment.config.clone()))
    }
}

impl AgroAPI<AgroHttpService, MemoryKvStore> {
    /// Like [`AgroAPI::init`] but recent searches live only in memory.
    pub fn init_ephemeral(environment: &Environment) -> anyhow::Result<Self> {
        let http = Arc::new(AgroHttpService::new(&environment.config.advisory.http)?);
        Ok(Self::new(http, Arc::new(MemoryKvStore::new()), environment.config.clone()))
    }
}

#[async_trait::async_trait]
impl<H: HttpInfra, S: KvStoreInfra> API for AgroAPI<H, S> {
    async fn get_today_demand_summary(&self) -> agro_domain::Result<Advisory<String>> {
        self.advisory.get_today_demand_summary().await
    }

    async fn analyze_soil_and_recommend(
        &self,
        args: &SoilAnalysisArgs,
    ) -> agro_domain::Result<Advisory<SoilRecommendation>> {
        self.advisory.analyze_soil_and_recommend(args).await
    }

    async fn get_yield_and_rotation_plan(
        &self,
        args: &YieldPlanArgs,
    ) -> agro_domain::Result<Advisory<String>> {
        self.advisory.get_yield_and_rotation_plan(args).await
    }

    async fn analyze_soil_image(
        &self,
        image_uri: &str,
    ) -> agro_domain::Result<Advisory<SoilImageAnalysis>> {
        self.advisory.analyze_soil_image(image_uri).await
    }

    async fn read_recent_searches(&self) -> Vec<RecentSearch> {
        self.recency.read_recent_searches().await
    }

    async fn save_recent_search(&self, item: NewRecentSearch) -> Option<RecentSearch> {
        self.recency.save_recent_search(item).await
    }

    async fn clear_recent_searches(&self) -> bool {
        self.recency.clear_recent_searches().await
    }
}
