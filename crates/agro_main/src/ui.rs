use std::io::Write;

use agro_api::{
    API, Advisory, Climate, NewRecentSearch, RecentSearch, SoilAnalysisArgs, SoilImageAnalysis,
    SoilRecommendation, YieldPlanArgs,
};
use colored::Colorize;

use crate::{Command, RecentCommand};

/// Runs one CLI command against an [`API`] and renders the result.
pub struct UI<A, W> {
    api: A,
    out: W,
}

impl<A: API, W: Write> UI<A, W> {
    pub fn new(api: A, out: W) -> Self {
        Self { api, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Demand => {
                let summary = self.api.get_today_demand_summary().await?;
                self.advisory(&summary, |out, text| writeln!(out, "{text}"))
            }
            Command::Soil { ph, nitrogen, organic_matter, region, season, image } => {
                let mut args =
                    SoilAnalysisArgs::new(ph, nitrogen, organic_matter, Climate::new(region, season));
                if let Some(image) = image {
                    args = args.image_uri(image);
                }
                let recommendation = self.api.analyze_soil_and_recommend(&args).await?;
                self.advisory(&recommendation, write_recommendation)
            }
            Command::Plan { crop, area_ha, location, history } => {
                let args = YieldPlanArgs::new(crop, area_ha, location, history);
                let plan = self.api.get_yield_and_rotation_plan(&args).await?;
                self.advisory(&plan, |out, text| writeln!(out, "{text}"))
            }
            Command::Image { uri } => {
                let analysis = self.api.analyze_soil_image(&uri).await?;
                self.advisory(&analysis, write_image_analysis)
            }
            Command::Recent(RecentCommand::List) => {
                let searches = self.api.read_recent_searches().await;
                if searches.is_empty() {
                    writeln!(self.out, "{}", "No recent searches".dimmed())?;
                }
                for search in &searches {
                    write_search(&mut self.out, search)?;
                }
                Ok(())
            }
            Command::Recent(RecentCommand::Add { title, subtitle, thumbnail }) => {
                let mut item = NewRecentSearch::new(title);
                if let Some(subtitle) = subtitle {
                    item = item.subtitle(subtitle);
                }
                if let Some(thumbnail) = thumbnail {
                    item = item.thumbnail_uri(thumbnail);
                }
                match self.api.save_recent_search(item).await {
                    Some(search) => write_search(&mut self.out, &search)?,
                    None => anyhow::bail!("Recent search could not be saved"),
                }
                Ok(())
            }
            Command::Recent(RecentCommand::Clear) => {
                if !self.api.clear_recent_searches().await {
                    anyhow::bail!("Recent searches could not be cleared");
                }
                writeln!(self.out, "Cleared recent searches")?;
                Ok(())
            }
        }
    }

    fn advisory<T>(
        &mut self,
        advisory: &Advisory<T>,
        render: impl FnOnce(&mut W, &T) -> std::io::Result<()>,
    ) -> anyhow::Result<()> {
        if advisory.is_fallback() {
            writeln!(self.out, "{}", "[offline] advisory service unavailable".yellow())?;
        }
        render(&mut self.out, &advisory.value)?;
        Ok(())
    }
}

fn write_recommendation(out: &mut impl Write, value: &SoilRecommendation) -> std::io::Result<()> {
    writeln!(out, "{} {}", "Best crop:".bold(), value.top_recommendation)?;
    writeln!(out)?;
    writeln!(out, "{}", value.text)
}

fn write_image_analysis(out: &mut impl Write, value: &SoilImageAnalysis) -> std::io::Result<()> {
    writeln!(out, "{} {}", "Condition:".bold(), value.condition_summary)?;
    writeln!(out, "{} {}", "Climate:".bold(), value.climate_snapshot)?;
    writeln!(out, "{} {}", "Crops:".bold(), value.recommended_crops.join(", "))?;
    writeln!(out, "{}", "Rotation:".bold())?;
    for step in &value.rotation_plan {
        writeln!(out, "  {step}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", value.details)
}

fn write_search(out: &mut impl Write, search: &RecentSearch) -> std::io::Result<()> {
    let id = search.id.as_str().dimmed();
    match &search.subtitle {
        Some(subtitle) => writeln!(out, "{id}  {} {}", search.title, subtitle.dimmed()),
        None => writeln!(out, "{id}  {}", search.title),
    }
}
