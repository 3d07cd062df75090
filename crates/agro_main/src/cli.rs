use agro_api::NitrogenLevel;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"), about = "Agronomy assistant")]
pub struct Cli {
    /// Keep recent searches in memory only, for this run.
    #[arg(long, default_value_t = false)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Today's demand highlights for rice, wheat, corn and soybean
    Demand,

    /// Soil health notes and best crop from lab readings
    Soil {
        #[arg(long)]
        ph: f64,

        /// Low, Medium or High
        #[arg(long)]
        nitrogen: NitrogenLevel,

        /// Organic matter in percent
        #[arg(long)]
        organic_matter: f64,

        #[arg(long)]
        region: String,

        #[arg(long)]
        season: String,

        /// Photo of the sample; recorded but not analysed
        #[arg(long)]
        image: Option<String>,
    },

    /// Yield estimate and three-year rotation plan
    Plan {
        #[arg(long)]
        crop: String,

        #[arg(long)]
        area_ha: f64,

        #[arg(long)]
        location: String,

        /// Crops grown in recent seasons
        #[arg(long)]
        history: String,
    },

    /// Sectioned assessment of a soil photo
    Image {
        /// URI of the photo
        uri: String,
    },

    /// Manage recent searches
    #[command(subcommand)]
    Recent(RecentCommand),
}

#[derive(Subcommand, Debug)]
pub enum RecentCommand {
    /// List recent searches, newest first
    List,

    /// Record a search
    Add {
        title: String,

        #[arg(long)]
        subtitle: Option<String>,

        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Forget all recent searches
    Clear,
}
