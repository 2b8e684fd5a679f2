//! Command line arguments of the `pro-directory` binary.

use crate::config::AppConfig;
use crate::core::ProfessionType;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "pro-directory")]
#[clap(about = "Browse a professional directory by category", long_about = None)]
pub struct Cli {
    /// Directory to browse: artisanat, peinture, sculpture or photographie.
    /// Defaults to the configured profession.
    pub profession: Option<ProfessionType>,

    /// Free-text search sent to the backend.
    #[clap(long)]
    pub search: Option<String>,

    /// City or region sent to the backend.
    #[clap(long)]
    pub location: Option<String>,

    /// Only show the professionals of this category slug ("all" for everyone).
    #[clap(long)]
    pub category: Option<String>,

    /// Print the view model as JSON instead of text.
    #[clap(long)]
    pub json: bool,
}

impl Cli {
    /// Command line values win over the loaded configuration.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(profession) = self.profession {
            config.profession = profession;
        }
    }
}
