mod catalog;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "grocywise")]
#[command(about = "Find affordable produce and compare grocery store prices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a market query for one city
    Search {
        /// Country from the location directory
        #[arg(long)]
        country: String,

        /// City within the country (defaults to the country's first city)
        #[arg(long)]
        city: Option<String>,

        /// Free-form shopping list to price across stores
        #[arg(long = "list")]
        shopping_list: Option<String>,

        /// Food group to focus on (repeatable)
        #[arg(long = "food-group")]
        food_groups: Vec<String>,

        /// Dietary restriction every item must satisfy (repeatable)
        #[arg(long = "diet")]
        dietary_restrictions: Vec<String>,

        /// Preferred cuisine (repeatable)
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,

        /// Print the result as JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// List the selectable countries and cities
    Locations {
        /// Only list the cities of this country
        #[arg(long)]
        country: Option<String>,
    },
    /// List the food group, dietary and cuisine filters
    Filters,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = grocywise_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let directory = grocywise_core::LocationDirectory::from_app_config(&config)?;

    match cli.command {
        Commands::Search {
            country,
            city,
            shopping_list,
            food_groups,
            dietary_restrictions,
            cuisines,
            json,
        } => {
            let args = search::SearchArgs {
                country,
                city,
                shopping_list,
                food_groups,
                dietary_restrictions,
                cuisines,
                json,
            };
            search::run_search(&config, &directory, args).await?;
        }
        Commands::Locations { country } => {
            catalog::print_locations(&directory, country.as_deref())?;
        }
        Commands::Filters => catalog::print_filters(),
    }

    Ok(())
}
