use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use opportunity_mapper::config::WeightVector;
use opportunity_mapper::pipeline::load_dataset;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/bay_area_zips.csv")]
    data: String,

    /// JSON object of metric name -> weight, used as the base for `rank`.
    #[arg(global = true, short, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank ZIP codes by Opportunity Score.
    Rank(cmd::rank::RankArgs),
    /// Show schema and per-column normalization statistics.
    Inspect(cmd::inspect::InspectArgs),
    /// Write the dataset with all normalized columns filled in.
    Normalize(cmd::normalize::NormalizeArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing Opportunity Mapper...");

    let dataset = load_dataset(&cli.data).unwrap_or_else(|e| {
        error!("❌ FATAL ERROR LOADING DATASET:");
        error!("   {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Rank(args) => {
            let mut config = args.config.clone();
            if let Some(path) = &cli.weights {
                info!("⚖️  Loading Weights from: {}", path);
                let mut file_weights = WeightVector::load_from_file(path).unwrap_or_else(|e| {
                    error!("{}", e);
                    process::exit(1);
                });
                // Arguments like --rent live inside the subcommand's matches, not the root.
                if let Some(sub_matches) = matches.subcommand_matches("rank") {
                    file_weights.merge_from_cli(&args.config.weights, sub_matches);
                }
                config.weights = file_weights;
            }
            cmd::rank::run(&args, config, dataset)
        }
        Commands::Inspect(args) => {
            if cli.weights.is_some() {
                warn!("⚠️  --weights has no effect on 'inspect'.");
            }
            cmd::inspect::run(&args, &dataset);
            Ok(())
        }
        Commands::Normalize(args) => cmd::normalize::run(&args, &dataset),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
