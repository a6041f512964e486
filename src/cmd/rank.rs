use crate::reports;
use clap::Args;
use opportunity_mapper::api::Session;
use opportunity_mapper::config::ScoringConfig;
use opportunity_mapper::dataset::Dataset;
use opportunity_mapper::error::MapperResult;

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub config: ScoringConfig,

    /// Number of ZIP codes to show.
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Print the full ranking as JSON for a map layer.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &RankArgs, config: ScoringConfig, dataset: Dataset) -> MapperResult<()> {
    let session = Session::new(dataset, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.map_entries())?);
        return Ok(());
    }

    let config = session.config();
    reports::print_weights_report(&config.weights);

    if session.ranking().is_empty() {
        match config.max_rent {
            Some(budget) => println!(
                "\n⚠️  No ZIP codes found with a {} under ${:.0}.",
                config.unit, budget
            ),
            None => println!("\n⚠️  No ZIP codes could be scored."),
        }
        return Ok(());
    }

    println!("\n✅ Found {} matching ZIP codes.", session.ranking().len());
    reports::print_ranking_report(&session, args.top);
    Ok(())
}
