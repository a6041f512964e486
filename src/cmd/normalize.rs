use clap::Args;
use opportunity_mapper::dataset::writer::write_dataset_to_path;
use opportunity_mapper::dataset::Dataset;
use opportunity_mapper::error::MapperResult;

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Destination CSV.
    #[arg(short, long)]
    pub output: String,
}

pub fn run(args: &NormalizeArgs, dataset: &Dataset) -> MapperResult<()> {
    write_dataset_to_path(dataset, &args.output)
}
