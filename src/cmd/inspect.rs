use crate::reports;
use clap::Args;
use opportunity_mapper::dataset::Dataset;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Also list every record's normalized values.
    #[arg(long, default_value_t = false)]
    pub records: bool,
}

pub fn run(args: &InspectArgs, dataset: &Dataset) {
    let report = dataset.report();

    println!("\n🔎 === DATASET AUDIT: {} ZIP codes === 🔎", dataset.len());
    if report.precomputed {
        println!("Normalized columns: loaded from file");
    } else {
        println!("Normalized columns: computed (min-max)");
    }

    reports::print_column_report(report);

    if !report.degenerate.is_empty() {
        let names: Vec<String> = report.degenerate.iter().map(|c| c.to_string()).collect();
        println!(
            "\n⚠️  Constant columns scored as neutral: {}",
            names.join(", ")
        );
    }

    if args.records {
        reports::print_records_report(dataset);
    }
}
