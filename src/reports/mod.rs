mod tables;

pub use self::tables::{
    columns as print_column_report, ranking as print_ranking_report,
    records as print_records_report, weights as print_weights_report,
};
