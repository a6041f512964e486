use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use opportunity_mapper::api::Session;
use opportunity_mapper::config::WeightVector;
use opportunity_mapper::dataset::Dataset;
use opportunity_mapper::metrics::{Column, Polarity, UnitSize};
use opportunity_mapper::normalize::NormalizationReport;

fn fmt_opt(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(x) => format!("{:.*}", decimals, x),
        None => "n/a".to_string(),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn weights(w: &WeightVector) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Priority").add_attribute(Attribute::Bold),
        Cell::new("Weight"),
        Cell::new("Share"),
    ]);
    align_right(&mut table, 1..=2);

    for (metric, share) in w.shares() {
        table.add_row(vec![
            Cell::new(metric.label()),
            Cell::new(format!("{:.1}", w.get(metric))),
            Cell::new(format!("{:.0}%", share * 100.0)),
        ]);
    }
    println!("\n{}", table);
}

pub fn ranking(session: &Session, top: usize) {
    let unit = session.config().unit;
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("#"),
        Cell::new("ZIP").add_attribute(Attribute::Bold),
        Cell::new("Place"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new(format!("Rent ({})", unit)),
        Cell::new("Crime").fg(Color::Red),
        Cell::new("Trend"),
        Cell::new("Transit"),
        Cell::new("Income").fg(Color::Green),
    ]);
    align_right(&mut table, 3..=8);

    for (i, scored) in session.top(top).iter().enumerate() {
        let r = session.record(scored);
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&r.zip_code).add_attribute(Attribute::Bold),
            Cell::new(r.place_name.as_deref().unwrap_or("")),
            Cell::new(format!("{:.1}", scored.percent())).fg(Color::Cyan),
            Cell::new(fmt_opt(r.raw(Column::Rent(unit)), 0)),
            Cell::new(fmt_opt(r.raw(Column::CrimeRate), 1)).fg(Color::Red),
            Cell::new(fmt_opt(r.raw(Column::CrimeTrend), 1)),
            Cell::new(fmt_opt(r.raw(Column::TransitDistance), 2)),
            Cell::new(fmt_opt(r.raw(Column::MedianIncome), 0)).fg(Color::Green),
        ]);
    }
    println!("\n{}", table);
}

pub fn columns(report: &NormalizationReport) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Direction"),
        Cell::new("Min"),
        Cell::new("Max"),
        Cell::new("Present"),
        Cell::new("Missing").fg(Color::Red),
        Cell::new("Status"),
    ]);
    align_right(&mut table, 2..=5);

    for s in &report.columns {
        let direction = match s.column.polarity() {
            Polarity::HigherIsBetter => "higher",
            Polarity::LowerIsBetter => "lower",
        };
        let status = if s.degenerate {
            Cell::new("constant").fg(Color::Yellow)
        } else if s.present == 0 {
            Cell::new("empty").fg(Color::Red)
        } else {
            Cell::new("ok").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(s.column.raw_header()).add_attribute(Attribute::Bold),
            Cell::new(direction),
            Cell::new(fmt_opt(s.min, 2)),
            Cell::new(fmt_opt(s.max, 2)),
            Cell::new(s.present),
            Cell::new(s.missing).fg(Color::Red),
            status,
        ]);
    }
    println!("\n{}", table);
}

pub fn records(dataset: &Dataset) {
    let columns = vec![
        Column::Rent(UnitSize::default()),
        Column::CrimeRate,
        Column::CrimeTrend,
        Column::TransitDistance,
        Column::MedianIncome,
    ];

    let mut table = new_table();
    let mut header = vec![Cell::new("ZIP").add_attribute(Attribute::Bold)];
    header.extend(columns.iter().map(|c| Cell::new(c.norm_header())));
    table.add_row(header);
    align_right(&mut table, 1..=columns.len());

    for r in dataset.records() {
        let mut row = vec![Cell::new(&r.zip_code).add_attribute(Attribute::Bold)];
        row.extend(columns.iter().map(|&c| Cell::new(fmt_opt(r.normalized(c), 3))));
        table.add_row(row);
    }
    println!("\n{}", table);
}
