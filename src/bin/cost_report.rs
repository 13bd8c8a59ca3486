//! cost-report - illustrative cloud vs on-premises cost comparison

use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use omics_dashboard::costs;

#[derive(Parser, Debug)]
#[command(
    name = "cost-report",
    version,
    about = "Compare illustrative cloud and on-premises costs for the omics demo"
)]
struct Args {
    /// Sample counts to compare
    #[arg(long, value_delimiter = ',', default_value = "10,100,1000,10000")]
    samples: Vec<u32>,

    /// Emit the rows as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let rows = costs::comparison_table(&args.samples);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Samples",
        "Cloud on-demand (USD)",
        "Cloud spot (USD)",
        "On-prem amortized (USD)",
    ]);

    for row in &rows {
        table.add_row(vec![
            Cell::new(row.samples),
            Cell::new(format!("{:.2}", row.cloud_on_demand)),
            Cell::new(format!("{:.2}", row.cloud_spot)),
            Cell::new(format!("{:.2}", row.on_prem)),
        ]);
    }

    println!("{table}");
    println!("Figures are illustrative demo constants, not billing data.");
    Ok(())
}
