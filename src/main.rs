mod fetch;
mod parser;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use fetch::SearchParams;
use parser::Record;

#[derive(Parser)]
#[command(name = "kc_scraper", about = "King County restaurant inspection scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a live search results page and print restaurant records
    Scrape {
        /// Business name filter
        #[arg(long, default_value = "")]
        name: String,
        /// Street address filter
        #[arg(long, default_value = "")]
        address: String,
        /// City filter
        #[arg(long, default_value = "")]
        city: String,
        /// Zip code filter
        #[arg(long, default_value = "")]
        zip: String,
        /// Earliest inspection date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Latest inspection date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Max records to print (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract records from a saved results page
    File {
        /// Path to a saved Results.aspx response
        path: PathBuf,
        /// Max records to print (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            name,
            address,
            city,
            zip,
            start,
            end,
            limit,
            json,
        } => {
            let params = SearchParams {
                business_name: name,
                business_address: address,
                city,
                zip_code: zip,
                inspection_start: start,
                inspection_end: end,
            };
            let (content, encoding) = fetch::fetch_inspection_page(&params).await?;
            let records = parser::process(&content, &encoding)?;
            print_records(&records, limit, json)?;
        }
        Commands::File { path, limit, json } => {
            let (content, encoding) = fetch::load_saved_page(&path)?;
            let records = parser::process(&content, &encoding)?;
            print_records(&records, limit, json)?;
        }
    }

    info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}

fn print_records(records: &[Record], limit: Option<usize>, json: bool) -> Result<()> {
    let shown = &records[..limit.unwrap_or(records.len()).min(records.len())];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    for record in shown {
        for field in record.metadata.fields() {
            println!("{}: {}", field.label, field.values.join(" "));
        }
        let scores = &record.scores;
        println!("Average Score: {:.1}", scores.average_score);
        println!("High Score: {}", scores.high_score);
        println!("Total Inspections: {}", scores.total_inspections);
        println!();
    }

    if shown.len() < records.len() {
        println!("{} restaurants ({} shown)", records.len(), shown.len());
    } else {
        println!("{} restaurants", records.len());
    }
    Ok(())
}
