mod cache;
mod cli;
mod config;
mod db;
mod download;
mod error;
mod parquet;
mod prompt;
mod reading;
mod scrape;
mod summary;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{
    command::{self, plot::PlotRequest},
    Cli, Commands,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let cli = Cli::parse();
    let settings = &cli.settings;

    match &cli.command {
        Commands::Scrape { refresh } => match command::scrape(settings, *refresh).await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Save { refresh } => match command::save(settings, *refresh).await {
            Ok(inserted) => println!(
                "Added {} new rows to `{}`",
                inserted,
                settings.db_path().display()
            ),
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Purge {} => match command::purge(settings) {
            Ok(deleted) => println!("Data has been purged ({} rows)", deleted),
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Plot {
            from,
            to,
            year,
            month,
        } => {
            let request = match (year, month) {
                (Some(year), Some(month)) => PlotRequest::Line {
                    year: *year,
                    month: *month,
                },
                _ => PlotRequest::Box {
                    from: *from,
                    to: *to,
                },
            };
            match command::plot(settings, request) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Error: {:#}", e),
            }
        }
        Commands::Prompt { date, entries } => match command::prompt(settings, *date, *entries) {
            Ok(prompt) => println!("{}", prompt),
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Export { out } => match command::export(settings, out.clone()) {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {:#}", e),
        },
    }

    Ok(())
}

fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}
