use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastProvider, OpenWeatherProvider, pipeline, summary};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Multi-city temperature forecast summary")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Fetch forecasts and print the 4-day min/max summary table.
    Run {
        /// Cities in "name,region" form, e.g. "Lima,Peru".
        #[arg(required = true)]
        cities: Vec<String>,

        /// Where to write the CSV artifact.
        #[arg(long, default_value = "temp.csv")]
        out: PathBuf,

        /// How many cities to fetch concurrently.
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// API key override; defaults to the configured one.
        #[arg(long)]
        api_key: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Run { cities, out, concurrency, api_key } => {
                run_summary(cities, out, concurrency, api_key).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn run_summary(
    cities: Vec<String>,
    out: PathBuf,
    concurrency: usize,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = match api_key {
        Some(key) => key,
        None => config.api_key()?.to_string(),
    };

    let provider = match &config.base_url {
        Some(base) => OpenWeatherProvider::with_base_url(api_key, base.clone()),
        None => OpenWeatherProvider::new(api_key),
    };

    write_summary(&provider, &cities, &out, concurrency).await
}

/// Run the pipeline and persist the artifact. The file is written only
/// after the whole pipeline succeeded, so a failed run never leaves a
/// partial artifact behind.
async fn write_summary(
    provider: &dyn ForecastProvider,
    cities: &[String],
    out: &Path,
    concurrency: usize,
) -> anyhow::Result<()> {
    let table = pipeline::run(provider, cities, concurrency).await?;

    let rendered = to_csv(&table)?;
    print!("{rendered}");
    std::fs::write(out, &rendered)
        .with_context(|| format!("Failed to write summary to {}", out.display()))?;
    println!("Wrote {} rows to {}", table.len(), out.display());

    Ok(())
}

/// Header plus data rows; fields containing the separator (the rewritten
/// city names) come out quoted.
fn to_csv(table: &[Vec<String>]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(summary::HEADER).context("Failed to write CSV header")?;
    for row in table {
        writer.write_record(row).context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to flush CSV writer: {err}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
