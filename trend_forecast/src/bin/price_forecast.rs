//! Command-line front end for the price trend model.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trend_forecast::error::Result;
use trend_forecast::{ForecastModel, ModelConfig, ReferenceLoader};

#[derive(Parser)]
#[command(name = "price_forecast")]
#[command(about = "Inflation-aware price trend and volatility forecast", long_about = None)]
struct Cli {
    #[command(flatten)]
    model: ModelArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ModelArgs {
    /// Input file with price and deflator columns (CSV or JSON)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Calendar year of the first data point
    #[arg(long, global = true)]
    base_year: Option<i32>,

    /// Calendar month (1-12) of the first data point
    #[arg(long, global = true)]
    base_month: Option<u32>,

    /// Skip input validation and let invalid data propagate as NaN
    #[arg(long, global = true)]
    permissive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fair value and standard deviation for a month
    Estimate {
        /// Month as MM/YYYY
        #[arg(short, long)]
        date: String,
    },

    /// Fitted coefficients and data range
    Summary,

    /// Write the generated model as JSON
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl ModelArgs {
    fn load_config(&self) -> Result<ModelConfig> {
        let mut config = match &self.config {
            Some(path) => ModelConfig::from_json_file(path)?,
            None => ModelConfig::default(),
        };

        if let Some(year) = self.base_year {
            config.base_year = year;
        }
        if let Some(month) = self.base_month {
            config.base_month = month;
        }
        if self.permissive {
            config.validate_input = false;
        }

        config.validate()?;
        Ok(config)
    }

    fn build_model(&self, config: &ModelConfig) -> Result<ForecastModel> {
        let path = self.input.as_ref().ok_or_else(|| {
            trend_forecast::ForecastError::ConfigError("--input is required".to_string())
        })?;
        let reference = ReferenceLoader::from_path(path)?;
        ForecastModel::with_config(&reference, config)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.model.load_config()?;
    let calendar = config.calendar()?;
    let model = cli.model.build_model(&config)?;

    match cli.command {
        Commands::Estimate { date } => {
            let estimate = model.estimate_on(&calendar, &date)?;
            println!("{}", date);
            print!("{}", estimate);
        }
        Commands::Summary => {
            let last = model.data_len().saturating_sub(1);
            println!("Data points: {}", model.data_len());
            println!(
                "Range:       {} - {}",
                calendar.label_of(0)?,
                calendar.label_of(last)?
            );
            let price = model.price_coefficients();
            let band = model.band_coefficients();
            println!("Price line:  ln(p) = {:.6} * i + {:.6}", price.slope, price.intercept);
            println!("Band line:   ln(p + sd) = {:.6} * i + {:.6}", band.slope, band.intercept);
            if let Some(fit) = model.trend_fit() {
                println!("Trend R^2:   {:.4}", fit);
            }
        }
        Commands::Export { output } => {
            fs::write(&output, model.to_json()?)?;
            info!(path = %output.display(), "exported model");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trend_forecast=info,price_forecast=info".into()),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "price_forecast failed");
            ExitCode::FAILURE
        }
    }
}
