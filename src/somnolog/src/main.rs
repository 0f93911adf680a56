#[macro_use]
extern crate log;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use somnolog::{
    AnalysisResponse, BaselineChoice, ErrorResponse, ReadingWindow, demo, load_config, sensors,
};
use somnolog_algos::{
    AnalysisError, BaselineStrategy, EpisodeAnalyzer, WellnessReport,
    helpers::time_math::round_float,
};
use somnolog_types::Reading;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
pub struct SomnologCli {
    /// JSON file overriding detector thresholds and score weights
    #[arg(env = "SOMNOLOG_CONFIG", long, global = true)]
    pub config: Option<PathBuf>,
    /// Nominal minutes between readings
    #[arg(env = "SOMNOLOG_INTERVAL_MINUTES", long, global = true, default_value_t = 1.0)]
    pub interval_minutes: f64,
    /// Baseline heart rate: `mean`, `awake-window` or a fixed bpm value
    #[arg(env = "SOMNOLOG_BASELINE", long, global = true, default_value = "mean")]
    pub baseline: BaselineChoice,
    /// Print JSON instead of a text summary
    #[arg(long, global = true)]
    pub json: bool,
    #[clap(subcommand)]
    pub subcommand: SomnologCommand,
}

#[derive(Subcommand)]
pub enum SomnologCommand {
    ///
    /// Analyze the built-in demo day (30 minute readings)
    ///
    Demo,
    ///
    /// Analyze a sensor file: JSON array, single object or JSON lines
    ///
    Analyze { file: PathBuf },
    ///
    /// Read JSON lines from stdin and analyze a rolling window of them
    ///
    Watch {
        /// Number of most recent readings kept
        #[arg(long, default_value_t = 480)]
        window: usize,
        /// Re-analyze after this many new readings
        #[arg(long, default_value_t = 1)]
        every: usize,
    },
    ///
    /// Print shell completions
    ///
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(error) = env_file {
        debug!("No .env loaded: {}", error);
    }

    let cli = SomnologCli::parse();
    let config = load_config(cli.config.as_deref())?;
    let analyzer = EpisodeAnalyzer::new(config)?.with_baseline(cli.baseline.strategy(config.max_lux));

    match cli.subcommand {
        SomnologCommand::Demo => {
            let readings = demo::readings();
            report(&analyzer, &readings, demo::INTERVAL_MINUTES, cli.json)
        }
        SomnologCommand::Analyze { file } => {
            let readings = sensors::load_readings(&file)?;
            report(&analyzer, &readings, cli.interval_minutes, cli.json)
        }
        SomnologCommand::Watch { window, every } => {
            watch(&analyzer, window, every.max(1), cli.interval_minutes, cli.json).await
        }
        SomnologCommand::Completions { shell } => {
            let mut command = SomnologCli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn report<B: BaselineStrategy>(
    analyzer: &EpisodeAnalyzer<B>,
    readings: &[Reading],
    interval_minutes: f64,
    json: bool,
) -> anyhow::Result<()> {
    let report = match analyzer.assess(readings, interval_minutes) {
        Ok(report) => report,
        Err(error) => return fail(error, json),
    };

    if json {
        let response = AnalysisResponse::from(report);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let WellnessReport {
        sleep,
        sedentary,
        stress,
        burnout,
    } = report;

    println!("{}", sleep);
    for warning in &sleep.warnings {
        println!("Warning: {}", warning);
    }
    println!(
        "Sedentary: {} min in {} period(s), longest {} min, now {}",
        sedentary.total_minutes,
        sedentary.periods.len(),
        sedentary.longest_minutes,
        sedentary.status
    );
    if sedentary.needs_break() {
        println!("Take a 5-minute break every hour");
    }
    if let Some(stress) = stress {
        println!(
            "Stress: {} (HRV score {}, avg {} bpm)",
            stress.level,
            round_float(stress.hrv_score),
            round_float(stress.avg_bpm)
        );
        for line in stress.level.recommendations() {
            println!("\t{}", line);
        }
    }
    println!("{}", burnout);
    for line in &burnout.recommendations {
        println!("\t{}", line);
    }
    Ok(())
}

fn fail(error: AnalysisError, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ErrorResponse::from(&error))?
        );
    }
    Err(anyhow!(error))
}

async fn watch<B: BaselineStrategy>(
    analyzer: &EpisodeAnalyzer<B>,
    capacity: usize,
    every: usize,
    interval_minutes: f64,
    json: bool,
) -> anyhow::Result<()> {
    let mut window = ReadingWindow::new(capacity);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reading = match sensors::parse_line(&line) {
            Ok(reading) => reading,
            Err(error) => {
                warn!("Skipping reading: {}", error);
                continue;
            }
        };

        if let Some(evicted) = window.push(reading) {
            trace!("Reading at {} left the window", evicted.time);
        }

        pending += 1;
        if pending < every {
            continue;
        }
        pending = 0;

        match window.analyze(analyzer, interval_minutes) {
            Ok(analysis) if json => {
                let response = AnalysisResponse::new(analysis);
                println!("{}", serde_json::to_string(&response)?);
            }
            Ok(analysis) => println!("{}\n", analysis),
            Err(error) => warn!("Analysis of {} readings failed: {}", window.len(), error),
        }
    }

    if window.is_empty() {
        return fail(AnalysisError::EmptyInput, json);
    }

    info!("Input closed with {} readings in the window", window.len());
    Ok(())
}
