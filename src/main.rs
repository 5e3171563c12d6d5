use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod errors;
mod fetch;
mod prompt;
mod provider;
mod trip;
mod ux;
mod wire;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Args::parse();

    let mut cfg = config::Config::load_from_path(args.config.as_ref().map(PathBuf::from))?;
    cfg.apply_args(&args);

    init_tracing(if args.debug { "debug" } else { &cfg.log_level });

    let start_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let trip = trip::TripRequest::new(
        args.destination.clone(),
        start_date,
        args.days,
        args.preferences_for(cfg.language),
    )?;
    let prompt_text = prompt::build_prompt(&trip, cfg.language);
    let system = prompt::system_prompt(cfg.language);
    let models = cfg.candidate_models();

    if args.dry_run {
        println!("{}", prompt_text);
        return Ok(ExitCode::SUCCESS);
    }

    // No key, no requests.
    let api_key = match cfg.api_key() {
        Ok(k) => k,
        Err(e) => {
            ux::print_failure(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let provider = provider::make_provider(cfg.provider, api_key, cfg.api_base.clone(), cfg.timeout_secs)?;
    let fetcher = fetch::CompletionFetcher::new(provider, models, Some(cfg.temperature))?;

    ux::show_request(&trip, fetcher.models());
    tracing::info!(provider = ?cfg.provider, destination = trip.destination(), "planning trip");

    let pb = ux::spinner(!args.no_progress, "Planning your trip...");
    let outcome = fetcher.fetch(&prompt_text, &system).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match outcome {
        Ok(res) => {
            ux::print_itinerary(&res);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            ux::print_failure(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
