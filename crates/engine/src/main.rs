//! AI ATC console - Main entry point.
//!
//! Reads pilot input line by line from stdin:
//!
//! - `/tune [CODE]` tunes the radio; without a code, the nearest airport
//! - `/nearest` shows the nearest airport
//! - `/quit` exits
//! - anything else is transmitted on the tuned frequency

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aiatc_domain::AirportMetadata;
use aiatc_engine::infrastructure::{
    airport_metadata::load_airport_metadata,
    clock::SystemClock,
    config::{AppConfig, PersonaSource},
    console::ConsolePresentation,
    local_persona::LocalPersonaGenerator,
    ollama::OllamaClient,
    pilot::ConfiguredPilot,
    ports::{ClockPort, PersonaPort, PresentationPort, Severity},
    randomuser::RandomUserClient,
    telemetry_file::JsonFileFlightState,
};
use aiatc_engine::use_cases::radio::TransmitSettings;
use aiatc_engine::{Adapters, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root so the binary works from any directory.
    load_dotenv_from_repo_root();

    // Logs go to stderr; stdout is the radio.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aiatc_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting AI ATC");

    let config = AppConfig::from_env()?;

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let metadata = match &config.airport_metadata_path {
        Some(path) => {
            let metadata = load_airport_metadata(path)?;
            tracing::info!(path = %path.display(), airports = metadata.len(), "Loaded airport metadata");
            metadata
        }
        None => {
            tracing::info!("AIRPORT_METADATA_PATH not set, airports will be shown by code");
            AirportMetadata::default()
        }
    };

    let personas: Arc<dyn PersonaPort> = match config.persona.source {
        PersonaSource::RandomUser => Arc::new(RandomUserClient::new(
            &config.persona.base_url,
            &config.persona.nationalities,
        )),
        PersonaSource::Local => Arc::new(LocalPersonaGenerator::new()),
    };
    tracing::info!(source = ?config.persona.source, "Persona source configured");

    let llm = Arc::new(OllamaClient::with_timeout(
        &config.llm.base_url,
        &config.llm.model,
        config.llm.timeout_secs,
    ));
    tracing::info!(
        base_url = %config.llm.base_url,
        model = %config.llm.model,
        "Chat backend configured"
    );

    let flight = Arc::new(JsonFileFlightState::new(config.telemetry_path.clone()));
    tracing::info!(path = %flight.path().display(), "Reading telemetry");

    let presentation: Arc<dyn PresentationPort> = Arc::new(ConsolePresentation::new());

    let app = Arc::new(App::new(
        Adapters {
            flight,
            pilot: Arc::new(ConfiguredPilot::new(&config.pilot, clock.now().date_naive())),
            presentation: presentation.clone(),
            llm,
            personas,
            clock,
        },
        metadata,
        TransmitSettings {
            temperature: config.llm.temperature,
        },
    ));

    // Spawn proximity tracker
    let tracker = tokio::spawn(
        app.proximity_tracker()
            .run(config.proximity_interval),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("/quit", _) => break,
            ("/nearest", _) => match app.use_cases.radio.tune.suggested_frequency() {
                Some(nearest) => presentation.notify(
                    Severity::Info,
                    &format!(
                        "Nearest airport is {}, {:.1} nautical miles away",
                        app.metadata().display_name(&nearest.code),
                        nearest.distance_nm
                    ),
                ),
                None => presentation.notify(Severity::Error, "No airports in range of the simulator"),
            },
            ("/tune", code) => {
                let code = if code.is_empty() {
                    app.use_cases
                        .radio
                        .tune
                        .suggested_frequency()
                        .map(|n| n.code.to_string())
                        .unwrap_or_default()
                } else {
                    code.to_string()
                };
                if let Err(e) = app.use_cases.radio.tune.execute(&code).await {
                    tracing::debug!(error = %e, "Tune failed");
                }
            }
            _ => {
                if let Err(e) = app.use_cases.radio.transmit.execute(line).await {
                    tracing::debug!(error = %e, "Transmit failed");
                }
            }
        }
    }

    tracker.abort();
    tracing::info!("Radio off");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
