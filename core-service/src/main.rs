//! Stroke Auth - Command Line Entry Point
//!
//! Replays a capture session file: enrolls the samples under `enrollment`,
//! then authenticates each entry of `attempts` and prints the decisions.
//!
//! ```text
//! stroke-auth demos/session.json
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use stroke_auth_core::constants::{APP_NAME, APP_VERSION};
use stroke_auth_core::{DeviceCapabilities, EngineConfig, EnrollmentService, MemorySampleStore};

#[derive(Debug, Deserialize)]
struct Session {
    user_id: String,
    #[serde(default)]
    capabilities: Option<DeviceCapabilities>,
    enrollment: Vec<Value>,
    #[serde(default)]
    attempts: Vec<Value>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: stroke-auth <session.json>");
    };

    let config = EngineConfig::from_env();
    log::info!(
        "Config: K={}, accept>={}, fallback>={}",
        config.enrollment_samples, config.accept_threshold, config.fallback_accept_threshold
    );

    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    let session: Session = serde_json::from_str(&text).with_context(|| format!("Invalid session file {}", path))?;

    let service = EnrollmentService::new(MemorySampleStore::new(), config)?;
    let capabilities = session.capabilities.as_ref();

    for raw in &session.enrollment {
        let outcome = service.submit(&session.user_id, raw, capabilities)?;
        if let Some(baseline) = &outcome.baseline {
            println!("{}", serde_json::to_string_pretty(baseline)?);
        }
    }

    if let Some(report) = service.consistency(&session.user_id)? {
        log::info!(
            "Consistency: velocity {:.2}, strokes {:.2}, area {:.2} ({} samples)",
            report.velocity_consistency,
            report.stroke_count_consistency,
            report.area_consistency,
            report.sample_count
        );
    }

    for raw in &session.attempts {
        let result = service.authenticate(&session.user_id, raw, capabilities);
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
