//! Run the click-analytics pipeline over exported response documents.
//!
//! Usage: analyze_responses <responses.json> <question.json> [settings.json]
//!
//! `responses.json` holds the response-store export (an array of records);
//! `question.json` holds the question configuration with its image files
//! and hit-zones. Prints the render-ready bundle, per-image heat maps, and
//! the dashboard metrics as JSON.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;

use clickmap::heatmap::{create_heatmap_from_clicks, HeatmapArea};
use clickmap::metrics::{compute_navigation_metrics, NavigationMetrics};
use clickmap::models::{load_records, QuestionConfig};
use clickmap::settings::AnalysisSettings;
use clickmap::tracking::{aggregate_responses, NavigationFlowBundle};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageHeatmap {
    image_index: usize,
    areas: Vec<HeatmapArea>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisOutput {
    question: String,
    bundle: NavigationFlowBundle,
    heatmaps: Vec<ImageHeatmap>,
    metrics: NavigationMetrics,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("usage: analyze_responses <responses.json> <question.json> [settings.json]");
        return ExitCode::from(2);
    }

    match run(&args[1], &args[2], args.get(3).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("analyze_responses: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(responses_path: &str, question_path: &str, settings_path: Option<&str>) -> Result<()> {
    let responses_json = std::fs::read_to_string(responses_path)
        .with_context(|| format!("Failed to read responses from {responses_path}"))?;
    let records = load_records(&responses_json)
        .with_context(|| format!("Failed to decode responses from {responses_path}"))?;

    let question_json = std::fs::read_to_string(question_path)
        .with_context(|| format!("Failed to read question config from {question_path}"))?;
    let question: QuestionConfig = serde_json::from_str(&question_json)
        .with_context(|| format!("Failed to decode question config from {question_path}"))?;

    let settings = match settings_path {
        Some(path) => AnalysisSettings::load(Path::new(path))?,
        None => AnalysisSettings::default(),
    };
    let heatmap_config = settings.heatmap_config();

    log::info!(
        "analyzing {} responses across {} images",
        records.len(),
        question.files.len()
    );

    let bundle = aggregate_responses(&records, &question.files);
    let metrics =
        compute_navigation_metrics(&bundle.all_clicks_tracking, &bundle.files, bundle.total_participants);

    let heatmaps = (0..question.files.len())
        .map(|image_index| {
            let clicks = bundle.clicks_for_image(image_index, None);
            ImageHeatmap {
                image_index,
                areas: create_heatmap_from_clicks(&clicks, &heatmap_config),
            }
        })
        .collect();

    let output = AnalysisOutput {
        question: question.title.clone(),
        bundle,
        heatmaps,
        metrics,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
