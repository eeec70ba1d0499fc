//! Headless pipeline runner.
//!
//! The desktop shell drives the library directly; this binary wires the same
//! adapters and services together so the whole pipeline can be exercised
//! from a terminal:
//!
//! ```text
//! vidsage debug-info
//! OPENAI_API_KEY=sk-... vidsage clip1.mp4 clip2.mp4
//! ```
//!
//! Credentials come from `OPENAI_API_KEY`, or from `AZURE_OPENAI_KEY` +
//! `AZURE_OPENAI_ENDPOINT` + `AZURE_OPENAI_DEPLOYMENT`. The storyline prompt
//! and target duration (minutes) come from `VIDSAGE_PROMPT` and
//! `VIDSAGE_DURATION_MIN`; `VIDSAGE_OUT` saves the preview to a destination.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use vidsage::adapters::openai::HttpCredentialProbe;
use vidsage::adapters::worker::SageWorker;
use vidsage::{AppConfig, CredentialStore, Credentials, PipelineError, PipelineService, Workspace};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: vidsage <clip.mp4> [<clip.mp4>...]   or   vidsage debug-info");
        std::process::exit(1);
    }

    let config = AppConfig::from_env();
    let store = Arc::new(CredentialStore::new(HttpCredentialProbe::new()));
    let service = PipelineService::new(
        SageWorker::new(&config),
        store.clone(),
        Workspace::new(config.scratch_root.clone()),
        config.invoke_timeout_secs.map(Duration::from_secs),
    );

    if args[0] == "debug-info" {
        match service.debug_info().await {
            Ok(info) => println!("{}", info),
            Err(e) => {
                eprintln!("Failed to fetch debug info: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let credentials = match credentials_from_env() {
        Some(c) => c,
        None => {
            eprintln!(
                "No credentials: set OPENAI_API_KEY, or AZURE_OPENAI_KEY + \
                 AZURE_OPENAI_ENDPOINT + AZURE_OPENAI_DEPLOYMENT"
            );
            std::process::exit(1);
        }
    };
    if let Err(e) = store.apply(credentials).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let paths: Vec<PathBuf> = args.iter().map(PathBuf::from).collect();
    let files = service.set_uploaded_files(paths).await;
    if files.is_empty() {
        eprintln!("No video files among the given paths");
        std::process::exit(1);
    }
    println!("Uploaded {} clip(s)", files.len());

    let prompt = env::var("VIDSAGE_PROMPT").unwrap_or_default();
    let duration: u32 = env::var("VIDSAGE_DURATION_MIN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);

    let result = run_pipeline(&service, &prompt, duration).await;

    // Cleanup happens whether the run succeeded or not
    service.shutdown().await;

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run_pipeline<W, P>(
    service: &PipelineService<W, P>,
    prompt: &str,
    duration: u32,
) -> Result<(), PipelineError>
where
    W: vidsage::ports::worker::WorkerPort,
    P: vidsage::ports::probe::CredentialProbe,
{
    let summaries = service.generate_summaries().await?;
    for summary in &summaries {
        println!("{}: {}", summary.file.name, summary.summary);
    }

    let storyline = service.generate_storyline(prompt, duration).await?;
    println!("Storyline with {} segment(s):", storyline.len());
    for segment in &storyline {
        let src = segment
            .src_file
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or("?");
        println!(
            "  {}s-{}s {} ({})",
            segment.start_time_sec, segment.end_time_sec, segment.description, src
        );
    }

    let preview = service.generate_video().await?;
    println!("Preview rendered to {}", preview.display());

    if let Ok(dest) = env::var("VIDSAGE_OUT") {
        let saved = service.save_rendered(&PathBuf::from(dest)).await?;
        println!("Saved to {}", saved.display());
    }
    Ok(())
}

fn credentials_from_env() -> Option<Credentials> {
    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        return Some(Credentials::OpenAi { api_key });
    }
    match (
        env::var("AZURE_OPENAI_KEY"),
        env::var("AZURE_OPENAI_ENDPOINT"),
        env::var("AZURE_OPENAI_DEPLOYMENT"),
    ) {
        (Ok(key), Ok(endpoint), Ok(deployment_name)) => Some(Credentials::Azure {
            key,
            endpoint,
            deployment_name,
        }),
        _ => None,
    }
}
