use clap::Parser;
use pagepress::utils::{logger, validation::Validate};
use pagepress::{
    ChromeRenderer, CliConfig, ExportEngine, ExportJob, ExportReport, FileConfig, LocalStorage,
    SpawnedServer,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pagepress");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.config.clone() {
        match FileConfig::from_file(&path) {
            Ok(file) => {
                tracing::debug!("Applying config file: {}", path);
                file.apply(&mut config);
            }
            Err(e) => {
                tracing::error!("❌ Failed to load config file {}: {}", path, e);
                eprintln!("❌ {}", e);
                std::process::exit(e.exit_code());
            }
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    let job = config.export_job();

    match export(&config, job).await {
        Ok(report) => {
            tracing::info!("✅ PDF written → {} ({} bytes)", report.out_path, report.bytes_written);
            println!("✅ PDF written → {}", report.out_path);
        }
        Err(e) if config.strict => {
            tracing::error!("❌ PDF generation failed: {} (kind: {:?})", e, e.kind());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
        Err(e) => {
            // Best-effort mode: a missing PDF is an optional asset, the
            // calling build keeps going.
            tracing::warn!("⚠️ PDF generation skipped: {}", e);
            println!("⚠️ PDF generation skipped: {}", e);
        }
    }

    Ok(())
}

async fn export(config: &CliConfig, job: ExportJob) -> pagepress::Result<ExportReport> {
    let server = SpawnedServer::new(
        &config.server_command,
        &config.publish_dir,
        config.port,
        Duration::from_secs(config.ready_timeout_secs),
    )?;
    let renderer = ChromeRenderer::new(config.chrome_path.clone());
    let storage = LocalStorage::new(".".to_string());

    ExportEngine::new(server, renderer, storage).run(job).await
}
