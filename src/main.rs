use clap::Parser;
use melodic_viewer::utils::{logger, validation::Validate};
use melodic_viewer::{CliConfig, OutputFormat, RenderedFrame, ViewerEngine, ViewerError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting melodic-viewer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!("❌ Rewrite failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<(), ViewerError> {
    config.validate()?;
    let options = config.resolve()?;

    let engine = ViewerEngine::new(options.rewriter());
    let frame = engine.render(&config.file, &config.dir_name)?;
    let rendered = format_frame(&frame, config.format)?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn format_frame(frame: &RenderedFrame, format: OutputFormat) -> Result<String, ViewerError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(frame)? + "\n"),
        OutputFormat::Text if frame.lines.is_empty() => Ok(String::new()),
        OutputFormat::Text => Ok(frame.lines.join("\n") + "\n"),
    }
}
