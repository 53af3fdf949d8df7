use std::path::Path;

use clap::Parser;
use colored::Colorize;

use resumetrack::cli::{Cli, Commands, ConfigCommands};
use resumetrack::config::{StaticConfig, get_config, init_config_from};
use resumetrack::errors::ResumeTrackError;
use resumetrack::runtime::modes::run_server;
use resumetrack::system::init_logging;

const SAMPLE_CONFIG_PATH: &str = "config.example.toml";

fn generate_config(output_path: Option<String>, force: bool) -> Result<(), ResumeTrackError> {
    let path = output_path.unwrap_or_else(|| SAMPLE_CONFIG_PATH.to_string());
    if Path::new(&path).exists() && !force {
        return Err(ResumeTrackError::validation(format!(
            "{} already exists, use --force to overwrite",
            path
        )));
    }

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| ResumeTrackError::file_operation(e.to_string()))?;
    println!("{} {}", "Sample configuration written to".green(), path);
    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_config_from(&cli.config);

    match cli.command {
        Some(Commands::Config { action }) => {
            let result = match action {
                ConfigCommands::Generate { output_path, force } => {
                    generate_config(output_path, force)
                }
                ConfigCommands::Show => toml::to_string_pretty(&*get_config())
                    .map(|s| println!("{}", s))
                    .map_err(|e| ResumeTrackError::serialization(e.to_string())),
            };
            if let Err(e) = result {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Serve) | None => {
            let config = get_config();
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };
            run_server().await
        }
    }
}
