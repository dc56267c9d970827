use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use ik_core::config::{OutputMode, ShellConfig};

pub mod cli;
pub mod shell;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config et appliquer les overrides CLI
    let config = resolve_config(&cli)?;

    // 4. Scores des glyphes, calculés une fois pour toute la session
    let table = Arc::new(ik_glyph::build_table(&config)?);

    // 5. Boucle du shell sur stdin/stdout
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut shell = shell::Shell::new(config, table, stdin, stdout)?;
    shell.run()
}

/// Resolve config: file (or defaults), then CLI overrides, then validation.
fn resolve_config(cli: &cli::Cli) -> Result<ShellConfig> {
    let mut config = if cli.config.exists() {
        ik_core::config::load_config(&cli.config)?
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        ShellConfig::default()
    };

    if let Some(ref image) = cli.image {
        config.image = Some(image.clone());
    }
    if let Some(res) = cli.resolution {
        config.resolution = res;
    }
    if let Some(ref charset) = cli.charset {
        config.charset.clone_from(charset);
    }
    if let Some(ref output) = cli.output {
        config.output = match output.parse::<OutputMode>() {
            Ok(mode) => mode,
            Err(e) => {
                log::warn!("{e}, utilisation du défaut.");
                config.output
            }
        };
    }
    if let Some(ref font) = cli.font {
        config.font_path = Some(font.clone());
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}
