use std::path::PathBuf;

use clap::Parser;

/// inkscii — convertit une image en grille de caractères.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image chargée au démarrage (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Nombre de colonnes initial (puissance de deux).
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Caractères actifs au démarrage, ex. "0123456789".
    #[arg(long)]
    pub charset: Option<String>,

    /// Sortie initiale : console ou html.
    #[arg(long)]
    pub output: Option<String>,

    /// Police TTF/OTF utilisée pour mesurer les glyphes.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["inkscii"]);
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert_eq!(cli.log_level, "warn");
        assert!(cli.image.is_none());
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from([
            "inkscii",
            "--image",
            "cat.jpeg",
            "--resolution",
            "64",
            "--charset",
            " .:#",
            "--output",
            "html",
        ]);
        assert_eq!(cli.image, Some(PathBuf::from("cat.jpeg")));
        assert_eq!(cli.resolution, Some(64));
        assert_eq!(cli.charset.as_deref(), Some(" .:#"));
        assert_eq!(cli.output.as_deref(), Some("html"));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
