use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{CHARSET_DIGITS, parse_charset};
use crate::error::CoreError;

/// Résolution de rendu des glyphes par défaut (pixels par côté).
pub const DEFAULT_GLYPH_RESOLUTION: u32 = 16;

/// Nombre de colonnes par défaut.
pub const DEFAULT_RESOLUTION: u32 = 128;

/// Configuration de session du shell.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ik_core::config::ShellConfig;
/// let config = ShellConfig::default();
/// assert_eq!(config.resolution, 128);
/// assert_eq!(config.charset, "0123456789");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ShellConfig {
    // === Session ===
    /// Image chargée au démarrage.
    pub image: Option<PathBuf>,
    /// Nombre de colonnes de la grille (puissance de deux).
    pub resolution: u32,
    /// Caractères actifs au démarrage.
    pub charset: String,

    // === Sortie ===
    /// Destination du rendu.
    pub output: OutputMode,
    /// Fichier écrit en mode HTML.
    pub html_file: PathBuf,
    /// Police déclarée dans le document HTML.
    pub html_font: String,

    // === Glyphes ===
    /// Côté du carré de rendu d'un glyphe, en pixels [4, 256].
    pub glyph_resolution: u32,
    /// Police TTF/OTF de remplacement. `None` = police embarquée.
    pub font_path: Option<PathBuf>,
}

/// Output destination for generated grids.
///
/// # Example
/// ```
/// use ik_core::config::OutputMode;
/// assert_eq!("html".parse::<OutputMode>().unwrap(), OutputMode::Html);
/// assert!("pdf".parse::<OutputMode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Lines printed to the console.
    #[default]
    Console,
    /// Styled document written to `html_file`.
    Html,
}

impl FromStr for OutputMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "html" => Ok(Self::Html),
            other => Err(CoreError::Config(format!("sortie inconnue '{other}'"))),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            image: None,
            resolution: DEFAULT_RESOLUTION,
            charset: CHARSET_DIGITS.to_string(),
            output: OutputMode::Console,
            html_file: PathBuf::from("out.html"),
            html_font: "DejaVu Sans Mono".to_string(),
            glyph_resolution: DEFAULT_GLYPH_RESOLUTION,
            font_path: None,
        }
    }
}

impl ShellConfig {
    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.glyph_resolution = self.glyph_resolution.clamp(4, 256);
        self.resolution = self.resolution.max(1);
    }

    /// Check the invariants that clamping cannot repair.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] when the resolution is not a power of two
    /// or the charset holds characters outside the repertoire.
    ///
    /// # Example
    /// ```
    /// use ik_core::config::ShellConfig;
    /// let mut config = ShellConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.resolution = 100;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.resolution.is_power_of_two() {
            return Err(CoreError::Config(format!(
                "resolution {} n'est pas une puissance de deux",
                self.resolution
            )));
        }
        parse_charset(&self.charset)
            .map_err(|ch| CoreError::Config(format!("caractère {ch:?} hors répertoire")))?;
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    shell: Option<ShellSection>,
    glyph: Option<GlyphSection>,
}

/// Shell section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ShellSection {
    image: Option<PathBuf>,
    resolution: Option<u32>,
    charset: Option<String>,
    output: Option<OutputMode>,
    html_file: Option<PathBuf>,
    html_font: Option<String>,
}

/// Glyph section of the TOML config.
#[derive(Deserialize)]
struct GlyphSection {
    resolution: Option<u32>,
    font_path: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or holds invalid values.
///
/// # Example
/// ```no_run
/// use ik_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ShellConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Configuration rejetée : {}", path.display()))?;
    log::info!("Configuration chargée depuis {}", path.display());
    Ok(config)
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error on malformed TOML or invalid values.
///
/// # Example
/// ```
/// use ik_core::config::{parse_config, OutputMode};
/// let config = parse_config("[shell]\noutput = \"html\"\n").unwrap();
/// assert_eq!(config.output, OutputMode::Html);
/// assert_eq!(config.resolution, 128);
/// ```
pub fn parse_config(content: &str) -> Result<ShellConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ShellConfig::default();

    if let Some(s) = file.shell {
        if let Some(v) = s.image {
            config.image = Some(v);
        }
        if let Some(v) = s.resolution {
            config.resolution = v;
        }
        if let Some(v) = s.charset {
            config.charset = v;
        }
        if let Some(v) = s.output {
            config.output = v;
        }
        if let Some(v) = s.html_file {
            config.html_file = v;
        }
        if let Some(v) = s.html_font {
            config.html_font = v;
        }
    }

    if let Some(g) = file.glyph {
        if let Some(v) = g.resolution {
            config.glyph_resolution = v;
        }
        if let Some(v) = g.font_path {
            config.font_path = Some(v);
        }
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(
            "[shell]\nresolution = 64\ncharset = \"@#. \"\n[glyph]\nresolution = 1000\n",
        )
        .unwrap();
        assert_eq!(config.resolution, 64);
        assert_eq!(config.charset, "@#. ");
        assert_eq!(config.glyph_resolution, 256);
        assert_eq!(config.html_font, "DejaVu Sans Mono");
    }

    #[test]
    fn rejects_non_power_of_two_resolution() {
        assert!(parse_config("[shell]\nresolution = 96\n").is_err());
    }

    #[test]
    fn rejects_charset_outside_repertoire() {
        assert!(parse_config("[shell]\ncharset = \"abç\"\n").is_err());
    }

    #[test]
    fn rejects_unknown_output() {
        assert!(parse_config("[shell]\noutput = \"pdf\"\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[glyph]\nfont_path = \"fonts/mono.ttf\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.font_path, Some(PathBuf::from("fonts/mono.ttf")));
    }

    #[test]
    fn load_config_missing_file_is_error() {
        assert!(load_config(Path::new("/nonexistent/inkscii.toml")).is_err());
    }
}
