use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use ik_ascii::assembler::assemble;
use ik_ascii::index::CharacterBrightnessIndex;
use ik_core::charset::{parse_charset, parse_selection};
use ik_core::config::{OutputMode, ShellConfig};
use ik_core::error::{CoreError, MatchError};
use ik_core::traits::AsciiOutput;
use ik_glyph::table::BrightnessTable;
use ik_source::slice::ImageSlicer;

/// Invite affichée avant chaque commande.
pub const PROMPT: &str = ">>> ";

pub const COMMAND_ERROR: &str = "Did not execute due to incorrect command.";
pub const ADD_FORMAT_ERROR: &str = "Did not add due to incorrect format.";
pub const REMOVE_FORMAT_ERROR: &str = "Did not remove due to incorrect format.";
pub const RESOLUTION_FORMAT_ERROR: &str = "Did not change resolution due to incorrect format.";
pub const RESOLUTION_BOUNDARIES_ERROR: &str =
    "Did not change resolution due to exceeding boundaries.";
pub const IMAGE_ERROR: &str = "Did not execute due to problem with image file.";
pub const OUTPUT_ERROR: &str = "Did not change output method due to incorrect format.";
pub const OUTPUT_WRITE_ERROR: &str = "Did not execute due to problem with output file.";
pub const EMPTY_CHARS: &str = "Did not execute. Charset is empty.";

/// Extensions acceptées par la commande `image`.
const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpeg", ".jpg"];

/// Bornes de résolution quand aucune image n'est chargée.
const UNBOUNDED: (u32, u32) = (1, 1 << 16);

/// Shell interactif : lit des commandes sur `input`, écrit sur `console`.
///
/// Owns the active character set and the session settings. Commands are
/// handled one at a time; a failed command never leaves partial state.
pub struct Shell<R, W> {
    input: R,
    console: W,
    config: ShellConfig,
    index: CharacterBrightnessIndex,
    resolution: u32,
    output_mode: OutputMode,
    output: Box<dyn AsciiOutput>,
    image: Option<ImageSlicer>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Build a session from `config`, scoring glyphs with `table`.
    ///
    /// An image that fails to load is reported on the console and the
    /// session starts without one.
    ///
    /// # Errors
    /// Returns an error if the configured charset is invalid or the console
    /// cannot be written.
    pub fn new(
        config: ShellConfig,
        table: Arc<BrightnessTable>,
        input: R,
        mut console: W,
    ) -> Result<Self> {
        let initial = parse_charset(&config.charset)
            .map_err(|ch| CoreError::Config(format!("caractère {ch:?} hors répertoire")))?;
        let index = CharacterBrightnessIndex::new(table, initial)?;

        let image = match config.image.as_deref() {
            Some(path) => match ImageSlicer::open(path) {
                Ok(slicer) => Some(slicer),
                Err(e) => {
                    log::warn!("{e:#}");
                    writeln!(console, "{IMAGE_ERROR}")?;
                    None
                }
            },
            None => None,
        };

        let output_mode = config.output;
        let output = ik_render::output_for(output_mode, &config);
        let mut shell = Self {
            input,
            console,
            resolution: config.resolution,
            config,
            index,
            output_mode,
            output,
            image,
        };
        shell.fit_resolution();
        Ok(shell)
    }

    /// Active character set.
    #[must_use]
    pub fn index(&self) -> &CharacterBrightnessIndex {
        &self.index
    }

    /// Current column count.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Current output destination.
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Read and execute commands until `exit` or end of input.
    ///
    /// # Errors
    /// Returns an error only on console I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(self.console, "{PROMPT}")?;
            self.console.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.console)?;
                break;
            }
            let command = line.trim_end_matches(['\n', '\r']);
            if command.trim() == "exit" {
                break;
            }
            self.execute(command)?;
        }
        log::info!(
            "Fin de session : {} caractères actifs, résolution {}, sortie {:?}",
            self.index().len(),
            self.resolution(),
            self.output_mode()
        );
        Ok(())
    }

    /// Execute one command line.
    ///
    /// # Errors
    /// Returns an error only on console I/O failure; user mistakes are
    /// reported on the console.
    pub fn execute(&mut self, line: &str) -> Result<()> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(());
        };
        let args: Vec<&str> = words.collect();
        log::debug!("Commande '{command}' {args:?}");

        match command {
            "chars" => self.chars(&args),
            "add" => self.edit_charset(&args, true),
            "remove" => self.edit_charset(&args, false),
            "res" => self.change_resolution(&args),
            "image" => self.change_image(&args),
            "output" => self.change_output(&args),
            "asciiArt" => self.ascii_art(),
            _ => self.say(COMMAND_ERROR),
        }
    }

    fn say(&mut self, msg: &str) -> Result<()> {
        writeln!(self.console, "{msg}")?;
        Ok(())
    }

    fn chars(&mut self, args: &[&str]) -> Result<()> {
        if !args.is_empty() {
            return self.say(COMMAND_ERROR);
        }
        let mut line = String::with_capacity(self.index.len() * 2);
        for &ch in self.index.active_characters() {
            line.push(ch);
            line.push(' ');
        }
        self.say(&line)
    }

    fn edit_charset(&mut self, args: &[&str], add: bool) -> Result<()> {
        let error = if add {
            ADD_FORMAT_ERROR
        } else {
            REMOVE_FORMAT_ERROR
        };
        let Some(range) = args.first().and_then(|arg| parse_selection(arg)) else {
            return self.say(error);
        };
        if add {
            if let Err(e) = self.index.add_range(range) {
                log::warn!("{e}");
                return self.say(error);
            }
        } else {
            self.index.remove_range(range);
        }
        Ok(())
    }

    fn bounds(&self) -> (u32, u32) {
        self.image.as_ref().map_or(UNBOUNDED, ImageSlicer::bounds)
    }

    /// Bring the resolution back inside the bounds of the current image.
    fn fit_resolution(&mut self) {
        let (min, max) = self.bounds();
        let fitted = self.resolution.clamp(min, max);
        if fitted != self.resolution {
            log::warn!(
                "Résolution {} hors bornes [{min}, {max}], ramenée à {fitted}",
                self.resolution
            );
            self.resolution = fitted;
        }
    }

    fn change_resolution(&mut self, args: &[&str]) -> Result<()> {
        let target = match args.first().copied() {
            Some("up") => self.resolution.saturating_mul(2),
            Some("down") => self.resolution / 2,
            _ => return self.say(RESOLUTION_FORMAT_ERROR),
        };
        let (min, max) = self.bounds();
        if !(min..=max).contains(&target) {
            return self.say(RESOLUTION_BOUNDARIES_ERROR);
        }
        self.resolution = target;
        let msg = format!("Resolution set to {target}.");
        self.say(&msg)
    }

    fn change_image(&mut self, args: &[&str]) -> Result<()> {
        let Some(&arg) = args.first() else {
            return self.say(IMAGE_ERROR);
        };
        if !IMAGE_EXTENSIONS.iter().any(|ext| arg.contains(ext)) {
            return self.say(IMAGE_ERROR);
        }
        match ImageSlicer::open(Path::new(arg)) {
            Ok(slicer) => {
                self.image = Some(slicer);
                self.fit_resolution();
                Ok(())
            }
            Err(e) => {
                log::warn!("{e:#}");
                self.say(IMAGE_ERROR)
            }
        }
    }

    fn change_output(&mut self, args: &[&str]) -> Result<()> {
        let Some(mode) = args.first().and_then(|arg| arg.parse::<OutputMode>().ok()) else {
            return self.say(OUTPUT_ERROR);
        };
        if mode != self.output_mode {
            self.output = ik_render::output_for(mode, &self.config);
            self.output_mode = mode;
            log::info!("Sortie : {}", self.output.name());
        }
        Ok(())
    }

    fn ascii_art(&mut self) -> Result<()> {
        if self.index.is_empty() {
            return self.say(EMPTY_CHARS);
        }
        let resolution = self.resolution;
        let Some(slicer) = self.image.as_mut() else {
            return self.say(IMAGE_ERROR);
        };
        let sliced = match slicer.slice(resolution) {
            Ok(sliced) => sliced,
            Err(e) => {
                log::warn!("{e}");
                return self.say(IMAGE_ERROR);
            }
        };

        let grid = match assemble(&sliced.brightness, sliced.rows, sliced.columns, &self.index) {
            Ok(grid) => grid,
            Err(MatchError::EmptyActiveSet) => return self.say(EMPTY_CHARS),
            Err(e) => {
                log::error!("{e}");
                return self.say(IMAGE_ERROR);
            }
        };

        if let Err(e) = self.output.out(&grid, &mut self.console) {
            log::error!("{e:#}");
            return self.say(OUTPUT_WRITE_ERROR);
        }
        Ok(())
    }
}
