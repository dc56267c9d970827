use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ik_core::grid::CharGrid;
use ik_core::traits::AsciiOutput;

/// Taille de police du document, en pixels. Petite pour tenir une grande grille.
const FONT_SIZE_PX: u32 = 4;

/// Fond sombre, encre claire : un glyphe dense représente une zone lumineuse.
const BACKGROUND: &str = "#000000";
const FOREGROUND: &str = "#ffffff";

/// Écrit la grille dans un document HTML minimal (bloc `<pre>` monospace).
pub struct HtmlOutput {
    path: PathBuf,
    font: String,
}

impl HtmlOutput {
    /// Renderer writing to `path` with `font` as CSS font family.
    #[must_use]
    pub fn new(path: PathBuf, font: String) -> Self {
        Self { path, font }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the complete document for `grid` into `w`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    ///
    /// # Example
    /// ```
    /// use ik_core::grid::CharGrid;
    /// use ik_render::html::HtmlOutput;
    ///
    /// let html = HtmlOutput::new("out.html".into(), "Courier New".into());
    /// let grid = CharGrid::from_cells(1, 2, vec!['<', '&']).unwrap();
    /// let mut doc = Vec::new();
    /// html.write_document(&grid, &mut doc).unwrap();
    /// let doc = String::from_utf8(doc).unwrap();
    /// assert!(doc.contains("&lt;&amp;"));
    /// ```
    pub fn write_document(&self, grid: &CharGrid, w: &mut dyn Write) -> Result<()> {
        writeln!(w, "<!DOCTYPE html>")?;
        writeln!(w, "<html>")?;
        writeln!(w, "<head>")?;
        writeln!(w, "<meta charset=\"utf-8\">")?;
        writeln!(w, "<title>inkscii</title>")?;
        writeln!(w, "</head>")?;
        writeln!(w, "<body style=\"background:{BACKGROUND}\">")?;
        writeln!(
            w,
            "<pre style=\"font-family:'{}',monospace; font-size:{FONT_SIZE_PX}px; line-height:{FONT_SIZE_PX}px; color:{FOREGROUND}\">",
            escape_attr(&self.font)
        )?;
        let mut line = String::with_capacity(grid.columns() * 2 + 1);
        for row in grid.iter_rows() {
            line.clear();
            for &ch in row {
                push_escaped(&mut line, ch);
            }
            line.push('\n');
            w.write_all(line.as_bytes())?;
        }
        writeln!(w, "</pre>")?;
        writeln!(w, "</body>")?;
        writeln!(w, "</html>")?;
        Ok(())
    }
}

impl AsciiOutput for HtmlOutput {
    fn out(&self, grid: &CharGrid, _console: &mut dyn Write) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Impossible de créer {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_document(grid, &mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Écriture interrompue : {}", self.path.display()))?;
        log::info!(
            "Grille {}×{} écrite dans {}",
            grid.rows(),
            grid.columns(),
            self.path.display()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_with_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let html = HtmlOutput::new(path.clone(), "Courier New".into());
        let grid = CharGrid::from_cells(2, 3, "ab c>d".chars().collect()).unwrap();

        let mut console = Vec::new();
        html.out(&grid, &mut console).unwrap();

        assert!(console.is_empty());
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("font-family:'Courier New'"));
        assert!(doc.contains("ab \nc&gt;d\n</pre>"));
    }

    #[test]
    fn dense_glyphs_are_drawn_light_on_dark() {
        let html = HtmlOutput::new("x.html".into(), "DejaVu Sans Mono".into());
        let grid = CharGrid::from_cells(2, 2, vec!['@'; 4]).unwrap();
        let mut doc = Vec::new();
        html.write_document(&grid, &mut doc).unwrap();
        let doc = String::from_utf8(doc).unwrap();
        assert!(doc.contains("<body style=\"background:#000000\">"));
        assert!(doc.contains("color:#ffffff\">\n@@\n@@\n</pre>"));
        assert!(!doc.contains("background:#ffffff"));
    }

    #[test]
    fn font_name_is_escaped() {
        let html = HtmlOutput::new("x.html".into(), "Evil'\"Font".into());
        let mut doc = Vec::new();
        html.write_document(&CharGrid::new(0, 0), &mut doc).unwrap();
        let doc = String::from_utf8(doc).unwrap();
        assert!(doc.contains("Evil&#39;&quot;Font"));
    }

    #[test]
    fn unwritable_path_is_error() {
        let html = HtmlOutput::new("/nonexistent/dir/out.html".into(), "Courier New".into());
        let mut console = Vec::new();
        assert!(html.out(&CharGrid::new(1, 1), &mut console).is_err());
    }
}
