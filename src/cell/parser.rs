//! Cell document parser.
//!
//! Cell documents are line oriented and whitespace tokenized. Section
//! headers of the form `<< name >>` switch the parse mode:
//!
//! ```text
//! magic
//! tech sky130A
//! timestamp 1616445645
//! << metal1 >>
//! rect 0 0 100 1400
//! << properties >>
//! string FIXED_BBOX 0 0 800 1600
//! << end >>
//! ```
//!
//! Only the header keywords, the tracked layer's `rect` lines and the
//! `FIXED_BBOX` property are read. Everything else is skipped.

use std::path::Path;

use tracing::debug;

use super::{CellMetrics, Rect};
use crate::config::Config;
use crate::error::{Error, Result};

const HEADER: &str = "<<";

/// Section of the document the parser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Before the first recognized header.
    #[default]
    Top,
    /// Inside the tracked layer's section.
    Layer,
    Properties,
    /// Nothing is interpreted until another recognized header.
    End,
}

impl ParseMode {
    /// Mode selected by a header name, or `None` for headers the parser
    /// does not track (the current mode then stays in effect).
    fn from_header(name: &str, layer: &str) -> Option<Self> {
        if name == layer {
            Some(Self::Layer)
        } else if name == "properties" {
            Some(Self::Properties)
        } else if name == "end" {
            Some(Self::End)
        } else {
            None
        }
    }
}

/// Reads cell documents into [`CellMetrics`].
#[derive(Debug, Clone)]
pub struct CellParser {
    layer: String,
    advance_scale: i64,
}

impl CellParser {
    pub fn new(config: &Config) -> Self {
        Self {
            layer: config.layer.clone(),
            advance_scale: config.advance_scale,
        }
    }

    /// Parse the document `text` for cell `cell`. `path` only labels errors.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when a coordinate is not an integer or a recognized
    /// line is missing tokens.
    pub fn parse(&self, cell: &str, path: &Path, text: &str) -> Result<CellMetrics> {
        let mut acc = Accumulator::new(path);
        let mut mode = ParseMode::default();

        for (idx, line) in text.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(&keyword) = tokens.first() else {
                continue;
            };
            acc.line = idx + 1;

            if keyword == HEADER {
                if let Some(next) = tokens
                    .get(1)
                    .and_then(|name| ParseMode::from_header(name, &self.layer))
                {
                    mode = next;
                }
                continue;
            }

            match mode {
                ParseMode::Top => acc.top_line(&tokens)?,
                ParseMode::Layer => acc.layer_line(&tokens)?,
                ParseMode::Properties => acc.properties_line(&tokens)?,
                ParseMode::End => {}
            }
        }

        let metrics = acc.finish(cell, self.advance_scale)?;
        debug!(
            "Parsed {} ({}x{}, advance {})",
            metrics.cell, metrics.width, metrics.height, metrics.advance
        );
        Ok(metrics)
    }
}

/// Parse with the default layer and advance scale.
pub fn parse_document(cell: &str, path: &Path, text: &str) -> Result<CellMetrics> {
    CellParser::new(&Config::default()).parse(cell, path, text)
}

/// Fields gathered while scanning one document.
struct Accumulator<'a> {
    path: &'a Path,
    line: usize,
    format: Option<String>,
    technology: Option<String>,
    timestamp: Option<String>,
    extent: Option<Rect>,
    /// Line of the last `rect` folded into `extent`.
    extent_line: usize,
    /// Raw `FIXED_BBOX` tokens and the line they came from.
    bbox: Option<(usize, [String; 4])>,
}

impl<'a> Accumulator<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            line: 0,
            format: None,
            technology: None,
            timestamp: None,
            extent: None,
            extent_line: 0,
            bbox: None,
        }
    }

    fn error(&self, line: usize, message: String) -> Error {
        Error::Parse {
            path: self.path.to_path_buf(),
            line,
            message,
        }
    }

    fn value(&self, tokens: &[&str]) -> Result<String> {
        tokens
            .get(1)
            .map(|v| (*v).to_string())
            .ok_or_else(|| self.error(self.line, format!("`{}` needs a value", tokens[0])))
    }

    fn top_line(&mut self, tokens: &[&str]) -> Result<()> {
        match tokens[0] {
            "magic" => self.format = Some("magic".to_string()),
            "tech" => self.technology = Some(self.value(tokens)?),
            "timestamp" => self.timestamp = Some(self.value(tokens)?),
            _ => {}
        }
        Ok(())
    }

    fn layer_line(&mut self, tokens: &[&str]) -> Result<()> {
        if tokens[0] != "rect" {
            return Ok(());
        }
        let [left, bottom, right, top] = self.coords(&tokens[1..], "rect")?;
        let rect = Rect::new(left, bottom, right, top);
        match &mut self.extent {
            Some(extent) => extent.absorb(&rect),
            None => self.extent = Some(rect),
        }
        self.extent_line = self.line;
        Ok(())
    }

    fn properties_line(&mut self, tokens: &[&str]) -> Result<()> {
        if tokens[0] != "string" || tokens.get(1) != Some(&"FIXED_BBOX") {
            return Ok(());
        }
        let raw = match &tokens[2..] {
            [l, b, r, t, ..] => [l, b, r, t].map(|s| (*s).to_string()),
            rest => {
                return Err(self.error(
                    self.line,
                    format!("FIXED_BBOX needs 4 values, found {}", rest.len()),
                ))
            }
        };
        self.bbox = Some((self.line, raw));
        Ok(())
    }

    fn coords(&self, tokens: &[&str], what: &str) -> Result<[i64; 4]> {
        if tokens.len() < 4 {
            return Err(self.error(
                self.line,
                format!("`{what}` needs 4 coordinates, found {}", tokens.len()),
            ));
        }
        let mut out = [0i64; 4];
        for (slot, token) in out.iter_mut().zip(tokens) {
            *slot = self.integer(self.line, token)?;
        }
        Ok(out)
    }

    fn integer(&self, line: usize, token: &str) -> Result<i64> {
        token
            .parse()
            .map_err(|_| self.error(line, format!("expected integer, found {token:?}")))
    }

    fn finish(self, cell: &str, advance_scale: i64) -> Result<CellMetrics> {
        let explicit_bbox = match &self.bbox {
            Some((line, raw)) => {
                let mut c = [0i64; 4];
                for (slot, token) in c.iter_mut().zip(raw) {
                    *slot = self.integer(*line, token)?;
                }
                Some(Rect::new(c[0], c[1], c[2], c[3]))
            }
            None => None,
        };

        let sizing = match (&explicit_bbox, &self.bbox, &self.extent) {
            (Some(r), Some((line, _)), _) => Some((r, *line)),
            (None, _, Some(r)) => Some((r, self.extent_line)),
            _ => None,
        };
        let (width, height, advance) = match sizing {
            Some((r, line)) => {
                let overflow =
                    |what: &str| self.error(line, format!("{what} overflows a 64-bit integer"));
                (
                    r.width().ok_or_else(|| overflow("width"))?,
                    r.height().ok_or_else(|| overflow("height"))?,
                    r.right
                        .checked_mul(advance_scale)
                        .ok_or_else(|| overflow("advance"))?,
                )
            }
            None => (0, 0, 0),
        };

        Ok(CellMetrics {
            cell: cell.to_string(),
            format: self.format,
            technology: self.technology,
            timestamp: self.timestamp,
            layer_extent: self.extent,
            explicit_bbox,
            width,
            height,
            advance,
        })
    }
}
