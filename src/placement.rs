//! Placement engine: turns text into a placement script.
//!
//! Characters are placed left to right from the origin. Each glyph moves
//! the cursor right by its advance; a line break returns the cursor to
//! `x = 0` and drops it by the baseline skip. Characters without a cell
//! document are drawn with the fallback glyph but keep their own label in
//! the script.
//!
//! # Example
//!
//! ```rust,no_run
//! use magtext::{Config, PlacementEngine, render_script};
//!
//! # fn example() -> magtext::Result<()> {
//! let engine = PlacementEngine::new(Config::default())?;
//! let commands = engine.convert("HELLO\n", "hello")?;
//! print!("{}", render_script(&commands));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cell::{CellLocator, CellMetrics, CellParser};
use crate::command::{Command, CommandSink};
use crate::config::{validate_target_name, Config};
use crate::error::{Error, Result};

/// Cursor position in layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub x: i64,
    pub y: i64,
}

/// Counters from one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Glyph blocks emitted.
    pub glyphs: usize,
    pub line_breaks: usize,
    /// Glyphs drawn with the fallback cell.
    pub fallbacks: usize,
    /// Cell documents parsed.
    pub cells_parsed: usize,
    /// Cursor after the last character.
    pub cursor: Cursor,
}

/// How one input character was resolved to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub character: char,
    /// Character whose cell is drawn.
    pub resolved: char,
    pub fallback: bool,
    pub metrics: CellMetrics,
}

/// Converts text into placement commands.
///
/// The engine itself is immutable; cursor and metrics cache live in a
/// per-run state, so one engine can serve any number of runs.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    config: Config,
    locator: CellLocator,
    parser: CellParser,
}

impl PlacementEngine {
    /// Build an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the configuration is unusable.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            locator: CellLocator::new(&config),
            parser: CellParser::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Place `message` and archive the layout as `target`, emitting every
    /// command into `sink` in script order.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for an invalid target name (before anything is
    /// emitted), [`Error::FallbackMissing`] when a character and the
    /// fallback glyph both lack documents, and parse or I/O errors from the
    /// cell documents. Commands already emitted are then incomplete.
    pub fn run<S: CommandSink>(
        &self,
        message: &str,
        target: &str,
        sink: &mut S,
    ) -> Result<RunSummary> {
        validate_target_name(target)?;

        let mut run = Run::new(self);
        sink.emit(Command::Path(self.config.search_path()));
        sink.emit(Command::SelectTopCell);
        sink.emit(Command::SnapInt);
        run.emit_position(sink);

        for ch in message.chars() {
            if ch == '\n' {
                run.line_break(sink);
            } else {
                run.place(ch, sink)?;
            }
        }

        sink.emit(Command::GdsWrite {
            dir: self.config.gds_dir.clone(),
            name: target.to_string(),
        });
        sink.emit(Command::Quit);

        let summary = run.finish();
        info!(
            "Placed {} glyphs on {} lines ({} fallbacks, {} cells parsed)",
            summary.glyphs,
            summary.line_breaks + 1,
            summary.fallbacks,
            summary.cells_parsed
        );
        Ok(summary)
    }

    /// Run into a fresh command list.
    pub fn convert(&self, message: &str, target: &str) -> Result<Vec<Command>> {
        let mut commands = Vec::new();
        self.run(message, target, &mut commands)?;
        Ok(commands)
    }

    /// Resolve each distinct non-newline character of `text`, in order of
    /// first appearance.
    pub fn inspect(&self, text: &str) -> Result<Vec<Resolution>> {
        let mut run = Run::new(self);
        let mut seen = Vec::new();
        for ch in text.chars().filter(|&c| c != '\n') {
            if seen.contains(&ch) {
                continue;
            }
            seen.push(ch);
        }

        seen.into_iter()
            .map(|ch| {
                let (resolved, fallback) = run.resolve(ch)?;
                Ok(Resolution {
                    character: ch,
                    resolved,
                    fallback,
                    metrics: run.metrics(resolved).clone(),
                })
            })
            .collect()
    }
}

/// State owned by a single conversion run.
struct Run<'e> {
    engine: &'e PlacementEngine,
    cursor: Cursor,
    /// Parsed metrics per resolved character.
    cache: HashMap<char, CellMetrics>,
    /// Input character to (resolved character, used fallback).
    resolved: HashMap<char, (char, bool)>,
    summary: RunSummary,
}

impl<'e> Run<'e> {
    fn new(engine: &'e PlacementEngine) -> Self {
        Self {
            engine,
            cursor: Cursor::default(),
            cache: HashMap::new(),
            resolved: HashMap::new(),
            summary: RunSummary::default(),
        }
    }

    fn emit_position<S: CommandSink>(&self, sink: &mut S) {
        sink.emit(Command::BoxPosition {
            x: self.cursor.x,
            y: self.cursor.y,
        });
    }

    fn line_break<S: CommandSink>(&mut self, sink: &mut S) {
        self.cursor.x = 0;
        self.cursor.y -= self.engine.config.baseline_skip;
        self.summary.line_breaks += 1;
        self.emit_position(sink);
    }

    fn place<S: CommandSink>(&mut self, ch: char, sink: &mut S) -> Result<()> {
        let (resolved, fallback) = self.resolve(ch)?;
        let metrics = self.metrics(resolved);
        let cell = metrics.cell.clone();
        let advance = metrics.advance;

        sink.emit(Command::Comment(ch));
        sink.emit(Command::PushBox);
        sink.emit(Command::GetCell(cell));
        sink.emit(Command::PopBox);
        sink.emit(Command::BoxMove(advance));

        self.cursor.x += advance;
        self.summary.glyphs += 1;
        if fallback {
            self.summary.fallbacks += 1;
        }
        Ok(())
    }

    /// Resolve `ch` to the character whose cell is drawn, loading its
    /// metrics into the cache.
    fn resolve(&mut self, ch: char) -> Result<(char, bool)> {
        if let Some(&hit) = self.resolved.get(&ch) {
            return Ok(hit);
        }

        let engine = self.engine;
        let wanted = CellLocator::normalize(ch);
        let locator = &engine.locator;
        if locator.exists(wanted) {
            match self.load(wanted) {
                Ok(()) => {
                    self.resolved.insert(ch, (wanted, false));
                    return Ok((wanted, false));
                }
                Err(Error::DocumentNotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        let fallback = engine.config.fallback;
        warn!(
            "No cell for {:?} ({}), using {:?}",
            ch,
            locator.cell_name(wanted),
            fallback
        );
        match self.load(fallback) {
            Ok(()) => {
                self.resolved.insert(ch, (fallback, true));
                Ok((fallback, true))
            }
            Err(Error::DocumentNotFound { path, .. }) => Err(Error::FallbackMissing {
                character: ch,
                fallback,
                path,
            }),
            Err(e) => Err(e),
        }
    }

    /// Parse the document for `ch` unless it is cached.
    fn load(&mut self, ch: char) -> Result<()> {
        if self.cache.contains_key(&ch) {
            return Ok(());
        }
        let engine = self.engine;
        let (path, text) = engine.locator.read(ch)?;
        debug!("Reading {}", path.display());
        let metrics = engine
            .parser
            .parse(
                &engine.locator.cell_name(CellLocator::normalize(ch)),
                &path,
                &text,
            )?;
        self.cache.insert(ch, metrics);
        self.summary.cells_parsed += 1;
        Ok(())
    }

    /// Cached metrics for a character returned by [`Run::resolve`].
    fn metrics(&self, resolved: char) -> &CellMetrics {
        &self.cache[&resolved]
    }

    fn finish(mut self) -> RunSummary {
        self.summary.cursor = self.cursor;
        self.summary
    }
}
