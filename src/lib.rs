//! `magtext` - typeset text as layout-tool placement scripts
//!
//! Each character is drawn by a pre-made glyph cell from a library
//! directory. The crate reads each cell's geometry, works out how far the
//! cursor advances, and emits a script that places the glyphs left to
//! right and top to bottom.
//!
//! # Features
//!
//! - **Cell lookup**: code point to `font_XX` cell names and documents
//! - **Cell parsing**: layer extents and `FIXED_BBOX` properties
//! - **Placement**: cursor tracking, line breaks, fallback glyph
//!
//! # Example
//!
//! ```rust,no_run
//! use magtext::{Config, PlacementEngine};
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = PlacementEngine::new(Config::default())?;
//!     let mut out = std::io::stdout();
//!     let commands = engine.convert("HELLO", "hello")?;
//!     magtext::write_script(&mut out, &commands)?;
//!     Ok(())
//! }
//! ```

pub mod cell;
pub mod command;
pub mod config;
pub mod error;
pub mod placement;

pub use cell::{CellLocator, CellMetrics, CellParser, ParseMode, Rect};
pub use command::{render_script, write_script, Command, CommandSink};
pub use config::Config;
pub use error::{Error, Result};
pub use placement::{Cursor, PlacementEngine, Resolution, RunSummary};

/// Version of magtext
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
