//! Character to cell name and document path.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};

/// Maps characters to glyph cells in a library directory.
#[derive(Debug, Clone)]
pub struct CellLocator {
    library_dir: PathBuf,
    prefix: String,
    extension: String,
}

impl CellLocator {
    pub fn new(config: &Config) -> Self {
        Self {
            library_dir: config.library_dir.clone(),
            prefix: config.cell_prefix.clone(),
            extension: config.extension.clone(),
        }
    }

    /// Newline and tab use the space glyph. Nothing else is folded.
    #[must_use]
    pub fn normalize(ch: char) -> char {
        match ch {
            '\n' | '\t' => ' ',
            other => other,
        }
    }

    /// Cell name for `ch`: prefix plus the uppercase hex code point, padded
    /// to 2, 4 or 6 digits by magnitude.
    #[must_use]
    pub fn cell_name(&self, ch: char) -> String {
        format!("{}{}", self.prefix, hex_code(ch))
    }

    /// Path of the cell document for `ch`, without whitespace folding.
    #[must_use]
    pub fn path(&self, ch: char) -> PathBuf {
        self.library_dir
            .join(format!("{}.{}", self.cell_name(ch), self.extension))
    }

    /// Whether the store holds a document for `ch` after whitespace folding.
    #[must_use]
    pub fn exists(&self, ch: char) -> bool {
        self.path(Self::normalize(ch)).is_file()
    }

    /// Read the raw document text for `ch` after whitespace folding.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentNotFound`] if the document cannot be opened because
    /// it is absent, [`Error::Io`] for any other read failure.
    pub fn read(&self, ch: char) -> Result<(PathBuf, String)> {
        let ch = Self::normalize(ch);
        let path = self.path(ch);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok((path, text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::DocumentNotFound {
                character: ch,
                path,
            }),
            Err(source) => Err(Error::Io { path, source }),
        }
    }
}

fn hex_code(ch: char) -> String {
    let code = u32::from(ch);
    if code < 0x100 {
        format!("{code:02X}")
    } else if code < 0x1_0000 {
        format!("{code:04X}")
    } else if code < 0x100_0000 {
        format!("{code:06X}")
    } else {
        format!("{code:X}")
    }
}
