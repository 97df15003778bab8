//! Layout-tool command vocabulary.
//!
//! Commands render one per line, exactly as the layout tool reads them.
//! [`write_script`] adds the blank separator lines between blocks.

use std::fmt;
use std::io::{self, Write};

/// One line of the placement script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `path <search-path>`
    Path(String),
    /// `select top cell`
    SelectTopCell,
    /// `snap int`
    SnapInt,
    /// `box position <x> <y>`
    BoxPosition { x: i64, y: i64 },
    /// `# <character>`
    Comment(char),
    PushBox,
    /// `getcell <cell> child 0 0`
    GetCell(String),
    PopBox,
    /// `box move r <distance>`
    BoxMove(i64),
    /// `gds write <dir>/<name>.gds`
    GdsWrite { dir: String, name: String },
    Quit,
}

impl Command {
    /// Blank line follows this command in a rendered script.
    fn closes_block(&self) -> bool {
        matches!(self, Self::Path(_) | Self::BoxPosition { .. } | Self::BoxMove(_))
    }

    /// Blank line precedes this command in a rendered script.
    fn opens_block(&self) -> bool {
        matches!(self, Self::GdsWrite { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "path {path}"),
            Self::SelectTopCell => f.write_str("select top cell"),
            Self::SnapInt => f.write_str("snap int"),
            Self::BoxPosition { x, y } => write!(f, "box position {x} {y}"),
            Self::Comment(ch) => write!(f, "# {ch}"),
            Self::PushBox => f.write_str("pushbox"),
            Self::GetCell(cell) => write!(f, "getcell {cell} child 0 0"),
            Self::PopBox => f.write_str("popbox"),
            Self::BoxMove(distance) => write!(f, "box move r {distance}"),
            Self::GdsWrite { dir, name } => write!(f, "gds write {dir}/{name}.gds"),
            Self::Quit => f.write_str("quit"),
        }
    }
}

/// Write-only consumer of placement commands, in emission order.
pub trait CommandSink {
    fn emit(&mut self, command: Command);
}

impl CommandSink for Vec<Command> {
    fn emit(&mut self, command: Command) {
        self.push(command);
    }
}

/// Render `commands` as a script, one command per line.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_script<W: Write>(mut out: W, commands: &[Command]) -> io::Result<()> {
    for command in commands {
        if command.opens_block() {
            writeln!(out)?;
        }
        writeln!(out, "{command}")?;
        if command.closes_block() {
            writeln!(out)?;
        }
    }
    out.flush()
}

/// Render `commands` into a string.
#[must_use]
pub fn render_script(commands: &[Command]) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_script(&mut buf, commands);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_renders_exactly() {
        let cases = [
            (Command::Path(".:lib/mag".into()), "path .:lib/mag"),
            (Command::SelectTopCell, "select top cell"),
            (Command::SnapInt, "snap int"),
            (Command::BoxPosition { x: 0, y: -400 }, "box position 0 -400"),
            (Command::Comment('A'), "# A"),
            (Command::PushBox, "pushbox"),
            (Command::GetCell("font_41".into()), "getcell font_41 child 0 0"),
            (Command::PopBox, "popbox"),
            (Command::BoxMove(1600), "box move r 1600"),
            (
                Command::GdsWrite {
                    dir: "gds".into(),
                    name: "demo".into(),
                },
                "gds write gds/demo.gds",
            ),
            (Command::Quit, "quit"),
        ];
        for (command, text) in cases {
            assert_eq!(command.to_string(), text);
        }
    }

    #[test]
    fn script_separates_blocks_with_blank_lines() {
        let commands = vec![
            Command::Path(".:mag".into()),
            Command::SelectTopCell,
            Command::SnapInt,
            Command::BoxPosition { x: 0, y: 0 },
            Command::Comment('A'),
            Command::PushBox,
            Command::GetCell("font_41".into()),
            Command::PopBox,
            Command::BoxMove(1600),
            Command::GdsWrite {
                dir: "gds".into(),
                name: "demo".into(),
            },
            Command::Quit,
        ];
        let expected = "path .:mag\n\
                        \n\
                        select top cell\n\
                        snap int\n\
                        box position 0 0\n\
                        \n\
                        # A\n\
                        pushbox\n\
                        getcell font_41 child 0 0\n\
                        popbox\n\
                        box move r 1600\n\
                        \n\
                        \n\
                        gds write gds/demo.gds\n\
                        quit\n";
        assert_eq!(render_script(&commands), expected);
    }

    #[test]
    fn vec_sink_keeps_order() {
        let mut sink: Vec<Command> = Vec::new();
        sink.emit(Command::PushBox);
        sink.emit(Command::PopBox);
        assert_eq!(sink, vec![Command::PushBox, Command::PopBox]);
    }
}
