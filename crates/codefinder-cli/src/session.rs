//! Interactive `browse` session: each input line is one UI event.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::warn;

use codefinder_core::{Clipboard, ClipboardError, FilterView, SystemClipboard};

use crate::render::{TerminalRenderer, categories_table};

pub const HELP_TEXT: &str = "\
commands:
  category <id>   select a category (no id clears it)
  sub <id>        select a sub-category (no id clears it)
  search <text>   filter by name (no text clears it)
  copy <n>        copy the code of row n
  show            print the current results
  list            list categories and sub-categories
  help            show this help
  quit            leave the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Category(Option<String>),
    SubCategory(Option<String>),
    Search(String),
    /// 1-based row number.
    Copy(usize),
    Show,
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`copy` needs a row number starting at 1, got `{0}`")]
    InvalidRow(String),
}

impl FromStr for SessionCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let argument = (!rest.is_empty()).then(|| rest.to_string());
        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "category" | "c" => Ok(Self::Category(argument)),
            "sub" | "s" => Ok(Self::SubCategory(argument)),
            "search" | "/" => Ok(Self::Search(rest.to_string())),
            "copy" | "y" => match rest.parse::<usize>() {
                Ok(row) if row > 0 => Ok(Self::Copy(row)),
                _ => Err(ParseCommandError::InvalidRow(rest.to_string())),
            },
            "show" => Ok(Self::Show),
            "list" | "ls" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// Opens the system clipboard on first use and keeps it open.
#[derive(Default)]
pub struct LazyClipboard {
    inner: Option<SystemClipboard>,
    hold: Option<Duration>,
}

impl LazyClipboard {
    /// Hold each write for up to `hold` (see [`SystemClipboard::holding`]).
    #[must_use]
    pub fn holding(hold: Duration) -> Self {
        Self {
            inner: None,
            hold: Some(hold),
        }
    }

    #[must_use]
    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }

    fn open(&self) -> Result<SystemClipboard, ClipboardError> {
        let clipboard = SystemClipboard::new()?;
        Ok(match self.hold {
            Some(hold) => clipboard.holding(hold),
            None => clipboard,
        })
    }
}

impl Clipboard for LazyClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(self.open()?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard.write_text(text),
            None => Err(ClipboardError::Unavailable("not initialized".to_string())),
        }
    }
}

/// Feed `input` line by line into `view` until `quit` or end of input.
pub fn run_session<W, I>(
    view: &mut FilterView<TerminalRenderer<W>>,
    input: I,
    clipboard: &mut dyn Clipboard,
) where
    W: Write,
    I: BufRead,
{
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "failed to read input");
                break;
            }
        };
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(error) => {
                view.renderer_mut().print_line(&format!("error: {error}"));
                continue;
            }
        };
        match command {
            SessionCommand::Category(id) => view.select_category(id.as_deref()),
            SessionCommand::SubCategory(id) => view.select_sub_category(id.as_deref()),
            SessionCommand::Search(text) => view.set_query(text),
            SessionCommand::Copy(row) => {
                let now = Instant::now();
                if view.copy_row(row - 1, &mut *clipboard, now) {
                    print_current(view, now);
                } else if row > view.table().rows().len() {
                    view.renderer_mut()
                        .print_line(&format!("error: no row {row}"));
                }
            }
            SessionCommand::Show => print_current(view, Instant::now()),
            SessionCommand::List => {
                if let Some(kind) = view.kind() {
                    let rendered = categories_table(kind, view.catalog()).to_string();
                    view.renderer_mut().print_line(&rendered);
                }
            }
            SessionCommand::Help => view.renderer_mut().print_line(HELP_TEXT),
            SessionCommand::Quit => break,
        }
    }
}

/// Print the current table with copy feedback as of `now`.
fn print_current<W: Write>(view: &mut FilterView<TerminalRenderer<W>>, now: Instant) {
    let labels: Vec<String> = (0..view.table().rows().len())
        .filter_map(|index| view.copy_label(index, now).map(str::to_string))
        .collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    let table = view.table().clone();
    view.renderer_mut().print_results(&table, &labels);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(
            "category US".parse::<SessionCommand>(),
            Ok(SessionCommand::Category(Some("US".to_string())))
        );
        assert_eq!("sub".parse(), Ok(SessionCommand::SubCategory(None)));
        assert_eq!(
            "search  Art U ".parse(),
            Ok(SessionCommand::Search("Art U".to_string()))
        );
        assert_eq!("COPY 2".parse(), Ok(SessionCommand::Copy(2)));
        assert_eq!("q".parse(), Ok(SessionCommand::Quit));
    }

    #[test]
    fn lazy_clipboard_keeps_its_hold_until_opened() {
        assert_eq!(LazyClipboard::default().hold(), None);
        let clipboard = LazyClipboard::holding(Duration::from_secs(10));
        assert_eq!(clipboard.hold(), Some(Duration::from_secs(10)));
        assert!(clipboard.inner.is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<SessionCommand>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "copy 0".parse::<SessionCommand>(),
            Err(ParseCommandError::InvalidRow("0".to_string()))
        );
        assert_eq!(
            "frobnicate".parse::<SessionCommand>(),
            Err(ParseCommandError::Unknown("frobnicate".to_string()))
        );
    }
}
