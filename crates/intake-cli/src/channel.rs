//! Interactive terminal channel.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use intake_domain::traits::OperatorChannel;
use intake_domain::Notice;
use intake_extractor::ScriptedChannel;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Config as EditorConfig, DefaultEditor};

/// Reads operator answers from the terminal with line editing.
///
/// Answers are never added to a history, in memory or on disk. Ctrl-C and
/// Ctrl-D both close the channel, which abandons the current field.
pub struct TerminalChannel {
    editor: DefaultEditor,
    formatter: Formatter,
}

impl TerminalChannel {
    /// Create a channel writing notices through `formatter`.
    pub fn new(formatter: Formatter) -> Result<Self> {
        let config = EditorConfig::builder().auto_add_history(false).build();
        let editor = DefaultEditor::with_config(config)?;

        Ok(Self { editor, formatter })
    }

    /// Number of lines the editor remembers.
    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}

impl OperatorChannel for TerminalChannel {
    type Error = CliError;

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        match self.editor.readline(message) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        eprintln!("{}", self.formatter.notice(notice));
        Ok(())
    }
}

/// Print the notices a scripted run produced, in order.
pub fn print_notices(channel: &ScriptedChannel, formatter: &Formatter) {
    for notice in channel.notices() {
        eprintln!("{}", formatter.notice(notice));
    }
}
