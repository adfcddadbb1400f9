//! Input handler for the `input` builtin.
//!
//! Mirrors the print handler: stdin when running programs, a scripted
//! queue of lines in tests.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

/// Input handler implementation using enum dispatch.
pub enum InputHandlerImpl {
    /// Reads lines from stdin.
    Stdin,
    /// Serves pre-supplied lines in order.
    Scripted(Mutex<VecDeque<String>>),
}

impl InputHandlerImpl {
    /// Read one line without its line terminator.
    ///
    /// Returns `None` at end of input.
    pub fn read_line(&self) -> Option<String> {
        match self {
            Self::Stdin => {
                let mut line = String::new();
                match std::io::stdin().lock().read_line(&mut line) {
                    Ok(0) => None,
                    Ok(_) => {
                        let trimmed = line.trim_end_matches(['\n', '\r']).len();
                        line.truncate(trimmed);
                        Some(line)
                    }
                    Err(err) => {
                        tracing::warn!(%err, "failed to read from stdin");
                        None
                    }
                }
            }
            Self::Scripted(lines) => lines.lock().pop_front(),
        }
    }
}

/// Shared input handler that can be passed around.
pub type SharedInputHandler = Arc<InputHandlerImpl>;

/// Create a stdin input handler.
pub fn stdin_handler() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Stdin)
}

/// Create an input handler that serves `lines` in order.
pub fn scripted_handler<I, S>(lines: I) -> SharedInputHandler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(InputHandlerImpl::Scripted(Mutex::new(
        lines.into_iter().map(Into::into).collect(),
    )))
}

#[cfg(test)]
mod tests;
