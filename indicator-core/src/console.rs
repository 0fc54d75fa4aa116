//! Line grammar for the operator console.
//!
//! Keywords are case-insensitive. Durations accept an optional `ms` or `s`
//! suffix and default to milliseconds.

use core::fmt;

use winnow::ascii::{Caseless, dec_uint, space1};
use winnow::combinator::{alt, opt, preceded};
use winnow::error::ContextError;
use winnow::prelude::*;

/// Usage lines, one per command.
pub const HELP_TOPICS: &[(&str, &str)] = &[
    ("status", "status               - show decoder state"),
    ("history", "history              - list recent state transitions"),
    ("signal", "signal <us>          - emit a steady pulse train of the given width"),
    ("silence", "silence              - stop emitting pulses"),
    ("glitch", "glitch <us>          - emit a single pulse of the given width"),
    ("reset-edge", "reset-edge           - emit a falling edge with no rising edge"),
    ("advance", "advance <n>[ms|s]    - advance simulated time"),
    ("help", "help                 - show this list"),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConsoleCommand {
    Status,
    History,
    Help,
    Signal(u16),
    Silence,
    Glitch(u16),
    ResetEdge,
    /// Milliseconds to advance.
    Advance(u32),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConsoleError {
    Empty,
    Syntax,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Empty => f.write_str("empty command"),
            ConsoleError::Syntax => f.write_str("unrecognised command; try `help`"),
        }
    }
}

/// Parses one console line (surrounding whitespace ignored).
///
/// # Errors
///
/// [`ConsoleError::Empty`] for a blank line, [`ConsoleError::Syntax`] otherwise.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, ConsoleError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::Empty);
    }
    command.parse(trimmed).map_err(|_| ConsoleError::Syntax)
}

fn command(input: &mut &str) -> Result<ConsoleCommand, ContextError> {
    alt((
        preceded((Caseless("signal"), space1), width_us).map(ConsoleCommand::Signal),
        preceded((Caseless("glitch"), space1), width_us).map(ConsoleCommand::Glitch),
        preceded((Caseless("advance"), space1), duration_ms).map(ConsoleCommand::Advance),
        Caseless("reset-edge").value(ConsoleCommand::ResetEdge),
        Caseless("silence").value(ConsoleCommand::Silence),
        Caseless("status").value(ConsoleCommand::Status),
        Caseless("history").value(ConsoleCommand::History),
        Caseless("help").value(ConsoleCommand::Help),
    ))
    .parse_next(input)
}

fn width_us(input: &mut &str) -> Result<u16, ContextError> {
    dec_uint.parse_next(input)
}

fn duration_ms(input: &mut &str) -> Result<u32, ContextError> {
    let value: u32 = dec_uint.parse_next(input)?;
    let scale = opt(alt((
        Caseless("ms").value(1_u32),
        Caseless("s").value(1_000_u32),
    )))
    .parse_next(input)?;
    Ok(value.saturating_mul(scale.unwrap_or(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_case_insensitively() {
        assert_eq!(parse_command("status"), Ok(ConsoleCommand::Status));
        assert_eq!(parse_command("  HISTORY \n"), Ok(ConsoleCommand::History));
        assert_eq!(parse_command("Reset-Edge"), Ok(ConsoleCommand::ResetEdge));
    }

    #[test]
    fn parses_widths() {
        assert_eq!(parse_command("signal 1800"), Ok(ConsoleCommand::Signal(1_800)));
        assert_eq!(parse_command("glitch  90"), Ok(ConsoleCommand::Glitch(90)));
        assert_eq!(parse_command("signal 70000"), Err(ConsoleError::Syntax));
    }

    #[test]
    fn parses_duration_suffixes() {
        assert_eq!(parse_command("advance 250"), Ok(ConsoleCommand::Advance(250)));
        assert_eq!(parse_command("advance 250ms"), Ok(ConsoleCommand::Advance(250)));
        assert_eq!(parse_command("advance 2s"), Ok(ConsoleCommand::Advance(2_000)));
    }

    #[test]
    fn rejects_blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), Err(ConsoleError::Empty));
        assert_eq!(parse_command("reboot now"), Err(ConsoleError::Syntax));
        assert_eq!(parse_command("statusx"), Err(ConsoleError::Syntax));
    }
}
