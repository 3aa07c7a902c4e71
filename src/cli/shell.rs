//! Interactive shell and script runner
//!
//! Both read one command per line. Blank lines and lines starting with `#`
//! are skipped. The shell reports errors and keeps going; a script stops at
//! the first failing line.

use std::io::{BufRead, Write};

use thiserror::Error;

use super::{execute, Session};
use crate::error::{LedgerError, LedgerResult};

const PROMPT: &str = "ledgerly> ";

/// A script line that failed
#[derive(Error, Debug)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: LedgerError,
}

/// Split a command line into words.
///
/// Single and double quotes group words and may produce an empty word.
/// A backslash escapes the next character outside single quotes.
pub fn tokenize(line: &str) -> LedgerResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => {
                    return Err(LedgerError::Validation(
                        "Line ends with a dangling backslash".to_string(),
                    ))
                }
            },
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(LedgerError::Validation(format!("Unclosed quote {}", q)));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

enum LineOutcome {
    Skipped,
    Ran,
    Exit,
}

fn run_line(session: &mut Session, line: &str, out: &mut dyn Write) -> LedgerResult<LineOutcome> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LineOutcome::Skipped);
    }
    let words = tokenize(trimmed)?;
    match words.first().map(String::as_str) {
        None => Ok(LineOutcome::Skipped),
        Some("exit") | Some("quit") => Ok(LineOutcome::Exit),
        Some(_) => {
            execute(session, &words, out)?;
            Ok(LineOutcome::Ran)
        }
    }
}

/// Read commands until end of input or `exit`
pub fn run_shell<R: BufRead>(
    session: &mut Session,
    input: R,
    out: &mut dyn Write,
    prompt: bool,
) -> LedgerResult<()> {
    if prompt {
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }
    for line in input.lines() {
        let line = line?;
        match run_line(session, &line, out) {
            Ok(LineOutcome::Exit) => break,
            Ok(_) => {}
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        if prompt {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Run every line of a script, stopping at the first failure
pub fn run_script<R: BufRead>(
    session: &mut Session,
    input: R,
    out: &mut dyn Write,
) -> Result<usize, ScriptError> {
    let mut executed = 0;
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let fail = |source: LedgerError| ScriptError {
            line: line_no,
            source,
        };
        let line = line.map_err(|e| fail(e.into()))?;
        match run_line(session, &line, out).map_err(fail)? {
            LineOutcome::Exit => break,
            LineOutcome::Ran => executed += 1,
            LineOutcome::Skipped => {}
        }
    }
    Ok(executed)
}
