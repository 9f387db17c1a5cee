use crate::app::session::{Notice, Session};
use crate::config::Command;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use clap::Parser;
use std::io::{BufRead, Write};

#[derive(Debug, Parser)]
#[command(name = "shell", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

/// Splits a line on whitespace, keeping text inside single or double quotes together.
pub fn split_words(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Runs commands from `input` until EOF or `exit`. The session file is
/// rewritten after every command that changes the store.
pub fn run_shell<S, R, W>(session: &mut Session<S>, input: R, mut out: W) -> Result<()>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Continuity dashboard shell. Type 'help' for commands, 'exit' to quit.")?;

    for line in input.lines() {
        let line = line?;
        let words = match split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "{}", Notice::Error(e))?;
                continue;
            }
        };

        match words.first().map(String::as_str) {
            None => continue,
            Some("exit") | Some("quit") => break,
            _ => {}
        }

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                continue;
            }
        };
        tracing::debug!("Shell command: {:?}", command);

        match session.execute(command) {
            Ok(outcome) => {
                for line in &outcome.output {
                    writeln!(out, "{}", line)?;
                }
                for notice in &outcome.notices {
                    writeln!(out, "{}", notice)?;
                }
                if outcome.changed {
                    session.persist()?;
                }
            }
            Err(e) => {
                tracing::warn!("Command failed: {}", e);
                writeln!(out, "{}", Notice::Error(e.user_friendly_message()))?;
            }
        }
    }

    Ok(())
}
