//! Line-oriented interactive view over the roster.
//!
//! Reads one command per line, renders the filtered contact listing,
//! asks the yes/no questions the controller's two-phase mutations
//! require, and prints the current notification banner before each
//! prompt. The shell owns the filter text; it never touches the
//! collection directly.

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::filter;
use crate::notify::{Notifier, Severity};
use crate::roster::{AddOutcome, Roster};

/// Prompt shown before each command.
const PROMPT: &str = "dialbook> ";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Render the filtered listing.
    List,
    /// Set or clear the name filter.
    Filter(String),
    /// Create a contact, or replace a duplicate's number.
    Add {
        /// Display name; may contain spaces.
        name: String,
        /// Phone number; always the final token.
        number: String,
    },
    /// Delete by record id.
    Delete(String),
    /// Print the command summary.
    Help,
    /// Leave the shell.
    Quit,
}

/// Parse one input line. `Ok(None)` is a blank line; `Err` carries the
/// message to print.
fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let mut tokens = trimmed.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = tokens.collect();

    match verb {
        "list" | "ls" => Ok(Some(Command::List)),
        "filter" => Ok(Some(Command::Filter(rest.join(" ")))),
        "add" => match rest.split_last() {
            Some((number, name_tokens)) if !name_tokens.is_empty() => Ok(Some(Command::Add {
                name: name_tokens.join(" "),
                number: (*number).to_owned(),
            })),
            _ => Err("usage: add <name> <number>".to_owned()),
        },
        "delete" | "rm" => match rest.as_slice() {
            [id] => Ok(Some(Command::Delete((*id).to_owned()))),
            _ => Err("usage: delete <id>".to_owned()),
        },
        "help" => Ok(Some(Command::Help)),
        "quit" | "exit" => Ok(Some(Command::Quit)),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

/// Interactive session state.
#[derive(Debug)]
pub struct Shell {
    roster: Roster,
    notifier: Notifier,
    filter: String,
}

impl Shell {
    /// Create a shell over a loaded roster.
    pub fn new(roster: Roster, notifier: Notifier) -> Self {
        Self {
            roster,
            notifier,
            filter: String::new(),
        }
    }

    /// Run the interactive loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only on stdin/stdout I/O failure.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!(
            "dialbook: {} contacts loaded, type 'help' for commands",
            self.roster.contacts().len()
        );

        loop {
            self.render_banner();
            prompt(PROMPT)?;
            let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
                break;
            };
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.dispatch(command, &mut lines).await?,
                Err(message) => println!("{message}"),
            }
        }
        Ok(())
    }

    /// Print the current notification, if one is up.
    fn render_banner(&self) {
        if let Some(note) = self.notifier.current() {
            match note.severity {
                Severity::Success => println!("[ok] {}", note.message),
                Severity::Error => println!("[error] {}", note.message),
            }
        }
    }

    async fn dispatch(
        &mut self,
        command: Command,
        lines: &mut Lines<BufReader<Stdin>>,
    ) -> anyhow::Result<()> {
        match command {
            Command::List => self.render_listing(),
            Command::Filter(text) => {
                self.filter = text;
                self.render_listing();
            }
            Command::Add { name, number } => {
                match self.roster.add_or_replace(&name, &number).await {
                    AddOutcome::Added | AddOutcome::CreateFailed => {}
                    AddOutcome::NeedsConfirmation(replace) => {
                        let confirmed = confirm(lines, &replace.question()).await?;
                        self.roster.confirm_replace(replace, confirmed).await;
                    }
                }
            }
            Command::Delete(id) => match self.roster.delete(&id) {
                Some(delete) => {
                    let confirmed = confirm(lines, &delete.question()).await?;
                    self.roster.confirm_delete(delete, confirmed).await;
                }
                None => println!("no contact with id '{id}'"),
            },
            Command::Help => print_help(),
            Command::Quit => {}
        }
        Ok(())
    }

    /// Render the filtered projection, one record per line.
    fn render_listing(&self) {
        let shown = filter::visible(self.roster.contacts(), &self.filter);
        if self.filter.is_empty() {
            println!("{} contacts", shown.len());
        } else {
            println!("{} contacts (filter: {:?})", shown.len(), self.filter);
        }
        for person in shown {
            println!("  {}  {}  {}", person.id, person.name, person.number);
        }
    }
}

/// Ask a yes/no question and map the answer through [`is_yes`].
async fn confirm(lines: &mut Lines<BufReader<Stdin>>, question: &str) -> anyhow::Result<bool> {
    prompt(&format!("{question} [y/N] "))?;
    let answer = lines.next_line().await.context("failed to read stdin")?;
    Ok(is_yes(answer.as_deref()))
}

/// Interpret a confirmation answer: `y`/`yes` (any case, surrounding
/// whitespace ignored) confirms; anything else, including end of input,
/// declines.
fn is_yes(answer: Option<&str>) -> bool {
    matches!(
        answer.map(str::trim).map(str::to_lowercase).as_deref(),
        Some("y" | "yes")
    )
}

/// Write a prompt without a trailing newline and flush it out.
fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{text}");
    std::io::stdout().flush().context("failed to flush stdout")
}

/// Command summary.
fn print_help() {
    println!("commands:");
    println!("  list | ls            render the contact listing");
    println!("  filter [text]        show only names containing text; no text clears");
    println!("  add <name> <number>  add a contact; the last token is the number");
    println!("  delete | rm <id>     delete a contact by id");
    println!("  help                 this summary");
    println!("  quit | exit          leave");
}
