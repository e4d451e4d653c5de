//! Interactive session: one load → render → (optional) mutation cycle per command.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use tally_core::{
    ExpenseDraft, ExpenseRecord, RecordId, Summary, ValidationError, display_view, parse_amount,
    parse_timestamp, resolve_display_index,
};
use tally_store::{RecordStore, StoreError};

use crate::config::Config;
use crate::render::{render_history, render_summary, row_label};
use crate::session::SessionContext;

/// Line-oriented terminal I/O.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Print `label` and read one line. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}: ")?;
        self.out.flush().ok();
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    /// 1-based display row
    Edit(usize),
    Delete(usize),
    Clear,
    Quit,
}

pub fn parse_action(line: &str) -> Option<Action> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?.to_lowercase();
    let row = parts.next().and_then(|n| n.parse::<usize>().ok());
    match (verb.as_str(), row) {
        ("a" | "add", None) => Some(Action::Add),
        ("e" | "edit", Some(n)) => Some(Action::Edit(n)),
        ("d" | "delete", Some(n)) => Some(Action::Delete(n)),
        ("c" | "clear", None) => Some(Action::Clear),
        ("q" | "quit" | "exit", None) => Some(Action::Quit),
        _ => None,
    }
}

/// Resolve a pick from a numbered list, or take `text` verbatim when `allow_custom`.
fn pick(options: &[String], text: &str, allow_custom: bool) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(n) = text.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).cloned();
    }
    if let Some(known) = options.iter().find(|o| o.eq_ignore_ascii_case(text)) {
        return Some(known.clone());
    }
    allow_custom.then(|| text.to_string())
}

fn numbered(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}) {}", i + 1, o))
        .collect::<Vec<_>>()
        .join("  ")
}

enum Flow {
    Continue,
    Stop,
}

pub struct App<'a, R, W> {
    store: &'a RecordStore,
    config: &'a Config,
    tz: Tz,
    console: Console<R, W>,
    clock: fn(Tz) -> NaiveDateTime,
}

impl<'a, R: BufRead, W: Write> App<'a, R, W> {
    pub fn new(store: &'a RecordStore, config: &'a Config, tz: Tz, console: Console<R, W>) -> Self {
        Self {
            store,
            config,
            tz,
            console,
            clock: tally_core::local_now,
        }
    }

    pub fn with_clock(mut self, clock: fn(Tz) -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    fn symbol(&self) -> &'a str {
        &self.config.form.currency_symbol
    }

    pub fn run(mut self) -> Result<()> {
        self.console.say(&format!(
            "tally {} ({})",
            env!("CARGO_PKG_VERSION"),
            env!("TALLY_BUILD_SHA")
        ))?;

        if !self.authenticate()? {
            return Ok(());
        }

        loop {
            let records = self
                .store
                .load()
                .with_context(|| format!("loading {}", self.store.path().display()))?;
            self.show(&records)?;

            let Some(line) = self
                .console
                .prompt("\n[a]dd  [e]dit <#>  [d]elete <#>  [c]lear  [q]uit")?
            else {
                return Ok(());
            };
            let Some(action) = parse_action(&line) else {
                self.console.say("Unknown command.")?;
                continue;
            };
            debug!(?action, "session command");

            let flow = match action {
                Action::Quit => Flow::Stop,
                Action::Add => self.add(&records)?,
                Action::Edit(n) => self.edit(&records, n)?,
                Action::Delete(n) => self.delete(&records, n)?,
                Action::Clear => self.clear()?,
            };
            if let Flow::Stop = flow {
                return Ok(());
            }
        }
    }

    fn authenticate(&mut self) -> Result<bool> {
        let mut session = SessionContext::new();
        while !session.is_authenticated() && session.attempts_left() > 0 {
            let Some(attempt) = self.console.prompt("Passphrase")? else {
                return Ok(false);
            };
            if !session.unlock(&attempt, &self.config.session.passphrase) {
                warn!(attempts_left = session.attempts_left(), "wrong passphrase");
                self.console.say("Incorrect passphrase.")?;
            }
        }
        if !session.is_authenticated() {
            self.console.say("Too many attempts.")?;
        }
        Ok(session.is_authenticated())
    }

    fn show(&mut self, records: &[ExpenseRecord]) -> Result<()> {
        if records.is_empty() {
            return self.console.say("\nNo expenses recorded yet.");
        }
        let today = (self.clock)(self.tz).date();
        let summary = Summary::compute(records, today);
        let symbol = self.symbol();
        self.console.say("")?;
        self.console.say(&render_summary(&summary, symbol))?;
        self.console.say("\nExpense History")?;
        self.console
            .say(render_history(&display_view(records), symbol).trim_end())
    }

    /// Report a store error if it belongs to the user; propagate anything else.
    fn report(&mut self, result: Result<Vec<ExpenseRecord>, StoreError>, done: &str) -> Result<Flow> {
        match result {
            Ok(_) => self.console.say(done)?,
            Err(StoreError::Validation(e)) => self.console.say(&e.to_string())?,
            Err(e) => {
                let path = self.store.path().display().to_string();
                return Err(anyhow::Error::new(e).context(format!("writing {path}")));
            }
        }
        Ok(Flow::Continue)
    }

    /// Map a 1-based display row to its stored identity and record.
    fn resolve<'r>(
        &mut self,
        records: &'r [ExpenseRecord],
        row: usize,
    ) -> Result<Option<(RecordId, &'r ExpenseRecord)>> {
        let view = display_view(records);
        let found = row
            .checked_sub(1)
            .and_then(|i| resolve_display_index(&view, i))
            .and_then(|id| records.get(id.index()).map(|r| (id, r)));
        if found.is_none() {
            self.console.say(&format!("No row {row}."))?;
        }
        Ok(found)
    }

    fn add(&mut self, records: &[ExpenseRecord]) -> Result<Flow> {
        let config = self.config;
        let form = &config.form;

        let Some(amount) = self.console.prompt("Amount")? else {
            return Ok(Flow::Stop);
        };
        let amount = match parse_amount(&amount) {
            Ok(a) => a,
            Err(e) => return self.invalid(e),
        };

        let Some(category) = self
            .console
            .prompt(&format!("Type ({}, or your own)", numbered(&form.categories)))?
        else {
            return Ok(Flow::Stop);
        };
        let Some(category) = pick(&form.categories, &category, true) else {
            return self.invalid(ValidationError::MissingCategory);
        };

        let Some(person) = self
            .console
            .prompt(&format!("Person ({})", numbered(&form.people)))?
        else {
            return Ok(Flow::Stop);
        };
        let Some(person) = pick(&form.people, &person, false) else {
            return self.invalid(ValidationError::MissingPerson);
        };

        let Some(description) = self.console.prompt("Description (optional)")? else {
            return Ok(Flow::Stop);
        };
        let Some(when) = self.console.prompt("Date (YYYY-MM-DD [HH:MM], blank for now)")? else {
            return Ok(Flow::Stop);
        };

        let mut draft = ExpenseDraft::new(amount, category, person).with_description(description);
        if !when.is_empty() {
            match parse_timestamp(&when) {
                Some(ts) => draft = draft.with_timestamp(ts),
                None => {
                    self.console.say(&format!("\"{when}\" is not a date."))?;
                    return Ok(Flow::Continue);
                }
            }
        }

        let now = (self.clock)(self.tz);
        let result = self.store.insert(records, draft, now);
        self.report(result, "Expense added.")
    }

    fn edit(&mut self, records: &[ExpenseRecord], row: usize) -> Result<Flow> {
        let Some((id, current)) = self.resolve(records, row)? else {
            return Ok(Flow::Continue);
        };
        let symbol = self.symbol();
        self.console
            .say(&format!("Editing {} (blank keeps the value)", row_label(current, symbol)))?;

        let config = self.config;
        let form = &config.form;
        let mut draft = ExpenseDraft::from_record(current);

        let Some(amount) = self.console.prompt("Amount")? else {
            return Ok(Flow::Stop);
        };
        if !amount.is_empty() {
            match parse_amount(&amount) {
                Ok(a) => draft.amount = a,
                Err(e) => return self.invalid(e),
            }
        }

        let Some(category) = self
            .console
            .prompt(&format!("Type ({})", numbered(&form.categories)))?
        else {
            return Ok(Flow::Stop);
        };
        if !category.is_empty() {
            match pick(&form.categories, &category, true) {
                Some(c) => draft.category = c,
                None => return self.invalid(ValidationError::MissingCategory),
            }
        }

        let Some(person) = self
            .console
            .prompt(&format!("Person ({})", numbered(&form.people)))?
        else {
            return Ok(Flow::Stop);
        };
        if !person.is_empty() {
            match pick(&form.people, &person, false) {
                Some(p) => draft.person = p,
                None => return self.invalid(ValidationError::MissingPerson),
            }
        }

        let Some(description) = self.console.prompt("Description (\"-\" clears)")? else {
            return Ok(Flow::Stop);
        };
        match description.as_str() {
            "" => {}
            "-" => draft.description = None,
            d => draft.description = Some(d.to_string()),
        }

        let Some(when) = self.console.prompt("Date (YYYY-MM-DD [HH:MM])")? else {
            return Ok(Flow::Stop);
        };
        if !when.is_empty() {
            match parse_timestamp(&when) {
                Some(ts) => draft.timestamp = Some(ts),
                None => {
                    self.console.say(&format!("\"{when}\" is not a date."))?;
                    return Ok(Flow::Continue);
                }
            }
        }

        let result = self.store.update(records, id, draft);
        self.report(result, "Entry updated.")
    }

    fn delete(&mut self, records: &[ExpenseRecord], row: usize) -> Result<Flow> {
        let Some((id, current)) = self.resolve(records, row)? else {
            return Ok(Flow::Continue);
        };
        let label = row_label(current, self.symbol());
        let Some(answer) = self.console.prompt(&format!("Delete {label}? [y/N]"))? else {
            return Ok(Flow::Stop);
        };
        if !is_yes(&answer) {
            return Ok(Flow::Continue);
        }
        let result = self.store.delete(records, id);
        self.report(result, "Entry deleted.")
    }

    fn clear(&mut self) -> Result<Flow> {
        let Some(answer) = self
            .console
            .prompt("Clear ALL expense history? This cannot be undone [y/N]")?
        else {
            return Ok(Flow::Stop);
        };
        if !is_yes(&answer) {
            return Ok(Flow::Continue);
        }
        let result = self.store.clear();
        self.report(result, "All expense history cleared.")
    }

    fn invalid(&mut self, err: ValidationError) -> Result<Flow> {
        self.console.say(&err.to_string())?;
        Ok(Flow::Continue)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
