//! The interactive command shell driving a [`DataController`].

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::debug;

use labbook_core::{CellRef, ChangeTransport, CommitOutcome, DataController, EditControl};
use labbook_model::RowId;

use crate::render::render_page;

const HELP: &str = "\
commands:
  show                       render the current page
  page <n>                   jump to page n (selection is kept)
  select <id> [<id>...]      toggle row selection
  selpage                    toggle the current page
  selall                     toggle everything
  edit <id> <field> <value>  edit one cell; repeated fields as field.slot,
                             e.g. edit 3 quantity.2 4.5
  del                        delete the selected rows
  dup                        duplicate the selected rows
  refresh                    reload the view from the backend
  help                       this text
  quit                       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Show,
    Page(u32),
    Select(Vec<u64>),
    SelectPage,
    SelectAll,
    Edit {
        row: u64,
        base: String,
        slot: Option<u8>,
        value: String,
    },
    Delete,
    Duplicate,
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` means a blank line.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let command = match head {
        "show" => ShellCommand::Show,
        "page" => {
            let page = words
                .next()
                .ok_or("usage: page <n>")?
                .parse::<u32>()
                .map_err(|_| "page number must be a positive integer".to_string())?;
            ShellCommand::Page(page)
        }
        "select" => {
            let ids: Vec<u64> = words
                .map(|word| {
                    word.parse::<u64>()
                        .map_err(|_| format!("not a row id: {word}"))
                })
                .collect::<Result<_, _>>()?;
            if ids.is_empty() {
                return Err("usage: select <id> [<id>...]".to_string());
            }
            ShellCommand::Select(ids)
        }
        "selpage" => ShellCommand::SelectPage,
        "selall" => ShellCommand::SelectAll,
        "edit" => {
            let row = words
                .next()
                .ok_or("usage: edit <id> <field> <value>")?
                .parse::<u64>()
                .map_err(|_| "row id must be a positive integer".to_string())?;
            let field = words.next().ok_or("usage: edit <id> <field> <value>")?;
            let (base, slot) = match field.split_once('.') {
                Some((base, slot)) => {
                    let slot = slot
                        .parse::<u8>()
                        .map_err(|_| format!("not a slot index: {slot}"))?;
                    (base.to_string(), Some(slot))
                }
                None => (field.to_string(), None),
            };
            let value = words.collect::<Vec<_>>().join(" ");
            if value.is_empty() {
                return Err("usage: edit <id> <field> <value>".to_string());
            }
            ShellCommand::Edit {
                row,
                base,
                slot,
                value,
            }
        }
        "del" | "delete" => ShellCommand::Delete,
        "dup" | "duplicate" => ShellCommand::Duplicate,
        "refresh" => ShellCommand::Refresh,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };
    Ok(Some(command))
}

/// Read commands from stdin until quit or end of input.
pub fn run<T: ChangeTransport>(controller: &mut DataController<T>) -> Result<()> {
    let mut out = io::stdout();
    writeln!(out, "{}", render_page(controller))?;
    writeln!(out, "type 'help' for commands")?;
    write!(out, "labbook> ")?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => execute(controller, command, &mut out)?,
            Ok(None) => {}
            Err(message) => writeln!(out, "{message}")?,
        }
        write!(out, "labbook> ")?;
        out.flush()?;
    }
    Ok(())
}

fn execute<T: ChangeTransport>(
    controller: &mut DataController<T>,
    command: ShellCommand,
    out: &mut impl Write,
) -> Result<()> {
    debug!(?command, "shell command");
    match command {
        ShellCommand::Show => writeln!(out, "{}", render_page(controller))?,
        ShellCommand::Page(page) => match controller.goto_page(page) {
            Ok(()) => writeln!(out, "{}", render_page(controller))?,
            Err(error) => writeln!(out, "error: {error}")?,
        },
        ShellCommand::Select(ids) => {
            for id in ids {
                match RowId::new(id) {
                    Ok(id) => {
                        let selected = controller.toggle_row(id);
                        writeln!(
                            out,
                            "row {id} {}",
                            if selected { "selected" } else { "deselected" }
                        )?;
                    }
                    Err(error) => writeln!(out, "error: {error}")?,
                }
            }
        }
        ShellCommand::SelectPage => {
            controller.toggle_page();
            writeln!(out, "{} rows selected", controller.selection().len())?;
        }
        ShellCommand::SelectAll => {
            controller.toggle_all();
            writeln!(out, "{} rows selected", controller.selection().len())?;
        }
        ShellCommand::Edit {
            row,
            base,
            slot,
            value,
        } => edit_cell(controller, row, &base, slot, &value, out)?,
        ShellCommand::Delete => {
            let spinner = submit_spinner();
            let result = controller.delete_selected();
            settle(controller, spinner);
            if let Err(error) = result {
                writeln!(out, "error: {error}")?;
            } else {
                writeln!(out, "{}", render_page(controller))?;
            }
        }
        ShellCommand::Duplicate => {
            let spinner = submit_spinner();
            let result = controller.duplicate_selected();
            settle(controller, spinner);
            if let Err(error) = result {
                writeln!(out, "error: {error}")?;
            } else {
                writeln!(out, "{}", render_page(controller))?;
            }
        }
        ShellCommand::Refresh => match controller.refresh() {
            Ok(()) => writeln!(out, "{}", render_page(controller))?,
            Err(error) => writeln!(out, "error: {error}")?,
        },
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn edit_cell<T: ChangeTransport>(
    controller: &mut DataController<T>,
    row: u64,
    base: &str,
    slot: Option<u8>,
    value: &str,
    out: &mut impl Write,
) -> Result<()> {
    let row = match RowId::new(row) {
        Ok(row) => row,
        Err(error) => {
            writeln!(out, "error: {error}")?;
            return Ok(());
        }
    };
    let cell = match slot {
        Some(slot) => CellRef::slotted(row, base, slot),
        None => CellRef::new(row, base),
    };

    let session = match controller.begin_edit(&cell) {
        Ok(session) => session,
        Err(error) => {
            writeln!(out, "error: {error}")?;
            return Ok(());
        }
    };
    if let EditControl::Choice { options, .. } = &session.control {
        writeln!(out, "choices: {}", options.join(", "))?;
    }

    let spinner = submit_spinner();
    let result = controller.commit_edit(session, value);
    settle(controller, spinner);

    match result {
        Ok(CommitOutcome::Unchanged) => writeln!(out, "unchanged")?,
        Ok(CommitOutcome::Committed { display }) => {
            writeln!(out, "saved: {display}")?;
            writeln!(out, "{}", render_page(controller))?;
        }
        Ok(CommitOutcome::Rejected { display, message }) => {
            writeln!(out, "{message} reverted to: {display}")?;
        }
        Err(error) => writeln!(out, "error: {error}")?,
    }
    if let Some(message) = controller.take_error() {
        debug!(%message, "transient error dismissed");
    }
    Ok(())
}

/// The blocking loading indicator shown for a submission cycle.
fn submit_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("submitting changes...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Clear the spinner unless the submission never settled: with no retry, a
/// stuck loading state is the truthful rendering of a failed round-trip.
fn settle<T: ChangeTransport>(controller: &DataController<T>, spinner: ProgressBar) {
    if controller.ui().loading {
        spinner.abandon_with_message("submission did not settle; 'refresh' to recover");
    } else {
        spinner.finish_and_clear();
    }
}
