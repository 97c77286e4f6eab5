//! Line-oriented form session.
//!
//! # Responsibility
//! - Read one command per line and dispatch it to the form.
//! - Print the resulting notice, then the displayed list.
//!
//! # Invariants
//! - A bad line never ends the session; only `exit` or end of input do.

use crate::command::Command;
use crate::render::render_rows;
use log::info;
use rollbook_core::{StudentForm, StudentRepository};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "rollbook > ";

const HELP: &str = "\
Commands:
  add    roll=<r> name=<n> course=<c> marks=<m>   add a student
  update roll=<r> name=<n> course=<c> marks=<m>   replace name, course and marks
  delete roll=<r>                                 delete a student
  search roll=<r>                                 show only that student
  list                                            show all students
  help                                            show this help
  exit                                            leave
Values may also be given positionally in the order roll, name, course, marks.
Quote values that contain spaces: name=\"Ada Lovelace\".";

/// Runs the session until `exit` or end of input.
///
/// Starts by showing the full list, as opening the form does.
pub fn run_repl<R: StudentRepository>(
    mut form: StudentForm<R>,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<()> {
    info!("event=session_start module=cli status=ok");
    if let Some(notice) = form.on_view_all() {
        writeln!(out, "{notice}")?;
    }
    render_rows(&mut out, form.displayed())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let notice = match Command::try_from(line.as_str()) {
            Ok(Command::Exit) => break,
            Ok(Command::Help) => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Ok(Command::Add(fields)) => form.on_add(&fields),
            Ok(Command::Update(fields)) => form.on_update(&fields),
            Ok(Command::Delete(fields)) => form.on_delete(&fields),
            Ok(Command::Search(fields)) => form.on_search(&fields),
            Ok(Command::ViewAll) => form.on_view_all(),
            Err(message) => {
                writeln!(out, "Error: {message}")?;
                continue;
            }
        };

        if let Some(notice) = notice {
            writeln!(out, "{notice}")?;
        }
        render_rows(&mut out, form.displayed())?;
    }

    info!("event=session_end module=cli status=ok");
    Ok(())
}
