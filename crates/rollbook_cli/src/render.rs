//! Text rendering of the displayed student list.

use rollbook_core::DisplayRow;
use std::io::{self, Write};

const HEADERS: [&str; 4] = ["Roll No", "Name", "Course", "Marks"];

/// Writes `rows` as an aligned table, or a placeholder line when empty.
pub fn render_rows(out: &mut impl Write, rows: &[DisplayRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "(no students)");
    }

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|(roll_no, name, course, marks)| {
            [roll_no.clone(), name.clone(), course.clone(), marks.to_string()]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &HEADERS.map(String::from), &widths)?;
    let rule = widths.map(|width| "-".repeat(width));
    write_line(out, &rule, &widths)?;
    for row in &cells {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

fn write_line(out: &mut impl Write, cells: &[String; 4], widths: &[usize; 4]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (cell, &width))| {
            // Marks is right-aligned.
            if index == 3 {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{}", line.trim_end())
}
