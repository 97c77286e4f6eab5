use rollbook_core::{FormFields, StudentForm, StudentRecord, StudentRepository, StudentStore};
use rusqlite::{params, Connection};
use std::path::Path;

/// Writes a `students.db` the way the pre-versioned app did: same DDL, same
/// positional INSERT, every field bound as form text.
fn seed_legacy_db(path: &Path, rows: &[(&str, &str, &str, &str)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute(
        "
        CREATE TABLE IF NOT EXISTS student (
            roll_no TEXT PRIMARY KEY,
            name TEXT,
            course TEXT,
            marks INTEGER
        )
    ",
        [],
    )
    .unwrap();
    for (roll_no, name, course, marks) in rows {
        conn.execute(
            "INSERT INTO student VALUES (?, ?, ?, ?)",
            params![roll_no, name, course, marks],
        )
        .unwrap();
    }
}

fn quarantined(path: &Path) -> Vec<(String, String)> {
    let conn = Connection::open(path).unwrap();
    let mut stmt = conn
        .prepare("SELECT coalesce(roll_no, ''), reason FROM student_quarantine ORDER BY rowid;")
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    rows
}

#[test]
fn legacy_rows_with_blank_fields_are_quarantined_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    seed_legacy_db(
        &path,
        &[
            ("R1", "Alice", "CS", "90"),
            ("R2", "Bob", "EE", ""),
            ("", "", "", "5"),
            ("R4", "Dan", "ME", "88.5"),
            ("R5", "Eve", "CS", "-3"),
        ],
    );

    let store = StudentStore::open(&path).unwrap();

    assert_eq!(
        store.list_students().unwrap(),
        vec![
            StudentRecord::new("R1", "Alice", "CS", 90),
            StudentRecord::new("R5", "Eve", "CS", -3),
        ]
    );
    assert_eq!(
        quarantined(&path),
        vec![
            ("".to_string(), "blank_roll_no".to_string()),
            ("R2".to_string(), "invalid_marks".to_string()),
            ("R4".to_string(), "invalid_marks".to_string()),
        ]
    );
}

#[test]
fn form_stays_usable_after_adopting_legacy_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    seed_legacy_db(
        &path,
        &[("R1", "Alice", "CS", "90"), ("R2", "Bob", "EE", ""), ("", "", "", "5")],
    );
    let mut form = StudentForm::new(StudentStore::open(&path).unwrap());

    assert!(form.on_view_all().is_none());
    assert_eq!(form.displayed().len(), 1);

    // The quarantined key is free again and can be re-entered properly.
    let notice = form
        .on_add(&FormFields::new("R2", "Bob", "EE", "70"))
        .unwrap();
    assert!(!notice.is_error(), "{notice}");
    assert_eq!(form.displayed().len(), 2);
}

#[test]
fn reopening_after_quarantine_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    seed_legacy_db(&path, &[("R1", "Alice", "CS", "90"), ("R2", "Bob", "EE", "")]);

    StudentStore::open(&path).unwrap();
    let store = StudentStore::open(&path).unwrap();

    assert_eq!(store.list_students().unwrap().len(), 1);
    assert_eq!(quarantined(&path).len(), 1);
}
