use rollbook_core::db::migrations::latest_version;
use rollbook_core::db::open_db_in_memory;
use rollbook_core::{RepoError, SqliteStudentRepository, StudentRecord, StudentRepository};
use rusqlite::Connection;
use std::collections::HashSet;

#[test]
fn insert_distinct_keys_lists_exactly_that_set_in_insert_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let inserted = vec![
        StudentRecord::new("R3", "Carol", "ME", 75),
        StudentRecord::new("R1", "Alice", "CS", 90),
        StudentRecord::new("R2", "Bob", "EE", 70),
    ];
    for record in &inserted {
        repo.insert_student(record).unwrap();
    }

    let listed = repo.list_students().unwrap();
    assert_eq!(listed, inserted);
    let keys: HashSet<_> = listed.iter().map(|record| record.roll_no.as_str()).collect();
    assert_eq!(keys.len(), listed.len());
}

#[test]
fn duplicate_insert_keeps_existing_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let original = StudentRecord::new("R1", "Alice", "CS", 90);
    repo.insert_student(&original).unwrap();

    let err = repo
        .insert_student(&StudentRecord::new("R1", "Bob", "EE", 70))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateKey(ref key) if key == "R1"));
    assert_eq!(repo.list_students().unwrap(), vec![original]);
}

#[test]
fn update_changes_mutable_fields_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    repo.insert_student(&StudentRecord::new("R1", "Alice", "CS", 90))
        .unwrap();

    repo.update_student(&StudentRecord::new("R1", "Alicia", "Physics", 95))
        .unwrap();

    let loaded = repo.get_student("R1").unwrap().unwrap();
    assert_eq!(loaded, StudentRecord::new("R1", "Alicia", "Physics", 95));
}

#[test]
fn update_missing_key_is_not_found_and_never_upserts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    repo.insert_student(&StudentRecord::new("R1", "Alice", "CS", 90))
        .unwrap();
    let before = repo.list_students().unwrap();

    let err = repo
        .update_student(&StudentRecord::new("R2", "Bob", "EE", 70))
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound(ref key) if key == "R2"));
    assert_eq!(repo.list_students().unwrap(), before);
    assert!(repo.get_student("R2").unwrap().is_none());
}

#[test]
fn delete_then_get_is_absent_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    repo.insert_student(&StudentRecord::new("R1", "Alice", "CS", 90))
        .unwrap();

    repo.delete_student("R1").unwrap();
    assert!(repo.get_student("R1").unwrap().is_none());

    let err = repo.delete_student("R1").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn blank_roll_no_is_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let err = repo
        .insert_student(&StudentRecord::new("  ", "Nobody", "CS", 1))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_students().unwrap().is_empty());
}

#[test]
fn roll_no_lookup_is_exact() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    repo.insert_student(&StudentRecord::new("R1", "Alice", "CS", 90))
        .unwrap();

    assert!(repo.get_student("r1").unwrap().is_none());
    assert!(repo.get_student("R1 ").unwrap().is_none());
}

#[test]
fn blob_marks_are_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO student (roll_no, name, course, marks) VALUES ('R1', 'Alice', 'CS', CAST('90' AS BLOB));",
        [],
    )
    .unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let err = repo.get_student("R1").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn malformed_marks_are_rejected_on_read() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE student (roll_no TEXT PRIMARY KEY, name TEXT, course TEXT, marks);
         INSERT INTO student VALUES ('R1', 'Alice', 'CS', 'ninety');
         INSERT INTO student VALUES ('R2', 'Bob', 'EE', ' 70 ');
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    assert_eq!(repo.get_student("R2").unwrap().unwrap().marks, 70);
    let err = repo.list_students().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("ninety")));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteStudentRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_student_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStudentRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("student"))
    ));
}

#[test]
fn repository_rejects_student_table_missing_marks() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE student (roll_no TEXT PRIMARY KEY, name TEXT, course TEXT);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    let result = SqliteStudentRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "student",
            column: "marks"
        })
    ));
}
