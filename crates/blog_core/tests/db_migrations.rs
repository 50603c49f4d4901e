use blog_core::db::migrations::latest_version;
use blog_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "authors");
    assert_table_exists(&conn, "posts");
}

#[test]
fn opening_same_database_twice_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO authors (name, phone_number) VALUES ('Jane Doe', '5551234567');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn authors_name_is_unique_at_storage_level() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Jane Doe', '5551234567');",
        [],
    )
    .unwrap();

    let err = conn
        .execute(
            "INSERT INTO authors (name, phone_number) VALUES ('Jane Doe', '5550000000');",
            [],
        )
        .unwrap_err();
    assert!(DbError::from(err).is_unique_violation());
}

#[test]
fn created_at_is_set_and_updated_at_is_null_on_insert() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Jane Doe', '5551234567');",
        [],
    )
    .unwrap();

    let (created_at, updated_at): (i64, Option<i64>) = conn
        .query_row(
            "SELECT created_at, updated_at FROM authors;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert!(created_at > 0);
    assert_eq!(updated_at, None);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

#[test]
fn posts_category_is_constrained_at_storage_level() {
    let conn = open_db_in_memory().unwrap();

    for label in ["fiction", "Poetry", ""] {
        let result = conn.execute(
            "INSERT INTO posts (title, content, summary, category)
             VALUES ('Top', 'x', 'y', ?1);",
            [label],
        );
        assert!(result.is_err(), "category `{label}` should be rejected");
    }

    for label in ["Fiction", "Non-Fiction"] {
        conn.execute(
            "INSERT INTO posts (title, content, summary, category)
             VALUES ('Top', 'x', 'y', ?1);",
            [label],
        )
        .unwrap();
    }
}
