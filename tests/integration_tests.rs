//! Integration tests for SqlFS
//!
//! End-to-end use of the `SqlFs` handle over file-backed SQLite databases.

mod common;

use std::io::{self, Write};
use std::thread;

use common::{pattern, read_all};
use sqlfs::{Config, SqlFs, SqlFsError, SqliteConnection, TableStat};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_db() -> (TempDir, SqliteConnection) {
    let temp_dir = TempDir::new().unwrap();
    let conn = SqliteConnection::open(&temp_dir.path().join("files.db")).unwrap();
    (temp_dir, conn)
}

fn small_chunks() -> Config {
    Config::builder()
        .chunk_capacity(64)
        .fetch_batch(4)
        .build()
        .unwrap()
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_file_lifecycle() {
    let (_temp, conn) = setup_temp_db();
    let fs = SqlFs::new(&conn, small_chunks()).unwrap();
    let data = pattern(1000);

    assert!(!fs.exists("report").unwrap());

    let mut writer = fs.create("report").unwrap();
    writer.write_all(&data).unwrap();
    writer.close().unwrap();

    assert!(fs.exists("report").unwrap());
    assert_eq!(fs.stat("report").unwrap(), TableStat { chunks: 16, bytes: 1000 });

    let mut reader = fs.open("report").unwrap();
    assert_eq!(read_all(&mut reader), data);
    reader.close().unwrap();

    fs.remove("report").unwrap();
    assert!(!fs.exists("report").unwrap());
    assert!(matches!(fs.open("report"), Err(SqlFsError::NotFound(_))));
    assert!(matches!(fs.remove("report"), Err(SqlFsError::NotFound(_))));
    assert!(!fs.remove_if_exists("report").unwrap());
}

#[test]
fn test_content_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("persist.db");
    let data = pattern(5000);

    {
        let conn = SqliteConnection::open(&path).unwrap();
        let fs = SqlFs::new(&conn, small_chunks()).unwrap();
        let mut writer = fs.create("durable").unwrap();
        io::copy(&mut &data[..], &mut writer).unwrap();
        writer.close().unwrap();
    }

    let conn = SqliteConnection::open(&path).unwrap();
    let fs = SqlFs::new(&conn, small_chunks()).unwrap();
    let mut reader = fs.open("durable").unwrap();

    assert_eq!(read_all(&mut reader), data);
}

#[test]
fn test_reader_chunk_size_independent_of_writer() {
    let (_temp, conn) = setup_temp_db();
    let data = pattern(777);

    let writer_fs = SqlFs::new(&conn, Config::builder().chunk_capacity(100).build().unwrap()).unwrap();
    let mut writer = writer_fs.create("mixed").unwrap();
    writer.write(&data).unwrap();
    writer.close().unwrap();

    // Chunk capacity only shapes writes; any reader config reads it back
    let reader_fs = SqlFs::new(&conn, Config::builder().chunk_capacity(7).fetch_batch(1).build().unwrap()).unwrap();
    let mut reader = reader_fs.open("mixed").unwrap();

    assert_eq!(read_all(&mut reader), data);
}

#[test]
fn test_many_files_share_one_connection() {
    let (_temp, conn) = setup_temp_db();
    let fs = SqlFs::with_defaults(&conn);

    for i in 0..5 {
        let mut writer = fs.create(&format!("file_{}", i)).unwrap();
        writer.write(&vec![i as u8; 100 * (i + 1)]).unwrap();
        writer.close().unwrap();
    }

    for i in 0..5 {
        let mut reader = fs.open(&format!("file_{}", i)).unwrap();
        assert_eq!(read_all(&mut reader), vec![i as u8; 100 * (i + 1)]);
    }
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_writers_on_separate_threads() {
    let (_temp, conn) = setup_temp_db();

    thread::scope(|s| {
        for t in 0..4 {
            let conn = &conn;
            s.spawn(move || {
                let fs = SqlFs::new(conn, small_chunks()).unwrap();
                let mut writer = fs.create(&format!("thread_{}", t)).unwrap();
                for _ in 0..10 {
                    writer.write(&[t as u8; 50]).unwrap();
                }
                writer.close().unwrap();
            });
        }
    });

    let fs = SqlFs::new(&conn, small_chunks()).unwrap();
    for t in 0..4 {
        let mut reader = fs.open(&format!("thread_{}", t)).unwrap();
        assert_eq!(read_all(&mut reader), vec![t as u8; 500]);
    }
}
