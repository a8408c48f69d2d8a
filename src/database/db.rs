//! SQLite-backed data source
//!
//! Holds folders, decks and flashcards. Decks may belong to a folder (nullable
//! `folder_id`); flashcards always belong to a deck. Creation dates are stored
//! as ISO 8601 timestamps and returned unmodified.

use crate::error::{AppError, Result};
use crate::models::{Deck, Flashcard, Folder};
use crate::services::DataSource;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Current local time in the format stored in `creation_date` columns
fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn deck_from_row(row: &Row) -> rusqlite::Result<Deck> {
    Ok(Deck {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        creation_date: row.get(3)?,
        folder_id: row.get(4)?,
    })
}

fn flashcard_from_row(row: &Row) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        creation_date: row.get(3)?,
        deck_id: row.get(4)?,
    })
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure the tables exist
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        info!("Opened database {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock leaves no partial writes behind, so keep going
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Creates a folder and returns its id
    pub fn new_folder(&self, name: &str, description: &str) -> Result<i64> {
        insert_folder(&self.lock(), name, description)
    }

    /// Creates a deck, optionally inside a folder, and returns its id
    pub fn new_deck(&self, name: &str, description: &str, folder_id: Option<i64>) -> Result<i64> {
        insert_deck(&self.lock(), name, description, folder_id)
    }

    /// Adds a flashcard to a deck and returns its id
    pub fn add_flashcard(&self, deck_id: i64, question: &str, answer: &str) -> Result<i64> {
        insert_flashcard(&self.lock(), deck_id, question, answer)
    }

    pub fn deck_count(&self) -> Result<i64> {
        count_decks(&self.lock())
    }

    /// Fills an empty database with a filed deck and an unfiled one.
    /// Returns false when decks already exist and nothing was added.
    /// Runs in one transaction: a failure leaves the database empty.
    pub fn seed_sample_data(&self) -> Result<bool> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        if count_decks(&tx)? > 0 {
            return Ok(false);
        }

        let languages = insert_folder(&tx, "Languages", "Vocabulary decks")?;
        let polish = insert_deck(&tx, "Polish Vocabulary", "Everyday words", Some(languages))?;
        insert_flashcard(&tx, polish, "cześć", "hello")?;
        insert_flashcard(&tx, polish, "dziękuję", "thank you")?;
        insert_flashcard(&tx, polish, "proszę", "please")?;
        insert_flashcard(&tx, polish, "do widzenia", "goodbye")?;

        let capitals = insert_deck(&tx, "Capitals", "European capitals", None)?;
        insert_flashcard(&tx, capitals, "Norway", "Oslo")?;
        insert_flashcard(&tx, capitals, "Poland", "Warsaw")?;
        insert_flashcard(&tx, capitals, "Portugal", "Lisbon")?;

        tx.commit()?;
        info!("Sample data created");
        Ok(true)
    }
}

fn insert_folder(conn: &Connection, name: &str, description: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO folders (name, description, creation_date) VALUES (?1, ?2, ?3)",
        params![name, description, now_timestamp()],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_deck(
    conn: &Connection,
    name: &str,
    description: &str,
    folder_id: Option<i64>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO decks (name, description, creation_date, folder_id) VALUES (?1, ?2, ?3, ?4)",
        params![name, description, now_timestamp(), folder_id],
    )?;
    let id = conn.last_insert_rowid();
    info!("Deck '{}' created with id {}", name, id);
    Ok(id)
}

fn insert_flashcard(conn: &Connection, deck_id: i64, question: &str, answer: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO flashcards (question, answer, creation_date, deck_id) VALUES (?1, ?2, ?3, ?4)",
        params![question, answer, now_timestamp(), deck_id],
    )?;
    Ok(conn.last_insert_rowid())
}

fn count_decks(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM decks", [], |row| row.get(0))?;
    Ok(count)
}

/// Creates the folders, decks and flashcards tables if missing
fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS folders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            creation_date TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS decks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            creation_date TEXT NOT NULL,
            folder_id INTEGER,
            FOREIGN KEY (folder_id) REFERENCES folders(id)
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS flashcards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            creation_date TEXT NOT NULL,
            deck_id INTEGER NOT NULL,
            FOREIGN KEY (deck_id) REFERENCES decks(id) ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

impl DataSource for SqliteStore {
    fn get_folders(&self) -> Result<Vec<Folder>> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT id, name, description, creation_date FROM folders ORDER BY id")?;

        let folders = stmt
            .query_map([], |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    creation_date: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<Folder>>>()?;

        Ok(folders)
    }

    fn get_unfiled_decks(&self) -> Result<Vec<Deck>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, creation_date, folder_id FROM decks
             WHERE folder_id IS NULL OR folder_id = 0 ORDER BY id",
        )?;

        let decks = stmt
            .query_map([], deck_from_row)?
            .collect::<rusqlite::Result<Vec<Deck>>>()?;

        Ok(decks)
    }

    fn get_decks_by_folder_id(&self, folder_id: i64) -> Result<Vec<Deck>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, creation_date, folder_id FROM decks
             WHERE folder_id = ?1 ORDER BY id",
        )?;

        let decks = stmt
            .query_map(params![folder_id], deck_from_row)?
            .collect::<rusqlite::Result<Vec<Deck>>>()?;

        Ok(decks)
    }

    fn get_deck_by_id(&self, deck_id: i64) -> Result<Deck> {
        let conn = self.lock();
        conn.query_row(
            "SELECT id, name, description, creation_date, folder_id FROM decks WHERE id = ?1",
            params![deck_id],
            deck_from_row,
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("deck {}", deck_id)))
    }

    fn get_flashcards_by_deck_id(&self, deck_id: i64) -> Result<Vec<Flashcard>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, creation_date, deck_id FROM flashcards
             WHERE deck_id = ?1 ORDER BY id",
        )?;

        let flashcards = stmt
            .query_map(params![deck_id], flashcard_from_row)?
            .collect::<rusqlite::Result<Vec<Flashcard>>>()?;

        Ok(flashcards)
    }
}
