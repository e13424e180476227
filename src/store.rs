use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::Result;
use crate::models::{NewTask, Task, User};

const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        due_date INTEGER,
        is_done INTEGER NOT NULL DEFAULT 0,
        is_important INTEGER NOT NULL DEFAULT 0,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks(user_id);
";

/// SQLite-backed store for users and tasks.
///
/// Holds only the database path; each operation opens its own connection
/// with foreign keys enabled, and SQLite's transaction mechanism
/// serializes concurrent writes.
#[derive(Clone, Debug)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Open the store, creating the database file and schema if needed.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self { db_path };
        store.connect()?.execute_batch(SCHEMA)?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    pub fn create_user(&self, full_name: &str, email: &str, password_hash: &str) -> Result<User> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO users (full_name, email, password_hash) VALUES (?1, ?2, ?3)",
            params![full_name, email, password_hash],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, email, "created user");
        Ok(User {
            id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.connect()?;
        let user = conn
            .query_row(
                "SELECT id, full_name, email, password_hash FROM users WHERE email = ?1",
                params![email],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        full_name: row.get(1)?,
                        email: row.get(2)?,
                        password_hash: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// All tasks owned by a user, newest first.
    pub fn tasks_for_user(&self, user_id: i64) -> Result<Vec<Task>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, due_date, is_done, is_important, user_id
             FROM tasks WHERE user_id = ?1 ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(Task {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                due_date: row.get::<_, Option<i64>>(3)?.and_then(date_from_timestamp),
                is_done: row.get(4)?,
                is_important: row.get(5)?,
                user_id: row.get(6)?,
            })
        })?;

        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    pub fn add_task(&self, task: &NewTask) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO tasks (title, description, due_date, is_done, is_important, user_id)
             VALUES (?1, ?2, ?3, 0, ?4, ?5)",
            params![
                task.title,
                task.description,
                task.due_date.map(timestamp_from_date),
                task.is_important,
                task.user_id,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, user_id = task.user_id, "added task");
        Ok(id)
    }

    pub fn update_task(&self, task: &Task) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "UPDATE tasks
             SET title = ?1, description = ?2, due_date = ?3, is_done = ?4, is_important = ?5
             WHERE id = ?6",
            params![
                task.title,
                task.description,
                task.due_date.map(timestamp_from_date),
                task.is_done,
                task.is_important,
                task.id,
            ],
        )?;
        debug!(id = task.id, "updated task");
        Ok(())
    }

    pub fn delete_task(&self, task_id: i64) -> Result<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
        debug!(id = task_id, "deleted task");
        Ok(())
    }
}

// Due dates are persisted as Unix timestamps at midnight UTC.
fn timestamp_from_date(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn date_from_timestamp(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path().join("taskflow.db")).expect("open store");
        (dir, store)
    }

    fn new_task(user_id: i64, title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            due_date: None,
            is_important: false,
            user_id,
        }
    }

    #[test]
    fn test_create_and_look_up_user() {
        let (_dir, store) = test_store();
        let user = store
            .create_user("Ada Lovelace", "ada@example.com", "hash")
            .unwrap();

        let found = store.user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(found, user);
        assert!(store.user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_is_rejected_by_schema() {
        let (_dir, store) = test_store();
        store
            .create_user("Ada Lovelace", "ada@example.com", "hash")
            .unwrap();
        let result = store.create_user("Someone Else", "ada@example.com", "hash2");
        assert!(result.is_err());
    }

    #[test]
    fn test_task_owner_must_exist() {
        let (_dir, store) = test_store();
        let result = store.add_task(&new_task(42, "orphan"));
        assert!(result.is_err());
    }

    #[test]
    fn test_tasks_are_listed_newest_first() {
        let (_dir, store) = test_store();
        let user = store.create_user("Ada", "ada@example.com", "hash").unwrap();

        store.add_task(&new_task(user.id, "first")).unwrap();
        store.add_task(&new_task(user.id, "second")).unwrap();

        let tasks = store.tasks_for_user(user.id).unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_tasks_are_scoped_to_their_owner() {
        let (_dir, store) = test_store();
        let ada = store.create_user("Ada", "ada@example.com", "hash").unwrap();
        let bob = store.create_user("Bob", "bob@example.com", "hash").unwrap();

        store.add_task(&new_task(ada.id, "hers")).unwrap();
        store.add_task(&new_task(bob.id, "his")).unwrap();

        let tasks = store.tasks_for_user(ada.id).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "hers");
    }

    #[test]
    fn test_due_date_round_trip() {
        let (_dir, store) = test_store();
        let user = store.create_user("Ada", "ada@example.com", "hash").unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

        let mut task = new_task(user.id, "dated");
        task.due_date = Some(due);
        store.add_task(&task).unwrap();
        store.add_task(&new_task(user.id, "undated")).unwrap();

        let tasks = store.tasks_for_user(user.id).unwrap();
        assert_eq!(tasks[1].due_date, Some(due));
        assert_eq!(tasks[0].due_date, None);
    }

    #[test]
    fn test_toggle_done_preserves_other_fields() {
        let (_dir, store) = test_store();
        let user = store.create_user("Ada", "ada@example.com", "hash").unwrap();

        let mut task = new_task(user.id, "toggle me");
        task.description = "details".to_string();
        task.is_important = true;
        store.add_task(&task).unwrap();

        let before = store.tasks_for_user(user.id).unwrap().remove(0);
        assert!(!before.is_done);

        let mut toggled = before.clone();
        toggled.is_done = true;
        store.update_task(&toggled).unwrap();

        let after = store.tasks_for_user(user.id).unwrap().remove(0);
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.is_important, before.is_important);
        assert!(after.is_done);
    }

    #[test]
    fn test_deleted_task_disappears_from_reads() {
        let (_dir, store) = test_store();
        let user = store.create_user("Ada", "ada@example.com", "hash").unwrap();

        let keep = store.add_task(&new_task(user.id, "keep")).unwrap();
        let gone = store.add_task(&new_task(user.id, "gone")).unwrap();

        store.delete_task(gone).unwrap();

        let tasks = store.tasks_for_user(user.id).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, keep);
    }
}
