/*!
 * SQLite connection handling.
 *
 * One connection is shared behind a mutex. Async callers go through
 * [`DatabaseConnection::execute_async`] and
 * [`DatabaseConnection::transaction_async`], which move the work onto the
 * blocking pool so queries never stall the runtime.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use rusqlite::{Connection, Transaction};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::schema;

const DEFAULT_DB_FILENAME: &str = "section1983.db";
const DEFAULT_DB_DIRNAME: &str = "section1983";
const IN_MEMORY: &str = ":memory:";
/// How long a writer waits on a locked file before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

type Shared = Arc<Mutex<Connection>>;

fn lock(connection: &Shared) -> Result<MutexGuard<'_, Connection>> {
    connection
        .lock()
        .map_err(|e| anyhow!("Failed to acquire database lock: {}", e))
}

fn in_transaction<F, T>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let result = f(&tx)?;
    tx.commit()?;
    Ok(result)
}

/// Shared handle to the complaint database
#[derive(Clone)]
pub struct DatabaseConnection {
    db_path: PathBuf,
    connection: Shared,
}

impl std::fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("db_path", &self.db_path)
            .finish()
    }
}

impl DatabaseConnection {
    /// Open the database in the platform data directory
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_database_path()?)
    }

    /// Open (or create) the database file at `db_path` and migrate it
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
        }

        info!("Opening database at {}", db_path.display());
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        // journal_mode answers with a row, so it cannot go through pragma_update
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        Self::wrap(db_path, conn)
    }

    /// Private in-memory database, used by tests
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::wrap(PathBuf::from(IN_MEMORY), conn)
    }

    fn wrap(db_path: PathBuf, conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)?;
        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<data dir>/section1983/section1983.db`
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY
    }

    /// Run `f` with the connection on the current thread
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = lock(&self.connection)?;
        f(&conn)
    }

    /// Run `f` on the blocking pool
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();
        tokio::task::spawn_blocking(move || {
            let conn = lock(&connection)?;
            f(&conn)
        })
            .await
            .context("Database task panicked")?
    }

    /// Run `f` in a transaction; an error rolls everything back
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T>,
    {
        let mut conn = lock(&self.connection)?;
        in_transaction(&mut conn, f)
    }

    /// [`Self::transaction`] on the blocking pool
    pub async fn transaction_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = lock(&connection)?;
            in_transaction(&mut conn, f)
        })
            .await
            .context("Database transaction task panicked")?
    }

    /// Row counts per table and the file size
    pub fn stats(&self) -> Result<DatabaseStats> {
        let file_size_bytes = if self.is_in_memory() {
            0
        } else {
            std::fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0)
        };

        self.execute(|conn| {
            let count = |table: &str| -> Result<i64> {
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
                    .with_context(|| format!("Failed to count {}", table))
            };

            Ok(DatabaseStats {
                user_count: count("users")?,
                document_count: count("lawsuit_documents")?,
                section_count: count("document_sections")?,
                template_count: count("legal_templates")?,
                discount_code_count: count("discount_codes")?,
                file_size_bytes,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub user_count: i64,
    pub document_count: i64,
    pub section_count: i64,
    pub template_count: i64,
    pub discount_code_count: i64,
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} users, {} documents, {} sections, {} templates, {} codes ({} KB)",
            self.user_count,
            self.document_count,
            self.section_count,
            self.template_count,
            self.discount_code_count,
            self.file_size_bytes / 1024
        )
    }
}
