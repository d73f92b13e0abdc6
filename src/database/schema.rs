/*!
 * Database schema and migrations.
 *
 * Each entry of [`MIGRATIONS`] moves the schema forward by one version and is
 * applied in its own transaction. The applied version lives in the
 * single-row `schema_version` table.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

const VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    updated_at TEXT NOT NULL
);";

/// Users, documents, sections, templates, codes and evidence
const V1_COMPLAINTS: &str = r#"
-- Accounts, profiles and subscriptions
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL DEFAULT '',
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_profiles (
    user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
    full_legal_name TEXT NOT NULL DEFAULT '',
    street_address TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    state TEXT NOT NULL DEFAULT '',
    zip_code TEXT NOT NULL DEFAULT '',
    phone_number TEXT NOT NULL DEFAULT '',
    total_api_cost REAL NOT NULL DEFAULT 0,
    api_cost_limit REAL NOT NULL DEFAULT 0.5,
    api_limit_reached_at TEXT,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subscriptions (
    user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
    plan_type TEXT NOT NULL DEFAULT 'free',
    is_active INTEGER NOT NULL DEFAULT 1,
    api_credit_balance REAL NOT NULL DEFAULT 0.5,
    monthly_credit_amount REAL NOT NULL DEFAULT 10,
    updated_at TEXT NOT NULL
);

-- Documents and their sections
CREATE TABLE IF NOT EXISTS lawsuit_documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    incident_date TEXT,
    incident_location TEXT NOT NULL DEFAULT '',
    incident_street_address TEXT NOT NULL DEFAULT '',
    incident_city TEXT NOT NULL DEFAULT '',
    incident_state TEXT NOT NULL DEFAULT '',
    incident_county TEXT NOT NULL DEFAULT '',
    defendants TEXT NOT NULL DEFAULT '',
    youtube_url TEXT NOT NULL DEFAULT '',
    additional_evidence TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'draft',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_user ON lawsuit_documents(user_id);

CREATE TABLE IF NOT EXISTS document_sections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES lawsuit_documents(id) ON DELETE CASCADE,
    section_type TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0,
    ai_enhanced INTEGER NOT NULL DEFAULT 0,
    ai_cost REAL NOT NULL DEFAULT 0,
    ai_model TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(document_id, section_type)
);

CREATE INDEX IF NOT EXISTS idx_sections_document ON document_sections(document_id, sort_order);

-- Static legal boilerplate
CREATE TABLE IF NOT EXISTS legal_templates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    violation_type TEXT NOT NULL,
    location_type TEXT NOT NULL,
    section_type TEXT NOT NULL,
    template_text TEXT NOT NULL,
    UNIQUE(violation_type, location_type, section_type)
);

CREATE INDEX IF NOT EXISTS idx_templates_lookup ON legal_templates(violation_type, location_type);

-- Discount and referral codes
CREATE TABLE IF NOT EXISTS discount_codes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE COLLATE NOCASE,
    discount_type TEXT NOT NULL DEFAULT 'percentage',
    discount_value REAL NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    max_uses INTEGER,
    times_used INTEGER NOT NULL DEFAULT 0,
    valid_from TEXT,
    valid_until TEXT,
    created_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_discount_codes_owner ON discount_codes(created_by);

-- Video evidence
CREATE TABLE IF NOT EXISTS evidence_segments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES lawsuit_documents(id) ON DELETE CASCADE,
    youtube_url TEXT NOT NULL,
    start_seconds INTEGER NOT NULL DEFAULT 0,
    end_seconds INTEGER NOT NULL DEFAULT 0,
    start_time TEXT NOT NULL DEFAULT '',
    end_time TEXT NOT NULL DEFAULT '',
    include_in_complaint INTEGER NOT NULL DEFAULT 0,
    violation_tags TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_segments_document ON evidence_segments(document_id);

CREATE TABLE IF NOT EXISTS transcript_quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    segment_id INTEGER NOT NULL REFERENCES evidence_segments(id) ON DELETE CASCADE,
    speaker_name TEXT NOT NULL DEFAULT '',
    speaker_role TEXT NOT NULL DEFAULT '',
    text TEXT NOT NULL,
    significance TEXT NOT NULL DEFAULT '',
    include_in_document INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0,
    start_position INTEGER NOT NULL DEFAULT 0,
    violation_tags TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_quotes_segment ON transcript_quotes(segment_id);
"#;

/// Ordered migrations; entry `n` produces version `n + 1`
const MIGRATIONS: &[&str] = &[V1_COMPLAINTS];

/// Current schema version
pub const SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

/// Bring the schema up to [`SCHEMA_VERSION`]
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Foreign keys are per-connection in SQLite; cascades depend on them
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    conn.execute_batch(VERSION_TABLE)
        .context("Failed to create schema_version table")?;

    let current = get_schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(anyhow!(
            "Database schema v{} is newer than this build supports (v{})",
            current,
            SCHEMA_VERSION
        ));
    }
    if current == SCHEMA_VERSION {
        debug!("Database schema is up to date (v{})", current);
        return Ok(());
    }

    for (index, migration) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = index as i32 + 1;
        info!("Applying database schema v{}", version);
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration)
            .with_context(|| format!("Failed to apply schema v{}", version))?;
        set_schema_version(&tx, version)?;
        tx.commit()?;
    }

    Ok(())
}

/// Applied schema version, 0 for a fresh database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let version = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| row.get(0))
        .optional()
        .context("Failed to read schema version")?;
    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}
