/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use super::connection::DatabaseConnection;
use super::models::{
    DiscountCodeRecord, DiscountType, DocumentRecord, DocumentStatus, EvidenceSegmentRecord,
    LegalTemplateRecord, PlanType, SectionRecord, SectionUpsert, SubscriptionRecord,
    TranscriptQuoteRecord, UserProfileRecord, UserRecord,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DOCUMENT_COLUMNS: &str = "id, user_id, title, description, incident_date, incident_location, \
     incident_street_address, incident_city, incident_state, incident_county, defendants, \
     youtube_url, additional_evidence, status, created_at, updated_at";

const SECTION_COLUMNS: &str = "id, document_id, section_type, title, content, sort_order, \
     ai_enhanced, ai_cost, ai_model, created_at, updated_at";

const TEMPLATE_COLUMNS: &str = "id, violation_type, location_type, section_type, template_text";

const DISCOUNT_COLUMNS: &str = "id, code, discount_type, discount_value, is_active, max_uses, \
     times_used, valid_from, valid_until, created_by";

const SEGMENT_COLUMNS: &str = "id, document_id, youtube_url, start_seconds, end_seconds, \
     start_time, end_time, include_in_complaint, violation_tags";

const QUOTE_COLUMNS: &str = "id, segment_id, speaker_name, speaker_role, text, significance, \
     include_in_document, sort_order, start_position, violation_tags";

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn map_document(row: &Row) -> rusqlite::Result<DocumentRecord> {
    Ok(DocumentRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        incident_date: row
            .get::<_, Option<String>>(4)?
            .and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok()),
        incident_location: row.get(5)?,
        incident_street_address: row.get(6)?,
        incident_city: row.get(7)?,
        incident_state: row.get(8)?,
        incident_county: row.get(9)?,
        defendants: row.get(10)?,
        youtube_url: row.get(11)?,
        additional_evidence: row.get(12)?,
        status: row
            .get::<_, String>(13)?
            .parse()
            .unwrap_or(DocumentStatus::Draft),
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

fn map_section(row: &Row) -> rusqlite::Result<SectionRecord> {
    Ok(SectionRecord {
        id: row.get(0)?,
        document_id: row.get(1)?,
        section_type: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        sort_order: row.get(5)?,
        ai_enhanced: row.get(6)?,
        ai_cost: row.get(7)?,
        ai_model: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn map_template(row: &Row) -> rusqlite::Result<LegalTemplateRecord> {
    Ok(LegalTemplateRecord {
        id: row.get(0)?,
        violation_type: row.get(1)?,
        location_type: row.get(2)?,
        section_type: row.get(3)?,
        template_text: row.get(4)?,
    })
}

/// Stored text that does not parse is a conversion error, not a silent default
fn parse_column<T>(idx: usize, value: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    value
        .parse()
        .map_err(|e: T::Err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn parse_timestamp_column(idx: usize, value: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    value
        .map(|v| {
            DateTime::parse_from_rfc3339(&v)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}

fn map_discount_code(row: &Row) -> rusqlite::Result<DiscountCodeRecord> {
    Ok(DiscountCodeRecord {
        id: row.get(0)?,
        code: row.get(1)?,
        discount_type: parse_column::<DiscountType>(2, &row.get::<_, String>(2)?)?,
        discount_value: row.get(3)?,
        is_active: row.get(4)?,
        max_uses: row.get(5)?,
        times_used: row.get(6)?,
        valid_from: parse_timestamp_column(7, row.get(7)?)?,
        valid_until: parse_timestamp_column(8, row.get(8)?)?,
        created_by: row.get(9)?,
    })
}

fn map_segment(row: &Row) -> rusqlite::Result<EvidenceSegmentRecord> {
    Ok(EvidenceSegmentRecord {
        id: row.get(0)?,
        document_id: row.get(1)?,
        youtube_url: row.get(2)?,
        start_seconds: row.get(3)?,
        end_seconds: row.get(4)?,
        start_time: row.get(5)?,
        end_time: row.get(6)?,
        include_in_complaint: row.get(7)?,
        violation_tags: row.get(8)?,
    })
}

fn map_quote(row: &Row) -> rusqlite::Result<TranscriptQuoteRecord> {
    Ok(TranscriptQuoteRecord {
        id: row.get(0)?,
        segment_id: row.get(1)?,
        speaker_name: row.get(2)?,
        speaker_role: row.get(3)?,
        text: row.get(4)?,
        significance: row.get(5)?,
        include_in_document: row.get(6)?,
        sort_order: row.get(7)?,
        start_position: row.get(8)?,
        violation_tags: row.get(9)?,
    })
}

/// Repository for database operations
#[derive(Clone, Debug)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert a user and return its id
    pub async fn create_user(&self, user: &UserRecord) -> Result<i64> {
        let user = user.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO users (username, email, first_name, last_name, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![user.username, user.email, user.first_name, user.last_name, now()],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        self.db
            .execute_async(move |conn| {
                let user = conn
                    .query_row(
                        "SELECT id, username, email, first_name, last_name FROM users WHERE id = ?1",
                        [user_id],
                        |row| {
                            Ok(UserRecord {
                                id: row.get(0)?,
                                username: row.get(1)?,
                                email: row.get(2)?,
                                first_name: row.get(3)?,
                                last_name: row.get(4)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(user)
            })
            .await
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let username = username.trim().to_string();

        self.db
            .execute_async(move |conn| {
                let user = conn
                    .query_row(
                        "SELECT id, username, email, first_name, last_name FROM users WHERE username = ?1",
                        [username],
                        |row| {
                            Ok(UserRecord {
                                id: row.get(0)?,
                                username: row.get(1)?,
                                email: row.get(2)?,
                                first_name: row.get(3)?,
                                last_name: row.get(4)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(user)
            })
            .await
    }

    /// Insert or replace the legal profile of a user
    pub async fn upsert_profile(&self, profile: &UserProfileRecord) -> Result<()> {
        let p = profile.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO user_profiles (
                        user_id, full_legal_name, street_address, city, state, zip_code,
                        phone_number, total_api_cost, api_cost_limit, api_limit_reached_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                    ON CONFLICT(user_id) DO UPDATE SET
                        full_legal_name = excluded.full_legal_name,
                        street_address = excluded.street_address,
                        city = excluded.city,
                        state = excluded.state,
                        zip_code = excluded.zip_code,
                        phone_number = excluded.phone_number,
                        total_api_cost = excluded.total_api_cost,
                        api_cost_limit = excluded.api_cost_limit,
                        api_limit_reached_at = excluded.api_limit_reached_at,
                        updated_at = excluded.updated_at
                    "#,
                    params![
                        p.user_id,
                        p.full_legal_name,
                        p.street_address,
                        p.city,
                        p.state,
                        p.zip_code,
                        p.phone_number,
                        p.total_api_cost,
                        p.api_cost_limit,
                        p.api_limit_reached_at,
                        now(),
                    ],
                )?;
                Ok(())
            })
            .await
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<Option<UserProfileRecord>> {
        self.db
            .execute_async(move |conn| Self::get_profile_sync(conn, user_id))
            .await
    }

    /// Get a profile (synchronous version for use within transactions)
    fn get_profile_sync(conn: &Connection, user_id: i64) -> Result<Option<UserProfileRecord>> {
        let profile = conn
            .query_row(
                r#"
                SELECT user_id, full_legal_name, street_address, city, state, zip_code,
                       phone_number, total_api_cost, api_cost_limit, api_limit_reached_at
                FROM user_profiles WHERE user_id = ?1
                "#,
                [user_id],
                |row| {
                    Ok(UserProfileRecord {
                        user_id: row.get(0)?,
                        full_legal_name: row.get(1)?,
                        street_address: row.get(2)?,
                        city: row.get(3)?,
                        state: row.get(4)?,
                        zip_code: row.get(5)?,
                        phone_number: row.get(6)?,
                        total_api_cost: row.get(7)?,
                        api_cost_limit: row.get(8)?,
                        api_limit_reached_at: row.get(9)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    /// Insert or replace the subscription of a user
    pub async fn upsert_subscription(&self, subscription: &SubscriptionRecord) -> Result<()> {
        let s = subscription.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO subscriptions (
                        user_id, plan_type, is_active, api_credit_balance, monthly_credit_amount, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    ON CONFLICT(user_id) DO UPDATE SET
                        plan_type = excluded.plan_type,
                        is_active = excluded.is_active,
                        api_credit_balance = excluded.api_credit_balance,
                        monthly_credit_amount = excluded.monthly_credit_amount,
                        updated_at = excluded.updated_at
                    "#,
                    params![
                        s.user_id,
                        s.plan_type.to_string(),
                        s.is_active,
                        s.api_credit_balance,
                        s.monthly_credit_amount,
                        now(),
                    ],
                )?;
                Ok(())
            })
            .await
    }

    pub async fn get_subscription(&self, user_id: i64) -> Result<Option<SubscriptionRecord>> {
        self.db
            .execute_async(move |conn| {
                let subscription = conn
                    .query_row(
                        "SELECT user_id, plan_type, is_active, api_credit_balance, monthly_credit_amount
                         FROM subscriptions WHERE user_id = ?1",
                        [user_id],
                        |row| {
                            Ok(SubscriptionRecord {
                                user_id: row.get(0)?,
                                plan_type: row
                                    .get::<_, String>(1)?
                                    .parse()
                                    .unwrap_or(PlanType::Free),
                                is_active: row.get(2)?,
                                api_credit_balance: row.get(3)?,
                                monthly_credit_amount: row.get(4)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(subscription)
            })
            .await
    }

    /// Charge an AI call to a user.
    ///
    /// Increments the profile spend, stamps `api_limit_reached_at` the first
    /// time spend reaches the limit, and when `deduct_credit` is set lowers
    /// the subscription credit without letting it go below zero. All updates
    /// happen in one transaction.
    pub async fn record_api_cost(&self, user_id: i64, cost: f64, deduct_credit: bool) -> Result<()> {
        self.db
            .transaction_async(move |tx| {
                let updated = tx.execute(
                    "UPDATE user_profiles SET total_api_cost = total_api_cost + ?1, updated_at = ?2
                     WHERE user_id = ?3",
                    params![cost, now(), user_id],
                )?;
                if updated == 0 {
                    return Err(anyhow::anyhow!("No profile for user {}", user_id));
                }

                tx.execute(
                    "UPDATE user_profiles SET api_limit_reached_at = ?1
                     WHERE user_id = ?2 AND api_limit_reached_at IS NULL
                       AND total_api_cost >= api_cost_limit",
                    params![now(), user_id],
                )?;

                if deduct_credit {
                    tx.execute(
                        "UPDATE subscriptions SET api_credit_balance = MAX(0, api_credit_balance - ?1),
                         updated_at = ?2 WHERE user_id = ?3",
                        params![cost, now(), user_id],
                    )?;
                }

                debug!("Recorded ${:.4} AI cost for user {}", cost, user_id);
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Insert a document and return its id
    pub async fn create_document(&self, document: &DocumentRecord) -> Result<i64> {
        let d = document.clone();

        self.db
            .execute_async(move |conn| {
                let timestamp = now();
                conn.execute(
                    r#"
                    INSERT INTO lawsuit_documents (
                        user_id, title, description, incident_date, incident_location,
                        incident_street_address, incident_city, incident_state, incident_county,
                        defendants, youtube_url, additional_evidence, status, created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)
                    "#,
                    params![
                        d.user_id,
                        d.title,
                        d.description,
                        d.incident_date.map(|date| date.format(DATE_FORMAT).to_string()),
                        d.incident_location,
                        d.incident_street_address,
                        d.incident_city,
                        d.incident_state,
                        d.incident_county,
                        d.defendants,
                        d.youtube_url,
                        d.additional_evidence,
                        d.status.to_string(),
                        timestamp,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    pub async fn get_document(&self, document_id: i64) -> Result<Option<DocumentRecord>> {
        self.db
            .execute_async(move |conn| {
                let document = conn
                    .query_row(
                        &format!("SELECT {} FROM lawsuit_documents WHERE id = ?1", DOCUMENT_COLUMNS),
                        [document_id],
                        map_document,
                    )
                    .optional()?;
                Ok(document)
            })
            .await
    }

    pub async fn list_documents(&self, user_id: i64) -> Result<Vec<DocumentRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM lawsuit_documents WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
                    DOCUMENT_COLUMNS
                ))?;
                let documents = stmt
                    .query_map([user_id], map_document)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(documents)
            })
            .await
    }

    pub async fn update_document_status(&self, document_id: i64, status: DocumentStatus) -> Result<()> {
        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE lawsuit_documents SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    params![status.to_string(), now(), document_id],
                )?;
                Ok(())
            })
            .await
    }

    /// Delete a document together with its sections and evidence
    pub async fn delete_document(&self, document_id: i64) -> Result<bool> {
        self.db
            .execute_async(move |conn| {
                let deleted = conn.execute("DELETE FROM lawsuit_documents WHERE id = ?1", [document_id])?;
                Ok(deleted > 0)
            })
            .await
    }

    // =========================================================================
    // Section Operations
    // =========================================================================

    /// Create a section or update the existing one for the same type.
    ///
    /// Existing rows keep their position. New rows take `sort_order` or the
    /// next free position. Returns the stored row and whether it was created.
    pub async fn upsert_section(&self, section: SectionUpsert) -> Result<(SectionRecord, bool)> {
        self.db
            .transaction_async(move |tx| {
                let timestamp = now();
                let existing = Self::get_section_sync(tx, section.document_id, &section.section_type)?;

                let (id, created) = match existing {
                    Some(current) => {
                        tx.execute(
                            "UPDATE document_sections SET title = ?1, content = ?2, ai_enhanced = ?3,
                             ai_cost = ?4, ai_model = ?5, updated_at = ?6 WHERE id = ?7",
                            params![
                                section.title,
                                section.content,
                                section.ai_enhanced,
                                section.ai_cost,
                                section.ai_model,
                                timestamp,
                                current.id,
                            ],
                        )?;
                        (current.id, false)
                    }
                    None => {
                        let order = match section.sort_order {
                            Some(order) => order,
                            None => Self::next_section_order_sync(tx, section.document_id)?,
                        };
                        tx.execute(
                            "INSERT INTO document_sections (document_id, section_type, title, content,
                             sort_order, ai_enhanced, ai_cost, ai_model, created_at, updated_at)
                             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                            params![
                                section.document_id,
                                section.section_type,
                                section.title,
                                section.content,
                                order,
                                section.ai_enhanced,
                                section.ai_cost,
                                section.ai_model,
                                timestamp,
                            ],
                        )?;
                        (tx.last_insert_rowid(), true)
                    }
                };

                let record = tx.query_row(
                    &format!("SELECT {} FROM document_sections WHERE id = ?1", SECTION_COLUMNS),
                    [id],
                    map_section,
                )?;
                Ok((record, created))
            })
            .await
    }

    fn get_section_sync(conn: &Connection, document_id: i64, section_type: &str) -> Result<Option<SectionRecord>> {
        let section = conn
            .query_row(
                &format!(
                    "SELECT {} FROM document_sections WHERE document_id = ?1 AND section_type = ?2",
                    SECTION_COLUMNS
                ),
                params![document_id, section_type],
                map_section,
            )
            .optional()?;
        Ok(section)
    }

    fn next_section_order_sync(conn: &Connection, document_id: i64) -> Result<i64> {
        let max: Option<i64> = conn.query_row(
            "SELECT MAX(sort_order) FROM document_sections WHERE document_id = ?1",
            [document_id],
            |row| row.get(0),
        )?;
        Ok(max.unwrap_or(0) + 1)
    }

    pub async fn get_section(&self, document_id: i64, section_type: &str) -> Result<Option<SectionRecord>> {
        let section_type = section_type.to_string();
        self.db
            .execute_async(move |conn| Self::get_section_sync(conn, document_id, &section_type))
            .await
    }

    /// Sections of a document by position, ties broken by insertion
    pub async fn list_sections(&self, document_id: i64) -> Result<Vec<SectionRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM document_sections WHERE document_id = ?1 ORDER BY sort_order, id",
                    SECTION_COLUMNS
                ))?;
                let sections = stmt
                    .query_map([document_id], map_section)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(sections)
            })
            .await
    }

    pub async fn delete_section(&self, document_id: i64, section_type: &str) -> Result<bool> {
        let section_type = section_type.to_string();
        self.db
            .execute_async(move |conn| {
                let deleted = conn.execute(
                    "DELETE FROM document_sections WHERE document_id = ?1 AND section_type = ?2",
                    params![document_id, section_type],
                )?;
                Ok(deleted > 0)
            })
            .await
    }

    /// Apply `(section id, position)` pairs in one transaction
    pub async fn update_section_orders(&self, orders: Vec<(i64, i64)>) -> Result<usize> {
        if orders.is_empty() {
            return Ok(0);
        }

        self.db
            .transaction_async(move |tx| {
                let mut changed = 0;
                let mut stmt = tx.prepare(
                    "UPDATE document_sections SET sort_order = ?1 WHERE id = ?2 AND sort_order != ?1",
                )?;
                for (id, order) in orders {
                    changed += stmt.execute(params![order, id])?;
                }
                Ok(changed)
            })
            .await
    }

    // =========================================================================
    // Template Operations
    // =========================================================================

    /// Insert a template unless its (violation, location, section) triple exists
    pub async fn insert_template_if_absent(&self, template: &LegalTemplateRecord) -> Result<bool> {
        let t = template.clone();

        self.db
            .execute_async(move |conn| {
                let inserted = conn.execute(
                    "INSERT OR IGNORE INTO legal_templates (violation_type, location_type, section_type, template_text)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![t.violation_type, t.location_type, t.section_type, t.template_text],
                )?;
                Ok(inserted > 0)
            })
            .await
    }

    /// Templates for a classification, ordered by section type
    pub async fn find_templates(&self, violation_type: &str, location_type: &str) -> Result<Vec<LegalTemplateRecord>> {
        let violation_type = violation_type.to_string();
        let location_type = location_type.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM legal_templates WHERE violation_type = ?1 AND location_type = ?2
                     ORDER BY section_type",
                    TEMPLATE_COLUMNS
                ))?;
                let templates = stmt
                    .query_map(params![violation_type, location_type], map_template)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(templates)
            })
            .await
    }

    pub async fn get_template(
        &self,
        violation_type: &str,
        location_type: &str,
        section_type: &str,
    ) -> Result<Option<LegalTemplateRecord>> {
        let key = (
            violation_type.to_string(),
            location_type.to_string(),
            section_type.to_string(),
        );

        self.db
            .execute_async(move |conn| {
                let template = conn
                    .query_row(
                        &format!(
                            "SELECT {} FROM legal_templates
                             WHERE violation_type = ?1 AND location_type = ?2 AND section_type = ?3",
                            TEMPLATE_COLUMNS
                        ),
                        params![key.0, key.1, key.2],
                        map_template,
                    )
                    .optional()?;
                Ok(template)
            })
            .await
    }

    pub async fn list_templates(&self) -> Result<Vec<LegalTemplateRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM legal_templates ORDER BY violation_type, location_type, section_type",
                    TEMPLATE_COLUMNS
                ))?;
                let templates = stmt
                    .query_map([], map_template)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(templates)
            })
            .await
    }

    // =========================================================================
    // Discount Code Operations
    // =========================================================================

    /// Insert a discount code and return its id
    pub async fn create_discount_code(&self, code: &DiscountCodeRecord) -> Result<i64> {
        let c = code.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO discount_codes (
                        code, discount_type, discount_value, is_active, max_uses, times_used,
                        valid_from, valid_until, created_by, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                    "#,
                    params![
                        c.code,
                        c.discount_type.to_string(),
                        c.discount_value,
                        c.is_active,
                        c.max_uses,
                        c.times_used,
                        c.valid_from.map(|d| d.to_rfc3339()),
                        c.valid_until.map(|d| d.to_rfc3339()),
                        c.created_by,
                        now(),
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Look up a code ignoring case
    pub async fn find_discount_code(&self, code: &str) -> Result<Option<DiscountCodeRecord>> {
        let code = code.trim().to_string();

        self.db
            .execute_async(move |conn| {
                let record = conn
                    .query_row(
                        &format!("SELECT {} FROM discount_codes WHERE code = ?1", DISCOUNT_COLUMNS),
                        [code],
                        map_discount_code,
                    )
                    .optional()?;
                Ok(record)
            })
            .await
    }

    /// Count one redemption if the code is still active and under its cap.
    /// Returns false when no use was taken.
    pub async fn redeem_code_use(&self, code_id: i64) -> Result<bool> {
        self.db
            .execute_async(move |conn| {
                let changed = conn.execute(
                    r#"
                    UPDATE discount_codes SET times_used = times_used + 1
                    WHERE id = ?1 AND is_active = 1
                      AND (max_uses IS NULL OR times_used < max_uses)
                    "#,
                    [code_id],
                )?;
                Ok(changed == 1)
            })
            .await
    }

    /// Codes owned by a referrer, newest first
    pub async fn codes_created_by(&self, user_id: i64) -> Result<Vec<DiscountCodeRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM discount_codes WHERE created_by = ?1 ORDER BY id DESC",
                    DISCOUNT_COLUMNS
                ))?;
                let codes = stmt
                    .query_map([user_id], map_discount_code)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(codes)
            })
            .await
    }

    pub async fn set_discount_code_active(&self, code_id: i64, active: bool) -> Result<()> {
        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE discount_codes SET is_active = ?1 WHERE id = ?2",
                    params![active, code_id],
                )?;
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Evidence Operations
    // =========================================================================

    pub async fn create_segment(&self, segment: &EvidenceSegmentRecord) -> Result<i64> {
        let s = segment.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO evidence_segments (
                        document_id, youtube_url, start_seconds, end_seconds, start_time, end_time,
                        include_in_complaint, violation_tags
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        s.document_id,
                        s.youtube_url,
                        s.start_seconds,
                        s.end_seconds,
                        s.start_time,
                        s.end_time,
                        s.include_in_complaint,
                        s.violation_tags,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    pub async fn create_quote(&self, quote: &TranscriptQuoteRecord) -> Result<i64> {
        let q = quote.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO transcript_quotes (
                        segment_id, speaker_name, speaker_role, text, significance,
                        include_in_document, sort_order, start_position, violation_tags
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                    params![
                        q.segment_id,
                        q.speaker_name,
                        q.speaker_role,
                        q.text,
                        q.significance,
                        q.include_in_document,
                        q.sort_order,
                        q.start_position,
                        q.violation_tags,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
    }

    /// Segments flagged for the complaint, by video then start time
    pub async fn included_segments(&self, document_id: i64) -> Result<Vec<EvidenceSegmentRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM evidence_segments WHERE document_id = ?1 AND include_in_complaint = 1
                     ORDER BY youtube_url, start_seconds",
                    SEGMENT_COLUMNS
                ))?;
                let segments = stmt
                    .query_map([document_id], map_segment)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(segments)
            })
            .await
    }

    /// Quotes flagged for the document, in display order
    pub async fn included_quotes(&self, segment_id: i64) -> Result<Vec<TranscriptQuoteRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM transcript_quotes WHERE segment_id = ?1 AND include_in_document = 1
                     ORDER BY sort_order, start_position",
                    QUOTE_COLUMNS
                ))?;
                let quotes = stmt
                    .query_map([segment_id], map_quote)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(quotes)
            })
            .await
    }
}
