//! Postgres backend. Queries are bound at runtime so no DATABASE_URL is
//! needed at compile time. Enumerations are stored as text and parsed back
//! through `FromStr`; the tables are described in `schema.sql`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::Store;
use crate::models::{
    Article, ContactHistory, Event, EventParticipant, FileUpload, Reporter, Theme,
};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

#[derive(FromRow)]
struct ReporterRow {
    id: Uuid,
    name: String,
    company: String,
    email: String,
    phone: Option<String>,
    position: Option<String>,
    interests: Vec<String>,
    specialties: Vec<String>,
    contact_preference: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReporterRow> for Reporter {
    type Error = anyhow::Error;

    fn try_from(row: ReporterRow) -> Result<Self> {
        Ok(Reporter {
            id: row.id,
            name: row.name,
            company: row.company,
            email: row.email,
            phone: row.phone,
            position: row.position,
            interests: row.interests,
            specialties: row.specialties,
            contact_preference: row.contact_preference.parse()?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ContactRow {
    id: Uuid,
    reporter_id: Uuid,
    date: DateTime<Utc>,
    contact_type: String,
    subject: String,
    content: String,
    outcome: String,
    next_action_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactHistory {
    type Error = anyhow::Error;

    fn try_from(row: ContactRow) -> Result<Self> {
        Ok(ContactHistory {
            id: row.id,
            reporter_id: row.reporter_id,
            date: row.date,
            contact_type: row.contact_type.parse()?,
            subject: row.subject,
            content: row.content,
            outcome: row.outcome.parse()?,
            next_action_date: row.next_action_date,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct ThemeRow {
    id: Uuid,
    title: String,
    description: String,
    keywords: Vec<String>,
    category: Option<String>,
    priority: String,
    source_url: Option<String>,
    upload_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ThemeRow> for Theme {
    type Error = anyhow::Error;

    fn try_from(row: ThemeRow) -> Result<Self> {
        Ok(Theme {
            id: row.id,
            title: row.title,
            description: row.description,
            keywords: row.keywords,
            category: row.category,
            priority: row.priority.parse()?,
            source_url: row.source_url,
            upload_id: row.upload_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: String,
    event_date: DateTime<Utc>,
    location: Option<String>,
    tags: Vec<String>,
    status: String,
    event_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = anyhow::Error;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(Event {
            id: row.id,
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            location: row.location,
            tags: row.tags,
            status: row.status.parse()?,
            event_type: row.event_type.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ParticipantRow {
    id: Uuid,
    event_id: Uuid,
    reporter_id: Uuid,
    exposure_status: String,
    article_url: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ParticipantRow> for EventParticipant {
    type Error = anyhow::Error;

    fn try_from(row: ParticipantRow) -> Result<Self> {
        Ok(EventParticipant {
            id: row.id,
            event_id: row.event_id,
            reporter_id: row.reporter_id,
            exposure_status: row.exposure_status.parse()?,
            article_url: row.article_url,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = anyhow::Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Store implementation
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Store for PgStore {
    async fn list_reporters(&self) -> Result<Vec<Reporter>> {
        let rows: Vec<ReporterRow> =
            sqlx::query_as("SELECT * FROM reporters ORDER BY created_at")
                .fetch_all(&self.pool)
                .await
                .context("Failed to list reporters")?;
        convert_all(rows)
    }

    async fn get_reporter(&self, id: Uuid) -> Result<Option<Reporter>> {
        let row: Option<ReporterRow> = sqlx::query_as("SELECT * FROM reporters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load reporter {id}"))?;
        row.map(Reporter::try_from).transpose()
    }

    async fn insert_reporter(&self, r: &Reporter) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reporters
                (id, name, company, email, phone, position, interests, specialties,
                 contact_preference, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(r.id)
        .bind(&r.name)
        .bind(&r.company)
        .bind(&r.email)
        .bind(&r.phone)
        .bind(&r.position)
        .bind(&r.interests)
        .bind(&r.specialties)
        .bind(r.contact_preference.as_str())
        .bind(&r.notes)
        .bind(r.created_at)
        .bind(r.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert reporter")?;
        Ok(())
    }

    async fn update_reporter(&self, r: &Reporter) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reporters
            SET name = $2, company = $3, email = $4, phone = $5, position = $6,
                interests = $7, specialties = $8, contact_preference = $9,
                notes = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(r.id)
        .bind(&r.name)
        .bind(&r.company)
        .bind(&r.email)
        .bind(&r.phone)
        .bind(&r.position)
        .bind(&r.interests)
        .bind(&r.specialties)
        .bind(r.contact_preference.as_str())
        .bind(&r.notes)
        .bind(r.updated_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to update reporter {}", r.id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_reporter(&self, id: Uuid) -> Result<bool> {
        // articles, contact_history and event_participants cascade via FK
        let result = sqlx::query("DELETE FROM reporters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete reporter {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_articles(&self, reporter_id: Option<Uuid>) -> Result<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT * FROM articles
            WHERE ($1::uuid IS NULL OR reporter_id = $1)
            ORDER BY published_at DESC
            "#,
        )
        .bind(reporter_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list articles")?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn insert_article(&self, a: &Article) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO articles
                (id, reporter_id, title, content, url, published_at, tags, summary, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(a.id)
        .bind(a.reporter_id)
        .bind(&a.title)
        .bind(&a.content)
        .bind(&a.url)
        .bind(a.published_at)
        .bind(&a.tags)
        .bind(&a.summary)
        .bind(a.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert article")?;
        Ok(())
    }

    async fn list_contacts(&self, reporter_id: Option<Uuid>) -> Result<Vec<ContactHistory>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT * FROM contact_history
            WHERE ($1::uuid IS NULL OR reporter_id = $1)
            ORDER BY date DESC
            "#,
        )
        .bind(reporter_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list contact history")?;
        convert_all(rows)
    }

    async fn insert_contact(&self, c: &ContactHistory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_history
                (id, reporter_id, date, contact_type, subject, content, outcome,
                 next_action_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(c.id)
        .bind(c.reporter_id)
        .bind(c.date)
        .bind(c.contact_type.as_str())
        .bind(&c.subject)
        .bind(&c.content)
        .bind(c.outcome.as_str())
        .bind(c.next_action_date)
        .bind(c.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert contact history")?;
        Ok(())
    }

    async fn list_themes(&self) -> Result<Vec<Theme>> {
        let rows: Vec<ThemeRow> = sqlx::query_as("SELECT * FROM themes ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list themes")?;
        convert_all(rows)
    }

    async fn get_theme(&self, id: Uuid) -> Result<Option<Theme>> {
        let row: Option<ThemeRow> = sqlx::query_as("SELECT * FROM themes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load theme {id}"))?;
        row.map(Theme::try_from).transpose()
    }

    async fn insert_theme(&self, t: &Theme) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO themes
                (id, title, description, keywords, category, priority, source_url,
                 upload_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(t.id)
        .bind(&t.title)
        .bind(&t.description)
        .bind(&t.keywords)
        .bind(&t.category)
        .bind(t.priority.as_str())
        .bind(&t.source_url)
        .bind(t.upload_id)
        .bind(t.created_at)
        .bind(t.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert theme")?;
        Ok(())
    }

    async fn update_theme(&self, t: &Theme) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE themes
            SET title = $2, description = $3, keywords = $4, category = $5,
                priority = $6, source_url = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(t.id)
        .bind(&t.title)
        .bind(&t.description)
        .bind(&t.keywords)
        .bind(&t.category)
        .bind(t.priority.as_str())
        .bind(&t.source_url)
        .bind(t.updated_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to update theme {}", t.id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_theme(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete theme {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as("SELECT * FROM events ORDER BY event_date")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list events")?;
        convert_all(rows)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load event {id}"))?;
        row.map(Event::try_from).transpose()
    }

    async fn insert_event(&self, e: &Event) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events
                (id, title, description, event_date, location, tags, status, event_type,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(e.id)
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.event_date)
        .bind(&e.location)
        .bind(&e.tags)
        .bind(e.status.as_str())
        .bind(e.event_type.as_str())
        .bind(e.created_at)
        .bind(e.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert event")?;
        Ok(())
    }

    async fn update_event(&self, e: &Event) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, description = $3, event_date = $4, location = $5, tags = $6,
                status = $7, event_type = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(e.id)
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.event_date)
        .bind(&e.location)
        .bind(&e.tags)
        .bind(e.status.as_str())
        .bind(e.event_type.as_str())
        .bind(e.updated_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to update event {}", e.id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool> {
        // event_participants cascade via FK
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete event {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_participants(&self, event_id: Option<Uuid>) -> Result<Vec<EventParticipant>> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            r#"
            SELECT * FROM event_participants
            WHERE ($1::uuid IS NULL OR event_id = $1)
            ORDER BY created_at
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list event participants")?;
        convert_all(rows)
    }

    async fn insert_participant(&self, p: &EventParticipant) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO event_participants
                (id, event_id, reporter_id, exposure_status, article_url, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (event_id, reporter_id) DO NOTHING
            "#,
        )
        .bind(p.id)
        .bind(p.event_id)
        .bind(p.reporter_id)
        .bind(p.exposure_status.as_str())
        .bind(&p.article_url)
        .bind(&p.notes)
        .bind(p.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert event participant")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_participant(&self, event_id: Uuid, participant_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM event_participants WHERE id = $1 AND event_id = $2")
            .bind(participant_id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete event participant")?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_upload(&self, u: &FileUpload) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO file_uploads
                (id, filename, original_name, mime_type, size, url, extracted_text,
                 processed_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(u.id)
        .bind(&u.filename)
        .bind(&u.original_name)
        .bind(&u.mime_type)
        .bind(u.size)
        .bind(&u.url)
        .bind(&u.extracted_text)
        .bind(u.processed_at)
        .bind(u.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert file upload")?;
        Ok(())
    }

    async fn get_upload(&self, id: Uuid) -> Result<Option<FileUpload>> {
        let row = sqlx::query_as::<_, UploadRow>("SELECT * FROM file_uploads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load upload {id}"))?;
        Ok(row.map(FileUpload::from))
    }
}

// Article and upload rows have no enum columns, so conversion cannot fail.

#[derive(FromRow)]
struct ArticleRow {
    id: Uuid,
    reporter_id: Uuid,
    title: String,
    content: Option<String>,
    url: Option<String>,
    published_at: DateTime<Utc>,
    tags: Vec<String>,
    summary: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            reporter_id: row.reporter_id,
            title: row.title,
            content: row.content,
            url: row.url,
            published_at: row.published_at,
            tags: row.tags,
            summary: row.summary,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct UploadRow {
    id: Uuid,
    filename: String,
    original_name: String,
    mime_type: String,
    size: i64,
    url: Option<String>,
    extracted_text: Option<String>,
    processed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<UploadRow> for FileUpload {
    fn from(row: UploadRow) -> Self {
        FileUpload {
            id: row.id,
            filename: row.filename,
            original_name: row.original_name,
            mime_type: row.mime_type,
            size: row.size,
            url: row.url,
            extracted_text: row.extracted_text,
            processed_at: row.processed_at,
            created_at: row.created_at,
        }
    }
}
