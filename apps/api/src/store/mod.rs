//! Persistence seam: every handler talks to `Arc<dyn Store>`.
//!
//! Implementors: `MemoryStore` (seeded demo data, used when no DATABASE_URL is
//! configured and by the router tests) and `PgStore` (sqlx over Postgres).
//! The store is plain persistence: validation and existence checks live in
//! the handlers so both backends behave the same. The one-participation-per-
//! reporter rule is enforced by `insert_participant` itself.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Article, ContactHistory, Event, EventParticipant, FileUpload, Reporter, Theme,
};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    // --- Reporters ---

    async fn list_reporters(&self) -> Result<Vec<Reporter>>;
    async fn get_reporter(&self, id: Uuid) -> Result<Option<Reporter>>;
    async fn insert_reporter(&self, reporter: &Reporter) -> Result<()>;
    /// Overwrites the stored row. Returns false when the id is unknown.
    async fn update_reporter(&self, reporter: &Reporter) -> Result<bool>;
    /// Also removes the reporter's articles, contact history and participations.
    async fn delete_reporter(&self, id: Uuid) -> Result<bool>;

    // --- Articles and contact history ---

    async fn list_articles(&self, reporter_id: Option<Uuid>) -> Result<Vec<Article>>;
    async fn insert_article(&self, article: &Article) -> Result<()>;
    async fn list_contacts(&self, reporter_id: Option<Uuid>) -> Result<Vec<ContactHistory>>;
    async fn insert_contact(&self, contact: &ContactHistory) -> Result<()>;

    // --- Themes ---

    async fn list_themes(&self) -> Result<Vec<Theme>>;
    async fn get_theme(&self, id: Uuid) -> Result<Option<Theme>>;
    async fn insert_theme(&self, theme: &Theme) -> Result<()>;
    async fn update_theme(&self, theme: &Theme) -> Result<bool>;
    async fn delete_theme(&self, id: Uuid) -> Result<bool>;

    // --- Events ---

    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;
    async fn insert_event(&self, event: &Event) -> Result<()>;
    async fn update_event(&self, event: &Event) -> Result<bool>;
    /// Also removes the event's participants.
    async fn delete_event(&self, id: Uuid) -> Result<bool>;

    async fn list_participants(&self, event_id: Option<Uuid>) -> Result<Vec<EventParticipant>>;
    /// Returns false, inserting nothing, when the reporter already
    /// participates in the event.
    async fn insert_participant(&self, participant: &EventParticipant) -> Result<bool>;
    async fn delete_participant(&self, event_id: Uuid, participant_id: Uuid) -> Result<bool>;

    // --- Uploads ---

    async fn insert_upload(&self, upload: &FileUpload) -> Result<()>;
    async fn get_upload(&self, id: Uuid) -> Result<Option<FileUpload>>;
}
