use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::seed::SeedData;
use super::Store;
use crate::models::{
    Article, ContactHistory, Event, EventParticipant, FileUpload, Reporter, Theme,
};

#[derive(Default)]
struct Tables {
    reporters: Vec<Reporter>,
    articles: Vec<Article>,
    contacts: Vec<ContactHistory>,
    themes: Vec<Theme>,
    events: Vec<Event>,
    participants: Vec<EventParticipant>,
    uploads: Vec<FileUpload>,
}

/// In-process store. Rows keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// A store pre-filled with the demo reporters, themes and events.
    pub fn seeded() -> Self {
        let SeedData {
            reporters,
            articles,
            contacts,
            themes,
            events,
            participants,
        } = SeedData::build();
        Self {
            tables: RwLock::new(Tables {
                reporters,
                articles,
                contacts,
                themes,
                events,
                participants,
                uploads: Vec::new(),
            }),
        }
    }
}

/// Replaces the row whose id matches; false when absent.
fn replace_by_id<T: Clone>(rows: &mut [T], id: Uuid, row: &T, id_of: impl Fn(&T) -> Uuid) -> bool {
    match rows.iter_mut().find(|r| id_of(r) == id) {
        Some(slot) => {
            *slot = row.clone();
            true
        }
        None => false,
    }
}

fn remove_by_id<T>(rows: &mut Vec<T>, id: Uuid, id_of: impl Fn(&T) -> Uuid) -> bool {
    let before = rows.len();
    rows.retain(|r| id_of(r) != id);
    rows.len() != before
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_reporters(&self) -> Result<Vec<Reporter>> {
        Ok(self.tables.read().await.reporters.clone())
    }

    async fn get_reporter(&self, id: Uuid) -> Result<Option<Reporter>> {
        let tables = self.tables.read().await;
        Ok(tables.reporters.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_reporter(&self, reporter: &Reporter) -> Result<()> {
        self.tables.write().await.reporters.push(reporter.clone());
        Ok(())
    }

    async fn update_reporter(&self, reporter: &Reporter) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(replace_by_id(&mut tables.reporters, reporter.id, reporter, |r| r.id))
    }

    async fn delete_reporter(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let removed = remove_by_id(&mut tables.reporters, id, |r| r.id);
        if removed {
            tables.articles.retain(|a| a.reporter_id != id);
            tables.contacts.retain(|c| c.reporter_id != id);
            tables.participants.retain(|p| p.reporter_id != id);
        }
        Ok(removed)
    }

    async fn list_articles(&self, reporter_id: Option<Uuid>) -> Result<Vec<Article>> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .iter()
            .filter(|a| reporter_id.map_or(true, |id| a.reporter_id == id))
            .cloned()
            .collect())
    }

    async fn insert_article(&self, article: &Article) -> Result<()> {
        self.tables.write().await.articles.push(article.clone());
        Ok(())
    }

    async fn list_contacts(&self, reporter_id: Option<Uuid>) -> Result<Vec<ContactHistory>> {
        let tables = self.tables.read().await;
        Ok(tables
            .contacts
            .iter()
            .filter(|c| reporter_id.map_or(true, |id| c.reporter_id == id))
            .cloned()
            .collect())
    }

    async fn insert_contact(&self, contact: &ContactHistory) -> Result<()> {
        self.tables.write().await.contacts.push(contact.clone());
        Ok(())
    }

    async fn list_themes(&self) -> Result<Vec<Theme>> {
        Ok(self.tables.read().await.themes.clone())
    }

    async fn get_theme(&self, id: Uuid) -> Result<Option<Theme>> {
        let tables = self.tables.read().await;
        Ok(tables.themes.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_theme(&self, theme: &Theme) -> Result<()> {
        self.tables.write().await.themes.push(theme.clone());
        Ok(())
    }

    async fn update_theme(&self, theme: &Theme) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(replace_by_id(&mut tables.themes, theme.id, theme, |t| t.id))
    }

    async fn delete_theme(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(remove_by_id(&mut tables.themes, id, |t| t.id))
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.tables.read().await.events.clone())
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_event(&self, event: &Event) -> Result<()> {
        self.tables.write().await.events.push(event.clone());
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(replace_by_id(&mut tables.events, event.id, event, |e| e.id))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let removed = remove_by_id(&mut tables.events, id, |e| e.id);
        if removed {
            tables.participants.retain(|p| p.event_id != id);
        }
        Ok(removed)
    }

    async fn list_participants(&self, event_id: Option<Uuid>) -> Result<Vec<EventParticipant>> {
        let tables = self.tables.read().await;
        Ok(tables
            .participants
            .iter()
            .filter(|p| event_id.map_or(true, |id| p.event_id == id))
            .cloned()
            .collect())
    }

    async fn insert_participant(&self, participant: &EventParticipant) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.participants.iter().any(|p| {
            p.event_id == participant.event_id && p.reporter_id == participant.reporter_id
        }) {
            return Ok(false);
        }
        tables.participants.push(participant.clone());
        Ok(true)
    }

    async fn delete_participant(&self, event_id: Uuid, participant_id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.participants.len();
        tables
            .participants
            .retain(|p| !(p.id == participant_id && p.event_id == event_id));
        Ok(tables.participants.len() != before)
    }

    async fn insert_upload(&self, upload: &FileUpload) -> Result<()> {
        self.tables.write().await.uploads.push(upload.clone());
        Ok(())
    }

    async fn get_upload(&self, id: Uuid) -> Result<Option<FileUpload>> {
        let tables = self.tables.read().await;
        Ok(tables.uploads.iter().find(|u| u.id == id).cloned())
    }
}
