//! Shared fixture for ledger tests: an in-memory repository, a channel
//! notifier and helpers to seed actors and articles.
#![allow(dead_code)]

use std::sync::Arc;

use haven_ledger::{ChannelNotifier, InteractionLedger, LedgerConfig};
use haven_repository::{ActorsRepository, HavenRepository, MemoryRepository};
use haven_shared::types::{Actor, ArticleView, NewArticle, Notification};
use tokio::sync::mpsc;
use uuid::Uuid;

pub const BODY: &str = "Rust makes systems programming approachable without giving up control over memory.";

pub struct Fixture {
    pub repository: Arc<MemoryRepository>,
    pub ledger: InteractionLedger,
    pub notifications: mpsc::Receiver<Notification>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let repository = Arc::new(MemoryRepository::new());
        let (notifier, notifications) = ChannelNotifier::new(64);
        let ledger = InteractionLedger::new(
            repository.clone() as Arc<dyn HavenRepository>,
            Arc::new(notifier),
            config,
        );
        Self { repository, ledger, notifications }
    }

    pub async fn actor(&self, username: &str) -> Actor {
        self.insert_actor(username, true).await
    }

    pub async fn unverified_actor(&self, username: &str) -> Actor {
        self.insert_actor(username, false).await
    }

    async fn insert_actor(&self, username: &str, is_verified: bool) -> Actor {
        let actor = Actor {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@haven.test"),
            bio: String::new(),
            image: None,
            is_verified,
        };
        self.repository.insert_actor(&actor).await.unwrap();
        actor
    }

    pub async fn article(&self, author: &Actor, title: &str) -> ArticleView {
        let new = NewArticle {
            title: title.to_string(),
            description: "A short description".to_string(),
            body: BODY.to_string(),
        };
        self.ledger.publish_article(author, new).await.unwrap()
    }

    /// Everything emitted so far.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            drained.push(notification);
        }
        drained
    }
}
