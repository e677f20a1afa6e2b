use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{log, UserId, UserIdentity};
use crate::config::{ConfigContentProvider, ConfigSerializer, YamlConfigSerializer};
use super::service::ScoreService;
use super::types::{
    LeaderboardEntry, LeaderboardQuery, ScoreMetadata, ScoreRecord, ScoreServiceEvent,
};

const EVENT_CAPACITY: usize = 32;

#[derive(Default, Serialize, Deserialize)]
struct ScoreBook {
    records: Vec<ScoreRecord>,
}

#[derive(Default)]
struct LocalScoreData {
    user: Option<UserIdentity>,
    book: ScoreBook,
}

type SharedProvider = Arc<dyn ConfigContentProvider + Send + Sync>;

/// In-process score backend. Keeps the signed-in identity and every
/// submitted score, optionally persisted as YAML.
#[derive(Clone)]
pub struct LocalScoreService {
    data: Arc<Mutex<LocalScoreData>>,
    events: broadcast::Sender<ScoreServiceEvent>,
    provider: Option<SharedProvider>,
}

impl LocalScoreService {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            data: Arc::new(Mutex::new(LocalScoreData::default())),
            events,
            provider: None,
        }
    }

    /// Loads previously stored records; a missing document starts empty.
    pub fn with_persistence(
        provider: impl ConfigContentProvider + Send + Sync + 'static,
    ) -> Result<Self, String> {
        let book = match provider.get_config_content()? {
            Some(content) if !content.trim().is_empty() => {
                YamlConfigSerializer::new().deserialize(&content)?
            }
            _ => ScoreBook::default(),
        };
        log!("Loaded {} stored scores", book.records.len());

        let service = Self::new();
        service.lock_data()?.book = book;
        Ok(Self {
            provider: Some(Arc::new(provider)),
            ..service
        })
    }

    fn lock_data(&self) -> Result<std::sync::MutexGuard<'_, LocalScoreData>, String> {
        self.data
            .lock()
            .map_err(|_| "Score data lock poisoned".to_string())
    }

    fn notify(&self, event: ScoreServiceEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub fn sign_in(&self, identity: UserIdentity) -> Result<(), String> {
        log!("Signed in as {}", identity.display_name());
        self.lock_data()?.user = Some(identity.clone());
        self.notify(ScoreServiceEvent::AuthStateChanged(Some(identity)));
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), String> {
        let previous = self.lock_data()?.user.take();
        if let Some(previous) = previous {
            log!("Signed out {}", previous.display_name());
        }
        self.notify(ScoreServiceEvent::AuthStateChanged(None));
        Ok(())
    }

    pub fn records(&self) -> Result<Vec<ScoreRecord>, String> {
        Ok(self.lock_data()?.book.records.clone())
    }

    fn persist(&self, book: &ScoreBook) -> Result<(), String> {
        let Some(provider) = &self.provider else {
            return Ok(());
        };
        let content = YamlConfigSerializer::new().serialize(book)?;
        provider.set_config_content(&content)
    }
}

impl Default for LocalScoreService {
    fn default() -> Self {
        Self::new()
    }
}

fn build_leaderboard(records: &[ScoreRecord], query: LeaderboardQuery) -> Vec<LeaderboardEntry> {
    // (entry, index of the record that set the best score)
    let mut best: HashMap<&UserId, (LeaderboardEntry, usize)> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let slot = best.entry(&record.user_id).or_insert_with(|| {
            (
                LeaderboardEntry {
                    user_id: record.user_id.clone(),
                    username: None,
                    best_score: record.score,
                },
                index,
            )
        });
        if record.score > slot.0.best_score {
            slot.0.best_score = record.score;
            slot.1 = index;
        }
        if record.username.is_some() {
            slot.0.username = record.username.clone();
        }
    }

    let mut entries: Vec<(LeaderboardEntry, usize)> = best.into_values().collect();
    entries.sort_by(|a, b| b.0.best_score.cmp(&a.0.best_score).then(a.1.cmp(&b.1)));

    entries
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .map(|(entry, _)| entry)
        .collect()
}

impl ScoreService for LocalScoreService {
    async fn get_current_user(&self) -> Result<Option<UserIdentity>, String> {
        Ok(self.lock_data()?.user.clone())
    }

    async fn submit_score(&self, score: u32, metadata: ScoreMetadata) -> Result<(), String> {
        {
            let mut data = self.lock_data()?;
            let user = data
                .user
                .clone()
                .ok_or_else(|| "Cannot submit a score without a signed-in user".to_string())?;

            let mut records = data.book.records.clone();
            records.push(ScoreRecord {
                user_id: user.id,
                username: user.username,
                score,
                metadata,
                submitted_at: Utc::now(),
            });
            let book = ScoreBook { records };
            // Only a stored record becomes visible.
            self.persist(&book)?;
            data.book = book;
        }

        self.notify(ScoreServiceEvent::ScoreInserted);
        Ok(())
    }

    async fn get_global_leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> Result<Vec<LeaderboardEntry>, String> {
        let data = self.lock_data()?;
        Ok(build_leaderboard(&data.book.records, query))
    }

    fn subscribe(&self) -> broadcast::Receiver<ScoreServiceEvent> {
        self.events.subscribe()
    }
}
