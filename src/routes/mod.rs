pub mod health;
pub mod profile;
pub mod quests;
pub mod schedule;
pub mod scores;
pub mod session;

pub use health::{health, ready};
pub use profile::update_profile;
pub use quests::{accept_quest, cancel_quest, ignore_quest, list_quests, restore_quest};
pub use schedule::{get_schedule, save_schedule};
pub use scores::{get_scores, post_score};
pub use session::whoami;

use crate::store::SqliteStore;
use chrono::Utc;
use sidequest_quest::Catalog;
use sidequest_shared::{Quest, WeekId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-session quest candidate lists, generated once per login and dropped
/// when the user's preferences change.
pub type QuestCache = Arc<RwLock<HashMap<String, Arc<Vec<Quest>>>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub catalog: Catalog,
    pub quests: QuestCache,
    pub history_start: WeekId,
}

impl AppState {
    pub fn new(store: SqliteStore, history_start: WeekId) -> Self {
        Self {
            store,
            catalog: Catalog::builtin(),
            quests: Arc::new(RwLock::new(HashMap::new())),
            history_start,
        }
    }
}

/// The week containing today.
pub fn current_week() -> WeekId {
    WeekId::containing(Utc::now().date_naive())
}
