use crate::models::{Habit, Quest};
use crate::storage::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct Records {
    pub quests: Vec<Quest>,
    pub habits: Vec<Habit>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub records: Arc<Mutex<Records>>,
}

impl AppState {
    pub fn new(store: RecordStore, records: Records) -> Self {
        Self {
            store,
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub async fn load(store: RecordStore) -> Self {
        let records = Records {
            quests: store.load_quests().await,
            habits: store.load_habits().await,
        };
        Self::new(store, records)
    }
}
