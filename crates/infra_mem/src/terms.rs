//! In-memory schedule store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{PortError, ScheduleId};
use domain_application::ScheduleStore;
use domain_terms::Schedule;

/// Computed schedules keyed by id. Ids are assigned on save.
#[derive(Default)]
pub struct InMemoryScheduleStore {
    records: RwLock<HashMap<ScheduleId, Schedule>>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn save(&self, schedules: Vec<Schedule>) -> Result<Vec<Schedule>, PortError> {
        let mut records = self.records.write().await;
        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let saved = schedule.with_id(ScheduleId::new_v7());
                records.insert(
                    saved.schedule_id.expect("id was just assigned"),
                    saved.clone(),
                );
                saved
            })
            .collect())
    }

    async fn get(&self, schedule_id: ScheduleId) -> Option<Schedule> {
        self.records.read().await.get(&schedule_id).cloned()
    }
}
