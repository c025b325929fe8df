//! In-memory application store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{ApplicationId, MerchantId, Money, PortError, ScheduleId};
use domain_application::{ApplicationStore, LoanApplication, UserInput};
use domain_underwriting::Decision;

/// Applications keyed by id. Records are stored as whole values; every
/// mutation replaces the record with an updated copy.
#[derive(Default)]
pub struct InMemoryApplicationStore {
    records: RwLock<HashMap<ApplicationId, LoanApplication>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `transition` to the stored record under a single write lock,
    /// so concurrent updates to the same application serialize instead of
    /// overwriting each other.
    async fn update<F>(
        &self,
        application_id: ApplicationId,
        transition: F,
    ) -> Result<LoanApplication, PortError>
    where
        F: FnOnce(&LoanApplication) -> Result<LoanApplication, PortError>,
    {
        let mut records = self.records.write().await;
        let application = records
            .get(&application_id)
            .ok_or_else(|| PortError::not_found("LoanApplication", application_id.to_string()))?;
        let updated = transition(application)?;
        records.insert(application_id, updated.clone());
        Ok(updated)
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn create(
        &self,
        merchant_id: MerchantId,
        requested_amount: Money,
    ) -> Result<LoanApplication, PortError> {
        let application = LoanApplication::new(merchant_id, requested_amount);
        debug!(application_id = %application.application_id, "created application");
        self.records
            .write()
            .await
            .insert(application.application_id, application.clone());
        Ok(application)
    }

    async fn get(&self, application_id: ApplicationId) -> Result<LoanApplication, PortError> {
        self.records
            .read()
            .await
            .get(&application_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("LoanApplication", application_id.to_string()))
    }

    async fn handle_user_input(
        &self,
        application_id: ApplicationId,
        input: UserInput,
    ) -> Result<LoanApplication, PortError> {
        self.update(application_id, |application| {
            application.with_user_input(input).map_err(|field| {
                PortError::conflict(format!("field {field} cannot be changed once submitted"))
            })
        })
        .await
    }

    async fn handle_decision(
        &self,
        application_id: ApplicationId,
        decision: Decision,
    ) -> Result<LoanApplication, PortError> {
        self.update(application_id, |application| {
            Ok(application.with_decision(decision))
        })
        .await
    }

    async fn record_confirmation(
        &self,
        application_id: ApplicationId,
        schedule_id: ScheduleId,
    ) -> Result<LoanApplication, PortError> {
        self.update(application_id, |application| {
            Ok(application.with_confirmation(schedule_id))
        })
        .await
    }
}
