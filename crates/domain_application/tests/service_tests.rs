//! End-to-end workflow tests for the origination service, running against
//! in-process stub ports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{ApplicationId, Currency, MerchantId, Money, PortError, ScheduleId};
use domain_application::{
    ApplicationStore, CreditBureauPort, LoanApplication, LoanApplicationState,
    MerchantConfiguration, MerchantStore, NextStep, OriginationError, OriginationService,
    OverrideStore, ScheduleStore, StepOutcome, UserInput,
};
use domain_terms::Schedule;
use domain_underwriting::{
    Address, CreditBureau, CreditReport, CreditReportIdentityInfo, CreditReportPull, Decision,
    IdentityClaim, Income, IncomeFrequency, OverrideType,
};

#[derive(Default)]
struct StubApplications {
    records: Mutex<HashMap<ApplicationId, LoanApplication>>,
}

impl StubApplications {
    fn load(&self, application_id: ApplicationId) -> Result<LoanApplication, PortError> {
        self.records
            .lock()
            .unwrap()
            .get(&application_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("LoanApplication", application_id.to_string()))
    }

    fn store(&self, application: LoanApplication) -> LoanApplication {
        self.records
            .lock()
            .unwrap()
            .insert(application.application_id, application.clone());
        application
    }
}

#[async_trait]
impl ApplicationStore for StubApplications {
    async fn create(
        &self,
        merchant_id: MerchantId,
        requested_amount: Money,
    ) -> Result<LoanApplication, PortError> {
        Ok(self.store(LoanApplication::new(merchant_id, requested_amount)))
    }

    async fn get(&self, application_id: ApplicationId) -> Result<LoanApplication, PortError> {
        self.load(application_id)
    }

    async fn handle_user_input(
        &self,
        application_id: ApplicationId,
        input: UserInput,
    ) -> Result<LoanApplication, PortError> {
        let application = self.load(application_id)?;
        let updated = application.with_user_input(input).map_err(|field| {
            PortError::conflict(format!("field {field} cannot be changed once submitted"))
        })?;
        Ok(self.store(updated))
    }

    async fn handle_decision(
        &self,
        application_id: ApplicationId,
        decision: Decision,
    ) -> Result<LoanApplication, PortError> {
        let application = self.load(application_id)?;
        Ok(self.store(application.with_decision(decision)))
    }

    async fn record_confirmation(
        &self,
        application_id: ApplicationId,
        schedule_id: ScheduleId,
    ) -> Result<LoanApplication, PortError> {
        let application = self.load(application_id)?;
        Ok(self.store(application.with_confirmation(schedule_id)))
    }
}

#[derive(Default)]
struct StubSchedules {
    records: Mutex<HashMap<ScheduleId, Schedule>>,
}

#[async_trait]
impl ScheduleStore for StubSchedules {
    async fn save(&self, schedules: Vec<Schedule>) -> Result<Vec<Schedule>, PortError> {
        let mut records = self.records.lock().unwrap();
        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let saved = schedule.with_id(ScheduleId::new_v7());
                records.insert(saved.schedule_id.unwrap(), saved.clone());
                saved
            })
            .collect())
    }

    async fn get(&self, schedule_id: ScheduleId) -> Option<Schedule> {
        self.records.lock().unwrap().get(&schedule_id).cloned()
    }
}

struct StubMerchants {
    configuration: MerchantConfiguration,
}

#[async_trait]
impl MerchantStore for StubMerchants {
    async fn get(&self, merchant_id: MerchantId) -> Option<MerchantConfiguration> {
        (merchant_id == self.configuration.merchant_id).then(|| self.configuration.clone())
    }
}

struct StubBureau {
    pull: CreditReportPull,
}

#[async_trait]
impl CreditBureauPort for StubBureau {
    async fn pull_credit_report(
        &self,
        _claim: &IdentityClaim,
    ) -> Result<CreditReportPull, PortError> {
        Ok(self.pull.clone())
    }
}

#[derive(Default)]
struct StubOverrides;

#[async_trait]
impl OverrideStore for StubOverrides {
    async fn has_override(&self, _ssn: &str, _override_type: OverrideType) -> bool {
        false
    }
}

fn ny_address() -> Address {
    Address {
        street1: "1140 Broadway".to_string(),
        street2: None,
        city: "New York".to_string(),
        region1_code: "NY".to_string(),
        postal_code: "10001".to_string(),
        country_code: "US".to_string(),
    }
}

fn report_with_score(fico_score: u16) -> CreditReport {
    CreditReport {
        bureau: CreditBureau::Equitrax,
        pull_date: NaiveDate::from_ymd_opt(2020, 3, 13).unwrap(),
        fico_score,
        identity_info: CreditReportIdentityInfo {
            full_name: "June Castellano".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1962, 4, 9).unwrap(),
            ssn: "987-65-1111".to_string(),
            address: ny_address(),
        },
        watchlist_hits: vec![],
        frozen_message_en: None,
        extended_fraud_victim_message_en: None,
    }
}

fn identity_submission() -> domain_application::IdentitySubmission {
    domain_application::IdentitySubmission {
        full_name: "June Castellano".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1962, 4, 9).unwrap(),
        address: ny_address(),
        ssn_last4: "1111".to_string(),
    }
}

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

struct Harness {
    service: OriginationService,
    merchant_id: MerchantId,
}

fn harness(pull: CreditReportPull) -> Harness {
    let merchant_id = MerchantId::new();
    let merchants = StubMerchants {
        configuration: MerchantConfiguration {
            merchant_id,
            name: "Pemberley Books".to_string(),
            minimum_loan_amount: usd(dec!(100.00)),
            maximum_loan_amount: usd(dec!(10000.00)),
        },
    };
    let service = OriginationService::new(
        Arc::new(StubApplications::default()),
        Arc::new(StubSchedules::default()),
        Arc::new(merchants),
        Arc::new(StubBureau { pull }),
        Arc::new(StubOverrides),
    );
    Harness {
        service,
        merchant_id,
    }
}

#[tokio::test]
async fn test_initialize_rejects_non_usd() {
    let h = harness(CreditReportPull::no_hit("{}"));
    let result = h
        .service
        .initialize(h.merchant_id, Money::new(dec!(500.00), Currency::CAD))
        .await;
    assert!(matches!(result, Err(OriginationError::UnsupportedCurrency)));
}

#[tokio::test]
async fn test_initialize_rejects_unknown_merchant() {
    let h = harness(CreditReportPull::no_hit("{}"));
    let result = h.service.initialize(MerchantId::new(), usd(dec!(500.00))).await;
    assert!(matches!(result, Err(OriginationError::UnknownMerchant(_))));
}

#[tokio::test]
async fn test_prime_applicant_is_approved_with_schedules() {
    let h = harness(CreditReportPull::hit(report_with_score(720), "{}"));
    let application = h
        .service
        .initialize(h.merchant_id, usd(dec!(999.99)))
        .await
        .unwrap();

    let outcome = h
        .service
        .submit_identity(application.application_id, identity_submission())
        .await
        .unwrap();

    let StepOutcome::Approved {
        application,
        schedules,
    } = outcome
    else {
        panic!("expected approval, got {outcome:?}");
    };
    assert_eq!(application.state, LoanApplicationState::Approved);
    // the identity approval plus the credit approval
    assert_eq!(application.decision_events.len(), 2);

    assert_eq!(schedules.len(), 1);
    let schedule = &schedules[0];
    assert!(schedule.schedule_id.is_some());
    assert_eq!(schedule.number_of_payments, 3);
    assert_eq!(schedule.payments_total, usd(dec!(999.99)));
    assert_eq!(schedule.payment_amount, usd(dec!(333.33)));
}

#[tokio::test]
async fn test_confirming_a_saved_schedule() {
    let h = harness(CreditReportPull::hit(report_with_score(720), "{}"));
    let application = h
        .service
        .initialize(h.merchant_id, usd(dec!(999.99)))
        .await
        .unwrap();
    let outcome = h
        .service
        .submit_identity(application.application_id, identity_submission())
        .await
        .unwrap();
    let StepOutcome::Approved { schedules, .. } = outcome else {
        panic!("expected approval");
    };

    let schedule_id = schedules[0].schedule_id.unwrap();
    let confirmation = h
        .service
        .confirm(application.application_id, schedule_id)
        .await
        .unwrap();
    assert_eq!(
        confirmation.merchant_payment_token,
        application.application_id
    );

    let application = h.service.get(application.application_id).await.unwrap();
    assert_eq!(application.state, LoanApplicationState::Confirmed);
    assert_eq!(application.selected_schedule_id, Some(schedule_id));
    assert_eq!(application.user_input.schedule_id, Some(schedule_id));
}

#[tokio::test]
async fn test_confirming_an_unknown_schedule_is_rejected() {
    let h = harness(CreditReportPull::hit(report_with_score(720), "{}"));
    let application = h
        .service
        .initialize(h.merchant_id, usd(dec!(999.99)))
        .await
        .unwrap();

    let result = h
        .service
        .confirm(application.application_id, ScheduleId::new_v7())
        .await;
    assert!(matches!(result, Err(OriginationError::UnknownSchedule(_))));
}

#[tokio::test]
async fn test_mid_band_applicant_is_asked_for_income_then_approved() {
    let h = harness(CreditReportPull::hit(report_with_score(575), "{}"));
    let application = h
        .service
        .initialize(h.merchant_id, usd(dec!(1000.01)))
        .await
        .unwrap();

    let outcome = h
        .service
        .submit_identity(application.application_id, identity_submission())
        .await
        .unwrap();
    let StepOutcome::Pending {
        application,
        next_step,
        ..
    } = outcome
    else {
        panic!("expected a pending outcome");
    };
    assert_eq!(next_step, NextStep::Income);
    assert_eq!(application.state, LoanApplicationState::PendingUnderwriting);

    let outcome = h
        .service
        .submit_income(
            application.application_id,
            Income {
                amount: usd(dec!(50000.01)),
                frequency: IncomeFrequency::Annual,
            },
        )
        .await
        .unwrap();
    let StepOutcome::Approved { application, .. } = outcome else {
        panic!("expected approval after income");
    };
    assert_eq!(application.state, LoanApplicationState::Approved);
}

#[tokio::test]
async fn test_mid_band_applicant_with_low_income_is_denied() {
    let h = harness(CreditReportPull::hit(report_with_score(575), "{}"));
    let application = h
        .service
        .initialize(h.merchant_id, usd(dec!(1000.01)))
        .await
        .unwrap();
    h.service
        .submit_identity(application.application_id, identity_submission())
        .await
        .unwrap();

    let outcome = h
        .service
        .submit_income(
            application.application_id,
            Income {
                amount: usd(dec!(49999.99)),
                frequency: IncomeFrequency::Annual,
            },
        )
        .await
        .unwrap();
    let StepOutcome::Denied {
        application,
        declination,
    } = outcome
    else {
        panic!("expected a denial");
    };
    assert_eq!(application.state, LoanApplicationState::Denied);
    assert_eq!(declination.header, "We're sorry");
    assert_eq!(
        declination.message,
        "We couldn't approve your application because you didn't match our credit criteria."
    );
}

#[tokio::test]
async fn test_no_hit_prompts_for_full_ssn_then_denies() {
    let h = harness(CreditReportPull::no_hit("{}"));
    let application = h
        .service
        .initialize(h.merchant_id, usd(dec!(500.00)))
        .await
        .unwrap();

    let outcome = h
        .service
        .submit_identity(application.application_id, identity_submission())
        .await
        .unwrap();
    let StepOutcome::Pending { next_step, .. } = outcome else {
        panic!("expected a pending outcome");
    };
    assert_eq!(next_step, NextStep::Ssn);

    // full SSN still finds no file
    let outcome = h
        .service
        .submit_ssn(application.application_id, "987-65-1111".to_string())
        .await
        .unwrap();
    let StepOutcome::Denied { declination, .. } = outcome else {
        panic!("expected a denial");
    };
    assert_eq!(
        declination.message,
        "We couldn't approve your application because we couldn't verify your identity."
    );
}

#[tokio::test]
async fn test_changing_submitted_identity_fields_is_a_conflict() {
    let h = harness(CreditReportPull::hit(report_with_score(720), "{}"));
    let application = h
        .service
        .initialize(h.merchant_id, usd(dec!(999.99)))
        .await
        .unwrap();
    h.service
        .submit_identity(application.application_id, identity_submission())
        .await
        .unwrap();

    let mut changed = identity_submission();
    changed.full_name = "Someone Else".to_string();
    let result = h
        .service
        .submit_identity(application.application_id, changed)
        .await;
    assert!(matches!(
        result,
        Err(OriginationError::Port(PortError::Conflict { .. }))
    ));
}
