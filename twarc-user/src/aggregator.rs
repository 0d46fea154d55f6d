//! Aggregation orchestrator
//!
//! Runs every field extractor against one archive and assembles a
//! [`UserData`].
//!
//! # Ordering
//! All extractors run concurrently except personalization, which starts only
//! once the age extractor has finished: it may contribute the inferred age.
//! Which inferred age wins is decided afterwards by an explicit
//! [`InferredAgePrecedence`], never by completion order.
//!
//! # Resources
//! The archive is borrowed for the duration of [`Aggregator::run`] only.

use tracing::info;
use twarc_common::config::{AggregationConfig, InferredAgePrecedence};
use twarc_common::ArchiveAccessor;

use crate::extractors::{
    extract_isolated, AgeExtractor, ConnectedApplicationsExtractor, CreationIpExtractor,
    DevicesExtractor, EmailAddressChangesExtractor, Extracted, ExtractionOutcome,
    LoginIpsExtractor, PersonalizationExtractor, PhoneNumberExtractor,
    ProtectedHistoryExtractor, ScreenNameHistoryExtractor, TimezoneExtractor, VerifiedExtractor,
};
use crate::record::UserData;
use crate::types::{AgeEstimate, AgeInfo};

/// Outcome of one category during aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub extractor: &'static str,
    pub category: &'static str,
    pub outcome: ExtractionOutcome,
}

/// Per-category diagnostics of one aggregation run
///
/// Informational only: the merged record is identical whatever the report says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationReport {
    pub categories: Vec<CategoryReport>,
}

impl AggregationReport {
    fn record<T>(&mut self, extracted: Extracted<T>) -> T {
        self.categories.push(CategoryReport {
            extractor: extracted.extractor,
            category: extracted.category,
            outcome: extracted.outcome,
        });
        extracted.value
    }

    /// Outcome for an extractor by name
    pub fn outcome(&self, extractor: &str) -> Option<&ExtractionOutcome> {
        self.categories
            .iter()
            .find(|c| c.extractor == extractor)
            .map(|c| &c.outcome)
    }

    /// Categories that fell back to their default
    pub fn defaulted(&self) -> impl Iterator<Item = &CategoryReport> {
        self.categories.iter().filter(|c| !c.outcome.is_extracted())
    }

    pub fn extracted_count(&self) -> usize {
        self.categories.iter().filter(|c| c.outcome.is_extracted()).count()
    }
}

/// Builds a [`UserData`] from an export archive
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    precedence: InferredAgePrecedence,
}

impl Aggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self {
            precedence: config.inferred_age_precedence,
        }
    }

    pub fn with_precedence(precedence: InferredAgePrecedence) -> Self {
        Self { precedence }
    }

    pub fn precedence(&self) -> InferredAgePrecedence {
        self.precedence
    }

    /// Extract every category and merge them into one record
    ///
    /// Never fails: categories that cannot be extracted get their default.
    pub async fn run(&self, archive: &dyn ArchiveAccessor) -> (UserData, AggregationReport) {
        let age_then_personalization = async {
            let age = extract_isolated(&AgeExtractor, archive).await;
            let personalization = extract_isolated(&PersonalizationExtractor, archive).await;
            (age, personalization)
        };

        let (
            (age, personalization),
            screen_names,
            protected,
            creation_ip,
            timezone,
            applications,
            emails,
            login_ips,
            devices,
            verified,
            phone_number,
        ) = tokio::join!(
            age_then_personalization,
            extract_isolated(&ScreenNameHistoryExtractor, archive),
            extract_isolated(&ProtectedHistoryExtractor, archive),
            extract_isolated(&CreationIpExtractor, archive),
            extract_isolated(&TimezoneExtractor, archive),
            extract_isolated(&ConnectedApplicationsExtractor, archive),
            extract_isolated(&EmailAddressChangesExtractor, archive),
            extract_isolated(&LoginIpsExtractor, archive),
            extract_isolated(&DevicesExtractor, archive),
            extract_isolated(&VerifiedExtractor, archive),
            extract_isolated(&PhoneNumberExtractor, archive),
        );

        let mut report = AggregationReport::default();

        let mut age = report.record(age);
        let personalization = report.record(personalization);
        apply_inferred_age(&mut age, personalization.inferred_age, self.precedence);

        let user = UserData {
            age,
            personalization: personalization.personalization,
            screen_name_history: report.record(screen_names),
            protected_history: report.record(protected),
            creation_ip: report.record(creation_ip),
            timezone: report.record(timezone),
            applications: report.record(applications),
            email_addresses: report.record(emails),
            login_ips: report.record(login_ips),
            devices: report.record(devices),
            verified: report.record(verified),
            phone_number: report.record(phone_number),
            summary: Default::default(),
        };

        info!(
            extracted = report.extracted_count(),
            defaulted = report.categories.len() - report.extracted_count(),
            "Aggregation complete"
        );

        (user, report)
    }
}

/// Merge the personalization file's inferred age into the age record
pub fn apply_inferred_age(
    age: &mut AgeInfo,
    from_personalization: Option<AgeEstimate>,
    precedence: InferredAgePrecedence,
) {
    let Some(estimate) = from_personalization else {
        return;
    };

    match precedence {
        InferredAgePrecedence::AgeSource => {
            if age.inferred.is_none() {
                age.inferred = Some(estimate);
            }
        }
        InferredAgePrecedence::Personalization => age.inferred = Some(estimate),
    }
}

impl UserData {
    /// Aggregate a record from an archive with default settings
    pub async fn from_archive(archive: &dyn ArchiveAccessor) -> Self {
        Aggregator::default().run(archive).await.0
    }
}
