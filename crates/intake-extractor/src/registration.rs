//! Patient registration: collect every built-in field in order

use crate::collector::FieldCollector;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::profile::{FieldCatalog, ADDRESS, AGE, GENDER, NAME, PHONE};
use crate::types::{AbandonReason, CollectionOutcome};
use chrono::Datelike;
use intake_domain::traits::{LlmProvider, OperatorChannel};
use intake_domain::PatientId;
use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::sync::Arc;
use tracing::info;

/// Fields collected during registration, in prompt order
pub const REGISTRATION_FIELDS: [&str; 5] = [NAME, GENDER, PHONE, AGE, ADDRESS];

/// Birth year implied by an age in the given year
///
/// ```
/// use intake_extractor::anchor_year_group;
///
/// assert_eq!(anchor_year_group(34, 2025).unwrap(), 1991);
/// assert!(anchor_year_group(0, 2025).is_err());
/// ```
pub fn anchor_year_group(age: u32, current_year: i32) -> Result<i32, ExtractorError> {
    if age == 0 {
        return Err(ExtractorError::InvalidValue(
            "age must be a positive number".to_string(),
        ));
    }
    let age = i32::try_from(age)
        .map_err(|_| ExtractorError::InvalidValue(format!("age {} is out of range", age)))?;
    Ok(current_year - age)
}

/// A fully registered patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRecord {
    /// Generated identifier
    #[serde(serialize_with = "serialize_display")]
    pub patient_id: PatientId,
    /// Validated name
    pub name: String,
    /// `M`, `F` or `N`
    pub gender: String,
    /// Validated phone number
    pub phone_number: String,
    /// Age in years
    pub age: u32,
    /// Birth year derived from age
    pub anchor_year_group: i32,
    /// Validated address
    pub address: String,
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Result of a registration run
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    /// Every field was collected
    Registered(PatientRecord),

    /// A field could not be collected; nothing is registered
    Abandoned {
        /// The field that was abandoned
        field: String,
        /// Why it was abandoned
        reason: AbandonReason,
    },
}

/// Drives collection of every registration field through one channel
pub struct Registration<L>
where
    L: LlmProvider,
{
    collectors: Vec<FieldCollector<L>>,
    current_year: i32,
}

impl<L> Registration<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    /// Create a registration flow using profiles from `catalog`
    pub fn new(
        llm_provider: Arc<L>,
        catalog: &FieldCatalog,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        let collectors = REGISTRATION_FIELDS
            .iter()
            .map(|name| {
                let profile = catalog.get(name)?;
                FieldCollector::new(Arc::clone(&llm_provider), profile, config.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            collectors,
            current_year: chrono::Local::now().year(),
        })
    }

    /// Override the year used for the anchor year group
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Collect all fields and build the patient record
    pub async fn run<C>(&self, channel: &mut C) -> Result<RegistrationOutcome, ExtractorError>
    where
        C: OperatorChannel,
        C::Error: Display,
    {
        let mut values = Vec::with_capacity(self.collectors.len());

        for collector in &self.collectors {
            match collector.collect(channel).await? {
                CollectionOutcome::Accepted(field) => values.push(field.into_value()),
                CollectionOutcome::Abandoned { reason, .. } => {
                    let field = collector.gatekeeper().field().to_string();
                    info!("Registration abandoned at '{}'", field);
                    return Ok(RegistrationOutcome::Abandoned { field, reason });
                }
            }
        }

        let [name, gender, phone_number, age, address]: [String; 5] = values
            .try_into()
            .map_err(|_| ExtractorError::InvalidValue("incomplete registration".to_string()))?;

        let age: u32 = age
            .parse()
            .map_err(|_| ExtractorError::InvalidValue(format!("age '{}' is not a number", age)))?;
        let anchor_year_group = anchor_year_group(age, self.current_year)?;

        let record = PatientRecord {
            patient_id: PatientId::new(),
            name,
            gender,
            phone_number,
            age,
            anchor_year_group,
            address,
        };

        info!("Registered patient {}", record.patient_id);
        Ok(RegistrationOutcome::Registered(record))
    }
}
