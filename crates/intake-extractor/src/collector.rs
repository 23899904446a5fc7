//! The prompt, extract, validate loop for one field

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::extractor::Extractor;
use crate::profile::{CompiledGuard, FieldProfile};
use crate::types::{AbandonReason, CollectionOutcome, CollectionState};
use intake_domain::traits::{LlmProvider, OperatorChannel};
use intake_domain::{Candidate, Notice, RawInput};
use intake_gatekeeper::Gatekeeper;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Collects one field from an operator, re-prompting until a value validates
///
/// Blank input is answered with the profile's empty notice and never reaches
/// the extraction service. Every other cycle either ends in a validated value
/// or a notice followed by a new prompt. With `max_attempts` unset the loop
/// only ends on acceptance or when the operator closes the channel.
pub struct FieldCollector<L>
where
    L: LlmProvider,
{
    profile: FieldProfile,
    extractor: Extractor<L>,
    gatekeeper: Gatekeeper,
    guard: CompiledGuard,
    max_attempts: Option<u32>,
}

impl<L> FieldCollector<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    /// Create a collector for a field profile
    pub fn new(
        llm_provider: Arc<L>,
        profile: &FieldProfile,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        profile.validate().map_err(ExtractorError::Config)?;

        let gatekeeper = profile.gatekeeper()?;
        let guard = CompiledGuard::new(&profile.guard)?;
        let max_attempts = config.max_attempts;

        Ok(Self {
            profile: profile.clone(),
            extractor: Extractor::new(llm_provider, profile, config),
            gatekeeper,
            guard,
            max_attempts,
        })
    }

    /// The field's gatekeeper
    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    /// Run the loop until the field is accepted or abandoned
    pub async fn collect<C>(&self, channel: &mut C) -> Result<CollectionOutcome, ExtractorError>
    where
        C: OperatorChannel,
        C::Error: Display,
    {
        let mut state = CollectionState::Prompting;
        let mut attempts: u32 = 0;

        info!("Collecting field '{}'", self.profile.name);

        loop {
            debug!("Field '{}' state: {}", self.profile.name, state.name());

            state = match state {
                CollectionState::Prompting => self.read_input(channel)?,

                CollectionState::Extracting(input) => match self.extractor.extract(&input).await {
                    Ok(candidate) => CollectionState::Validating(candidate),
                    Err(ExtractorError::InputTooLong(length, max)) => {
                        CollectionState::Rejected(Notice::rejected(format!(
                            "Input is too long ({} characters, max {}). {}",
                            length,
                            max,
                            self.gatekeeper.rejection_message()
                        )))
                    }
                    Err(e) if e.is_service_failure() => {
                        warn!("Extraction service failed for '{}': {}", self.profile.name, e);
                        CollectionState::Rejected(Notice::service_unavailable(
                            "The extraction service is unavailable right now. Please enter the value again.",
                        ))
                    }
                    Err(e) => return Err(e),
                },

                CollectionState::Validating(candidate) => match self.gatekeeper.admit(candidate) {
                    Ok(field) => CollectionState::Accepted(field),
                    Err(_) => CollectionState::Rejected(Notice::rejected(
                        self.gatekeeper.rejection_message(),
                    )),
                },

                CollectionState::Rejected(notice) => {
                    attempts += 1;
                    send_notice(channel, &notice)?;

                    match self.max_attempts {
                        Some(max) if attempts >= max => {
                            send_notice(
                                channel,
                                &Notice::abandoned(format!(
                                    "No valid {} after {} attempts.",
                                    self.profile.label.to_lowercase(),
                                    attempts
                                )),
                            )?;
                            CollectionState::Abandoned(AbandonReason::AttemptsExhausted)
                        }
                        _ => CollectionState::Prompting,
                    }
                }

                CollectionState::Accepted(field) => {
                    info!(
                        "Field '{}' accepted after {} rejected attempt(s)",
                        self.profile.name, attempts
                    );
                    return Ok(CollectionOutcome::Accepted(field));
                }

                CollectionState::Abandoned(reason) => {
                    info!("Field '{}' abandoned: {}", self.profile.name, reason);
                    return Ok(CollectionOutcome::Abandoned { reason, attempts });
                }
            };
        }
    }

    /// Prompt once and decide where the input goes next
    fn read_input<C>(&self, channel: &mut C) -> Result<CollectionState, ExtractorError>
    where
        C: OperatorChannel,
        C::Error: Display,
    {
        let line = channel
            .prompt(&self.profile.prompt)
            .map_err(|e| ExtractorError::Channel(e.to_string()))?;

        let Some(line) = line else {
            return Ok(CollectionState::Abandoned(AbandonReason::OperatorClosed));
        };

        let input = RawInput::new(line);

        if input.is_blank() {
            send_notice(channel, &Notice::empty_input(self.profile.empty_notice.clone()))?;
            return Ok(CollectionState::Prompting);
        }

        if !self.guard.permits(&input) {
            let message = self
                .guard
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| self.gatekeeper.rejection_message());
            return Ok(CollectionState::Rejected(Notice::rejected(message)));
        }

        if let Some(canonical) = self.profile.alias_for(&input) {
            debug!("Field '{}' input matched an alias", self.profile.name);
            return Ok(CollectionState::Validating(Candidate::new(canonical)));
        }

        Ok(CollectionState::Extracting(input))
    }
}

fn send_notice<C>(channel: &mut C, notice: &Notice) -> Result<(), ExtractorError>
where
    C: OperatorChannel,
    C::Error: Display,
{
    channel
        .notice(notice)
        .map_err(|e| ExtractorError::Channel(e.to_string()))
}
