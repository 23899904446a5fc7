//! Register command implementation.

use crate::channel::{print_notices, TerminalChannel};
use crate::cli::RegisterArgs;
use crate::commands::collect::extractor_config;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use intake_domain::traits::LlmProvider;
use intake_extractor::{Registration, RegistrationOutcome, ScriptedChannel};
use std::fmt::Display;
use std::sync::Arc;

/// Execute the register command.
pub async fn execute_register(args: RegisterArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let provider = Arc::new(config.get_active_profile()?.build()?);
    let output = register_with(provider, args, config, formatter, None).await?;
    println!("{}", output);
    Ok(())
}

/// Run registration with the given provider and return the formatted record.
///
/// `current_year` overrides the clock when deriving the anchor year group.
pub async fn register_with<L>(
    llm: Arc<L>,
    args: RegisterArgs,
    config: &Config,
    formatter: &Formatter,
    current_year: Option<i32>,
) -> Result<String>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    let catalog = config.catalog()?;
    let mut registration =
        Registration::new(llm, &catalog, extractor_config(config, args.max_attempts))?;
    if let Some(year) = current_year {
        registration = registration.with_current_year(year);
    }

    let outcome = if args.input.is_empty() {
        let mut channel = TerminalChannel::new(*formatter)?;
        registration.run(&mut channel).await?
    } else {
        let mut channel = ScriptedChannel::new(args.input);
        let outcome = registration.run(&mut channel).await;
        print_notices(&channel, formatter);
        outcome?
    };

    match outcome {
        RegistrationOutcome::Registered(record) => formatter.format_record(&record),
        RegistrationOutcome::Abandoned { field, reason } => Err(CliError::Abandoned { field, reason }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use intake_llm::MockProvider;

    #[tokio::test]
    async fn test_register_json_output() {
        let mut llm = MockProvider::new("Invalid");
        llm.add_response("Bilal Ahmed", "Bilal Ahmed");
        llm.add_response("+923207373878", "+923207373878");
        llm.add_response("52", "52");
        llm.add_response("Flat 3, Clifton Block 5, Karachi", "Flat 3, Clifton Block 5, Karachi");
        let formatter = Formatter::new(OutputFormat::Json, false);

        let args = RegisterArgs {
            input: ["Bilal Ahmed", "male", "+923207373878", "52", "Flat 3, Clifton Block 5, Karachi"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_attempts: None,
        };

        let output = register_with(Arc::new(llm), args, &Config::default(), &formatter, Some(2025))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["name"], "Bilal Ahmed");
        assert_eq!(json["gender"], "M");
        assert_eq!(json["phone_number"], "+923207373878");
        assert_eq!(json["age"], 52);
        assert_eq!(json["anchor_year_group"], 1973);
    }

    #[tokio::test]
    async fn test_register_abandoned_field_reported() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = RegisterArgs {
            input: vec!["hello".to_string()],
            max_attempts: Some(1),
        };

        let result =
            register_with(Arc::new(MockProvider::new("Invalid")), args, &Config::default(), &formatter, None)
                .await;
        match result {
            Err(CliError::Abandoned { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected abandonment, got {:?}", other),
        }
    }
}
