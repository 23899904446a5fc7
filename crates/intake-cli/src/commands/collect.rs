//! Collect command implementation.

use crate::channel::{print_notices, TerminalChannel};
use crate::cli::CollectArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use intake_domain::traits::LlmProvider;
use intake_extractor::{CollectionOutcome, ExtractorConfig, FieldCollector, ScriptedChannel};
use std::fmt::Display;
use std::sync::Arc;

/// Execute the collect command.
pub async fn execute_collect(args: CollectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let provider = Arc::new(config.get_active_profile()?.build()?);
    let output = collect_with(provider, args, config, formatter).await?;
    println!("{}", output);
    Ok(())
}

/// Collect one field with the given provider and return the formatted value.
pub async fn collect_with<L>(
    llm: Arc<L>,
    args: CollectArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
{
    let catalog = config.catalog()?;
    let profile = catalog.get(&args.field)?;
    let collector = FieldCollector::new(llm, profile, extractor_config(config, args.max_attempts))?;

    let outcome = if args.input.is_empty() {
        let mut channel = TerminalChannel::new(*formatter)?;
        collector.collect(&mut channel).await?
    } else {
        let mut channel = ScriptedChannel::new(args.input);
        let outcome = collector.collect(&mut channel).await;
        print_notices(&channel, formatter);
        outcome?
    };

    match outcome {
        CollectionOutcome::Accepted(field) => formatter.format_field(&field),
        CollectionOutcome::Abandoned { reason, .. } => Err(CliError::Abandoned {
            field: args.field,
            reason,
        }),
    }
}

/// Configured extractor settings with a command-line attempt limit applied.
pub(crate) fn extractor_config(config: &Config, max_attempts: Option<u32>) -> ExtractorConfig {
    let mut extractor = config.extractor.clone();
    if max_attempts.is_some() {
        extractor.max_attempts = max_attempts;
    }
    extractor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use intake_extractor::{AbandonReason, ExtractorError};
    use intake_llm::MockProvider;

    fn args(field: &str, input: &[&str], max_attempts: Option<u32>) -> CollectArgs {
        CollectArgs {
            field: field.to_string(),
            input: input.iter().map(|s| s.to_string()).collect(),
            max_attempts,
        }
    }

    #[tokio::test]
    async fn test_collect_from_scripted_input() {
        let mut llm = MockProvider::new("Invalid");
        llm.add_response("my number is 03207673078", "03207673078");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = collect_with(
            Arc::new(llm),
            args("phone", &["call me sometime", "my number is 03207673078"], None),
            &Config::default(),
            &formatter,
        )
        .await
        .unwrap();
        assert_eq!(output, "03207673078");
    }

    #[tokio::test]
    async fn test_collect_runs_out_of_input() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = collect_with(
            Arc::new(MockProvider::new("Invalid")),
            args("phone", &["call me sometime"], None),
            &Config::default(),
            &formatter,
        )
        .await;
        assert!(matches!(
            result,
            Err(CliError::Abandoned {
                reason: AbandonReason::OperatorClosed,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_collect_attempt_limit_from_args() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = collect_with(
            Arc::new(MockProvider::new("Invalid")),
            args("phone", &["a", "b", "c"], Some(2)),
            &Config::default(),
            &formatter,
        )
        .await;
        assert!(matches!(
            result,
            Err(CliError::Abandoned {
                reason: AbandonReason::AttemptsExhausted,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_collect_writes_nothing_to_config_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
        let mut llm = MockProvider::new("Invalid");
        llm.add_response("it's +923207373878", "+923207373878");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = collect_with(
            Arc::new(llm),
            args("phone", &["no idea", "it's +923207373878"], None),
            &config,
            &formatter,
        )
        .await
        .unwrap();
        assert_eq!(output, "+923207373878");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_collect_unknown_field() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = collect_with(
            Arc::new(MockProvider::new("Invalid")),
            args("blood_type", &["O+"], None),
            &Config::default(),
            &formatter,
        )
        .await;
        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::UnknownField(_)))
        ));
    }
}
