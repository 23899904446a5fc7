//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the check command.
///
/// Returns whether the value was accepted.
pub fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    let (output, accepted) = check_value(&args, config, formatter)?;
    println!("{}", output);
    Ok(accepted)
}

fn check_value(args: &CheckArgs, config: &Config, formatter: &Formatter) -> Result<(String, bool)> {
    let catalog = config.catalog()?;
    let gatekeeper = catalog.get(&args.field)?.gatekeeper()?;
    let result = gatekeeper.validate(&args.value);
    let output = formatter.format_check(&args.field, &args.value, &result)?;
    Ok((output, result.is_accepted()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn check(field: &str, value: &str) -> (String, bool) {
        let args = CheckArgs {
            field: field.to_string(),
            value: value.to_string(),
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        check_value(&args, &Config::default(), &formatter).unwrap()
    }

    #[test]
    fn test_check_accepts_valid_phone() {
        assert_eq!(check("phone", "03207673078"), ("accepted".to_string(), true));
        assert!(check("phone", "+923207373878").1);
    }

    #[test]
    fn test_check_rejects_spaced_phone() {
        assert_eq!(check("phone", "+92 320 737 3878"), ("rejected".to_string(), false));
    }

    #[test]
    fn test_check_other_fields() {
        assert!(check("age", "34").1);
        assert!(!check("age", "0").1);
        assert!(check("gender", "N").1);
        assert!(!check("gender", "Invalid").1);
    }
}
