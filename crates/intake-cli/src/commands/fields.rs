//! Fields command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the fields command.
pub fn execute_fields(config: &Config, formatter: &Formatter) -> Result<()> {
    let catalog = config.catalog()?;
    println!("{}", formatter.format_fields(&catalog)?);
    Ok(())
}
