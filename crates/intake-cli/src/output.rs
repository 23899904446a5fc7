//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use intake_domain::{Notice, NoticeKind};
use intake_extractor::{FieldCatalog, PatientRecord};
use intake_gatekeeper::{ValidatedField, ValidationResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an accepted field value.
    pub fn format_field(&self, field: &ValidatedField) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(field)?),
            OutputFormat::Table => {
                Ok(self.success(&format!("{}: {}", field.field(), field.value())))
            }
            OutputFormat::Quiet => Ok(field.value().to_string()),
        }
    }

    /// Format a registered patient.
    pub fn format_record(&self, record: &PatientRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(record.patient_id.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Patient ID", &record.patient_id.to_string()]);
                builder.push_record(["Name", &record.name]);
                builder.push_record(["Gender", &record.gender]);
                builder.push_record(["Phone", &record.phone_number]);
                builder.push_record(["Age", &record.age.to_string()]);
                builder.push_record(["Anchor year group", &record.anchor_year_group.to_string()]);
                builder.push_record(["Address", &record.address]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
        }
    }

    /// Format the list of available fields.
    pub fn format_fields(&self, catalog: &FieldCatalog) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let fields: Vec<serde_json::Value> = catalog
                    .iter()
                    .map(|profile| {
                        serde_json::json!({
                            "name": profile.name,
                            "label": profile.label,
                            "pattern": profile.validation.pattern,
                            "examples": profile.validation.examples,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&fields)?)
            }
            OutputFormat::Quiet => Ok(catalog.names().collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if catalog.is_empty() {
                    return Ok(self.colorize("No fields configured.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "Label", "Pattern", "Examples"]);
                for profile in catalog.iter() {
                    builder.push_record([
                        profile.name.as_str(),
                        profile.label.as_str(),
                        profile.validation.pattern.as_str(),
                        &profile.validation.examples.join(", "),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
        }
    }

    /// Format a validation check result.
    pub fn format_check(&self, field: &str, value: &str, result: &ValidationResult) -> Result<String> {
        let reasons: Vec<String> = result.reasons.iter().map(ToString::to_string).collect();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "field": field,
                "value": value,
                "accepted": result.is_accepted(),
                "reasons": reasons,
            }))?),
            OutputFormat::Quiet => Ok(if result.is_accepted() {
                "accepted".to_string()
            } else {
                "rejected".to_string()
            }),
            OutputFormat::Table => {
                if result.is_accepted() {
                    Ok(self.success(&format!("'{}' is a valid {}", value, field)))
                } else {
                    Ok(self.error(&format!(
                        "'{}' is not a valid {}: {}",
                        value,
                        field,
                        reasons.join("; ")
                    )))
                }
            }
        }
    }

    /// Format a notice from the collection loop.
    pub fn notice(&self, notice: &Notice) -> String {
        match notice.kind {
            NoticeKind::EmptyInput => self.warning(&notice.message),
            NoticeKind::Rejected => self.error(&notice.message),
            NoticeKind::ServiceUnavailable => self.warning(&notice.message),
            NoticeKind::Abandoned => self.error(&notice.message),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
