//! Instruction templates for field extraction

use crate::profile::FieldProfile;

/// Builds the fixed instructions sent with every extraction request for a field
pub struct PromptBuilder {
    instructions: String,
    sentinel: String,
    examples: Vec<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(instructions: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            sentinel: sentinel.into(),
            examples: Vec::new(),
        }
    }

    /// Builder for a field profile, using its first sentinel and its examples
    pub fn for_profile(profile: &FieldProfile) -> Self {
        let sentinel = profile
            .validation
            .sentinels
            .first()
            .cloned()
            .unwrap_or_else(|| intake_domain::SENTINEL_INVALID.to_string());
        Self::new(profile.instructions.clone(), sentinel)
            .with_examples(profile.validation.examples.clone())
    }

    /// Show accepted example values to the model
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    /// Build the complete instruction text
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(self.instructions.trim_end());
        prompt.push_str("\n\n");

        if !self.examples.is_empty() {
            prompt.push_str("Examples of valid values:\n");
            for example in &self.examples {
                prompt.push_str(&format!("- {}\n", example));
            }
            prompt.push('\n');
        }

        prompt.push_str(&OUTPUT_CONTRACT.replace("{sentinel}", &self.sentinel));
        prompt
    }
}

const OUTPUT_CONTRACT: &str = "\
Output rules:
- Reply with the value only. No explanations, labels, quotes or extra words.
- If the input does not contain a valid value, reply with exactly: {sentinel}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_instructions_and_contract() {
        let prompt = PromptBuilder::new("Extract the phone number.", "Invalid").build();
        assert!(prompt.starts_with("Extract the phone number."));
        assert!(prompt.contains("Reply with the value only"));
        assert!(prompt.ends_with("reply with exactly: Invalid"));
    }

    #[test]
    fn test_prompt_lists_examples() {
        let prompt = PromptBuilder::for_profile(&FieldProfile::phone()).build();
        assert!(prompt.contains("- 03207673078\n"));
        assert!(prompt.contains("- +923207373878\n"));
    }

    #[test]
    fn test_profile_sentinel_used() {
        let prompt = PromptBuilder::for_profile(&FieldProfile::name()).build();
        assert!(prompt.ends_with("reply with exactly: Not a valid name."));

        let prompt = PromptBuilder::for_profile(&FieldProfile::address()).build();
        assert!(prompt.ends_with("reply with exactly: INVALID"));
    }

    #[test]
    fn test_sentinel_placeholder_replaced() {
        let prompt = PromptBuilder::for_profile(&FieldProfile::phone()).build();
        assert!(!prompt.contains("{sentinel}"));
    }
}
