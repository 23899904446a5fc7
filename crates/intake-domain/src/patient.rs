//! Patient identifiers

use std::fmt;

/// Unique identifier for a registered patient, based on UUIDv7
///
/// UUIDv7 identifiers sort by creation time and need no coordination
/// between operators registering patients concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(u128);

impl PatientId {
    /// Generate a new UUIDv7-based PatientId
    ///
    /// # Examples
    ///
    /// ```
    /// use intake_domain::PatientId;
    ///
    /// let id = PatientId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a PatientId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a PatientId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use intake_domain::PatientId;
    ///
    /// let id = PatientId::new();
    /// let parsed = PatientId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid patient id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the creation time component (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for PatientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_chronological() {
        let id1 = PatientId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = PatientId::new();

        assert!(id1 < id2);
        assert!(id1.timestamp() <= id2.timestamp());
    }

    #[test]
    fn test_patient_id_display_and_parse() {
        let id = PatientId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(PatientId::from_string(&id_str).unwrap(), id);
    }

    #[test]
    fn test_patient_id_invalid_string() {
        assert!(PatientId::from_string("not-a-valid-uuid").is_err());
        assert!(PatientId::from_string("").is_err());
    }
}
