/// Errors that can occur when creating validated identifier types.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The input was empty or contained only whitespace
    #[error("Identifier cannot be empty")]
    Empty,
}

/// A patient identifier, case-normalized to uppercase.
///
/// This type wraps a `String` and ensures it contains at least one
/// non-whitespace character. The input is trimmed and converted to uppercase
/// during construction, so `"p001"`, `" P001 "` and `"P001"` all name the
/// same record. `PatientId` orders lexicographically and can therefore key
/// the record collection map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new `PatientId` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace and uppercased.
    /// If the trimmed result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(PatientId)` if the trimmed input is non-empty,
    /// or `Err(IdError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, IdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_input() {
        let id = PatientId::new("p001").unwrap();
        assert_eq!(id.as_str(), "P001");
    }

    #[test]
    fn trims_whitespace() {
        let id = PatientId::new("  p001  ").unwrap();
        assert_eq!(id.as_str(), "P001");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(PatientId::new(""), Err(IdError::Empty)));
        assert!(matches!(PatientId::new("   "), Err(IdError::Empty)));
    }

    #[test]
    fn equal_ids_regardless_of_case() {
        assert_eq!(
            PatientId::new("p001").unwrap(),
            PatientId::new("P001").unwrap()
        );
    }
}
