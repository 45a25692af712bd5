//! Shopper contact fields captured from the checkout form.

use serde::{Deserialize, Serialize};

/// Email, city and zip as typed by the shopper.
///
/// No format validation happens here: any string, including the empty
/// string, is accepted. Absent inputs are recorded as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub city: String,
    pub zip: String,
}

impl ContactInfo {
    /// Build contact info from optional field values, defaulting absent ones to "".
    #[must_use]
    pub fn from_fields(email: Option<&str>, city: Option<&str>, zip: Option<&str>) -> Self {
        Self {
            email: email.unwrap_or_default().to_owned(),
            city: city.unwrap_or_default().to_owned(),
            zip: zip.unwrap_or_default().to_owned(),
        }
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.city.is_empty() && self.zip.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_default_to_empty() {
        let contact = ContactInfo::from_fields(Some("a@b.c"), None, None);
        assert_eq!(contact.email, "a@b.c");
        assert_eq!(contact.city, "");
        assert_eq!(contact.zip, "");
        assert!(!contact.is_empty());
    }

    #[test]
    fn test_no_format_validation() {
        let contact = ContactInfo::from_fields(Some("not an email"), Some(""), Some("ABC"));
        assert_eq!(contact.email, "not an email");
        assert_eq!(contact.zip, "ABC");
    }

    #[test]
    fn test_default_is_empty() {
        assert!(ContactInfo::default().is_empty());
    }
}
