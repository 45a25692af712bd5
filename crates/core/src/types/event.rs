//! The analytics record pushed to the data layer after a purchase.

use serde::{Deserialize, Serialize};

use super::contact::ContactInfo;

/// Fixed `event` value of the purchase record.
pub const PURCHASE_EVENT_NAME: &str = "purchase";

/// Purchase record as consumed by the tag manager.
///
/// Every field is a string; the cart total is carried in its persisted text
/// form. Serializes as
/// `{"event":"purchase","userEmail":..,"userCity":..,"userZip":..,"cartTotal":..,"eventID":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub event: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userCity")]
    pub user_city: String,
    #[serde(rename = "userZip")]
    pub user_zip: String,
    #[serde(rename = "cartTotal")]
    pub cart_total: String,
    #[serde(rename = "eventID")]
    pub event_id: String,
}

impl PurchaseRecord {
    /// Build a `purchase` record.
    #[must_use]
    pub fn purchase(contact: ContactInfo, cart_total: String, event_id: String) -> Self {
        Self {
            event: PURCHASE_EVENT_NAME.to_owned(),
            user_email: contact.email,
            user_city: contact.city,
            user_zip: contact.zip,
            cart_total,
            event_id,
        }
    }

    /// Whether all data fields (everything but `event`) are empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.user_email.is_empty()
            && self.user_city.is_empty()
            && self.user_zip.is_empty()
            && self.cart_total.is_empty()
            && self.event_id.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let record = PurchaseRecord::purchase(
            ContactInfo::from_fields(Some("a@b.c"), Some("Austin"), Some("78701")),
            "24.48".to_string(),
            "evt_1".to_string(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "event": "purchase",
                "userEmail": "a@b.c",
                "userCity": "Austin",
                "userZip": "78701",
                "cartTotal": "24.48",
                "eventID": "evt_1",
            })
        );
        assert!(!record.is_blank());
    }

    #[test]
    fn test_blank_record_keeps_event_name() {
        let record = PurchaseRecord::purchase(ContactInfo::default(), String::new(), String::new());
        assert_eq!(record.event, PURCHASE_EVENT_NAME);
        assert!(record.is_blank());
    }
}
