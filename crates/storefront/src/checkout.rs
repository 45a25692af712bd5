//! Checkout state machine.
//!
//! Two states: `Shopping` and `Confirmed`. `initiate_checkout` stays in
//! `Shopping`; `complete_purchase` moves to `Confirmed`. There is no way back
//! within one controller; a fresh page load starts in `Shopping` again.

/// Where the shopper is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckoutState {
    #[default]
    Shopping,
    Confirmed,
}

impl CheckoutState {
    /// Whether a purchase has been completed.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shopping => write!(f, "shopping"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_shopping() {
        assert_eq!(CheckoutState::default(), CheckoutState::Shopping);
        assert!(!CheckoutState::Shopping.is_confirmed());
        assert!(CheckoutState::Confirmed.is_confirmed());
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckoutState::Shopping.to_string(), "shopping");
        assert_eq!(CheckoutState::Confirmed.to_string(), "confirmed");
    }
}
