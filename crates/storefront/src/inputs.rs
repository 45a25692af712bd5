//! Form input sources.
//!
//! Contact capture reads three inputs by element id. A page without some of
//! those inputs is fine: absent values read as empty strings.

use std::collections::HashMap;

use shopcart_core::ContactInfo;

use crate::views::element_ids;

/// Anything that can report the current value of an input by element id.
pub trait InputSource {
    /// Current value of the input, or `None` if the page has no such input.
    fn value(&self, id: &str) -> Option<String>;
}

impl<I: InputSource + ?Sized> InputSource for &I {
    fn value(&self, id: &str) -> Option<String> {
        (**self).value(id)
    }
}

/// A page with no inputs at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInputs;

impl InputSource for NoInputs {
    fn value(&self, _id: &str) -> Option<String> {
        None
    }
}

/// Input values held in a map, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct FormInputs {
    values: HashMap<String, String>,
}

impl FormInputs {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of input `id`.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(id.into(), value.into());
        self
    }

    /// Fill the contact inputs, skipping any that are `None`.
    #[must_use]
    pub fn contact(email: Option<&str>, city: Option<&str>, zip: Option<&str>) -> Self {
        let mut form = Self::new();
        for (id, value) in [
            (element_ids::EMAIL, email),
            (element_ids::CITY, city),
            (element_ids::ZIP, zip),
        ] {
            if let Some(value) = value {
                form = form.with(id, value);
            }
        }
        form
    }
}

impl InputSource for FormInputs {
    fn value(&self, id: &str) -> Option<String> {
        self.values.get(id).cloned()
    }
}

/// Read the contact inputs from `inputs`.
pub fn read_contact(inputs: &impl InputSource) -> ContactInfo {
    ContactInfo {
        email: inputs.value(element_ids::EMAIL).unwrap_or_default(),
        city: inputs.value(element_ids::CITY).unwrap_or_default(),
        zip: inputs.value(element_ids::ZIP).unwrap_or_default(),
    }
}
