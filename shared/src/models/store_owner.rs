//! Store owner projection of the `users` table

use serde::{Deserialize, Serialize};

/// Public view of the vendor behind a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOwner {
    pub store_name: String,
    /// WhatsApp contact number, free-form as entered by the vendor
    pub whatsapp_number: Option<String>,
}

impl StoreOwner {
    /// Contact number reduced to digits, as required by `wa.me` links.
    /// `None` when no digits remain.
    pub fn whatsapp_digits(&self) -> Option<String> {
        let digits: String = self
            .whatsapp_number
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        (!digits.is_empty()).then_some(digits)
    }
}
