//! User and profile domain types.

use chrono::NaiveDate;
use serde::Serialize;

use verve_core::{Email, PhoneNumber, UserId};

/// A user's profile joined with their account contact fields.
///
/// One row per user; created at registration and only updated here.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    /// Owning user.
    pub user_id: UserId,
    /// Public display name.
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
    /// URL of the hosted profile image.
    pub img: Option<String>,
    /// Account email (from `users`).
    pub email: Email,
    /// Account phone number (from `users`).
    pub phone_number: Option<PhoneNumber>,
}

/// A validated partial update to a user's profile and account fields.
///
/// `None` means the field was omitted from the request and the stored value
/// is kept. A present value is written verbatim, so an intentionally provided
/// value is always distinguishable from an omitted field.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
    pub img: Option<String>,
    pub email: Option<Email>,
    pub phone_number: Option<PhoneNumber>,
}
