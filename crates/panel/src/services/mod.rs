//! External service clients for the account panel.

pub mod uploads;

pub use uploads::{ImageUpload, UploadClient, UploadError};
