//! Domain models for the account panel.

pub mod cart;
pub mod transaction;
pub mod user;

pub use cart::{CartEntry, CartItem};
pub use transaction::{PageMeta, Transaction};
pub use user::{ProfileChanges, UserProfile};
