//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who a message is attributed to.
///
/// The same roles apply to text and image requests; the manga pipeline
/// only ever sends user messages, but drivers accept the full set.
///
/// # Examples
///
/// ```
/// use hachikoma_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages are from the human
    User,
    /// Assistant messages are from the AI
    Assistant,
}
