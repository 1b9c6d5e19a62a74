//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Sender of a chat message.
///
/// # Examples
///
/// ```
/// use kahovitz_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "system");
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
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages carry the persona prompt
    #[display("system")]
    System,
    /// User messages carry the task
    #[display("user")]
    User,
    /// Assistant messages are model replies
    #[display("assistant")]
    Assistant,
}
