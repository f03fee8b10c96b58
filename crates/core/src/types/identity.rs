//! Who is browsing the store.

use serde::{Deserialize, Serialize};

/// The signed-in user, if any.
///
/// Supplied by the session collaborator. The cart core never looks at it;
/// the UI layer uses it to gate checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user: Option<String>,
}

impl Identity {
    /// An anonymous visitor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// A signed-in user. Blank names are treated as anonymous.
    #[must_use]
    pub fn signed_in(name: &str) -> Self {
        let name = name.trim();
        Self {
            user: (!name.is_empty()).then(|| name.to_string()),
        }
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user's display name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_deref()
    }
}
