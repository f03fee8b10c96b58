//! Sign-in state.
//!
//! The identity lives next to the cart and orders in the data directory, under
//! its own key. The cart store never reads or writes it.

use tracing::{info, warn};

use shopfront_core::Identity;
use shopfront_store::Persister;

use super::CommandError;

/// Key for the signed-in identity.
pub const CURRENT_USER: &str = "currentUser";

/// The persisted identity, or anonymous if none is stored or it is unreadable.
pub fn load_identity<P: Persister>(persister: &P) -> Identity {
    match persister.read(CURRENT_USER) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding malformed session");
            Identity::anonymous()
        }),
        Ok(None) => Identity::anonymous(),
        Err(e) => {
            warn!(error = %e, "Failed to read session");
            Identity::anonymous()
        }
    }
}

/// Sign in as `name`.
///
/// # Errors
///
/// Returns an error if the name is blank or the session cannot be written.
pub fn login<P: Persister>(persister: &P, name: &str) -> Result<String, CommandError> {
    let identity = Identity::signed_in(name);
    let Some(display_name) = identity.display_name() else {
        return Err("name cannot be empty".into());
    };

    persister.write(CURRENT_USER, &serde_json::to_string(&identity)?)?;
    info!(user = display_name, "Signed in");
    Ok(format!("Welcome, {display_name}!"))
}

/// Sign out.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub fn logout<P: Persister>(persister: &P) -> Result<String, CommandError> {
    persister.write(CURRENT_USER, &serde_json::to_string(&Identity::anonymous())?)?;
    Ok("Signed out.".to_string())
}

/// Describe the current identity.
pub fn whoami<P: Persister>(persister: &P) -> String {
    load_identity(persister)
        .display_name()
        .map_or_else(|| "Not signed in.".to_string(), |name| format!("Signed in as {name}."))
}
