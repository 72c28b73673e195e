//! Explicit session identity for outbound calls.
//!
//! Collaborators that need to know who is asking get this context passed in;
//! there are no ambient identity lookups in the core.

/// Identity of the patient session on whose behalf a call is made.
///
/// When `access_token` is set and a provider config carries no API key of
/// its own, the token is used as the bearer credential - the deployment
/// where requests route through the product's own backend function.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Stable identifier of the signed-in patient, if any.
    pub user_id: Option<String>,
    /// Bearer token of the authenticated session, if any.
    pub access_token: Option<String>,
}

impl SessionContext {
    /// Context for an unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated patient session.
    pub fn authenticated(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            access_token: Some(access_token.into()),
        }
    }
}
