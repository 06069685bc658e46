//! OAuth provider parameter tables
//!
//! Each provider is a declarative table of endpoints, scopes and
//! preference keys behind [`OAuthParams`]; the shared consumer flow that
//! performs the token exchange lives outside this service and only
//! consumes these parameters.

use atelier_core::Preferences;
use url::Url;

/// Errors building OAuth request parameters
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// A client key/secret preference is not configured
    #[error("preference not set: {0}")]
    MissingPreference(String),

    /// Endpoint or redirect URL failed to parse
    #[error("invalid oauth url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Per-provider OAuth parameter table
///
/// Implementations are declarative: constants plus preference lookups,
/// no protocol logic.
pub trait OAuthParams: Send + Sync {
    /// Provider name used in login URLs and logs
    fn provider_name(&self) -> &'static str;

    /// Authorization endpoint
    fn authz_endpoint(&self) -> &'static str;

    /// Token endpoint
    fn token_endpoint(&self) -> &'static str;

    /// OAuth response type
    fn response_type(&self) -> &'static str;

    /// Requested scope
    fn scope(&self) -> &'static str;

    /// Grant type used by the consumer flow
    fn grant_type(&self) -> &'static str;

    /// Client id from server preferences
    ///
    /// # Errors
    /// `OAuthError::MissingPreference` naming the key.
    fn client_id(&self, prefs: &Preferences) -> Result<String, OAuthError>;

    /// Client secret from server preferences
    ///
    /// # Errors
    /// `OAuthError::MissingPreference` naming the key.
    fn client_secret(&self, prefs: &Preferences) -> Result<String, OAuthError>;

    /// Provider-specific additional authorization parameters
    fn extra_params(&self, current_url: &Url) -> Vec<(String, String)> {
        let _ = current_url;
        Vec::new()
    }
}

/// Build the authorization redirect URL for a provider
///
/// # Errors
/// `OAuthError` when the endpoint is malformed or a client preference is
/// missing.
pub fn authorization_url(
    params: &dyn OAuthParams,
    prefs: &Preferences,
    redirect_uri: &Url,
    state: &str,
) -> Result<Url, OAuthError> {
    let mut url = Url::parse(params.authz_endpoint())?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("response_type", params.response_type());
        query.append_pair("client_id", &params.client_id(prefs)?);
        query.append_pair("redirect_uri", redirect_uri.as_str());
        query.append_pair("scope", params.scope());
        query.append_pair("state", state);
        for (key, value) in params.extra_params(redirect_uri) {
            query.append_pair(&key, &value);
        }
    }
    Ok(url)
}

/// Preference key for the Google client id
pub const GOOGLE_CLIENT_KEY: &str = "oauth.google.client";
/// Preference key for the Google client secret
pub const GOOGLE_CLIENT_SECRET: &str = "oauth.google.secret";

/// Google parameter table
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleOAuthParams;

impl GoogleOAuthParams {
    /// Create the table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl OAuthParams for GoogleOAuthParams {
    fn provider_name(&self) -> &'static str {
        "google"
    }

    fn authz_endpoint(&self) -> &'static str {
        "https://accounts.google.com/o/oauth2/auth"
    }

    fn token_endpoint(&self) -> &'static str {
        "https://accounts.google.com/o/oauth2/token"
    }

    fn response_type(&self) -> &'static str {
        "code"
    }

    fn scope(&self) -> &'static str {
        "openid email"
    }

    fn grant_type(&self) -> &'static str {
        "authorization_code"
    }

    fn client_id(&self, prefs: &Preferences) -> Result<String, OAuthError> {
        prefs
            .get(GOOGLE_CLIENT_KEY)
            .map(ToString::to_string)
            .ok_or_else(|| OAuthError::MissingPreference(GOOGLE_CLIENT_KEY.to_string()))
    }

    fn client_secret(&self, prefs: &Preferences) -> Result<String, OAuthError> {
        prefs
            .get(GOOGLE_CLIENT_SECRET)
            .map(ToString::to_string)
            .ok_or_else(|| OAuthError::MissingPreference(GOOGLE_CLIENT_SECRET.to_string()))
    }

    fn extra_params(&self, current_url: &Url) -> Vec<(String, String)> {
        // Realm for the openid 2.0 migration: the origin of the current URL
        vec![(
            "openid.realm".to_string(),
            current_url.origin().ascii_serialization(),
        )]
    }
}
