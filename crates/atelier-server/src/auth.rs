//! Authenticated-user extraction
//!
//! Identity reaches the servlet through HTTP Basic auth; this module only
//! decodes the header. Credential verification belongs to the user
//! management service in front of us.

use base64::Engine as _;

/// Extract the remote user from an `Authorization` header value
///
/// Returns `None` for anything but well-formed Basic credentials with a
/// non-empty user name.
#[must_use]
pub fn remote_user(header: &str) -> Option<String> {
    let (scheme, encoded) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (user, _password) = credentials.split_once(':')?;
    if user.is_empty() {
        None
    } else {
        Some(user.to_string())
    }
}
