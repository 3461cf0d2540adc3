/// CSRF (Cross-Site Request Forgery) protection
///
/// The token is:
/// - Generated once per session
/// - Stored in the session cookie
/// - Included in forms as a hidden field named "csrf_token"
/// - Validated in handlers before processing state-changing requests
///
/// Usage in templates:
/// ```html,ignore
/// <form method="post">
///     <input type="hidden" name="csrf_token" value="{{ client.get_csrf_token() }}">
/// </form>
/// ```
use actix_session::Session;
use actix_web::{error, Error};
use rand::{distributions::Alphanumeric, Rng};

pub const CSRF_TOKEN_LENGTH: usize = 32;
const CSRF_SESSION_KEY: &str = "csrf_token";

/// Generate a new CSRF token
pub fn generate_csrf_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CSRF_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Get the session's CSRF token, creating one if the session has none yet.
pub fn get_or_create_csrf_token(session: &Session) -> Result<String, Error> {
    if let Ok(Some(token)) = session.get::<String>(CSRF_SESSION_KEY) {
        return Ok(token);
    }

    let token = generate_csrf_token();
    session
        .insert(CSRF_SESSION_KEY, token.clone())
        .map_err(|_| error::ErrorInternalServerError("session error"))?;
    Ok(token)
}

/// Validate a submitted CSRF token against the session's token.
pub fn validate_csrf_token(session: &Session, submitted: &str) -> Result<(), Error> {
    match session.get::<String>(CSRF_SESSION_KEY) {
        Ok(Some(token)) if token == submitted => Ok(()),
        Ok(_) => {
            log::warn!("CSRF validation failed");
            Err(error::ErrorForbidden("Invalid CSRF token"))
        }
        Err(_) => Err(error::ErrorInternalServerError("session error")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_csrf_token();
        assert_eq!(token.len(), CSRF_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_csrf_token(), generate_csrf_token());
    }
}
