//! Role-based access control.
//!
//! A handler declares an allow-list of roles; a guest is rejected as
//! unauthenticated, a user whose role is not listed as forbidden. An empty
//! allow-list admits any authenticated user.

use crate::middleware::ClientCtx;
use actix_web::{error, Error};

#[derive(Debug, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    Forbidden,
}

/// Pure access decision, separated from HTTP so it can be tested directly.
pub fn check_role(role: Option<&str>, allowed: &[&str]) -> Result<(), Denial> {
    match role {
        None => Err(Denial::Unauthenticated),
        Some(role) => {
            if allowed.is_empty() || allowed.contains(&role) {
                Ok(())
            } else {
                Err(Denial::Forbidden)
            }
        }
    }
}

/// Check the acting user against an allow-list, mapping denials to 401/403.
pub fn require_any_role(client: &ClientCtx, allowed: &[&str]) -> Result<(), Error> {
    match check_role(client.get_role(), allowed) {
        Ok(()) => {
            log::debug!(
                "secure: access granted to '{}' (allowed roles: {:?})",
                client.get_name(),
                allowed
            );
            Ok(())
        }
        Err(Denial::Unauthenticated) => Err(error::ErrorUnauthorized("Login required")),
        Err(Denial::Forbidden) => {
            log::warn!(
                "secure: '{}' denied (role {:?} not in {:?})",
                client.get_name(),
                client.get_role(),
                allowed
            );
            Err(error::ErrorForbidden("Insufficient role"))
        }
    }
}
