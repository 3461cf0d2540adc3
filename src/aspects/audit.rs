//! Audit trail of user actions.
//!
//! Emits one structured log line per audited action, after the wrapped
//! operation has succeeded.

/// Record that `user` performed `action` with the given call arguments.
pub fn record(user: &str, action: &str, args: &str) {
    log::info!("{}", entry(user, action, args));
}

fn entry(user: &str, action: &str, args: &str) -> String {
    format!("audit: user='{}' action='{}' args=[{}]", user, action, args)
}
