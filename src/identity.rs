//! Local default identity, used as the API contact when the manifest names
//! no author.

use std::env;

use crate::domain::Contact;

/// Identity of the local user.
///
/// Reads `user.name` and `user.email` from the default git configuration,
/// then falls back to `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL` and finally
/// `USER` / `USERNAME` for the name. Never fails: an unknown identity is an
/// empty contact.
pub fn local_identity() -> Contact {
    let (git_name, git_email) = git_identity();

    let name = git_name
        .or_else(|| env_value("GIT_AUTHOR_NAME"))
        .or_else(|| env_value("USER"))
        .or_else(|| env_value("USERNAME"));
    let email = git_email.or_else(|| env_value("GIT_AUTHOR_EMAIL"));

    Contact::new(name, email, None)
}

fn git_identity() -> (Option<String>, Option<String>) {
    let config = match git2::Config::open_default() {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "git configuration unavailable");
            return (None, None);
        }
    };

    let read = |key: &str| {
        config
            .get_string(key)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    (read("user.name"), read("user.email"))
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
