use secrecy::{ExposeSecret, SecretString};
use std::{env, fmt};

use crate::error::AceError;

/// Environment variable consulted before falling back to an interactive prompt.
pub const PASSWORD_ENV_VAR: &str = "ACEPASSWORD";

#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
        // no need for constant time comparisons, not sensitive context
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for Credentials {}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: SecretString::from(password),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Resolves the password for `username`: the `ACEPASSWORD` environment
    /// variable if set, otherwise a masked interactive prompt.
    ///
    /// Never persisted anywhere.
    pub async fn resolve(username: &str) -> Result<Credentials, AceError> {
        let password = match env::var(PASSWORD_ENV_VAR) {
            Ok(pw) => pw,
            Err(env::VarError::NotPresent) => {
                // Spawn blocking task to avoid blocking async runtime
                tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: ")).await??
            }
            Err(env::VarError::NotUnicode(_)) => {
                return Err(AceError::CliArgumentError {
                    message: format!("{PASSWORD_ENV_VAR} is set but is not valid UTF-8"),
                });
            }
        };
        Ok(Credentials::new(username, &password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_masks_password() {
        let creds = Credentials::new("alice", "hunter2");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn eq_compares_both_fields() {
        let a = Credentials::new("alice", "hunter2");
        let b = Credentials::new("alice", "hunter2");
        let c = Credentials::new("alice", "other");
        let d = Credentials::new("bob", "hunter2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
