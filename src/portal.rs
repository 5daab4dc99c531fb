use derive_builder::Builder;
use reqwest::Url;
use std::time::Duration;

use crate::error::AceError;

pub const DEFAULT_SSO_BASE: &str = "https://sso.ace.uq.edu.au";
pub const DEFAULT_DATA_BASE: &str = "https://data.ace.uq.edu.au";

/// The remote surface the program talks to: the SSO host for the login form
/// and the data host for directory listings and file bodies. Bases are
/// overridable so the HTTP layer can be pointed at a local test server.
#[derive(Builder, Debug, Clone)]
pub struct Portal {
    #[builder(default = Url::parse(DEFAULT_SSO_BASE).expect("constant url"))]
    sso_base: Url,
    #[builder(default = Url::parse(DEFAULT_DATA_BASE).expect("constant url"))]
    data_base: Url,
    /// Connect timeout applied to every request.
    #[builder(default = Duration::from_secs(30))]
    connect_timeout: Duration,
}

impl Portal {
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn login_url(&self) -> Result<Url, AceError> {
        Ok(self.sso_base.join("/login/")?)
    }

    /// Root of the per-user data tree on the data host.
    pub fn data_dir(&self, username: &str) -> String {
        format!("/users/{username}/data/")
    }

    /// Absolute URL for a listing path or file path on the data host.
    pub fn data_url(&self, remote_path: &str) -> Result<Url, AceError> {
        Ok(self.data_base.join(remote_path)?)
    }
}
