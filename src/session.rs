use reqwest::header::{self, HeaderValue};
use reqwest::{Client, redirect};
use std::fmt;

use crate::credentials::Credentials;
use crate::error::AceError;
use crate::portal::Portal;

/// Cookie name prefix identifying the SSO ticket among the response cookies.
pub const TOKEN_PREFIX: &str = "ace_sso_tkt=";

/// The raw `set-cookie` value carrying the SSO ticket, attributes included.
/// Replayed verbatim as the `Cookie` header on every authenticated request.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"***").finish()
    }
}

impl SessionToken {
    pub(crate) fn new(value: String) -> SessionToken {
        SessionToken(value)
    }

    pub fn as_cookie(&self) -> &str {
        &self.0
    }

    pub fn header_value(&self) -> Result<HeaderValue, AceError> {
        HeaderValue::from_str(&self.0).map_err(|_| AceError::InvalidSessionToken)
    }
}

/// Client shared by the login, crawl and download phases. Redirects are
/// disabled: the SSO ticket has to be read off the immediate login response.
pub fn build_client(portal: &Portal) -> Result<Client, AceError> {
    Ok(Client::builder()
        .redirect(redirect::Policy::none())
        .connect_timeout(portal.connect_timeout())
        .build()?)
}

/// Submits the login form and extracts the session token from the response
/// cookies. Wrong password and network-level failure both end the run; only
/// the missing-cookie case is reported as an authentication failure.
pub async fn login(
    client: &Client,
    portal: &Portal,
    credentials: &Credentials,
) -> Result<SessionToken, AceError> {
    let response = client
        .post(portal.login_url()?)
        .form(&[
            ("username", credentials.username()),
            ("password", credentials.password()),
        ])
        .send()
        .await?;

    for value in response.headers().get_all(header::SET_COOKIE) {
        match value.to_str() {
            Ok(value) if value.starts_with(TOKEN_PREFIX) => {
                tracing::debug!("session ticket obtained");
                return Ok(SessionToken::new(value.to_string()));
            }
            _ => continue,
        }
    }

    Err(AceError::AuthFailed {
        username: credentials.username().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::PortalBuilder;
    use mockito::{Matcher, Server};
    use reqwest::Url;

    fn portal_for(server: &Server) -> Portal {
        PortalBuilder::default()
            .sso_base(Url::parse(&server.url()).unwrap())
            .data_base(Url::parse(&server.url()).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn login_posts_form_and_extracts_ticket() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/login/")
            .match_header(
                "content-type",
                Matcher::Regex("application/x-www-form-urlencoded".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "alice".into()),
                Matcher::UrlEncoded("password".into(), "hunter2".into()),
            ]))
            .with_header("set-cookie", "unrelated=1; Path=/")
            .with_header("set-cookie", "ace_sso_tkt=abc123; Path=/; Secure")
            .create_async()
            .await;

        let portal = portal_for(&server);
        let client = build_client(&portal).unwrap();
        let credentials = Credentials::new("alice", "hunter2");
        let token = login(&client, &portal, &credentials).await.unwrap();

        // the whole cookie value is the token, attributes included
        assert_eq!(token.as_cookie(), "ace_sso_tkt=abc123; Path=/; Secure");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_without_matching_cookie_is_auth_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/login/")
            .with_header("set-cookie", "unrelated=1")
            .create_async()
            .await;

        let portal = portal_for(&server);
        let client = build_client(&portal).unwrap();
        let credentials = Credentials::new("alice", "wrong");
        let err = login(&client, &portal, &credentials).await.unwrap_err();

        assert!(matches!(err, AceError::AuthFailed { username } if username == "alice"));
    }

    #[test]
    fn token_debug_is_masked() {
        let token = SessionToken::new("ace_sso_tkt=abc123".to_string());
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("abc123"));
    }
}
