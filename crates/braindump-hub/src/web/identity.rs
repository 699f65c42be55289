use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, bail};
use serde::Deserialize;

const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_ME_URL: &str = "https://discord.com/api/users/@me";

/// Who the provider says signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub id: String,
    pub name: String,
}

/// External OAuth2 identity provider.
///
/// Uses `Pin<Box<dyn Future>>` so the router can hold `Arc<dyn IdentityProvider>`.
pub trait IdentityProvider: Send + Sync {
    /// Browser redirect target for starting sign-in.
    fn authorize_url(&self, state: &str) -> String;

    /// Trade an authorization code for the signed-in identity.
    fn exchange<'a>(
        &'a self,
        code: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderIdentity>> + Send + 'a>>;
}

pub struct DiscordProvider {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    global_name: Option<String>,
}

impl DiscordProvider {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            redirect_uri,
        }
    }

    async fn exchange_code(&self, code: &str) -> anyhow::Result<ProviderIdentity> {
        let resp = self
            .client
            .post(DISCORD_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .context("token request failed")?;
        if !resp.status().is_success() {
            bail!("token endpoint returned {}", resp.status());
        }
        let token: TokenResponse = resp.json().await.context("malformed token response")?;

        let resp = self
            .client
            .get(DISCORD_ME_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .context("profile request failed")?;
        if !resp.status().is_success() {
            bail!("profile endpoint returned {}", resp.status());
        }
        let user: DiscordUser = resp.json().await.context("malformed profile response")?;

        Ok(ProviderIdentity {
            name: user.global_name.unwrap_or(user.username),
            id: user.id,
        })
    }
}

impl IdentityProvider for DiscordProvider {
    fn authorize_url(&self, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", "identify")
            .append_pair("state", state)
            .finish();
        format!("{DISCORD_AUTHORIZE_URL}?{query}")
    }

    fn exchange<'a>(
        &'a self,
        code: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderIdentity>> + Send + 'a>> {
        Box::pin(self.exchange_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_client_and_state() {
        let provider = DiscordProvider::new(
            "abc".into(),
            "secret".into(),
            "http://localhost:3007/api/auth/callback".into(),
        );
        let url = url::Url::parse(&provider.authorize_url("xyz")).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".into(), "abc".into())));
        assert!(pairs.contains(&("state".into(), "xyz".into())));
        assert!(pairs.contains(&("scope".into(), "identify".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "http://localhost:3007/api/auth/callback".into()
        )));
        assert!(!url.as_str().contains("secret"));
    }
}
