//! OIDC (OpenID Connect) configuration.
//!
//! Configuration for signing users in through an external OIDC identity
//! provider. The server turns this into a discovered client at startup.

use serde::{Deserialize, Serialize};

/// Configuration for the OIDC identity provider.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// The OIDC issuer URL (e.g., "https://tenant.auth0.com/").
    /// Used for OIDC discovery.
    issuer_url: String,
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URI for the OAuth2 callback
    /// (e.g., "https://app.example.com/api/auth/callback").
    redirect_uri: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,email,profile"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// The ID token claim that carries the user's roles.
    /// Default: "roles"
    #[serde(default = "default_roles_claim")]
    roles_claim: String,
    /// Roles granted when the ID token has no roles claim at all,
    /// as a comma-separated string. Default: "user"
    #[serde(default = "default_default_roles")]
    default_roles: String,
}

fn default_scopes() -> String {
    "openid,email,profile".to_string()
}

fn default_roles_claim() -> String {
    "roles".to_string()
}

fn default_default_roles() -> String {
    "user".to_string()
}

fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

impl OidcConfig {
    /// Creates a new OIDC configuration with defaults for optional fields.
    #[must_use]
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            issuer_url,
            client_id,
            client_secret,
            redirect_uri,
            scopes: default_scopes(),
            roles_claim: default_roles_claim(),
            default_roles: default_default_roles(),
        }
    }

    #[must_use]
    pub fn issuer_url(&self) -> &str {
        &self.issuer_url
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the OAuth2 scopes to request, parsed from the comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        split_list(&self.scopes)
    }

    /// Returns the name of the claim containing user roles.
    #[must_use]
    pub fn roles_claim(&self) -> &str {
        &self.roles_claim
    }

    /// Returns the roles granted when the ID token carries no roles claim.
    #[must_use]
    pub fn default_roles(&self) -> Vec<String> {
        split_list(&self.default_roles)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OidcConfig {
        OidcConfig::new(
            "https://tenant.auth0.com/".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://app.example.com/api/auth/callback".to_string(),
        )
    }

    #[test]
    fn new_config_has_defaults() {
        let config = config();
        assert_eq!(config.issuer_url(), "https://tenant.auth0.com/");
        assert_eq!(config.client_id(), "client-id");
        assert_eq!(config.client_secret(), "client-secret");
        assert_eq!(
            config.redirect_uri(),
            "https://app.example.com/api/auth/callback"
        );
        assert_eq!(config.scopes(), vec!["openid", "email", "profile"]);
        assert_eq!(config.roles_claim(), "roles");
        assert_eq!(config.default_roles(), vec!["user".to_string()]);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "issuer_url": "https://tenant.auth0.com/",
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "https://app.example.com/api/auth/callback"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.client_id(), "my-client");
        assert_eq!(config.scopes(), vec!["openid", "email", "profile"]);
        assert_eq!(config.roles_claim(), "roles");
        assert_eq!(config.default_roles(), vec!["user".to_string()]);
    }

    #[test]
    fn lists_parse_comma_separated_and_skip_blanks() {
        let json = r#"{
            "issuer_url": "https://tenant.auth0.com/",
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "https://app.example.com/api/auth/callback",
            "scopes": "openid, email, profile, ",
            "default_roles": "user, viewer"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.scopes(), vec!["openid", "email", "profile"]);
        assert_eq!(
            config.default_roles(),
            vec!["user".to_string(), "viewer".to_string()]
        );
    }

    #[test]
    fn empty_default_roles_grants_nothing() {
        let json = r#"{
            "issuer_url": "https://tenant.auth0.com/",
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "https://app.example.com/api/auth/callback",
            "default_roles": ""
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");
        assert!(config.default_roles().is_empty());
    }
}
