//! Verified identity claims attached to a request.
//!
//! Claims are produced fresh for every request by whatever verified the
//! session (the signed session cookie in the server). Nothing in this crate
//! verifies signatures or caches claims; `Option<Claims>` is the whole
//! authentication state of a request, with `None` meaning "not signed in".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::RoleSet;

/// Identity facts for one signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque subject identifier from the identity provider.
    subject: String,
    /// Display name, if the provider supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Email address, if the provider supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Profile picture URL, if the provider supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    /// Roles granted by the provider. May be empty.
    #[serde(default)]
    roles: RoleSet,
    /// Instant after which these claims no longer identify anyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl Claims {
    /// Creates claims for a subject with no roles and no expiry.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            name: None,
            email: None,
            picture: None,
            roles: RoleSet::none(),
            expires_at: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Sets the profile picture URL.
    #[must_use]
    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture;
        self
    }

    /// Sets the roles.
    #[must_use]
    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.roles = roles;
        self
    }

    /// Sets the expiry instant.
    #[must_use]
    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns true if the claims hold the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    /// Returns true if the claims carry an expiry at or before `now`.
    ///
    /// Claims without an expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at <= now)
    }

    /// Returns true if the subject is present.
    ///
    /// Claims with an empty subject identify no one and are treated as absent.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.subject.trim().is_empty()
    }

    /// Returns these claims if they still identify someone at `now`.
    #[must_use]
    pub fn active_at(&self, now: DateTime<Utc>) -> Option<&Self> {
        (self.is_well_formed() && !self.is_expired_at(now)).then_some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn builder_sets_fields() {
        let expires = Utc::now() + Duration::hours(1);
        let claims = Claims::new("auth0|123")
            .with_name(Some("Ada".to_string()))
            .with_email(Some("ada@example.com".to_string()))
            .with_picture(Some("https://cdn.example.com/ada.png".to_string()))
            .with_roles(RoleSet::admin())
            .expiring_at(expires);

        assert_eq!(claims.subject(), "auth0|123");
        assert_eq!(claims.name(), Some("Ada"));
        assert_eq!(claims.email(), Some("ada@example.com"));
        assert_eq!(claims.picture(), Some("https://cdn.example.com/ada.png"));
        assert!(claims.is_admin());
        assert_eq!(claims.expires_at(), Some(expires));
    }

    #[test]
    fn claims_without_expiry_never_expire() {
        let claims = Claims::new("sub");
        assert!(!claims.is_expired_at(Utc::now() + Duration::days(3650)));
        assert!(claims.active_at(Utc::now()).is_some());
    }

    #[test]
    fn expiry_boundary_counts_as_expired() {
        let now = Utc::now();
        let claims = Claims::new("sub").expiring_at(now);
        assert!(claims.is_expired_at(now));
        assert!(!claims.is_expired_at(now - Duration::seconds(1)));
    }

    #[test]
    fn expired_claims_are_inactive() {
        let now = Utc::now();
        let claims = Claims::new("sub").expiring_at(now - Duration::minutes(5));
        assert!(claims.active_at(now).is_none());
    }

    #[test]
    fn blank_subject_is_inactive() {
        let claims = Claims::new("  ");
        assert!(!claims.is_well_formed());
        assert!(claims.active_at(Utc::now()).is_none());
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let claims: Claims = serde_json::from_str(r#"{"subject":"sub_1"}"#).expect("deserialize");
        assert_eq!(claims.subject(), "sub_1");
        assert!(claims.roles().is_empty());
        assert!(claims.picture().is_none());
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn missing_subject_is_rejected() {
        let result: Result<Claims, _> = serde_json::from_str(r#"{"roles":["admin"]}"#);
        assert!(result.is_err());
    }
}
