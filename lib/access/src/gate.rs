//! The authorization decision engine.
//!
//! [`Gate`] turns a zone and the request's claims into a [`Decision`] by
//! walking an ordered rule list; the first matching rule wins:
//!
//! 1. protected or admin zone, no identity: redirect to sign-in
//! 2. auth-flow zone, signed in: redirect to the landing page
//! 3. admin zone, signed in without the `admin` role: redirect to the landing page
//! 4. anything else: allow
//!
//! Expired or malformed claims count as no identity for every rule. The gate
//! is immutable once built and holds no shared state, so one instance can be
//! shared across all request handlers.

use chrono::{DateTime, Utc};
use rolegate_core::RoutePath;
use serde::{Deserialize, Serialize};

use crate::claims::Claims;
use crate::decision::Decision;
use crate::error::ConfigError;
use crate::zone::{Zone, ZoneTable};

/// Configuration for the gate.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Where unauthenticated requests for protected pages are sent.
    /// Default: "/auth/signin"
    #[serde(default = "default_sign_in_path")]
    sign_in_path: String,
    /// Where signed-in users are sent away from sign-in pages and admin pages.
    /// Default: "/dashboard"
    #[serde(default = "default_landing_path")]
    landing_path: String,
    /// Zone table as comma-separated `prefix=zone` rules.
    /// Default: [`ZoneTable::DEFAULT_RULES`]
    #[serde(default = "default_zones")]
    zones: String,
}

fn default_sign_in_path() -> String {
    "/auth/signin".to_string()
}

fn default_landing_path() -> String {
    "/dashboard".to_string()
}

fn default_zones() -> String {
    ZoneTable::DEFAULT_RULES.to_string()
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            sign_in_path: default_sign_in_path(),
            landing_path: default_landing_path(),
            zones: default_zones(),
        }
    }
}

impl GateConfig {
    #[must_use]
    pub fn new(sign_in_path: String, landing_path: String, zones: String) -> Self {
        Self {
            sign_in_path,
            landing_path,
            zones,
        }
    }

    #[must_use]
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    #[must_use]
    pub fn zones(&self) -> &str {
        &self.zones
    }

    /// Builds the gate described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone table does not parse, a redirect target
    /// is not an absolute path, or a redirect target would itself redirect.
    pub fn build(&self) -> rolegate_core::Result<Gate, ConfigError> {
        let table = ZoneTable::parse(&self.zones)?;
        let sign_in_path = absolute_path(&self.sign_in_path)?;
        let landing_path = absolute_path(&self.landing_path)?;
        let gate = Gate::new(table, sign_in_path, landing_path)?;
        tracing::debug!(
            zones = %gate.table,
            sign_in_path = %gate.sign_in_path,
            landing_path = %gate.landing_path,
            "Built route gate"
        );
        Ok(gate)
    }
}

fn absolute_path(raw: &str) -> Result<RoutePath, ConfigError> {
    if raw.starts_with('/') {
        Ok(RoutePath::new(raw))
    } else {
        Err(ConfigError::InvalidPath {
            path: raw.to_string(),
        })
    }
}

/// Route authorization gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    table: ZoneTable,
    sign_in_path: RoutePath,
    landing_path: RoutePath,
}

impl Gate {
    /// Creates a gate.
    ///
    /// Both redirect targets must be pages the redirected client can actually
    /// reach: the sign-in path must not require an identity, and the landing
    /// path must be reachable by any signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RedirectLoop`] if either target would redirect
    /// again.
    pub fn new(
        table: ZoneTable,
        sign_in_path: RoutePath,
        landing_path: RoutePath,
    ) -> Result<Self, ConfigError> {
        let sign_in_zone = table.classify_path(&sign_in_path);
        if sign_in_zone.requires_identity() {
            return Err(ConfigError::RedirectLoop {
                path: sign_in_path.to_string(),
                zone: sign_in_zone,
            });
        }

        let landing_zone = table.classify_path(&landing_path);
        if matches!(landing_zone, Zone::AuthFlow | Zone::ProtectedAdmin) {
            return Err(ConfigError::RedirectLoop {
                path: landing_path.to_string(),
                zone: landing_zone,
            });
        }

        Ok(Self {
            table,
            sign_in_path,
            landing_path,
        })
    }

    #[must_use]
    pub fn table(&self) -> &ZoneTable {
        &self.table
    }

    #[must_use]
    pub fn sign_in_path(&self) -> &RoutePath {
        &self.sign_in_path
    }

    #[must_use]
    pub fn landing_path(&self) -> &RoutePath {
        &self.landing_path
    }

    /// Classifies a raw request path.
    #[must_use]
    pub fn classify(&self, path: &str) -> Zone {
        self.table.classify(path)
    }

    /// Decides a request in `zone` carrying `claims`, evaluated at `now`.
    #[must_use]
    pub fn decide(&self, zone: Zone, claims: Option<&Claims>, now: DateTime<Utc>) -> Decision {
        let claims = claims.and_then(|c| c.active_at(now));
        match (zone, claims) {
            (Zone::Protected | Zone::ProtectedAdmin, None) => {
                Decision::Redirect(self.sign_in_path.clone())
            }
            (Zone::AuthFlow, Some(_)) => Decision::Redirect(self.landing_path.clone()),
            (Zone::ProtectedAdmin, Some(claims)) if !claims.is_admin() => {
                Decision::Redirect(self.landing_path.clone())
            }
            _ => Decision::Allow,
        }
    }

    /// Classifies `path` and decides it in one step.
    #[must_use]
    pub fn evaluate(&self, path: &str, claims: Option<&Claims>, now: DateTime<Utc>) -> Decision {
        self.decide(self.classify(path), claims, now)
    }

    /// Returns true if a request for `path` with these claims would be allowed.
    ///
    /// Pages use this to decide which links to render, so navigation and
    /// enforcement cannot disagree.
    #[must_use]
    pub fn permits(&self, path: &str, claims: Option<&Claims>, now: DateTime<Utc>) -> bool {
        self.evaluate(path, claims, now).is_allow()
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            table: ZoneTable::default(),
            sign_in_path: RoutePath::new(&default_sign_in_path()),
            landing_path: RoutePath::new(&default_landing_path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleSet;
    use chrono::Duration;

    fn signed_in(roles: &[&str]) -> Claims {
        Claims::new("auth0|test").with_roles(RoleSet::from_values(roles.iter().copied()))
    }

    fn sign_in() -> Decision {
        Decision::redirect("/auth/signin")
    }

    fn landing() -> Decision {
        Decision::redirect("/dashboard")
    }

    #[test]
    fn scenario_dashboard_without_claims_goes_to_sign_in() {
        let gate = Gate::default();
        assert_eq!(gate.evaluate("/dashboard", None, Utc::now()), sign_in());
    }

    #[test]
    fn scenario_admin_as_user_goes_to_landing() {
        let gate = Gate::default();
        let claims = signed_in(&["user"]);
        assert_eq!(gate.evaluate("/admin/users", Some(&claims), Utc::now()), landing());
    }

    #[test]
    fn scenario_admin_as_admin_is_allowed() {
        let gate = Gate::default();
        let claims = signed_in(&["admin", "user"]);
        assert_eq!(
            gate.evaluate("/admin/users", Some(&claims), Utc::now()),
            Decision::Allow
        );
    }

    #[test]
    fn scenario_sign_in_page_when_signed_in_goes_to_landing() {
        let gate = Gate::default();
        let claims = signed_in(&["user"]);
        assert_eq!(gate.evaluate("/auth/signin", Some(&claims), Utc::now()), landing());
    }

    #[test]
    fn scenario_root_without_claims_is_allowed() {
        let gate = Gate::default();
        assert_eq!(gate.evaluate("/", None, Utc::now()), Decision::Allow);
    }

    #[test]
    fn public_zone_always_allows() {
        let gate = Gate::default();
        let now = Utc::now();
        let expired = signed_in(&["admin"]).expiring_at(now - Duration::hours(1));
        let claims = [
            None,
            Some(signed_in(&[])),
            Some(signed_in(&["user"])),
            Some(signed_in(&["admin"])),
            Some(expired),
        ];
        for path in ["/", "/unknown/path", "/administrator", "/api/protected/user"] {
            for c in &claims {
                assert_eq!(gate.evaluate(path, c.as_ref(), now), Decision::Allow, "path {path}");
            }
        }
    }

    #[test]
    fn protected_zones_without_claims_go_to_sign_in() {
        let gate = Gate::default();
        for path in ["/dashboard", "/dashboard/settings", "/admin", "/admin/users/"] {
            assert_eq!(gate.evaluate(path, None, Utc::now()), sign_in(), "path {path}");
        }
    }

    #[test]
    fn auth_flow_with_any_claims_goes_to_landing() {
        let gate = Gate::default();
        for roles in [&[][..], &["user"][..], &["admin"][..], &["editor"][..]] {
            let claims = signed_in(roles);
            assert_eq!(
                gate.evaluate("/auth/signin", Some(&claims), Utc::now()),
                landing(),
                "roles {roles:?}"
            );
        }
    }

    #[test]
    fn auth_flow_without_claims_is_allowed() {
        let gate = Gate::default();
        assert!(gate.evaluate("/auth/signin", None, Utc::now()).is_allow());
        assert!(gate.evaluate("/auth/error", None, Utc::now()).is_allow());
    }

    #[test]
    fn protected_zone_allows_any_signed_in_user() {
        let gate = Gate::default();
        for roles in [&[][..], &["user"][..], &["editor"][..]] {
            let claims = signed_in(roles);
            assert!(gate.evaluate("/dashboard", Some(&claims), Utc::now()).is_allow());
        }
    }

    #[test]
    fn admin_check_is_case_sensitive() {
        let gate = Gate::default();
        let claims = signed_in(&["Admin", "ADMIN", "administrator"]);
        assert_eq!(gate.evaluate("/admin", Some(&claims), Utc::now()), landing());
    }

    #[test]
    fn admin_role_alone_is_enough() {
        let gate = Gate::default();
        let claims = signed_in(&["admin"]);
        assert!(gate.evaluate("/admin", Some(&claims), Utc::now()).is_allow());
    }

    #[test]
    fn expired_claims_count_as_none() {
        let gate = Gate::default();
        let now = Utc::now();
        let claims = signed_in(&["admin", "user"]).expiring_at(now - Duration::seconds(1));

        assert_eq!(gate.decide(Zone::Protected, Some(&claims), now), sign_in());
        assert_eq!(gate.decide(Zone::ProtectedAdmin, Some(&claims), now), sign_in());
        assert!(gate.decide(Zone::AuthFlow, Some(&claims), now).is_allow());
    }

    #[test]
    fn unexpired_claims_are_honored() {
        let gate = Gate::default();
        let now = Utc::now();
        let claims = signed_in(&["user"]).expiring_at(now + Duration::minutes(5));
        assert!(gate.decide(Zone::Protected, Some(&claims), now).is_allow());
    }

    #[test]
    fn blank_subject_counts_as_none() {
        let gate = Gate::default();
        let claims = Claims::new("").with_roles(RoleSet::admin());
        assert_eq!(gate.decide(Zone::ProtectedAdmin, Some(&claims), Utc::now()), sign_in());
    }

    #[test]
    fn decide_is_idempotent() {
        let gate = Gate::default();
        let now = Utc::now();
        let claims = signed_in(&["user"]);
        for zone in Zone::ALL {
            for c in [None, Some(&claims)] {
                assert_eq!(gate.decide(zone, c, now), gate.decide(zone, c, now));
            }
        }
    }

    #[test]
    fn permits_matches_evaluate() {
        let gate = Gate::default();
        let now = Utc::now();
        let user = signed_in(&["user"]);
        let admin = signed_in(&["admin"]);
        assert!(!gate.permits("/admin", Some(&user), now));
        assert!(gate.permits("/admin", Some(&admin), now));
        assert!(gate.permits("/dashboard", Some(&user), now));
        assert!(!gate.permits("/dashboard", None, now));
    }

    #[test]
    fn config_defaults_build_default_gate() {
        let gate = GateConfig::default().build().expect("build");
        assert_eq!(gate, Gate::default());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GateConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.sign_in_path(), "/auth/signin");
        assert_eq!(config.landing_path(), "/dashboard");
        assert_eq!(config.zones(), ZoneTable::DEFAULT_RULES);
    }

    #[test]
    fn custom_paths_are_used_for_redirects() {
        let config = GateConfig::new(
            "/login".to_string(),
            "/home".to_string(),
            "/login=auth-flow,/home=protected,/ops=protected-admin".to_string(),
        );
        let gate = config.build().expect("build");
        let user = signed_in(&["user"]);
        let now = Utc::now();

        assert_eq!(gate.evaluate("/home", None, now), Decision::redirect("/login"));
        assert_eq!(gate.evaluate("/ops", Some(&user), now), Decision::redirect("/home"));
        assert_eq!(gate.evaluate("/login", Some(&user), now), Decision::redirect("/home"));
    }

    #[test]
    fn protected_sign_in_path_is_rejected() {
        let table = ZoneTable::default();
        let err = Gate::new(table, RoutePath::new("/dashboard/login"), RoutePath::new("/dashboard"))
            .expect_err("should fail");
        assert_eq!(
            err,
            ConfigError::RedirectLoop {
                path: "/dashboard/login".to_string(),
                zone: Zone::Protected,
            }
        );
    }

    #[test]
    fn landing_in_auth_flow_or_admin_is_rejected() {
        for landing in ["/auth/welcome", "/admin"] {
            let err = Gate::new(
                ZoneTable::default(),
                RoutePath::new("/auth/signin"),
                RoutePath::new(landing),
            )
            .expect_err("should fail");
            assert!(matches!(err, ConfigError::RedirectLoop { .. }), "landing {landing}");
        }
    }

    #[test]
    fn public_landing_is_accepted() {
        let gate = Gate::new(
            ZoneTable::default(),
            RoutePath::new("/auth/signin"),
            RoutePath::root(),
        )
        .expect("build");
        let claims = signed_in(&["user"]);
        assert_eq!(
            gate.evaluate("/auth/signin", Some(&claims), Utc::now()),
            Decision::redirect("/")
        );
    }

    #[test]
    fn relative_paths_in_config_are_rejected() {
        let config = GateConfig::new(
            "auth/signin".to_string(),
            "/dashboard".to_string(),
            ZoneTable::DEFAULT_RULES.to_string(),
        );
        assert!(config.build().is_err());
    }

    #[test]
    fn gate_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Gate>();
    }
}
