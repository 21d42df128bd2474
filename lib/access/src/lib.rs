//! Route authorization for rolegate.
//!
//! This crate decides, for a single request, whether it may proceed or must be
//! redirected. It never touches the network, the clock or shared state; the
//! caller supplies the request path, the verified identity claims (if any) and
//! the evaluation instant.
//!
//! - [`ZoneTable`] classifies a path into a [`Zone`] by longest-prefix match
//! - [`Gate`] applies the decision table to a zone and optional [`Claims`]
//! - [`RoleSet`] holds the opaque role strings carried by the claims
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rolegate_access::{Claims, Decision, Gate, RoleSet};
//!
//! let gate = Gate::default();
//! let now = Utc::now();
//!
//! // Unauthenticated users are sent to sign in before reaching a protected page.
//! let decision = gate.evaluate("/dashboard", None, now);
//! assert_eq!(decision, Decision::redirect("/auth/signin"));
//!
//! // Signed-in users without the admin role are sent back to the landing page.
//! let claims = Claims::new("auth0|123").with_roles(RoleSet::user());
//! let decision = gate.evaluate("/admin/users", Some(&claims), now);
//! assert_eq!(decision, Decision::redirect("/dashboard"));
//!
//! // Admins pass.
//! let claims = Claims::new("auth0|456").with_roles(RoleSet::admin());
//! assert!(gate.evaluate("/admin/users", Some(&claims), now).is_allow());
//! ```

pub mod claims;
pub mod decision;
pub mod error;
pub mod gate;
pub mod oidc;
pub mod role;
pub mod zone;

// Re-export main types at crate root
pub use claims::Claims;
pub use decision::Decision;
pub use error::ConfigError;
pub use gate::{Gate, GateConfig};
pub use oidc::OidcConfig;
pub use role::{ADMIN, Role, RoleSet, USER};
pub use zone::{Zone, ZoneRule, ZoneTable};
