//! rolegate web server.
//!
//! Signs users in through an OIDC provider, keeps their claims in a signed
//! session cookie and puts every route behind the role-based gate from
//! `rolegate-access`.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
