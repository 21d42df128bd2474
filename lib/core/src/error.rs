//! Error handling foundation for rolegate.
//!
//! Only the `Result` alias lives here. Each crate defines its own error enums
//! and wraps them in a rootcause [`Report`] at the point of failure.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_alias_carries_values() {
        let ok: Result<&str> = Ok("/dashboard");
        assert_eq!(ok.expect("should be ok"), "/dashboard");
    }
}
