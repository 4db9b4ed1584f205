//! Admin gate: the single checkpoint in front of every mutating route.
//!
//! Admin access needs both `APP_ENV=development` and `ENABLE_ADMIN=true`,
//! matched exactly. There are no roles or tokens and a denial carries no
//! reason beyond `Forbidden`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::error::ServerError;

/// Deployment mode under which admin routes may run.
pub const DEVELOPMENT_MODE: &str = "development";

/// Raw configuration values the gate decides on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSettings {
    /// `APP_ENV`
    pub app_env: Option<String>,
    /// `ENABLE_ADMIN`
    pub enable_admin: Option<String>,
}

/// Outcome of [`AdminGate::require_admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Proceed,
    Forbidden,
}

impl Authorization {
    pub fn into_result(self) -> Result<(), ServerError> {
        match self {
            Authorization::Proceed => Ok(()),
            Authorization::Forbidden => Err(ServerError::Forbidden),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminGate {
    settings: AdminSettings,
}

impl AdminGate {
    pub fn new(settings: AdminSettings) -> Self {
        Self { settings }
    }

    pub fn is_admin_enabled(&self) -> bool {
        self.settings.app_env.as_deref() == Some(DEVELOPMENT_MODE)
            && self.settings.enable_admin.as_deref() == Some("true")
    }

    pub fn require_admin(&self) -> Authorization {
        if self.is_admin_enabled() {
            Authorization::Proceed
        } else {
            Authorization::Forbidden
        }
    }
}

/// Rejects the request with 403 before any handler or body extractor runs.
pub async fn admin_guard(
    State(gate): State<AdminGate>,
    req: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if let Err(denied) = gate.require_admin().into_result() {
        warn!(method = %req.method(), path = %req.uri().path(), "Admin request denied");
        return Err(denied);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(app_env: Option<&str>, enable_admin: Option<&str>) -> AdminGate {
        AdminGate::new(AdminSettings {
            app_env: app_env.map(str::to_string),
            enable_admin: enable_admin.map(str::to_string),
        })
    }

    #[test]
    fn enabled_only_with_both_flags() {
        assert!(gate(Some("development"), Some("true")).is_admin_enabled());
    }

    #[test]
    fn opt_in_is_case_sensitive() {
        assert!(!gate(Some("development"), Some("TRUE")).is_admin_enabled());
        assert!(!gate(Some("Development"), Some("true")).is_admin_enabled());
        assert!(!gate(Some("development"), Some(" true")).is_admin_enabled());
    }

    #[test]
    fn production_is_never_admin() {
        assert!(!gate(Some("production"), Some("true")).is_admin_enabled());
    }

    #[test]
    fn unset_flags_disable_admin() {
        assert!(!gate(None, None).is_admin_enabled());
        assert!(!gate(None, Some("true")).is_admin_enabled());
        assert!(!AdminGate::new(AdminSettings::default()).is_admin_enabled());
    }

    #[test]
    fn development_without_opt_in_is_forbidden() {
        let gate = gate(Some("development"), None);
        assert_eq!(gate.require_admin(), Authorization::Forbidden);
        assert!(matches!(
            gate.require_admin().into_result(),
            Err(ServerError::Forbidden)
        ));
    }

    #[test]
    fn require_admin_covers_all_flag_combinations() {
        let cases = [
            (Some("development"), Some("true"), Authorization::Proceed),
            (Some("development"), Some("false"), Authorization::Forbidden),
            (Some("production"), Some("true"), Authorization::Forbidden),
            (Some("production"), Some("false"), Authorization::Forbidden),
        ];
        for (env, enable, expected) in cases {
            assert_eq!(gate(env, enable).require_admin(), expected, "{env:?}/{enable:?}");
        }
    }
}
