//! Blade configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `INPUT_BLADE_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default implementation bound to `user.service`.
pub const DEFAULT_USER_SERVICE: &str = "fixture";
/// Default implementation bound to `chat.service`.
pub const DEFAULT_CHAT_SERVICE: &str = "tracing";
/// Default fault-injection mode for the fixture user service.
pub const DEFAULT_USER_FETCH_MODE: &str = "succeed";

/// Settings selecting and configuring the blade's services.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INPUT_BLADE")]
pub struct BladeSettings {
    /// Implementation identifier for `user.service`.
    #[ortho_config(default = DEFAULT_USER_SERVICE.to_owned())]
    pub user_service: Option<String>,
    /// Implementation identifier for `chat.service`.
    pub chat_service: Option<String>,
    /// User id the fixture identity service reports as signed in.
    pub current_user_id: Option<String>,
    /// Fixture fetch behaviour: `succeed`, `fail`, or `fail:<count>`.
    pub user_fetch_mode: Option<String>,
}

impl BladeSettings {
    /// Implementation bound to `user.service`, falling back to the default.
    pub fn user_service(&self) -> &str {
        self.user_service.as_deref().unwrap_or(DEFAULT_USER_SERVICE)
    }

    /// Implementation bound to `chat.service`, falling back to the default.
    pub fn chat_service(&self) -> &str {
        self.chat_service.as_deref().unwrap_or(DEFAULT_CHAT_SERVICE)
    }

    /// Configured fetch mode, falling back to the default.
    pub fn user_fetch_mode(&self) -> &str {
        self.user_fetch_mode
            .as_deref()
            .unwrap_or(DEFAULT_USER_FETCH_MODE)
    }
}
