//! Service registry mapping logical service names to port implementations.
//!
//! The registry is built once from [`BladeSettings`] and handed around
//! explicitly; there is no process-wide lookup table. Tests replace a
//! binding with [`ServiceRegistry::register`] before wiring the view model.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::config::BladeSettings;
use crate::domain::ports::{
    ChatService, FixtureChatService, FixtureUserService, ParseUserFetchBehaviourError,
    UserFetchBehaviour, UserService,
};
use crate::domain::{InputBladeServices, User, UserValidationError};
use crate::outbound::TracingChatService;

/// Logical name of the identity service.
pub const USER_SERVICE: &str = "user.service";
/// Logical name of the messaging service.
pub const CHAT_SERVICE: &str = "chat.service";

/// Logical services the blade depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    /// `user.service`
    User,
    /// `chat.service`
    Chat,
}

impl ServiceName {
    /// Logical name used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => USER_SERVICE,
            Self::Chat => CHAT_SERVICE,
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = RegistryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            USER_SERVICE => Ok(Self::User),
            CHAT_SERVICE => Ok(Self::Chat),
            other => Err(RegistryError::UnknownService {
                name: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while building or querying the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No service is registered under the requested name.
    #[error("no service registered as `{name}`")]
    UnknownService {
        /// Requested logical name.
        name: String,
    },
    /// Configuration names an implementation this build does not provide.
    #[error("unknown implementation `{implementation}` for `{service}`")]
    UnknownImplementation {
        /// Service being configured.
        service: ServiceName,
        /// Implementation identifier from configuration.
        implementation: String,
    },
    /// The configured fixture user id is invalid.
    #[error("invalid current user id: {0}")]
    InvalidUserId(#[from] UserValidationError),
    /// The configured fetch mode could not be parsed.
    #[error(transparent)]
    InvalidFetchMode(#[from] ParseUserFetchBehaviourError),
}

/// A resolved service instance.
#[derive(Clone)]
pub enum ServiceHandle {
    /// Implementation of [`UserService`].
    User(Arc<dyn UserService>),
    /// Implementation of [`ChatService`].
    Chat(Arc<dyn ChatService>),
}

impl ServiceHandle {
    /// Logical service this handle satisfies.
    #[must_use]
    pub const fn name(&self) -> ServiceName {
        match self {
            Self::User(_) => ServiceName::User,
            Self::Chat(_) => ServiceName::Chat,
        }
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceHandle").field(&self.name()).finish()
    }
}

/// Bindings for every service the blade needs.
#[derive(Clone)]
pub struct ServiceRegistry {
    user: Arc<dyn UserService>,
    chat: Arc<dyn ChatService>,
}

impl ServiceRegistry {
    /// Registry with explicit bindings.
    pub fn new(user: Arc<dyn UserService>, chat: Arc<dyn ChatService>) -> Self {
        Self { user, chat }
    }

    /// Build every binding from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when an implementation identifier is
    /// unknown or fixture options fail validation.
    ///
    /// # Examples
    /// ```
    /// use input_blade::composition::{BladeSettings, ServiceRegistry};
    ///
    /// let settings = BladeSettings {
    ///     user_service: None,
    ///     chat_service: Some("fixture".to_owned()),
    ///     current_user_id: Some("abc".to_owned()),
    ///     user_fetch_mode: None,
    /// };
    /// let registry = ServiceRegistry::from_settings(&settings).expect("valid settings");
    /// assert!(registry.resolve("chat.service").is_ok());
    /// ```
    pub fn from_settings(settings: &BladeSettings) -> Result<Self, RegistryError> {
        let user = build_user_service(settings)?;
        let chat = build_chat_service(settings)?;
        debug!(
            user_service = settings.user_service(),
            chat_service = settings.chat_service(),
            "service registry configured"
        );
        Ok(Self::new(user, chat))
    }

    /// Replace the binding the handle's service name points at.
    pub fn register(&mut self, handle: ServiceHandle) {
        debug!(service = %handle.name(), "service binding replaced");
        match handle {
            ServiceHandle::User(user) => self.user = user,
            ServiceHandle::Chat(chat) => self.chat = chat,
        }
    }

    /// Look up a service by logical name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownService`] for names other than
    /// [`USER_SERVICE`] and [`CHAT_SERVICE`].
    pub fn resolve(&self, name: &str) -> Result<ServiceHandle, RegistryError> {
        Ok(match name.parse::<ServiceName>()? {
            ServiceName::User => ServiceHandle::User(Arc::clone(&self.user)),
            ServiceName::Chat => ServiceHandle::Chat(Arc::clone(&self.chat)),
        })
    }

    /// Port bundle for constructing the view model.
    pub fn services(&self) -> InputBladeServices {
        InputBladeServices::new(Arc::clone(&self.user), Arc::clone(&self.chat))
    }
}

fn build_user_service(settings: &BladeSettings) -> Result<Arc<dyn UserService>, RegistryError> {
    match settings.user_service() {
        "fixture" => {
            let behaviour = settings.user_fetch_mode().parse::<UserFetchBehaviour>()?;
            let mut service = FixtureUserService::new(behaviour);
            if let Some(id) = settings.current_user_id.as_deref() {
                service = service.with_current_user(User::try_from_id(id)?);
            }
            Ok(Arc::new(service))
        }
        other => Err(RegistryError::UnknownImplementation {
            service: ServiceName::User,
            implementation: other.to_owned(),
        }),
    }
}

fn build_chat_service(settings: &BladeSettings) -> Result<Arc<dyn ChatService>, RegistryError> {
    match settings.chat_service() {
        "tracing" => Ok(Arc::new(TracingChatService::new())),
        "fixture" => Ok(Arc::new(FixtureChatService::default())),
        other => Err(RegistryError::UnknownImplementation {
            service: ServiceName::Chat,
            implementation: other.to_owned(),
        }),
    }
}
