//! Composition root: settings and the service registry built from them.

pub mod config;
pub mod registry;

pub use config::BladeSettings;
pub use registry::{
    CHAT_SERVICE, RegistryError, ServiceHandle, ServiceName, ServiceRegistry, USER_SERVICE,
};
