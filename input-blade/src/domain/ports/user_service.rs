//! Driven port for retrieving the signed-in user.
//!
//! The view model asks this port for the current user exactly once when it
//! is built. Adapters deliver a single outcome: the [`User`] or a
//! [`UserRetrievalError`] carrying an opaque code and message.

use std::str::FromStr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::domain::{User, UserRetrievalError};

/// Code reported when no current user has been configured.
pub const NO_CURRENT_USER_CODE: u32 = 404;
/// Code reported for injected fetch failures.
pub const INJECTED_FAILURE_CODE: u32 = 500;

/// Identity service contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Resolve the user the session belongs to.
    async fn current_user(&self) -> Result<User, UserRetrievalError>;
}

/// Fault-injection strategy for [`FixtureUserService`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserFetchBehaviour {
    /// Return the configured user (or report that none is set).
    #[default]
    AlwaysSucceed,
    /// Fail the next `n` fetches, then behave like
    /// [`UserFetchBehaviour::AlwaysSucceed`].
    FailNTimes(u32),
    /// Fail every fetch.
    AlwaysFail,
}

/// Error returned when parsing a [`UserFetchBehaviour`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user fetch mode `{0}`; expected `succeed`, `fail`, or `fail:<count>`")]
pub struct ParseUserFetchBehaviourError(String);

impl FromStr for UserFetchBehaviour {
    type Err = ParseUserFetchBehaviourError;

    /// Parse `succeed`, `fail`, or `fail:<count>`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let unknown = || ParseUserFetchBehaviourError(value.to_owned());
        match value.trim() {
            "succeed" => Ok(Self::AlwaysSucceed),
            "fail" => Ok(Self::AlwaysFail),
            other => {
                let count = other.strip_prefix("fail:").ok_or_else(unknown)?;
                count
                    .parse::<u32>()
                    .map(Self::FailNTimes)
                    .map_err(|_| unknown())
            }
        }
    }
}

/// In-memory identity service used in development and tests.
///
/// Without a configured user every fetch fails with
/// [`NO_CURRENT_USER_CODE`]. The behaviour strategy is fixed at construction.
///
/// # Examples
/// ```
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// use input_blade::domain::User;
/// use input_blade::domain::ports::{FixtureUserService, UserFetchBehaviour, UserService};
///
/// let service = FixtureUserService::new(UserFetchBehaviour::FailNTimes(1))
///     .with_current_user(User::try_from_id("u1").unwrap());
/// assert!(service.current_user().await.is_err());
/// assert!(service.current_user().await.is_ok());
/// assert_eq!(service.calls(), 2);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct FixtureUserService {
    current_user: Option<User>,
    behaviour: UserFetchBehaviour,
    failures_remaining: AtomicU32,
    calls: AtomicUsize,
}

impl FixtureUserService {
    /// Build a fixture with the given behaviour and no current user.
    pub fn new(behaviour: UserFetchBehaviour) -> Self {
        let failures_remaining = match behaviour {
            UserFetchBehaviour::FailNTimes(count) => count,
            UserFetchBehaviour::AlwaysSucceed | UserFetchBehaviour::AlwaysFail => 0,
        };
        Self {
            current_user: None,
            behaviour,
            failures_remaining: AtomicU32::new(failures_remaining),
            calls: AtomicUsize::new(0),
        }
    }

    /// Set the user returned by successful fetches.
    #[must_use]
    pub fn with_current_user(mut self, user: User) -> Self {
        self.current_user = Some(user);
        self
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn should_inject_failure(&self) -> bool {
        match self.behaviour {
            UserFetchBehaviour::AlwaysSucceed => false,
            UserFetchBehaviour::AlwaysFail => true,
            UserFetchBehaviour::FailNTimes(_) => self
                .failures_remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                    left.checked_sub(1)
                })
                .is_ok(),
        }
    }
}

#[async_trait]
impl UserService for FixtureUserService {
    async fn current_user(&self) -> Result<User, UserRetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_inject_failure() {
            debug!(behaviour = ?self.behaviour, "injecting user fetch failure");
            return Err(UserRetrievalError::new(
                INJECTED_FAILURE_CODE,
                "injected user data fetch failure",
            ));
        }
        self.current_user
            .clone()
            .ok_or_else(|| UserRetrievalError::new(NO_CURRENT_USER_CODE, "no current user"))
    }
}
