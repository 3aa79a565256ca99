//! Session manager: the sole orchestrator of authentication state.
//!
//! State machine: `Initializing` → `Authenticated` | `Unauthenticated`.
//! Every transition re-derives state from the stored token, so triggers that
//! arrive in quick succession (a poll tick right after a changed event)
//! converge to the same result. All transitions run on the single runtime;
//! none interleave mid-evaluation.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use perk_core::{SessionState, User};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::events::{AuthEvent, AuthEvents};
use crate::expiry;
use crate::token_store::TokenStore;

/// How often the stored token is re-checked for expiry.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The remote login collaborator. Implemented by the API client; stubbed in
/// tests. Returns the issued bearer token on success.
#[allow(async_fn_in_trait)]
pub trait LoginService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

struct Inner {
    store: Arc<dyn TokenStore>,
    events: AuthEvents,
    state: watch::Sender<SessionState>,
    poll_interval: Duration,
    poll_task: Mutex<Option<JoinHandle<()>>>,
    listener_task: Mutex<Option<JoinHandle<()>>>,
}

/// Owns authentication state for the process and exposes it through a
/// watch channel. Must be created inside a Tokio runtime: it spawns the
/// expiry poll and the auth-changed listener as background tasks.
pub struct SessionManager<S> {
    inner: Arc<Inner>,
    service: S,
}

impl<S: LoginService> SessionManager<S> {
    /// Start the manager: resolve the stored token once (ending the
    /// `Initializing` phase), subscribe to the auth-changed channel, and arm
    /// the expiry poll if the resolution landed authenticated.
    ///
    /// Exactly one of three paths runs during the initial resolution:
    /// a valid token yields `Authenticated`, a present-but-expired or
    /// undecodable token runs the logout side effect, an absent token yields
    /// `Unauthenticated` with no side effects.
    #[must_use]
    pub fn start(
        service: S,
        store: Arc<dyn TokenStore>,
        events: AuthEvents,
        poll_interval: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        let inner = Arc::new(Inner {
            store,
            events,
            state,
            poll_interval,
            poll_task: Mutex::new(None),
            listener_task: Mutex::new(None),
        });

        inner.resolve();
        Inner::spawn_listener(&inner);

        Self { inner, service }
    }

    /// Authenticate against the remote service.
    ///
    /// On success the token is persisted, state transitions to
    /// `Authenticated`, a changed event is broadcast, and the expiry poll is
    /// re-armed. This is the only operation that surfaces an error across
    /// the manager boundary.
    ///
    /// # Errors
    ///
    /// `AuthError::LoginFailed` when the service rejects the credentials or
    /// the call fails; `AuthError::UndecodableToken` when the service
    /// returned a token whose claims cannot be read (the store write is
    /// rolled back); `AuthError::TokenStore` when the token cannot be
    /// persisted.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let token = self.service.login(credentials).await?;
        self.inner.store.save(&token)?;

        let Some(claims) = Claims::decode(&token) else {
            // Roll back the write: an undecodable token must not stay
            // persisted as if it were a live session.
            if let Err(error) = self.inner.store.clear() {
                tracing::warn!(%error, "failed to roll back token after decode failure");
            }
            return Err(AuthError::UndecodableToken);
        };

        let user = claims.to_user();
        self.inner
            .set_state(SessionState::Authenticated(user.clone()));
        Inner::arm_poll(&self.inner);
        self.inner.events.publish(AuthEvent::Changed);
        Ok(user)
    }

    /// Clear the stored token, transition to `Unauthenticated`, broadcast a
    /// changed event, and cancel the expiry poll. Never fails; a store that
    /// cannot be cleared is logged and the transition happens anyway.
    pub fn logout(&self) {
        self.inner.force_logout();
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Watch receiver over state transitions. The receiver observes the
    /// value current at subscription time plus every later change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Handle for collaborators (the API layer) to force the logout path on
    /// an authentication-rejected response. The handle holds no state and
    /// becomes inert once the manager is dropped.
    #[must_use]
    pub fn logout_handle(&self) -> LogoutHandle {
        LogoutHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Stop the background tasks. Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        self.inner.cancel_poll();
        if let Some(handle) = lock(&self.inner.listener_task).take() {
            handle.abort();
        }
    }
}

impl Inner {
    /// Full re-resolution from the store, identical to the mount-time check.
    ///
    /// Landing authenticated (re)arms the expiry poll, so a session that
    /// began with an externally written token is watched the same way a
    /// login-established one is. `arm_poll` replaces any previous timer, so
    /// repeated resolutions do not stack.
    fn resolve(self: &Arc<Self>) {
        match self.store.load() {
            Some(token) => {
                if expiry::is_expired(Some(&token)) {
                    self.force_logout();
                } else if let Some(claims) = Claims::decode(&token) {
                    self.set_state(SessionState::Authenticated(claims.to_user()));
                    Self::arm_poll(self);
                } else {
                    // Unreachable in practice (an undecodable token reads as
                    // expired), kept so decode and expiry stay independent.
                    self.force_logout();
                }
            }
            None => self.set_state(SessionState::Unauthenticated),
        }
    }

    fn force_logout(&self) {
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to clear token store on logout");
        }
        self.set_state(SessionState::Unauthenticated);
        self.cancel_poll();
        self.events.publish(AuthEvent::Changed);
    }

    fn set_state(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    /// A tick only acts when a token is present and has gone stale; an empty
    /// store means another path already handled the transition, so the tick
    /// must not produce a duplicate logout.
    fn poll_once(&self) {
        if let Some(token) = self.store.load() {
            if expiry::is_expired(Some(&token)) {
                tracing::info!("stored token expired; ending session");
                self.force_logout();
            }
        }
    }

    fn arm_poll(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let interval = self.poll_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; the mount-time resolution
            // already covered it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else { break };
                inner.poll_once();
            }
        });
        if let Some(previous) = lock(&self.poll_task).replace(handle) {
            previous.abort();
        }
    }

    fn cancel_poll(&self) {
        // Idempotent: a second cancel finds the slot already empty.
        if let Some(handle) = lock(&self.poll_task).take() {
            handle.abort();
        }
    }

    fn spawn_listener(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let mut rx = self.events.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    // A lagged receiver missed some events; re-resolving once
                    // catches it up regardless of how many were dropped.
                    Ok(AuthEvent::Changed) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        let Some(inner) = weak.upgrade() else { break };
                        inner.resolve();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        *lock(&self.listener_task) = Some(handle);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.poll_task).take() {
            handle.abort();
        }
        if let Some(handle) = lock(&self.listener_task).take() {
            handle.abort();
        }
    }
}

/// Cloneable trigger for the logout path, handed to the API layer so an
/// unauthorized response routes through the manager instead of the API layer
/// mutating session state itself.
#[derive(Debug, Clone)]
pub struct LogoutHandle {
    inner: Weak<Inner>,
}

impl LogoutHandle {
    /// A handle wired to nothing. Useful for clients that only ever call
    /// public endpoints.
    #[must_use]
    pub fn disconnected() -> Self {
        Self { inner: Weak::new() }
    }

    /// Run the full logout path. A no-op once the manager is gone.
    pub fn signal_unauthorized(&self) {
        if let Some(inner) = self.inner.upgrade() {
            tracing::debug!("unauthorized response reported; ending session");
            inner.force_logout();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
