//! ClientSession: one routing session's focus registry, policy and router.
//!
//! Owns the wiring between the three so callers cannot forget that a policy
//! change must also re-apply the focus tracking flag.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::application::focus::FocusRegistry;
use crate::application::route_input::{InputRouter, RemoteEventSink};
use crate::application::settings::{InputPolicy, PolicySource, SharedSettings};

/// A connected routing session.
pub struct ClientSession {
    focus: Arc<FocusRegistry>,
    settings: Arc<SharedSettings>,
    router: Arc<InputRouter>,
    // Serializes policy updates so the stored policy and the tracking flag
    // always come from the same call.
    policy_update: Mutex<()>,
}

impl ClientSession {
    /// Builds a session that sends through `sink`, with tracking set from
    /// `policy`.
    pub fn new(policy: InputPolicy, sink: Arc<dyn RemoteEventSink>) -> Self {
        let focus = Arc::new(FocusRegistry::new());
        let settings = Arc::new(SharedSettings::new(policy));
        focus.update_tracking_policy(policy.tracks_focus());
        let router = Arc::new(InputRouter::new(
            Arc::clone(&focus),
            Arc::clone(&settings) as Arc<dyn PolicySource>,
            sink,
        ));
        Self {
            focus,
            settings,
            router,
            policy_update: Mutex::new(()),
        }
    }

    pub fn focus(&self) -> &Arc<FocusRegistry> {
        &self.focus
    }

    pub fn router(&self) -> &Arc<InputRouter> {
        &self.router
    }

    pub fn policy(&self) -> InputPolicy {
        self.settings.policy()
    }

    /// Stores `policy` and recomputes focus tracking from it.
    ///
    /// Turning tracking on notifies focus listeners with the current focus.
    /// Concurrent updates are applied one at a time; listeners must not call
    /// `update_policy` from inside that notification.
    pub fn update_policy(&self, policy: InputPolicy) {
        let _guard = self
            .policy_update
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        info!(
            tracking = policy.tracks_focus(),
            "input policy updated: {policy:?}"
        );
        self.settings.replace(policy);
        self.focus.update_tracking_policy(policy.tracks_focus());
    }
}
