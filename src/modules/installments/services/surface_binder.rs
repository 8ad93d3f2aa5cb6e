use std::time::Duration;

use tracing::{debug, warn};

use crate::modules::installments::services::selection_controller::{
    DisplaySurface, SelectionController,
};

/// How long to wait for a display surface that may arrive late
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Polls `probe` until it yields a surface or the policy's timeout elapses
pub async fn wait_for_surface<S, F>(mut probe: F, policy: ReadinessPolicy) -> Option<S>
where
    F: FnMut() -> Option<S>,
{
    let poll = async {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            if let Some(surface) = probe() {
                debug!(attempts, "Display surface ready");
                return surface;
            }
            tokio::time::sleep(policy.poll_interval).await;
        }
    };

    match tokio::time::timeout(policy.timeout, poll).await {
        Ok(surface) => Some(surface),
        Err(_) => {
            warn!(
                timeout_ms = policy.timeout.as_millis() as u64,
                "Display surface never became ready, estimate not shown"
            );
            None
        }
    }
}

/// Waits for a surface, binds it and initializes the controller.
///
/// Safe to call again when the surface is replaced: binding overwrites the
/// previous surface and republishes the current selection. Returns whether
/// a surface was bound.
pub async fn bind_when_ready<S, F>(
    controller: &mut SelectionController<S>,
    probe: F,
    policy: ReadinessPolicy,
) -> bool
where
    S: DisplaySurface,
    F: FnMut() -> Option<S>,
{
    let Some(surface) = wait_for_surface(probe, policy).await else {
        return false;
    };

    controller.rebind(surface);
    controller.initialize();
    true
}
