use crate::{cluster::ControlPlane, lifecycle};
use admission_portscan_core::{Outcome, Target};
use tracing::debug;

/// Runs one full probe cycle against `target`: ensure the namespace, arm the
/// webhook at the target URL, fire the trigger, capture the admission error
/// verbatim, then tear down the webhook and the namespace.
///
/// Teardown runs on every path before this returns. A leaked webhook would
/// redirect the next probe's trigger to this probe's target.
pub async fn probe<C: ControlPlane>(cluster: &C, namespace: &str, target: &Target) -> Outcome {
    lifecycle::ensure_namespace(cluster, namespace).await;
    lifecycle::arm_webhook(cluster, &target.url()).await;

    debug!(%namespace, %target, "firing trigger");
    let raw = match cluster.create_trigger(namespace).await {
        Ok(()) => None,
        Err(error) => Some(format!("{error:#}")),
    };

    lifecycle::disarm_webhook(cluster).await;
    lifecycle::remove_namespace(cluster, namespace).await;

    Outcome::classify(raw)
}
