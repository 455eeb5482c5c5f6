//! Best-effort lifecycle operations for a probe's resources.
//!
//! Setup and teardown failures are logged and skipped rather than propagated:
//! a failed step for one probe must not abort a range scan, and the trigger
//! attempt will surface any real connectivity problem on its own.

use crate::cluster::ControlPlane;
use anyhow::Result;
use tracing::{debug, info, warn};

/// Creates the namespace if it does not already exist.
pub async fn ensure_namespace<C: ControlPlane>(cluster: &C, name: &str) {
    let exists = match cluster.namespace_exists(name).await {
        Ok(exists) => exists,
        Err(error) => {
            warn!(namespace = %name, %error, "failed to check for namespace; assuming absent");
            false
        }
    };
    if exists {
        debug!(namespace = %name, "namespace already exists");
        return;
    }
    if let Err(error) = cluster.create_namespace(name).await {
        warn!(namespace = %name, %error, "failed to create namespace");
    }
}

/// Arms the intercept webhook at `url`.
///
/// Any configuration left behind under the well-known name (a crashed prior
/// probe, say) is deleted first; a stale webhook would redirect this probe's
/// trigger to the wrong destination.
pub async fn arm_webhook<C: ControlPlane>(cluster: &C, url: &str) {
    match cluster.webhook_exists().await {
        Ok(true) => {
            debug!("stale webhook configuration found");
            if let Err(error) = cluster.delete_webhook().await {
                warn!(%error, "failed to delete stale webhook configuration");
            }
        }
        Ok(false) => {}
        Err(error) => warn!(%error, "failed to check for webhook configuration"),
    }
    if let Err(error) = cluster.install_webhook(url).await {
        warn!(url, %error, "failed to install webhook configuration");
    }
}

/// Best-effort delete of the webhook configuration. The configuration may
/// already be gone, which is not a probe failure.
pub async fn disarm_webhook<C: ControlPlane>(cluster: &C) {
    if let Err(error) = cluster.delete_webhook().await {
        warn!(%error, "failed to delete webhook configuration");
    }
}

/// Best-effort delete of a probe's namespace.
pub async fn remove_namespace<C: ControlPlane>(cluster: &C, name: &str) {
    if let Err(error) = cluster.delete_namespace(name).await {
        warn!(namespace = %name, %error, "failed to delete namespace");
    }
}

/// Deletes the intercept webhook and every scanner-labeled namespace.
///
/// An interrupted scan can leave either armed on the cluster; this is the
/// documented recovery path.
pub async fn sweep<C: ControlPlane>(cluster: &C) -> Result<()> {
    match cluster.webhook_exists().await {
        Ok(true) => {
            info!("deleting orphaned webhook configuration");
            disarm_webhook(cluster).await;
        }
        Ok(false) => debug!("no webhook configuration found"),
        Err(error) => warn!(%error, "failed to check for webhook configuration"),
    }

    let namespaces = cluster.list_namespaces().await?;
    if namespaces.is_empty() {
        info!("no orphaned namespaces found");
        return Ok(());
    }
    for namespace in namespaces {
        info!(%namespace, "deleting orphaned namespace");
        remove_namespace(cluster, &namespace).await;
    }
    Ok(())
}
