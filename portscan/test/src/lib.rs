#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Test doubles for the scanner's control-plane seam.

use admission_portscan_k8s::ControlPlane;
use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use std::collections::{BTreeSet, VecDeque};

/// Every adapter call a component can make, recorded in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    NamespaceExists(String),
    CreateNamespace(String),
    DeleteNamespace(String),
    ListNamespaces,
    WebhookExists,
    InstallWebhook(String),
    DeleteWebhook,
    CreateTrigger(String),
}

/// A `ControlPlane` that records every call and replays scripted trigger
/// results, standing in for a live API server.
///
/// Namespaces and the webhook are tracked so existence checks, duplicate
/// creates, and deletes of absent resources behave like the real thing.
#[derive(Default)]
pub struct MockCluster {
    calls: Mutex<Vec<Call>>,
    namespaces: Mutex<BTreeSet<String>>,
    webhook: Mutex<bool>,
    trigger_errors: Mutex<VecDeque<String>>,
    trigger_default: Mutex<Option<String>>,
}

// === impl MockCluster ===

impl MockCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-installs a webhook configuration, as a crashed probe would leave
    /// behind.
    pub fn with_stale_webhook(self) -> Self {
        *self.webhook.lock() = true;
        self
    }

    /// Pre-creates a namespace.
    pub fn with_namespace(self, name: &str) -> Self {
        self.namespaces.lock().insert(name.to_string());
        self
    }

    /// Every trigger creation fails with `text` unless a queued result takes
    /// precedence. Without this, triggers are admitted.
    pub fn fail_triggers_with(self, text: impl ToString) -> Self {
        *self.trigger_default.lock() = Some(text.to_string());
        self
    }

    /// Queues a one-shot trigger error consumed before the default.
    pub fn queue_trigger_error(&self, text: impl ToString) {
        self.trigger_errors.lock().push_back(text.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    /// Names passed to `create_namespace`, in order.
    pub fn created_namespaces(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateNamespace(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait::async_trait]
impl ControlPlane for MockCluster {
    async fn namespace_exists(&self, name: &str) -> Result<bool> {
        self.record(Call::NamespaceExists(name.to_string()));
        Ok(self.namespaces.lock().contains(name))
    }

    async fn create_namespace(&self, name: &str) -> Result<()> {
        self.record(Call::CreateNamespace(name.to_string()));
        if !self.namespaces.lock().insert(name.to_string()) {
            return Err(anyhow!("namespaces \"{name}\" already exists"));
        }
        Ok(())
    }

    async fn delete_namespace(&self, name: &str) -> Result<()> {
        self.record(Call::DeleteNamespace(name.to_string()));
        if !self.namespaces.lock().remove(name) {
            return Err(anyhow!("namespaces \"{name}\" not found"));
        }
        Ok(())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>> {
        self.record(Call::ListNamespaces);
        Ok(self.namespaces.lock().iter().cloned().collect())
    }

    async fn webhook_exists(&self) -> Result<bool> {
        self.record(Call::WebhookExists);
        Ok(*self.webhook.lock())
    }

    async fn install_webhook(&self, url: &str) -> Result<()> {
        self.record(Call::InstallWebhook(url.to_string()));
        let mut webhook = self.webhook.lock();
        if *webhook {
            return Err(anyhow!(
                "validatingwebhookconfigurations \"admission-portscan-webhook\" already exists"
            ));
        }
        *webhook = true;
        Ok(())
    }

    async fn delete_webhook(&self) -> Result<()> {
        self.record(Call::DeleteWebhook);
        let mut webhook = self.webhook.lock();
        if !*webhook {
            return Err(anyhow!(
                "validatingwebhookconfigurations \"admission-portscan-webhook\" not found"
            ));
        }
        *webhook = false;
        Ok(())
    }

    async fn create_trigger(&self, namespace: &str) -> Result<()> {
        self.record(Call::CreateTrigger(namespace.to_string()));
        if let Some(text) = self.trigger_errors.lock().pop_front() {
            return Err(anyhow!(text));
        }
        if let Some(text) = self.trigger_default.lock().clone() {
            return Err(anyhow!(text));
        }
        Ok(())
    }
}
