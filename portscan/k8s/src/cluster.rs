use crate::resources;
use anyhow::Result;
use k8s_openapi::api::{
    admissionregistration::v1::ValidatingWebhookConfiguration,
    core::v1::{Namespace, Pod},
};
use kube::api::{Api, DeleteParams, ListParams, PostParams, ResourceExt};

/// The control-plane operations a probe needs. Everything above the client is
/// generic over this trait so probes run against a recording double in tests.
///
/// Calls are synchronous from the probe's point of view: each one blocks
/// until the API server responds or errors.
#[async_trait::async_trait]
pub trait ControlPlane {
    async fn namespace_exists(&self, name: &str) -> Result<bool>;
    async fn create_namespace(&self, name: &str) -> Result<()>;
    async fn delete_namespace(&self, name: &str) -> Result<()>;

    /// Names of all scanner-labeled namespaces.
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    async fn webhook_exists(&self) -> Result<bool>;
    async fn install_webhook(&self, url: &str) -> Result<()>;
    async fn delete_webhook(&self) -> Result<()>;

    /// Creates the trigger pod in `namespace`. The `Err` text of a rejected
    /// admission is the only channel carrying information about the probed
    /// port back to the caller.
    async fn create_trigger(&self, namespace: &str) -> Result<()>;
}

/// `ControlPlane` backed by a live Kubernetes API server.
#[derive(Clone)]
pub struct KubeCluster {
    client: kube::Client,
}

// === impl KubeCluster ===

impl KubeCluster {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Connects using the ambient kubeconfig or in-cluster environment.
    pub async fn connect() -> Result<Self> {
        Ok(Self::new(kube::Client::try_default().await?))
    }

    fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }

    fn webhooks(&self) -> Api<ValidatingWebhookConfiguration> {
        Api::all(self.client.clone())
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait::async_trait]
impl ControlPlane for KubeCluster {
    async fn namespace_exists(&self, name: &str) -> Result<bool> {
        Ok(self.namespaces().get_opt(name).await?.is_some())
    }

    async fn create_namespace(&self, name: &str) -> Result<()> {
        self.namespaces()
            .create(&PostParams::default(), &resources::namespace(name))
            .await?;
        Ok(())
    }

    async fn delete_namespace(&self, name: &str) -> Result<()> {
        self.namespaces()
            .delete(name, &DeleteParams::background())
            .await?;
        Ok(())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let params = ListParams::default().labels(&format!("{}=true", resources::SCANNER_LABEL));
        let list = self.namespaces().list(&params).await?;
        Ok(list.items.into_iter().map(|ns| ns.name_any()).collect())
    }

    async fn webhook_exists(&self) -> Result<bool> {
        Ok(self
            .webhooks()
            .get_opt(resources::WEBHOOK_NAME)
            .await?
            .is_some())
    }

    async fn install_webhook(&self, url: &str) -> Result<()> {
        self.webhooks()
            .create(&PostParams::default(), &resources::webhook(url))
            .await?;
        Ok(())
    }

    async fn delete_webhook(&self) -> Result<()> {
        self.webhooks()
            .delete(resources::WEBHOOK_NAME, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn create_trigger(&self, namespace: &str) -> Result<()> {
        self.pods(namespace)
            .create(&PostParams::default(), &resources::trigger())
            .await?;
        Ok(())
    }
}
