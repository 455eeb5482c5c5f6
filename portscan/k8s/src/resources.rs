use k8s_openapi::{
    api::{
        admissionregistration::v1::{
            RuleWithOperations, ValidatingWebhook, ValidatingWebhookConfiguration,
            WebhookClientConfig,
        },
        core::v1::{Container, Namespace, Pod, PodSpec},
    },
    apimachinery::pkg::apis::meta::v1::LabelSelector,
};
use kube::api::ObjectMeta;
use maplit::{btreemap, convert_args};
use std::collections::BTreeMap;

/// Label stamped on every resource the scanner creates. The webhook's
/// namespace selector matches on it, and `sweep` deletes by it.
pub const SCANNER_LABEL: &str = "admission-portscan";

/// Well-known name of the webhook configuration. Exactly one configuration
/// with this name exists cluster-wide while a probe is armed.
pub const WEBHOOK_NAME: &str = "admission-portscan-webhook";

/// Name of the webhook entry inside the configuration.
const HOOK_NAME: &str = "probe.admission-portscan.io";

/// Name of the trigger pod. Its creation is what fires the webhook; its
/// contents are irrelevant to the probe.
const TRIGGER_NAME: &str = "admission-portscan-trigger";

fn scanner_labels() -> BTreeMap<String, String> {
    convert_args!(btreemap!(SCANNER_LABEL => "true"))
}

/// A scanner-owned namespace holding one probe's trigger pod.
pub fn namespace(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(scanner_labels()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// The intercept webhook: fires on pod CREATE in scanner-labeled namespaces
/// and calls out to `url`. The admission error that call produces is the
/// whole point.
pub fn webhook(url: &str) -> ValidatingWebhookConfiguration {
    ValidatingWebhookConfiguration {
        metadata: ObjectMeta {
            name: Some(WEBHOOK_NAME.to_string()),
            ..Default::default()
        },
        webhooks: Some(vec![ValidatingWebhook {
            name: HOOK_NAME.to_string(),
            admission_review_versions: vec!["v1".to_string(), "v1beta1".to_string()],
            side_effects: "None".to_string(),
            client_config: WebhookClientConfig {
                url: Some(url.to_string()),
                ..Default::default()
            },
            namespace_selector: Some(LabelSelector {
                match_labels: Some(scanner_labels()),
                ..Default::default()
            }),
            rules: Some(vec![RuleWithOperations {
                operations: Some(vec!["CREATE".to_string()]),
                api_groups: Some(vec![String::new()]),
                api_versions: Some(vec!["v1".to_string()]),
                resources: Some(vec!["pods".to_string()]),
                scope: Some("Namespaced".to_string()),
            }]),
            ..Default::default()
        }]),
    }
}

/// The trigger pod. Any spec the webhook rule matches would do.
pub fn trigger() -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(TRIGGER_NAME.to_string()),
            labels: Some(scanner_labels()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "trigger".to_string(),
                image: Some("busybox".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}
