#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod cluster;
pub mod lifecycle;
mod probe;
pub mod resources;

pub use self::{
    cluster::{ControlPlane, KubeCluster},
    lifecycle::sweep,
    probe::probe,
    resources::{SCANNER_LABEL, WEBHOOK_NAME},
};
