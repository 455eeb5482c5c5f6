use crate::scan::{self, Scan};
use admission_portscan_core::{Ipv4Net, Target};
use admission_portscan_k8s::{sweep, KubeCluster};
use anyhow::Result;
use clap::Parser;

/// Blind port scanning through a cluster's admission call-out path.
///
/// `scan` arms a validating webhook whose destination is the target and reads
/// the port state out of the admission error text. `sweep` cleans up whatever
/// an interrupted scan left behind.
#[derive(Debug, Parser)]
#[clap(name = "admission-portscan", version, about)]
pub struct Args {
    #[clap(
        long,
        env = "ADMISSION_PORTSCAN_LOG",
        default_value = "admission_portscan=info,warn"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Probe a target host:port, or a whole IPv4 range, through the webhook
    Scan(ScanArgs),
    /// Delete the webhook and any namespaces an interrupted scan left behind
    Sweep,
}

#[derive(Debug, clap::Args)]
struct ScanArgs {
    /// Target IP address or hostname
    #[clap(long, short = 't', default_value = "127.0.0.1")]
    target: String,

    /// Target port
    #[clap(long, short = 'p', default_value = "443")]
    port: String,

    /// Base name for the per-probe namespaces
    #[clap(long, short = 'n', default_value = "portscan")]
    namespace: String,

    /// Probe every address in this IPv4 range (on --port) instead of --target
    #[clap(long)]
    cidr: Option<Ipv4Net>,
}

impl Args {
    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            command,
        } = self;

        log_format
            .try_init(log_level)
            .expect("must configure logging");

        let cluster = KubeCluster::connect().await?;
        match command {
            Command::Scan(ScanArgs {
                target,
                port,
                namespace,
                cidr,
            }) => {
                let scan = match cidr {
                    Some(net) => Scan::Range { net, port },
                    None => Scan::Single(Target::new(target, port)),
                };
                scan::run(&cluster, &namespace, scan).await;
                Ok(())
            }
            Command::Sweep => sweep(&cluster).await,
        }
    }
}
