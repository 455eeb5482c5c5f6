use admission_portscan_core::{addresses, Ipv4Net, Target, Verdict};
use admission_portscan_k8s::{probe, ControlPlane};

/// What to scan: one target, or every address in a range on one port.
#[derive(Clone, Debug)]
pub enum Scan {
    Single(Target),
    Range { net: Ipv4Net, port: String },
}

/// Probes each target in sequence, printing one verdict line per probe.
///
/// Probes never overlap: the webhook configuration is a single well-known
/// resource, and two probes in flight would redirect each other's triggers.
/// Each probe still gets a fresh namespace name so a slow teardown cannot
/// collide with the probe after it.
pub async fn run<C: ControlPlane>(cluster: &C, namespace_base: &str, scan: Scan) -> Vec<Verdict> {
    let mut verdicts = Vec::new();
    for target in targets(scan) {
        let namespace = namespace_name(namespace_base);
        tracing::debug!(%namespace, %target, "probing");
        let outcome = probe(cluster, &namespace, &target).await;
        let verdict = Verdict { target, outcome };
        println!("{verdict}");
        verdicts.push(verdict);
    }
    verdicts
}

fn targets(scan: Scan) -> Vec<Target> {
    match scan {
        Scan::Single(target) => vec![target],
        Scan::Range { net, port } => addresses(net)
            .map(|addr| Target::new(addr, &port))
            .collect(),
    }
}

/// A namespace name unlikely to collide with concurrent or previous scans
/// sharing the cluster.
fn namespace_name(base: &str) -> String {
    format!("{base}-{}", random_suffix(6))
}

fn random_suffix(len: usize) -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
