use crate::classify::{classify, PortState};
use std::fmt;

/// A single host:port to probe. Immutable for the lifetime of the probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: String,
}

/// The raw signal captured from one trigger attempt, with its classification.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The admission error text, verbatim; `None` when the trigger was
    /// admitted.
    pub raw: Option<String>,
    pub state: PortState,
}

/// A classified probe result bound to its target, rendered one per line.
#[derive(Clone, Debug)]
pub struct Verdict {
    pub target: Target,
    pub outcome: Outcome,
}

// === impl Target ===

impl Target {
    pub fn new(host: impl ToString, port: impl ToString) -> Self {
        Self {
            host: host.to_string(),
            port: port.to_string(),
        }
    }

    /// The callback destination installed into the intercept webhook.
    pub fn url(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// === impl Outcome ===

impl Outcome {
    pub fn classify(raw: Option<String>) -> Self {
        let state = classify(raw.as_deref());
        Self { raw, state }
    }
}

// === impl Verdict ===

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Target { host, port } = &self.target;
        match self.outcome.state.phrase() {
            Some(phrase) => write!(f, "Host {host} : Port {port} {phrase}"),
            None => write!(
                f,
                "Host {host} : Port {port} returned an error signature we do not recognize:\n{}",
                self.outcome.raw.as_deref().unwrap_or_default()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_url() {
        let target = Target::new("10.0.0.5", 443);
        assert_eq!(target.url(), "https://10.0.0.5:443");
    }

    #[test]
    fn closed_verdict_line() {
        let outcome = Outcome::classify(Some("dial tcp: connect: connection refused".to_string()));
        let verdict = Verdict {
            target: Target::new("10.0.0.5", "443"),
            outcome,
        };
        assert_eq!(verdict.to_string(), "Host 10.0.0.5 : Port 443 is closed");
    }

    #[test]
    fn unknown_verdict_carries_raw_text() {
        let outcome = Outcome::classify(Some("weird custom gateway error 418".to_string()));
        assert_eq!(outcome.state, PortState::Unknown);
        let verdict = Verdict {
            target: Target::new("10.0.0.5", "443"),
            outcome,
        };
        let line = verdict.to_string();
        assert!(line.contains("we do not recognize"));
        assert!(line.contains("weird custom gateway error 418"));
    }

    #[test]
    fn admitted_trigger_is_anomalous() {
        let outcome = Outcome::classify(None);
        assert_eq!(outcome.state, PortState::AnomalousSuccess);
        let verdict = Verdict {
            target: Target::new("192.0.2.1", "80"),
            outcome,
        };
        assert!(verdict.to_string().contains("unexpectedly admitted"));
    }
}
