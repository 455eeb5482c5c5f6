/// What a probed host:port appears to be doing, inferred solely from the
/// text of the admission error the API server reports back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PortState {
    Closed,
    OpenTlsWrongSni,
    OpenTlsUntrustedCert,
    OpenTlsExpiredCert,
    OpenTlsCertMissingIpSan,
    OpenTlsLegacyCnCert,
    OpenHttpsValid,
    OpenHttpNotHttps,
    OpenNonHttpProtocol,
    UnreachableHost,
    UnreachableNetwork,
    Filtered,
    ClosedOrUnavailable,
    AuthRequired,
    AnomalousSuccess,
    Unknown,
}

/// One row of the signature table: an error substring, the state it
/// indicates, and the phrase used for the verdict line.
#[derive(Copy, Clone, Debug)]
pub struct Signature {
    pub needle: &'static str,
    pub state: PortState,
    pub phrase: &'static str,
}

/// Ordered signature table. Matching is first-match-wins: several needles can
/// co-occur in one admission error, so earlier rows shadow later ones ("EOF"
/// in particular shows up inside longer messages).
///
/// Deadline expiry is bucketed with i/o timeouts as a filtered port, never as
/// an unreachable host.
pub const SIGNATURES: &[Signature] = &[
    Signature {
        needle: "connection refused",
        state: PortState::Closed,
        phrase: "is closed",
    },
    Signature {
        needle: "certificate is valid for",
        state: PortState::OpenTlsWrongSni,
        phrase: "speaks HTTPS but needs a different SNI",
    },
    Signature {
        needle: "certificate signed by unknown authority",
        state: PortState::OpenTlsUntrustedCert,
        phrase: "speaks HTTPS but the API server does not trust the certificate",
    },
    Signature {
        needle: "json parse error",
        state: PortState::OpenHttpsValid,
        phrase: "speaks HTTPS and has a valid certificate",
    },
    Signature {
        needle: "no route to host",
        state: PortState::UnreachableHost,
        phrase: "is unreachable (no route to host)",
    },
    Signature {
        needle: "context deadline exceeded",
        state: PortState::Filtered,
        phrase: "is filtered",
    },
    Signature {
        needle: "i/o timeout",
        state: PortState::Filtered,
        phrase: "is filtered",
    },
    Signature {
        needle: "server gave HTTP response to HTTPS client",
        state: PortState::OpenHttpNotHttps,
        phrase: "is open but speaks HTTP not HTTPS",
    },
    Signature {
        needle: "first record does not look like a TLS handshake",
        state: PortState::OpenNonHttpProtocol,
        phrase: "is open but speaks a non-HTTP protocol",
    },
    Signature {
        needle: "EOF",
        state: PortState::ClosedOrUnavailable,
        phrase: "is not available/closed",
    },
    Signature {
        needle: "Unauthorized",
        state: PortState::AuthRequired,
        phrase: "requires authorization",
    },
    Signature {
        needle: "certificate relies on legacy Common Name field",
        state: PortState::OpenTlsLegacyCnCert,
        phrase: "uses a certificate with a legacy Common Name field",
    },
    Signature {
        needle: "doesn't contain any IP SANs",
        state: PortState::OpenTlsCertMissingIpSan,
        phrase: "uses a certificate without an IP SAN but was addressed by IP",
    },
    Signature {
        needle: "certificate has expired or is not yet valid",
        state: PortState::OpenTlsExpiredCert,
        phrase: "has an expired or not-yet-valid certificate",
    },
    Signature {
        needle: "network is unreachable",
        state: PortState::UnreachableNetwork,
        phrase: "is on an unreachable network",
    },
];

/// Maps the captured admission error to a port state. `None` means trigger
/// creation unexpectedly succeeded; text matching no signature comes back as
/// `Unknown` so unrecognized phrasings are surfaced rather than dropped.
pub fn classify(error: Option<&str>) -> PortState {
    let Some(text) = error else {
        return PortState::AnomalousSuccess;
    };
    SIGNATURES
        .iter()
        .find(|sig| text.contains(sig.needle))
        .map(|sig| sig.state)
        .unwrap_or(PortState::Unknown)
}

// === impl PortState ===

impl PortState {
    /// The fixed verdict phrase for this state, if it has one. `Unknown` has
    /// none; its verdict always carries the raw error text instead.
    pub fn phrase(self) -> Option<&'static str> {
        if self == PortState::AnomalousSuccess {
            return Some("produced no error; the trigger was unexpectedly admitted");
        }
        SIGNATURES
            .iter()
            .find(|sig| sig.state == self)
            .map(|sig| sig.phrase)
    }
}
