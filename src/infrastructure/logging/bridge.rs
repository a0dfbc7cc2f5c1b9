//! Bridge from the legacy `log` facade into the tracing backend.
//!
//! Crates still emitting through `log` get their records forwarded to the
//! unified subscriber, with the same route table applied. Installation happens
//! at most once per process; repeated calls are no-ops.

use once_cell::sync::OnceCell;
use tracing_log::LogTracer;

/// Outcome of installing the legacy bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    /// The bridge was installed by this call (or an earlier one of ours).
    Installed,
    /// The `log` facade already had a receiver; records keep their existing
    /// routing. Not an error: console output still works.
    AlreadyRouted,
}

static LEGACY_BRIDGE: OnceCell<BridgeStatus> = OnceCell::new();

/// Route records from the legacy `log` facade into the tracing backend.
///
/// Idempotent: the second and later calls return the first call's status
/// without touching the routing table again, so double emission cannot occur.
/// Failure is non-fatal and degrades to whatever receiver `log` already has;
/// it is reported once on stderr, never propagated.
pub fn bridge_legacy_logging() -> BridgeStatus {
    *LEGACY_BRIDGE.get_or_init(|| match LogTracer::init() {
        Ok(()) => BridgeStatus::Installed,
        Err(err) => {
            eprintln!(
                "groundwork: legacy log facade already has a receiver ({err}); \
                 leaving existing routing in place"
            );
            BridgeStatus::AlreadyRouted
        }
    })
}
