//! Payment and wallet state enums.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a payment record.
///
/// `Completed`, `Failed`, and `Expired` are terminal: no further transition
/// occurs once a record reaches one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    /// Created but not yet settled (or still awaiting provider resolution).
    Pending,
    /// Settled successfully.
    Completed,
    /// The provider reported a failure.
    Failed,
    /// A demo record aged past the retention window.
    Expired,
}

impl PaymentState {
    /// Returns true if no further transition can occur from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentState::Completed | PaymentState::Failed | PaymentState::Expired
        )
    }

    /// Normalizes a provider status string.
    ///
    /// The provider mixes cases (`completed` / `COMPLETED`); anything
    /// unrecognized is treated as still pending.
    pub fn from_upstream(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "completed" => PaymentState::Completed,
            "failed" => PaymentState::Failed,
            "expired" => PaymentState::Expired,
            _ => PaymentState::Pending,
        }
    }
}

/// Direction/kind of a payment operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// An invoice created to receive funds.
    Invoice,
    /// An outbound payment of someone else's invoice.
    Send,
}

/// Execution path for a wallet, derived per request by the mode resolver.
///
/// Exactly one mode applies to a wallet at any instant. The mode is never
/// cached across requests; a live wallet that failed provisioning carries a
/// `temp-wallet-` tag on its record instead, which this enum reflects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletMode {
    /// Real upstream wallet with valid credentials.
    Live,
    /// Live provisioning failed at creation time; behaves like demo for
    /// payments but is labeled separately.
    Temporary,
    /// No-network simulation path.
    Demo,
}

impl WalletMode {
    /// Returns true if operations in this mode synthesize records locally
    /// instead of calling the provider.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, WalletMode::Demo | WalletMode::Temporary)
    }

    /// Human-readable label used in synthesized payment messages.
    pub fn label(&self) -> &'static str {
        match self {
            WalletMode::Live => "Live",
            WalletMode::Temporary => "Temporary",
            WalletMode::Demo => "Demo",
        }
    }
}
