//! Per-request execution mode resolution.

use boltpay_core::constants::{DEMO_WALLET_PREFIX, TEMP_WALLET_PREFIX};
use boltpay_core::WalletMode;

/// Resolves the execution mode for a wallet reference.
///
/// Pure and stateless: the same inputs always yield the same mode, and the
/// result is never cached across requests. Precedence is wallet tag first,
/// credentials second — a `demo-wallet-` id stays demo even with valid
/// credentials configured.
pub fn resolve(wallet_ref: &str, credentials_valid: bool) -> WalletMode {
    if wallet_ref.starts_with(DEMO_WALLET_PREFIX) {
        WalletMode::Demo
    } else if wallet_ref.starts_with(TEMP_WALLET_PREFIX) {
        WalletMode::Temporary
    } else if !credentials_valid {
        WalletMode::Demo
    } else {
        WalletMode::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_prefix_wins_over_credentials() {
        assert_eq!(resolve("demo-wallet-alice", true), WalletMode::Demo);
        assert_eq!(resolve("demo-wallet-alice", false), WalletMode::Demo);
    }

    #[test]
    fn test_temp_prefix_resolves_temporary() {
        assert_eq!(resolve("temp-wallet-bob", true), WalletMode::Temporary);
        assert_eq!(resolve("temp-wallet-bob", false), WalletMode::Temporary);
    }

    #[test]
    fn test_untagged_wallet_follows_credentials() {
        assert_eq!(
            resolve("0b9f1c2e-wallet", true),
            WalletMode::Live
        );
        assert_eq!(resolve("0b9f1c2e-wallet", false), WalletMode::Demo);
    }

    #[test]
    fn test_prefix_must_be_at_start() {
        assert_eq!(resolve("my-demo-wallet-1", true), WalletMode::Live);
    }
}
