//! Satoshi/millisatoshi conversions.
//!
//! The provider API is msat-native; everything reported to callers is sats.
//! Rounding is always toward zero (floor).

use crate::constants::MSATS_PER_SAT;

/// Converts satoshis to millisatoshis for the provider wire.
pub fn sats_to_msats(sats: u64) -> u64 {
    sats.saturating_mul(MSATS_PER_SAT)
}

/// Converts millisatoshis back to satoshis, flooring sub-sat remainders.
pub fn msats_to_sats(msats: u64) -> u64 {
    msats / MSATS_PER_SAT
}
