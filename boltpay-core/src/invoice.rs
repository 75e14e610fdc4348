//! BOLT11 invoice prefix and amount parsing.
//!
//! This is deliberately shallow: the engine only needs the human-readable
//! amount field for synthesized sends, not full bech32 decoding. The amount
//! multipliers follow BIP-0173-style BOLT11 units:
//!
//! | unit | meaning        | sats per unit      |
//! |------|----------------|--------------------|
//! | `m`  | milli-bitcoin  | ×100_000           |
//! | `u`  | micro-bitcoin  | ×100               |
//! | `n`  | nano-bitcoin   | ÷10 (floored)      |
//! | `p`  | pico-bitcoin   | ÷10_000 (floored)  |
//! | none | satoshis       | ×1                 |

use crate::constants::{DEFAULT_SEND_AMOUNT_SATS, INVOICE_PREFIXES};

/// Returns true if the string starts with a recognized Lightning invoice
/// prefix (`lnbc`, `lntb`, `lntbs`), case-insensitively.
pub fn is_lightning_invoice(invoice: &str) -> bool {
    let lower = invoice.trim().to_ascii_lowercase();
    INVOICE_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Extracts the invoice amount in satoshis, if one is encoded.
///
/// Returns `None` when the prefix is unrecognized or no digits follow it.
pub fn try_parse_amount_sats(invoice: &str) -> Option<u64> {
    let lower = invoice.trim().to_ascii_lowercase();

    // lntbs must be tried before lntb or the trailing `s` would be read as
    // part of the amount field.
    let rest = ["lntbs", "lntb", "lnbc"]
        .iter()
        .find_map(|p| lower.strip_prefix(p))?;

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let base: u64 = digits.parse().ok()?;

    let unit = rest.chars().nth(digits.len());
    let sats = match unit {
        Some('m') => base.saturating_mul(100_000),
        Some('u') => base.saturating_mul(100),
        Some('n') => base / 10,
        Some('p') => base / 10_000,
        _ => base,
    };
    Some(sats)
}

/// Extracts the invoice amount in satoshis, defaulting on parse failure.
///
/// A malformed invoice never fails a synthesized send; it falls back to
/// [`DEFAULT_SEND_AMOUNT_SATS`].
pub fn parse_amount_sats(invoice: &str) -> u64 {
    try_parse_amount_sats(invoice).unwrap_or(DEFAULT_SEND_AMOUNT_SATS)
}
