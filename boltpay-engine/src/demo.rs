//! Synthesis of local payment records for the demo and temporary paths.

use chrono::Utc;
use rand::Rng;

use boltpay_core::constants::{DEMO_PAYMENT_PREFIX, DEMO_SEND_PREFIX};
use boltpay_core::invoice;
use boltpay_core::{PaymentKind, PaymentRecord, PaymentState, WalletMode};

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// Builds a unique synthesized payment id with the given prefix.
///
/// Millisecond timestamp plus a random tail: the tail keeps ids distinct when
/// several records are created within one millisecond.
fn synth_id(prefix: &str) -> String {
    format!("{prefix}{}{}", Utc::now().timestamp_millis(), random_suffix(4))
}

/// Builds a BOLT11-shaped string that is recognizably synthetic.
///
/// It passes the prefix check and embeds the requested amount, but no real
/// node would ever route it.
pub(crate) fn synth_payment_request(amount_sats: u64) -> String {
    format!("lnbc{amount_sats}u1p0demo{}demo", random_suffix(13))
}

/// Synthesizes a pending invoice record without any provider contact.
pub(crate) fn synth_invoice(
    wallet_ref: &str,
    amount_sats: u64,
    memo: Option<String>,
) -> PaymentRecord {
    PaymentRecord::new(
        synth_id(DEMO_PAYMENT_PREFIX),
        PaymentKind::Invoice,
        wallet_ref,
        amount_sats,
    )
    .with_memo(Some(memo.unwrap_or_else(|| "Demo Payment".into())))
    .with_payment_request(synth_payment_request(amount_sats))
    .demo()
}

/// Synthesizes an already-completed outbound payment.
///
/// The amount comes from the invoice itself; a malformed amount part falls
/// back to the default send amount.
pub(crate) fn synth_send(wallet_ref: &str, invoice_str: &str, mode: WalletMode) -> PaymentRecord {
    let amount_sats = invoice::parse_amount_sats(invoice_str);
    let mut record = PaymentRecord::new(
        synth_id(DEMO_SEND_PREFIX),
        PaymentKind::Send,
        wallet_ref,
        amount_sats,
    )
    .with_memo(Some(format!(
        "{} payment completed successfully",
        mode.label()
    )))
    .demo();
    record.transition(PaymentState::Completed);
    record
}
