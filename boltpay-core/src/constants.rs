//! Tuning constants for the boltpay payment engine.
//!
//! Every fixed number in the payment lifecycle lives here so the orchestrator,
//! limiter, cache, and ledger all agree on the same values.

// ═══════════════════════════════════════════════════════════════════════════════
// RATE LIMITING
// ═══════════════════════════════════════════════════════════════════════════════

/// Length of the sliding rate-limit window in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Maximum upstream calls admitted per endpoint key within one window.
pub const RATE_LIMIT_MAX_CALLS: usize = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM CLIENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-request timeout for upstream API calls, in seconds.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// INVOICE CREATION POLLING
// ═══════════════════════════════════════════════════════════════════════════════
// The provider accepts creation asynchronously (202 with an empty body), so
// the orchestrator polls the payment detail until a usable invoice appears.

/// Maximum poll attempts before invoice creation is declared timed out.
pub const POLL_MAX_ATTEMPTS: u32 = 12;

/// Interval before the first poll retry, in milliseconds.
pub const POLL_START_INTERVAL_MS: u64 = 2_000;

/// Multiplicative backoff applied between successful poll attempts.
pub const POLL_BACKOFF_FACTOR: f64 = 1.5;

/// Ceiling on the poll interval, in milliseconds.
pub const POLL_MAX_INTERVAL_MS: u64 = 10_000;

// ═══════════════════════════════════════════════════════════════════════════════
// STATUS CACHE & DEMO LEDGER
// ═══════════════════════════════════════════════════════════════════════════════

/// Delay before a terminal record is evicted from the status cache, in seconds.
pub const CACHE_EVICTION_SECS: u64 = 300;

/// Interval between demo-ledger expiry sweeps, in seconds.
pub const SWEEP_INTERVAL_SECS: u64 = 300;

/// Age after which a demo record flips to expired, in seconds.
pub const DEMO_RETENTION_SECS: u64 = 3_600;

// ═══════════════════════════════════════════════════════════════════════════════
// AMOUNTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Millisatoshis per satoshi. The provider API speaks msats; callers see sats.
pub const MSATS_PER_SAT: u64 = 1_000;

/// Balance reported for demo wallets, in sats.
pub const DEMO_BALANCE_SATS: u64 = 10_000;

/// Fallback amount when an invoice string cannot be parsed, in sats.
pub const DEFAULT_SEND_AMOUNT_SATS: u64 = 1_000;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIER TAGS
// ═══════════════════════════════════════════════════════════════════════════════
// Wallet mode is derived from these prefixes; see `WalletMode` and the mode
// resolver in boltpay-engine.

/// Prefix tagging a wallet that only ever existed in demo mode.
pub const DEMO_WALLET_PREFIX: &str = "demo-wallet-";

/// Prefix tagging a wallet whose live provisioning failed at creation time.
pub const TEMP_WALLET_PREFIX: &str = "temp-wallet-";

/// Prefix for synthesized invoice payment ids.
pub const DEMO_PAYMENT_PREFIX: &str = "demo-payment-";

/// Prefix for synthesized outbound payment ids.
pub const DEMO_SEND_PREFIX: &str = "demo-send-";

/// Recognized BOLT11 invoice prefixes (mainnet, testnet, signet).
pub const INVOICE_PREFIXES: [&str; 3] = ["lnbc", "lntb", "lntbs"];
