//! Domain types for the boltpay payment engine.

mod record;
mod request;
mod state;

pub use record::PaymentRecord;
pub use request::PaymentRequest;
pub use state::{PaymentKind, PaymentState, WalletMode};
