//! Call-counting provider mock shared by orchestrator tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use boltpay_core::{
    NewPayment, PayError, ProviderPayment, ProviderWallet, Result, WalletProvider,
};

/// Scripted `WalletProvider` that counts every call.
///
/// Responses are queued per method; when a queue runs dry the mock falls back
/// to a neutral answer (pending payment, 202-style empty creation) so tests
/// only script the interesting responses.
pub(crate) struct MockProvider {
    create_queue: Mutex<VecDeque<Result<Option<ProviderPayment>>>>,
    get_queue: Mutex<VecDeque<Result<ProviderPayment>>>,
    payments: Mutex<Vec<ProviderPayment>>,
    wallets: Mutex<Vec<ProviderWallet>>,
    wallet: Mutex<Option<ProviderWallet>>,
    fail_wallets: AtomicBool,

    create_calls: AtomicUsize,
    get_calls: AtomicUsize,
    list_calls: AtomicUsize,
    wallet_calls: AtomicUsize,
    list_wallets_calls: AtomicUsize,
    create_wallet_calls: AtomicUsize,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self {
            create_queue: Mutex::new(VecDeque::new()),
            get_queue: Mutex::new(VecDeque::new()),
            payments: Mutex::new(Vec::new()),
            wallets: Mutex::new(Vec::new()),
            wallet: Mutex::new(None),
            fail_wallets: AtomicBool::new(false),
            create_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            wallet_calls: AtomicUsize::new(0),
            list_wallets_calls: AtomicUsize::new(0),
            create_wallet_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn push_create(&self, response: Result<Option<ProviderPayment>>) {
        self.create_queue.lock().push_back(response);
    }

    pub(crate) fn push_get(&self, response: Result<ProviderPayment>) {
        self.get_queue.lock().push_back(response);
    }

    pub(crate) fn set_payments(&self, payments: Vec<ProviderPayment>) {
        *self.payments.lock() = payments;
    }

    pub(crate) fn set_wallets(&self, wallets: Vec<ProviderWallet>) {
        *self.wallets.lock() = wallets;
    }

    pub(crate) fn set_wallet(&self, wallet: ProviderWallet) {
        *self.wallet.lock() = Some(wallet);
    }

    /// Makes every wallet endpoint return a 500.
    pub(crate) fn fail_wallet_endpoints(&self) {
        self.fail_wallets.store(true, Ordering::SeqCst);
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_wallet_calls(&self) -> usize {
        self.create_wallet_calls.load(Ordering::SeqCst)
    }

    fn wallets_unavailable(&self) -> Option<PayError> {
        self.fail_wallets.load(Ordering::SeqCst).then(|| PayError::Upstream {
            status: 500,
            message: "internal server error".into(),
        })
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn create_payment(&self, _payment: &NewPayment) -> Result<Option<ProviderPayment>> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.create_queue.lock().pop_front().unwrap_or(Ok(None))
    }

    async fn get_payment(&self, id: &str) -> Result<ProviderPayment> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.get_queue.lock().pop_front().unwrap_or_else(|| {
            Ok(ProviderPayment {
                id: id.into(),
                status: "receiving".into(),
                ..Default::default()
            })
        })
    }

    async fn list_payments(&self) -> Result<Vec<ProviderPayment>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payments.lock().clone())
    }

    async fn get_wallet(&self, wallet_id: &str) -> Result<ProviderWallet> {
        self.wallet_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.wallets_unavailable() {
            return Err(err);
        }
        Ok(self.wallet.lock().clone().unwrap_or(ProviderWallet {
            id: wallet_id.into(),
            name: None,
            balance_msats: 0,
        }))
    }

    async fn list_wallets(&self) -> Result<Vec<ProviderWallet>> {
        self.list_wallets_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.wallets_unavailable() {
            return Err(err);
        }
        Ok(self.wallets.lock().clone())
    }

    async fn create_wallet(&self, name: &str) -> Result<ProviderWallet> {
        self.create_wallet_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.wallets_unavailable() {
            return Err(err);
        }
        Ok(ProviderWallet {
            id: "wallet-created-1".into(),
            name: Some(name.into()),
            balance_msats: 0,
        })
    }
}
