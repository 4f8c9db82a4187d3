//! In-memory ledger stand-in.
//!
//! Backs unit and integration tests across the workspace. Reads and
//! writes can each be scripted to fail with a given raw message, which is
//! how degradation and failure-classification paths are exercised.

use crate::errors::LedgerError;
use crate::ports::LedgerGateway;
use async_trait::async_trait;
use land_types::{Address, TxHash};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct MockLedger {
    owners: RwLock<HashMap<(i64, i64), Address>>,
    data: RwLock<HashMap<(i64, i64), String>>,
    balances: RwLock<HashMap<String, u64>>,
    allowances: RwLock<HashMap<(String, String), u64>>,
    operators: RwLock<HashMap<(String, String), bool>>,
    connected: RwLock<Option<Address>>,
    fail_reads: RwLock<Option<String>>,
    fail_writes: RwLock<Option<String>>,
    tx_counter: AtomicU64,
    write_calls: AtomicU64,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(self, x: i64, y: i64, owner: Address) -> Self {
        self.owners.write().insert((x, y), owner);
        self
    }

    pub fn with_data(self, x: i64, y: i64, raw: impl Into<String>) -> Self {
        self.data.write().insert((x, y), raw.into());
        self
    }

    pub fn with_connected(self, address: Address) -> Self {
        *self.connected.write() = Some(address);
        self
    }

    pub fn with_balance(self, address: &Address, balance: u64) -> Self {
        self.balances.write().insert(key(address), balance);
        self
    }

    /// Script every read call to fail with `message`.
    pub fn fail_reads_with(self, message: impl Into<String>) -> Self {
        *self.fail_reads.write() = Some(message.into());
        self
    }

    /// Script every mutating call to fail with `message`.
    pub fn fail_writes_with(self, message: impl Into<String>) -> Self {
        *self.fail_writes.write() = Some(message.into());
        self
    }

    /// Number of mutating calls that reached this ledger.
    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn owner_at(&self, x: i64, y: i64) -> Option<Address> {
        self.owners.read().get(&(x, y)).cloned()
    }

    pub fn data_at(&self, x: i64, y: i64) -> Option<String> {
        self.data.read().get(&(x, y)).cloned()
    }

    fn check_read(&self) -> Result<(), LedgerError> {
        match self.fail_reads.read().as_ref() {
            Some(message) => Err(LedgerError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn begin_write(&self) -> Result<(), LedgerError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_writes.read().as_ref() {
            Some(message) => Err(LedgerError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn next_tx(&self) -> TxHash {
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        TxHash::new(format!("0xtx{n:04x}"))
    }
}

/// Addresses key the mock's maps case-insensitively, like the ledger.
fn key(address: &Address) -> String {
    address.as_str().to_ascii_lowercase()
}

#[async_trait]
impl LedgerGateway for MockLedger {
    async fn owner_of(&self, x: i64, y: i64) -> Result<Option<Address>, LedgerError> {
        self.check_read()?;
        Ok(self.owners.read().get(&(x, y)).cloned())
    }

    async fn owner_of_many(
        &self,
        xs: &[i64],
        ys: &[i64],
    ) -> Result<Vec<Option<Address>>, LedgerError> {
        self.check_read()?;
        let owners = self.owners.read();
        Ok(xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| owners.get(&(x, y)).cloned())
            .collect())
    }

    async fn get_data(&self, x: i64, y: i64) -> Result<String, LedgerError> {
        self.check_read()?;
        Ok(self.data.read().get(&(x, y)).cloned().unwrap_or_default())
    }

    async fn land_of(&self, address: &Address) -> Result<(Vec<i64>, Vec<i64>), LedgerError> {
        self.check_read()?;
        let owners = self.owners.read();
        let mut cells: Vec<(i64, i64)> = owners
            .iter()
            .filter(|(_, owner)| owner.matches(address))
            .map(|(&cell, _)| cell)
            .collect();
        cells.sort_unstable();

        Ok(cells.into_iter().unzip())
    }

    async fn connected_address(&self) -> Result<Address, LedgerError> {
        self.check_read()?;
        self.connected
            .read()
            .clone()
            .ok_or_else(|| LedgerError::new("no connected account"))
    }

    async fn balance_of(&self, address: &Address) -> Result<u64, LedgerError> {
        self.check_read()?;
        Ok(self.balances.read().get(&key(address)).copied().unwrap_or(0))
    }

    async fn allowance_of(&self, owner: &Address, spender: &Address) -> Result<u64, LedgerError> {
        self.check_read()?;
        Ok(self
            .allowances
            .read()
            .get(&(key(owner), key(spender)))
            .copied()
            .unwrap_or(0))
    }

    async fn is_operator_authorized(
        &self,
        operator: &Address,
        owner: &Address,
    ) -> Result<bool, LedgerError> {
        self.check_read()?;
        Ok(self
            .operators
            .read()
            .get(&(key(owner), key(operator)))
            .copied()
            .unwrap_or(false))
    }

    async fn update_land_data(
        &self,
        x: i64,
        y: i64,
        encoded: &str,
    ) -> Result<TxHash, LedgerError> {
        self.begin_write()?;
        self.data.write().insert((x, y), encoded.to_string());
        Ok(self.next_tx())
    }

    async fn transfer_to(
        &self,
        x: i64,
        y: i64,
        new_owner: &Address,
    ) -> Result<TxHash, LedgerError> {
        self.begin_write()?;
        self.owners.write().insert((x, y), new_owner.clone());
        Ok(self.next_tx())
    }

    async fn approve(&self, spender: &Address, amount: u64) -> Result<TxHash, LedgerError> {
        self.begin_write()?;
        let owner = self.connected_address().await?;
        self.allowances
            .write()
            .insert((key(&owner), key(spender)), amount);
        Ok(self.next_tx())
    }

    async fn authorize_operator(
        &self,
        operator: &Address,
        authorized: bool,
    ) -> Result<TxHash, LedgerError> {
        self.begin_write()?;
        let owner = self.connected_address().await?;
        self.operators
            .write()
            .insert((key(&owner), key(operator)), authorized);
        Ok(self.next_tx())
    }
}
