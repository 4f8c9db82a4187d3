//! # Ledger Gateway Port
//!
//! The fixed method surface this system invokes against the external
//! ledger. Always injected as an explicit capability; never looked up
//! from global state.

use crate::errors::LedgerError;
use async_trait::async_trait;
use land_types::{Address, TxHash};

#[async_trait]
pub trait LedgerGateway: Send + Sync {
    // --- reads ---

    /// Owner of one cell, `None` when unowned.
    async fn owner_of(&self, x: i64, y: i64) -> Result<Option<Address>, LedgerError>;

    /// Batched ownership lookup over parallel coordinate arrays.
    async fn owner_of_many(
        &self,
        xs: &[i64],
        ys: &[i64],
    ) -> Result<Vec<Option<Address>>, LedgerError>;

    /// Raw metadata string stored for one cell.
    async fn get_data(&self, x: i64, y: i64) -> Result<String, LedgerError>;

    /// All coordinates owned by `address`, as parallel component arrays.
    async fn land_of(&self, address: &Address) -> Result<(Vec<i64>, Vec<i64>), LedgerError>;

    /// The currently connected credential.
    async fn connected_address(&self) -> Result<Address, LedgerError>;

    /// Token balance of a holder.
    async fn balance_of(&self, address: &Address) -> Result<u64, LedgerError>;

    /// Allowance `owner` has granted to `spender`.
    async fn allowance_of(&self, owner: &Address, spender: &Address) -> Result<u64, LedgerError>;

    /// Whether `operator` may act on `owner`'s parcels.
    async fn is_operator_authorized(
        &self,
        operator: &Address,
        owner: &Address,
    ) -> Result<bool, LedgerError>;

    // --- mutations ---

    /// Write the encoded metadata string for one cell.
    async fn update_land_data(
        &self,
        x: i64,
        y: i64,
        encoded: &str,
    ) -> Result<TxHash, LedgerError>;

    /// Transfer one cell to a new owner.
    async fn transfer_to(
        &self,
        x: i64,
        y: i64,
        new_owner: &Address,
    ) -> Result<TxHash, LedgerError>;

    /// Approve `spender` to use `amount` of the holder's tokens.
    async fn approve(&self, spender: &Address, amount: u64) -> Result<TxHash, LedgerError>;

    /// Grant or revoke `operator`'s authorization over the holder's parcels.
    async fn authorize_operator(
        &self,
        operator: &Address,
        authorized: bool,
    ) -> Result<TxHash, LedgerError>;
}
