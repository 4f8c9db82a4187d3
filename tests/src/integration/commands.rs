//! # Command Lifecycle Integration
//!
//! Orchestrator flows that span crates: command lifecycles observed
//! through the event channel, write-then-read-back against reconciliation,
//! and the latest-wins race between overlapping transfers.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use land_ledger::{LedgerError, LedgerGateway, MockLedger};
    use land_reconcile::ReconciliationService;
    use land_store::InMemoryParcelStore;
    use land_tx::{CommandEvent, CommandKind, CommandOutcome, TransactionOrchestrator};
    use land_types::{build_id, Address, LandData, Ownership, Parcel, TxHash};
    use tokio::sync::Notify;

    fn holder() -> Address {
        Address::new(format!("0x{}", "aa".repeat(20)))
    }

    fn first_recipient() -> Address {
        Address::new(format!("0x{}", "bb".repeat(20)))
    }

    fn second_recipient() -> Address {
        Address::new(format!("0x{}", "cc".repeat(20)))
    }

    fn operator() -> Address {
        Address::new(format!("0x{}", "dd".repeat(20)))
    }

    /// Ledger wrapper that stalls the first transfer until released, so a
    /// second transfer can overtake it.
    struct StallingLedger {
        inner: MockLedger,
        entered: Notify,
        release: Notify,
        transfers: AtomicU64,
    }

    impl StallingLedger {
        fn new(inner: MockLedger) -> Self {
            StallingLedger {
                inner,
                entered: Notify::new(),
                release: Notify::new(),
                transfers: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl LedgerGateway for StallingLedger {
        async fn owner_of(&self, x: i64, y: i64) -> Result<Option<Address>, LedgerError> {
            self.inner.owner_of(x, y).await
        }

        async fn owner_of_many(
            &self,
            xs: &[i64],
            ys: &[i64],
        ) -> Result<Vec<Option<Address>>, LedgerError> {
            self.inner.owner_of_many(xs, ys).await
        }

        async fn get_data(&self, x: i64, y: i64) -> Result<String, LedgerError> {
            self.inner.get_data(x, y).await
        }

        async fn land_of(&self, address: &Address) -> Result<(Vec<i64>, Vec<i64>), LedgerError> {
            self.inner.land_of(address).await
        }

        async fn connected_address(&self) -> Result<Address, LedgerError> {
            self.inner.connected_address().await
        }

        async fn balance_of(&self, address: &Address) -> Result<u64, LedgerError> {
            self.inner.balance_of(address).await
        }

        async fn allowance_of(
            &self,
            owner: &Address,
            spender: &Address,
        ) -> Result<u64, LedgerError> {
            self.inner.allowance_of(owner, spender).await
        }

        async fn is_operator_authorized(
            &self,
            operator: &Address,
            owner: &Address,
        ) -> Result<bool, LedgerError> {
            self.inner.is_operator_authorized(operator, owner).await
        }

        async fn update_land_data(
            &self,
            x: i64,
            y: i64,
            encoded: &str,
        ) -> Result<TxHash, LedgerError> {
            self.inner.update_land_data(x, y, encoded).await
        }

        async fn transfer_to(
            &self,
            x: i64,
            y: i64,
            new_owner: &Address,
        ) -> Result<TxHash, LedgerError> {
            if self.transfers.fetch_add(1, Ordering::SeqCst) == 0 {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.inner.transfer_to(x, y, new_owner).await
        }

        async fn approve(&self, spender: &Address, amount: u64) -> Result<TxHash, LedgerError> {
            self.inner.approve(spender, amount).await
        }

        async fn authorize_operator(
            &self,
            operator: &Address,
            authorized: bool,
        ) -> Result<TxHash, LedgerError> {
            self.inner.authorize_operator(operator, authorized).await
        }
    }

    #[tokio::test]
    async fn edit_lifecycle_is_observable_through_the_event_channel() {
        let orchestrator =
            TransactionOrchestrator::new(Arc::new(MockLedger::new()), operator());
        let mut events = orchestrator.subscribe();

        let data = LandData {
            version: 0,
            name: Some("plaza".to_string()),
            description: None,
            ipns: None,
        };
        let command = orchestrator.edit_parcel_data(5, -3, data).await;
        assert!(command.is_confirmed());

        let kinds: Vec<_> = (0..3).map(|_| events.try_recv().unwrap()).collect();
        assert!(matches!(kinds[0], CommandEvent::Requested { .. }));
        assert!(matches!(kinds[1], CommandEvent::Submitted { .. }));
        assert!(matches!(
            &kinds[2],
            CommandEvent::Confirmed {
                kind: CommandKind::EditData,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn confirmed_writes_are_visible_to_reconciliation_reads() {
        let ledger = Arc::new(MockLedger::new().with_connected(holder()));
        let store = Arc::new(InMemoryParcelStore::new());
        let orchestrator = TransactionOrchestrator::new(Arc::clone(&ledger), operator());
        let reconciler = ReconciliationService::new(Arc::clone(&ledger), store);

        orchestrator.connect_wallet().await;
        let command = orchestrator
            .transfer_parcel(&Parcel::new(1, 2), first_recipient())
            .await;
        assert!(command.is_confirmed());

        let enriched = reconciler.add_owners(vec![Parcel::new(1, 2)]).await;
        assert_eq!(enriched[0].ownership, Ownership::Owned(first_recipient()));
    }

    #[tokio::test]
    async fn wallet_flow_composes_connect_approve_and_authorize() {
        let ledger = Arc::new(MockLedger::new().with_connected(holder()));
        let orchestrator = TransactionOrchestrator::new(ledger, operator());

        assert!(orchestrator.connect_wallet().await.is_confirmed());
        assert!(orchestrator.approve_allowance(5000).await.is_confirmed());
        assert!(orchestrator.authorize_operator(true).await.is_confirmed());

        let wallet = orchestrator.wallet();
        assert_eq!(wallet.address, Some(holder()));
        assert_eq!(wallet.approved_balance, 5000);
        assert!(wallet.land_authorized);

        // A reconnect reads the confirmed values back from the ledger.
        assert!(orchestrator.connect_wallet().await.is_confirmed());
        let wallet = orchestrator.wallet();
        assert_eq!(wallet.approved_balance, 5000);
        assert!(wallet.land_authorized);
    }

    #[tokio::test]
    async fn overtaken_transfer_is_superseded_and_leaves_the_newest_owner() {
        crate::integration::init_tracing();
        let ledger = Arc::new(StallingLedger::new(
            MockLedger::new().with_connected(holder()),
        ));
        let orchestrator = Arc::new(TransactionOrchestrator::new(
            Arc::clone(&ledger),
            operator(),
        ));
        orchestrator.connect_wallet().await;
        orchestrator.track_parcels([Parcel::new(1, 2)]);
        let mut events = orchestrator.subscribe();

        // First transfer stalls inside the ledger call.
        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                orchestrator
                    .transfer_parcel(&Parcel::new(1, 2), first_recipient())
                    .await
            })
        };
        ledger.entered.notified().await;

        // Second transfer overtakes it and confirms.
        let second = orchestrator
            .transfer_parcel(&Parcel::new(1, 2), second_recipient())
            .await;
        assert!(second.is_confirmed());
        assert!(!second.superseded);

        ledger.release.notify_one();
        let first = first.await.unwrap();

        assert!(first.superseded);
        let local = orchestrator.tracked_parcel(&build_id(1, 2)).unwrap();
        assert_eq!(local.ownership, Ownership::Owned(second_recipient()));

        // Exactly one terminal event: the superseded command publishes none.
        let mut terminal = 0;
        while let Ok(event) = events.try_recv() {
            if let CommandEvent::Confirmed {
                outcome: CommandOutcome::Transferred(transfer),
                ..
            } = event
            {
                terminal += 1;
                assert_eq!(transfer.new_owner, second_recipient());
            }
        }
        assert_eq!(terminal, 1);
    }
}
