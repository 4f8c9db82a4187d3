pub mod mock;

pub use mock::MockLedger;
