pub mod fake_contract;
pub mod fake_wallet;
pub mod fixtures;
pub mod recording_notifier;

pub use fake_contract::{FakeContract, RecordedWrite};
pub use fake_wallet::FakeWallet;
pub use fixtures::accounts;
pub use recording_notifier::RecordingNotifier;
