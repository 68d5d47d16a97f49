mod funding_contract;
mod notifier;
mod rpc_transport;
mod wallet;

pub use funding_contract::{FundingContract, TxHandle, TxReceipt};
pub use notifier::Notifier;
pub use rpc_transport::RpcTransport;
pub use wallet::WalletProvider;
