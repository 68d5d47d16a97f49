pub mod abi;
pub mod funding_contract_rpc;
pub mod rpc_transport_http;
pub mod rpc_transport_retrying;
pub mod terminal_notifier;
pub mod wallet_rpc;

pub use funding_contract_rpc::RpcFundingContract;
pub use rpc_transport_http::HttpRpcTransport;
pub use rpc_transport_retrying::{RetryPolicy, RetryingRpcTransport};
pub use terminal_notifier::TerminalNotifier;
pub use wallet_rpc::RpcWallet;
