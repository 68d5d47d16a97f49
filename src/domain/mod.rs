pub mod board;
pub mod configuration;
pub mod error;
pub mod notification;
pub mod projection;
pub mod proposal;
pub mod snapshot;
pub mod statistics;
pub mod upstream;

pub use board::{ProposalBoard, RefreshTicket};
pub use configuration::{AppConfig, ContractConfig, RpcConfig, WalletConfig};
pub use error::AppError;
pub use notification::{Notification, Severity};
pub use projection::{Action, Role};
pub use proposal::{Address, Proposal, ProposalState, Stage, StageState, Wei};
pub use snapshot::{ProposalSnapshot, ProposalView};
pub use statistics::{AdminStatistics, compute_statistics};
pub use upstream::UpstreamCategory;
