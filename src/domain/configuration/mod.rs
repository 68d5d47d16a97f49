pub mod app_config;
pub mod loader;

pub use app_config::{AppConfig, ContractConfig, RpcConfig, WalletConfig};
pub use loader::{load_config, parse_config_content, resolve_config_path};
