//! Shared testing utilities for pubfund CLI and library tests.
//!
//! A mockito server stands in for the JSON-RPC node. Contract reads are
//! matched on their ABI calldata so each function and argument set gets its
//! own canned response.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use mockito::{Matcher, Mock, Server, ServerGuard};
use pubfund::adapters::abi;
use pubfund::adapters::funding_contract_rpc::signatures;
use pubfund::domain::proposal::{Address, RawValue};
use serde_json::{Value, json};

pub const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
pub const ADMIN: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const CITIZEN: &str = "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc";
pub const RECIPIENT: &str = "0x90f79bf6eb2c4f870365e785982e1f101e93b906";
pub const ETH: u128 = 1_000_000_000_000_000_000;
pub const TX_HASH: &str = "0x8a3f2b1c0d4e5f60718293a4b5c6d7e8f90112233445566778899aabbccddeeff";

/// Testing harness providing a fake node and an isolated config directory.
pub struct TestContext {
    pub server: ServerGuard,
    dir: TempDir,
}

impl TestContext {
    /// Create a fake node and a config whose wallet account is `account`.
    pub fn new(account: Option<&str>) -> Self {
        let server = Server::new();
        let dir = TempDir::new().expect("Failed to create temp directory for tests");

        let wallet = match account {
            Some(account) => format!("[wallet]\naccount = \"{}\"\n", account),
            None => String::new(),
        };
        let content = format!(
            r#"[rpc]
url = "{url}"
timeout_secs = 5
max_retries = 1
retry_delay_ms = 1

[contract]
address = "{contract}"
receipt_poll_ms = 1
receipt_timeout_secs = 5

{wallet}"#,
            url = server.url(),
            contract = CONTRACT,
            wallet = wallet,
        );
        dir.child("pubfund.toml").write_str(&content).expect("Failed to write config");

        Self { server, dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("pubfund.toml")
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Build a command for the compiled `pubfund` binary pointed at this context's config.
    pub fn cli(&self) -> Command {
        let mut cmd = self.cli_without_config();
        cmd.arg("--config").arg(self.config_path());
        cmd
    }

    /// Build a command running in the context directory with no `--config` flag.
    pub fn cli_without_config(&self) -> Command {
        let mut cmd = Command::cargo_bin("pubfund").expect("Failed to locate pubfund binary");
        cmd.current_dir(self.dir())
            .env_remove("PUBFUND_CONFIG")
            .env_remove("PUBFUND_RPC_URL")
            .env_remove("PUBFUND_LOG");
        cmd
    }

    /// Answer `eth_call` for `signature(args)` with the ABI encoding of `returns`.
    pub fn mock_read(&mut self, signature: &str, args: &[RawValue], returns: &[RawValue]) -> Mock {
        let data = abi::to_hex(&abi::encode_call(signature, args));
        self.mock_rpc(
            Matcher::AllOf(vec![
                Matcher::Regex(r#""method":"eth_call""#.to_string()),
                Matcher::Regex(format!(r#""data":"{}""#, data)),
            ]),
            json!(abi::to_hex(&abi::encode(returns))),
        )
    }

    /// Answer every call of `method` with `result`.
    pub fn mock_method(&mut self, method: &str, result: Value) -> Mock {
        self.mock_rpc(Matcher::Regex(format!(r#""method":"{}""#, method)), result)
    }

    /// Answer every call of `method` with a JSON-RPC error object.
    pub fn mock_method_error(&mut self, method: &str, code: i64, message: &str) -> Mock {
        self.server
            .mock("POST", "/")
            .match_body(Matcher::Regex(format!(r#""method":"{}""#, method)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"jsonrpc": "2.0", "id": 1, "error": {"code": code, "message": message}})
                    .to_string(),
            )
            .create()
    }

    fn mock_rpc(&mut self, body: Matcher, result: Value) -> Mock {
        self.server
            .mock("POST", "/")
            .match_body(body)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string())
            .create()
    }

    /// Node on chain 31337 whose contract has `admin` as admin and no authorities.
    pub fn mock_roles(&mut self, account: &str) {
        self.mock_method("eth_chainId", json!("0x7a69"));
        self.mock_read(signatures::ADMIN, &[], &[RawValue::Address(address(ADMIN))]);
        self.mock_read(
            signatures::AUTHORITIES,
            &[RawValue::Address(address(account))],
            &[RawValue::Bool(false)],
        );
    }

    /// A contract holding `proposals`, each with its stage tuples, and `balance` wei.
    pub fn mock_contract(
        &mut self,
        proposals: &[(Vec<RawValue>, Vec<Vec<RawValue>>)],
        balance: u128,
    ) {
        self.mock_read(signatures::PROPOSAL_COUNT, &[], &[RawValue::Uint(proposals.len() as u128)]);
        self.mock_read(signatures::GET_CONTRACT_BALANCE, &[], &[RawValue::Uint(balance)]);

        for (id, (proposal, stages)) in proposals.iter().enumerate() {
            let id = id as u128;
            self.mock_read(signatures::GET_PROPOSAL_INFO, &[RawValue::Uint(id)], proposal);
            for (index, stage) in stages.iter().enumerate() {
                self.mock_read(
                    signatures::GET_STAGE_INFO,
                    &[RawValue::Uint(id), RawValue::Uint(index as u128)],
                    stage,
                );
            }
        }
    }
}

pub fn address(value: &str) -> Address {
    Address::new(value).expect("valid test address")
}

/// `getProposalInfo` tuple: state index, public yes/no, stage cursor, stage count, end time.
pub fn proposal_tuple(
    description: &str,
    state: u128,
    votes: (u128, u128),
    stages: (u128, u128),
    end_time: u128,
) -> Vec<RawValue> {
    vec![
        RawValue::Text(description.to_string()),
        RawValue::Address(address(RECIPIENT)),
        RawValue::Uint(2 * ETH),
        RawValue::Uint(state),
        RawValue::Uint(votes.0),
        RawValue::Uint(votes.1),
        RawValue::Uint(stages.0),
        RawValue::Uint(stages.1),
        RawValue::Uint(3),
        RawValue::Uint(1),
        RawValue::Uint(end_time),
    ]
}

/// `getStageInfo` tuple with the given state index.
pub fn stage_tuple(state: u128, report: &str) -> Vec<RawValue> {
    vec![
        RawValue::Uint(ETH),
        RawValue::Text(report.to_string()),
        RawValue::Uint(0),
        RawValue::Uint(state),
    ]
}
