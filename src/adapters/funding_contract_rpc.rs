//! Funding contract access over JSON-RPC.

use std::thread;
use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::adapters::abi::{self, AbiType};
use crate::domain::proposal::{Address, RawTuple, RawValue, Wei};
use crate::domain::{AppError, ContractConfig, UpstreamCategory};
use crate::ports::{FundingContract, RpcTransport, TxHandle, TxReceipt};

const PROPOSAL_OUTPUTS: [AbiType; 11] = [
    AbiType::String,
    AbiType::Address,
    AbiType::Uint256,
    AbiType::Uint256,
    AbiType::Uint256,
    AbiType::Uint256,
    AbiType::Uint256,
    AbiType::Uint256,
    AbiType::Uint256,
    AbiType::Uint256,
    AbiType::Uint256,
];
const STAGE_OUTPUTS: [AbiType; 4] =
    [AbiType::Uint256, AbiType::String, AbiType::Uint256, AbiType::Uint256];

pub mod signatures {
    pub const PROPOSAL_COUNT: &str = "proposalCount()";
    pub const GET_PROPOSAL_INFO: &str = "getProposalInfo(uint256)";
    pub const GET_STAGE_INFO: &str = "getStageInfo(uint256,uint256)";
    pub const GET_CONTRACT_BALANCE: &str = "getContractBalance()";
    pub const ADMIN: &str = "admin()";
    pub const AUTHORITIES: &str = "authorities(address)";
    pub const PUBLIC_VOTE_ON_PROPOSAL: &str = "publicVoteOnProposal(uint256,bool,string)";
    pub const CLOSE_PUBLIC_VOTING: &str = "closePublicVoting(uint256)";
    pub const RELEASE_STAGE_AMOUNT: &str = "releaseStageAmount(uint256)";
}

/// [`FundingContract`] backed by `eth_call` / `eth_sendTransaction` against a
/// node that holds the sender's key.
pub struct RpcFundingContract<T: RpcTransport> {
    transport: T,
    address: Address,
    receipt_poll: Duration,
    receipt_timeout: Duration,
}

impl<T: RpcTransport> RpcFundingContract<T> {
    pub fn new(transport: T, config: &ContractConfig) -> Self {
        Self {
            transport,
            address: config.address.clone(),
            receipt_poll: Duration::from_millis(config.receipt_poll_ms),
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
        }
    }

    fn read(
        &self,
        signature: &str,
        args: &[RawValue],
        outputs: &[AbiType],
    ) -> Result<RawTuple, AppError> {
        let data = abi::to_hex(&abi::encode_call(signature, args));
        let params = json!([{ "to": self.address.as_str(), "data": data }, "latest"]);
        let result = self.transport.call("eth_call", params)?;

        let hex = result
            .as_str()
            .ok_or_else(|| AppError::malformed(signature, "eth_call result is not a string"))?;
        let bytes = abi::from_hex(hex)?;
        if bytes.is_empty() {
            // Calls to an address without code return empty data.
            return Err(AppError::upstream(
                UpstreamCategory::NotFound,
                Some(format!("no contract at {}", self.address)),
            ));
        }
        abi::decode(outputs, &bytes)
    }

    fn read_uint(&self, signature: &str, args: &[RawValue]) -> Result<u128, AppError> {
        match self.read(signature, args, &[AbiType::Uint256])?.as_slice() {
            [RawValue::Uint(value)] => Ok(*value),
            other => Err(AppError::malformed(signature, format!("unexpected values {:?}", other))),
        }
    }

    fn send(
        &self,
        sender: &Address,
        signature: &str,
        args: &[RawValue],
    ) -> Result<TxHandle, AppError> {
        let data = abi::to_hex(&abi::encode_call(signature, args));
        let params = json!([{
            "from": sender.as_str(),
            "to": self.address.as_str(),
            "data": data,
        }]);
        let result = self.transport.call("eth_sendTransaction", params)?;

        let hash = result
            .as_str()
            .ok_or_else(|| AppError::malformed(signature, "transaction hash is not a string"))?;
        info!(tx = hash, function = signature, "transaction submitted");
        Ok(TxHandle(hash.to_string()))
    }

    fn receipt(&self, tx: &TxHandle) -> Result<Option<TxReceipt>, AppError> {
        let result = self.transport.call("eth_getTransactionReceipt", json!([tx.as_str()]))?;
        if result.is_null() {
            return Ok(None);
        }

        let status = quantity_field(&result, "status")?;
        if status == 0 {
            return Err(AppError::upstream(UpstreamCategory::Reverted, None));
        }
        let block_number = u64::try_from(quantity_field(&result, "blockNumber")?)
            .map_err(|_| AppError::malformed("transaction receipt", "blockNumber out of range"))?;

        Ok(Some(TxReceipt { hash: tx.clone(), block_number }))
    }
}

fn quantity_field(receipt: &Value, field: &str) -> Result<u128, AppError> {
    let raw = receipt.get(field).and_then(Value::as_str).ok_or_else(|| {
        AppError::malformed("transaction receipt", format!("missing '{}'", field))
    })?;
    abi::parse_quantity(raw)
}

impl<T: RpcTransport> FundingContract for RpcFundingContract<T> {
    fn proposal_count(&self) -> Result<u64, AppError> {
        let count = self.read_uint(signatures::PROPOSAL_COUNT, &[])?;
        u64::try_from(count)
            .map_err(|_| {
                AppError::malformed("proposalCount", format!("{} does not fit in u64", count))
            })
    }

    fn get_proposal_info(&self, id: u64) -> Result<RawTuple, AppError> {
        self.read(signatures::GET_PROPOSAL_INFO, &[RawValue::Uint(id.into())], &PROPOSAL_OUTPUTS)
    }

    fn get_stage_info(&self, id: u64, stage: u64) -> Result<RawTuple, AppError> {
        self.read(
            signatures::GET_STAGE_INFO,
            &[RawValue::Uint(id.into()), RawValue::Uint(stage.into())],
            &STAGE_OUTPUTS,
        )
    }

    fn get_contract_balance(&self) -> Result<Wei, AppError> {
        self.read_uint(signatures::GET_CONTRACT_BALANCE, &[]).map(Wei)
    }

    fn admin(&self) -> Result<Address, AppError> {
        match self.read(signatures::ADMIN, &[], &[AbiType::Address])?.pop() {
            Some(RawValue::Address(address)) => Ok(address),
            other => Err(AppError::malformed("admin", format!("unexpected value {:?}", other))),
        }
    }

    fn is_authority(&self, account: &Address) -> Result<bool, AppError> {
        let args = [RawValue::Address(account.clone())];
        match self.read(signatures::AUTHORITIES, &args, &[AbiType::Bool])?.pop() {
            Some(RawValue::Bool(flag)) => Ok(flag),
            other => {
                Err(AppError::malformed("authorities", format!("unexpected value {:?}", other)))
            }
        }
    }

    fn public_vote_on_proposal(
        &self,
        sender: &Address,
        id: u64,
        approve: bool,
        comment: &str,
    ) -> Result<TxHandle, AppError> {
        self.send(sender, signatures::PUBLIC_VOTE_ON_PROPOSAL, &[
            RawValue::Uint(id.into()),
            RawValue::Bool(approve),
            RawValue::Text(comment.to_string()),
        ])
    }

    fn close_public_voting(&self, sender: &Address, id: u64) -> Result<TxHandle, AppError> {
        self.send(sender, signatures::CLOSE_PUBLIC_VOTING, &[RawValue::Uint(id.into())])
    }

    fn release_stage_amount(&self, sender: &Address, id: u64) -> Result<TxHandle, AppError> {
        self.send(sender, signatures::RELEASE_STAGE_AMOUNT, &[RawValue::Uint(id.into())])
    }

    fn wait_for(&self, tx: &TxHandle) -> Result<TxReceipt, AppError> {
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.receipt(tx)? {
                debug!(tx = %tx, block = receipt.block_number, "transaction mined");
                return Ok(receipt);
            }
            if started.elapsed() >= self.receipt_timeout {
                return Err(AppError::upstream(
                    UpstreamCategory::Network,
                    Some(format!(
                        "transaction {} not mined within {}s",
                        tx,
                        self.receipt_timeout.as_secs()
                    )),
                ));
            }
            thread::sleep(self.receipt_poll);
        }
    }
}
