use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

use crate::forge_utils::ForgeOutput;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ContractDeployment {
    pub contract_name: String,
    /// Resolved constructor arguments, as passed to forge
    pub args: Vec<String>,
    pub address: Address,
    pub transaction_hash: H256,
}

impl ContractDeployment {
    pub fn new(
        contract_name: impl ToString,
        args: Vec<String>,
        output: ForgeOutput,
    ) -> Self {
        Self {
            contract_name: contract_name.to_string(),
            args,
            address: output.deployed_to,
            transaction_hash: output.transaction_hash,
        }
    }
}
