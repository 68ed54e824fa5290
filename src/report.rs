use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ChainId;

pub mod contract_deployment;

pub use self::contract_deployment::ContractDeployment;

pub const REPORT_PATH: &str = "report.yml";

/// Journal of what a named deployment has already put on chain.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub module_id: String,

    #[serde(default)]
    pub chain_id: Option<ChainId>,

    /// Keyed by future id, e.g. `DeploymentModule#SupplyMateNFT`
    #[serde(default)]
    pub contracts: BTreeMap<String, ContractDeployment>,
}

impl Report {
    pub fn new(module_id: impl ToString) -> Self {
        Self {
            module_id: module_id.to_string(),
            chain_id: None,
            contracts: Default::default(),
        }
    }

    /// Pins the report to `chain_id`, rejecting reports from other chains.
    pub fn bind_chain_id(&mut self, chain_id: ChainId) -> eyre::Result<()> {
        match self.chain_id {
            Some(existing) if existing != chain_id => {
                eyre::bail!(
                    "Deployment was recorded on chain {existing} \
                     but the RPC is on chain {chain_id}"
                )
            }
            _ => {
                self.chain_id = Some(chain_id);
                Ok(())
            }
        }
    }
}
