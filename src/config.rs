use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::forge_utils::ContractSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the forge project holding the contract sources
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub contracts: HashMap<String, ContractConfig>,

    #[serde(default = "default_verify")]
    pub verify: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Source file relative to the project root
    pub path: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_verify() -> bool {
    true
}

impl Config {
    pub fn contract_spec(&self, contract_name: &str) -> ContractSpec {
        match self.contracts.get(contract_name) {
            Some(contract) => {
                ContractSpec::path_name(contract.path.clone(), contract_name)
            }
            None => ContractSpec::name(contract_name),
        }
    }
}
