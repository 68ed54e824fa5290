use std::path::PathBuf;

use reqwest::Url;

use crate::cli::PrivateKey;
use crate::config::Config;
use crate::forge_utils::{ContractSpec, ForgeCreate, ForgeInspectAbi};
use crate::report::REPORT_PATH;

#[derive(Debug)]
pub struct DeploymentContext {
    pub deployment_dir: PathBuf,
    pub config: Config,
    pub private_key: PrivateKey,
    pub rpc_url: Url,
    pub etherscan_api_key: Option<String>,
}

impl DeploymentContext {
    pub fn report_path(&self) -> PathBuf {
        self.deployment_dir.join(REPORT_PATH)
    }

    pub fn forge_create(&self, contract_spec: ContractSpec) -> ForgeCreate {
        let mut forge_create = ForgeCreate::new(contract_spec)
            .with_cwd(&self.config.root)
            .with_private_key(self.private_key.clone())
            .with_rpc_url(self.rpc_url.to_string());

        if let Some(etherscan_api_key) = self.etherscan_api_key.as_ref() {
            forge_create = forge_create
                .with_verification_api_key(etherscan_api_key.clone());
        }

        if !self.config.verify {
            forge_create = forge_create.no_verify();
        }

        forge_create
    }

    pub fn forge_inspect_abi(
        &self,
        contract_spec: ContractSpec,
    ) -> ForgeInspectAbi {
        ForgeInspectAbi::new(contract_spec).with_cwd(&self.config.root)
    }
}
