use std::path::{Path, PathBuf};

use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::common::ContractSpec;
use crate::cli::PrivateKey;

#[derive(Debug)]
pub struct ForgeCreate {
    cwd: Option<PathBuf>,
    contract_spec: ContractSpec,
    private_key: Option<PrivateKey>,
    rpc_url: Option<String>,
    constructor_args: Vec<String>,
    verification_api_key: Option<String>,
    no_verify: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForgeOutput {
    pub deployer: Address,
    pub deployed_to: Address,
    pub transaction_hash: H256,
}

impl ForgeCreate {
    pub fn new(contract_spec: ContractSpec) -> Self {
        Self {
            cwd: None,
            contract_spec,
            private_key: None,
            rpc_url: None,
            constructor_args: vec![],
            verification_api_key: None,
            no_verify: false,
        }
    }

    pub fn no_verify(mut self) -> Self {
        self.no_verify = true;
        self
    }

    pub fn with_verification_api_key(
        mut self,
        verification_api_key: impl ToString,
    ) -> Self {
        self.verification_api_key = Some(verification_api_key.to_string());
        self
    }

    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_owned());
        self
    }

    pub fn with_private_key(mut self, private_key: PrivateKey) -> Self {
        self.private_key = Some(private_key);
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: String) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    pub fn with_constructor_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.constructor_args
            .extend(args.into_iter().map(|arg| arg.to_string()));
        self
    }

    pub fn command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new("forge");
        cmd.arg("create");

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        cmd.arg(self.contract_spec.to_string());

        if let Some(private_key) = &self.private_key {
            cmd.arg("--private-key");
            cmd.arg(format!("{private_key:#}"));
        }

        if let Some(rpc_url) = &self.rpc_url {
            cmd.arg("--rpc-url");
            cmd.arg(rpc_url);
        }

        if !self.no_verify {
            if let Some(verification_api_key) = &self.verification_api_key {
                cmd.arg("--etherscan-api-key");
                cmd.arg(verification_api_key);
                cmd.arg("--verify");
            }
        }

        cmd.arg("--broadcast");
        cmd.arg("--json");

        // Variadic, so it has to come last
        if !self.constructor_args.is_empty() {
            cmd.arg("--constructor-args");
            cmd.args(&self.constructor_args);
        }

        cmd
    }

    #[instrument(
        name = "forge_create",
        skip_all,
        fields(contract = %self.contract_spec)
    )]
    pub async fn run(&self) -> eyre::Result<ForgeOutput> {
        let mut cmd = self.command();

        info!(
            "Creating contract with {} constructor args",
            self.constructor_args.len()
        );

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("forge create failed: {}", stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let s = strip_non_json(&stdout);

        let output = serde_json::from_str(s)?;

        info!("Created: {output:?}");

        Ok(output)
    }
}

fn strip_non_json(s: &str) -> &str {
    if let Some(last_closing_brace) = s.rfind('}') {
        &s[..=last_closing_brace]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    const KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn args(forge_create: &ForgeCreate) -> Vec<String> {
        forge_create
            .command()
            .as_std()
            .get_args()
            .map(OsStr::to_string_lossy)
            .map(|arg| arg.into_owned())
            .collect()
    }

    #[test]
    fn builds_command_with_trailing_constructor_args() -> eyre::Result<()> {
        let owner = "0x0101010101010101010101010101010101010101";
        let key_arg = format!("0x{KEY}");

        let forge_create =
            ForgeCreate::new(ContractSpec::name("SupplyMateNFT"))
                .with_cwd("./contracts")
                .with_private_key(KEY.parse()?)
                .with_rpc_url("http://localhost:8545".to_string())
                .with_constructor_args([owner]);

        assert_eq!(
            args(&forge_create),
            vec![
                "create",
                "SupplyMateNFT",
                "--private-key",
                key_arg.as_str(),
                "--rpc-url",
                "http://localhost:8545",
                "--broadcast",
                "--json",
                "--constructor-args",
                owner,
            ]
        );

        assert_eq!(
            forge_create.command().as_std().get_current_dir(),
            Some(Path::new("./contracts"))
        );

        Ok(())
    }

    #[test]
    fn verification_is_opt_in_and_can_be_disabled() {
        let spec = ContractSpec::name("SupplyMateNFT");

        let verifying = ForgeCreate::new(spec.clone())
            .with_verification_api_key("api-key");
        assert!(args(&verifying).contains(&"--verify".to_string()));

        let disabled = ForgeCreate::new(spec.clone())
            .with_verification_api_key("api-key")
            .no_verify();
        assert!(!args(&disabled).contains(&"--verify".to_string()));

        let without_key = ForgeCreate::new(spec);
        assert!(!args(&without_key).contains(&"--verify".to_string()));
    }

    #[test]
    fn parses_output_with_trailing_noise() -> eyre::Result<()> {
        let stdout = indoc::indoc! {r#"
            {"deployer":"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266","deployedTo":"0x5fbdb2315678afecb367f032d93f642f64180aa3","transactionHash":"0x0000000000000000000000000000000000000000000000000000000000000001"}
            Warning: something unrelated
        "#};

        let output: ForgeOutput =
            serde_json::from_str(strip_non_json(stdout))?;

        assert_eq!(
            output.deployed_to,
            "0x5fbdb2315678afecb367f032d93f642f64180aa3".parse::<Address>()?
        );
        assert_eq!(output.transaction_hash, H256::from_low_u64_be(1));

        Ok(())
    }
}
