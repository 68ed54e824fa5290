use std::path::PathBuf;

use clap::Parser;

pub mod private_key;

pub use private_key::PrivateKey;
use reqwest::Url;

#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case")]
pub struct Args {
    /// Path to the deployment configuration file
    #[clap(short, long, env)]
    pub config: PathBuf,

    /// The name of the deployment
    ///
    /// Should be something meaningful like 'prod-2023-04-18'
    #[clap(short, long, env)]
    pub deployment_name: String,

    /// Private key to use for the deployment
    ///
    /// Its address is account #0 of the deployment
    #[clap(short, long, env, required_unless_present = "dry_run")]
    pub private_key: Option<PrivateKey>,

    /// The RPC Url to use for the deployment
    #[clap(short, long, env, required_unless_present = "dry_run")]
    pub rpc_url: Option<Url>,

    /// The etherscan API key to use
    #[clap(short, long, env)]
    pub etherscan_api_key: Option<String>,

    /// Print the planned actions without deploying anything
    #[clap(long, env)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "supplymate-deployer",
            "--config",
            "deployment.yml",
            "--deployment-name",
            "sepolia-2024-01-01",
            "--private-key",
            KEY,
            "--rpc-url",
            "http://localhost:8545",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("deployment.yml"));
        assert_eq!(args.deployment_name, "sepolia-2024-01-01");
        assert_eq!(
            args.rpc_url.map(String::from).as_deref(),
            Some("http://localhost:8545/")
        );
        assert!(args.private_key.is_some());
        assert!(args.dry_run);
    }

    #[test]
    fn rejects_invalid_private_key() {
        let result = Args::try_parse_from([
            "supplymate-deployer",
            "--config",
            "deployment.yml",
            "--deployment-name",
            "local",
            "--private-key",
            "0x1234",
            "--rpc-url",
            "http://localhost:8545",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn dry_run_needs_no_network_args() {
        let args = Args::try_parse_from([
            "supplymate-deployer",
            "--config",
            "deployment.yml",
            "--deployment-name",
            "local",
            "--dry-run",
        ])
        .unwrap();

        assert!(args.dry_run);
        assert!(args.private_key.is_none());
        assert!(args.rpc_url.is_none());
    }

    #[test]
    fn network_args_required_without_dry_run() {
        let result = Args::try_parse_from([
            "supplymate-deployer",
            "--config",
            "deployment.yml",
            "--deployment-name",
            "local",
        ]);

        assert!(result.is_err());
    }
}
