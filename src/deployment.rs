use std::collections::BTreeMap;
use std::path::PathBuf;

use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::Signer;
use eyre::ContextCompat;
use tracing::{info, instrument};

use crate::accounts::Accounts;
use crate::cli::Args;
use crate::config::Config;
use crate::forge_utils::inspect_abi::constructor_arity;
use crate::graph::{ContractAction, DeploymentGraph};
use crate::module::deployment_module::DeploymentModule;
use crate::module::{ArgumentRef, ModuleResult};
use crate::report::{ContractDeployment, Report, REPORT_PATH};
use crate::serde_utils;
use crate::types::ChainId;

pub mod deployment_context;

pub use self::deployment_context::DeploymentContext;

pub async fn run_deployment(cmd: Args) -> eyre::Result<()> {
    let config: Config = serde_utils::read_deserialize(&cmd.config).await?;

    let (graph, result) = DeploymentGraph::build_module(&DeploymentModule)?;

    let deployment_dir = PathBuf::from(&cmd.deployment_name);
    let report_path = deployment_dir.join(REPORT_PATH);
    let mut report: Report = if report_path.exists() {
        serde_utils::read_deserialize::<Report>(&report_path).await?
    } else {
        Report::new(graph.module_id())
    };

    if report.module_id != graph.module_id() {
        eyre::bail!(
            "{} belongs to module {}, not {}",
            report_path.display(),
            report.module_id,
            graph.module_id()
        );
    }

    if cmd.dry_run {
        for line in plan(&graph, &report) {
            info!("{line}");
        }

        return Ok(());
    }

    tokio::fs::create_dir_all(&deployment_dir).await?;

    let context = DeploymentContext {
        deployment_dir,
        config,
        private_key: cmd.private_key.context("Missing private key")?,
        rpc_url: cmd.rpc_url.context("Missing RPC url")?,
        etherscan_api_key: cmd.etherscan_api_key,
    };

    let provider = Provider::<Http>::try_from(context.rpc_url.as_str())?;
    let chain_id = provider.get_chainid().await?;
    report.bind_chain_id(ChainId(chain_id.as_u64()))?;

    let deployer = context.private_key.wallet().address();
    let accounts = Accounts::resolve(&provider, deployer).await;

    execute_graph(&context, &graph, &accounts, &mut report).await?;

    log_result(&result, &report)?;

    Ok(())
}

#[instrument(skip_all, fields(module = graph.module_id()))]
pub async fn execute_graph(
    context: &DeploymentContext,
    graph: &DeploymentGraph,
    accounts: &Accounts,
    report: &mut Report,
) -> eyre::Result<()> {
    for action in graph.actions() {
        let args = resolve_args(&action.args, accounts, &report.contracts)?;

        if let Some(existing) = report.contracts.get(&action.id) {
            if existing.args != args {
                eyre::bail!(
                    "Constructor arguments changed for {}: \
                     recorded {:?}, now {:?}",
                    action.id,
                    existing.args,
                    args
                );
            }

            info!(
                "Existing deployment of {} found at {:?}. Skipping.",
                action.id, existing.address
            );
            continue;
        }

        let contract_spec =
            context.config.contract_spec(&action.contract_name);

        let abi = context
            .forge_inspect_abi(contract_spec.clone())
            .run()
            .await?;
        check_arity(action, constructor_arity(&abi))?;

        let output = context
            .forge_create(contract_spec)
            .with_constructor_args(&args)
            .run()
            .await?;

        report.contracts.insert(
            action.id.clone(),
            ContractDeployment::new(&action.contract_name, args, output),
        );

        serde_utils::write_serialize(context.report_path(), &*report).await?;
    }

    Ok(())
}

/// Turns symbolic arguments into the strings forge takes on the command line.
pub fn resolve_args(
    args: &[ArgumentRef],
    accounts: &Accounts,
    deployed: &BTreeMap<String, ContractDeployment>,
) -> eyre::Result<Vec<String>> {
    args.iter()
        .map(|arg| match arg {
            ArgumentRef::Account(account) => {
                Ok(format!("{:?}", accounts.get(*account)?))
            }
            ArgumentRef::Contract(handle) => {
                let deployment =
                    deployed.get(handle.id()).with_context(|| {
                        format!("{handle} has not been deployed yet")
                    })?;

                Ok(format!("{:?}", deployment.address))
            }
            ArgumentRef::Literal(value) => Ok(value.clone()),
        })
        .collect()
}

pub fn check_arity(
    action: &ContractAction,
    expected: usize,
) -> eyre::Result<()> {
    if action.args.len() != expected {
        eyre::bail!(
            "{} constructor takes {expected} arguments but {} were given",
            action.contract_name,
            action.args.len()
        );
    }

    Ok(())
}

pub fn describe_action(action: &ContractAction) -> String {
    let args = action
        .args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!("{}: {}({args})", action.id, action.contract_name)
}

/// One line per action, noting the ones the report already records.
pub fn plan(graph: &DeploymentGraph, report: &Report) -> Vec<String> {
    graph
        .actions()
        .iter()
        .map(|action| match report.contracts.get(&action.id) {
            Some(existing) => format!(
                "{} (already deployed at {:?})",
                describe_action(action),
                existing.address
            ),
            None => describe_action(action),
        })
        .collect()
}

fn log_result(result: &ModuleResult, report: &Report) -> eyre::Result<()> {
    for (name, handle) in result {
        let deployment = report
            .contracts
            .get(handle.id())
            .with_context(|| format!("Missing deployment for {name}"))?;

        info!(
            "{name} ({}) deployed at {:?}",
            handle.contract_name(),
            deployment.address
        );
    }

    Ok(())
}
