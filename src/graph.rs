use tracing::debug;

use crate::module::{
    AccountRef, ArgumentRef, ContractHandle, Module, ModuleBuilder,
    ModuleResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAction {
    pub id: String,
    pub contract_name: String,
    pub args: Vec<ArgumentRef>,
}

/// Ordered record of the actions a module registers during a single build.
#[derive(Debug)]
pub struct DeploymentGraph {
    module_id: String,
    actions: Vec<ContractAction>,
}

impl DeploymentGraph {
    pub fn new(module_id: impl ToString) -> Self {
        Self {
            module_id: module_id.to_string(),
            actions: vec![],
        }
    }

    pub fn build_module<M: Module>(
        module: &M,
    ) -> eyre::Result<(Self, ModuleResult)> {
        let mut graph = Self::new(M::ID);
        let result = module.build(&mut graph)?;

        Ok((graph, result))
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn actions(&self) -> &[ContractAction] {
        &self.actions
    }
}

impl ModuleBuilder for DeploymentGraph {
    type Error = eyre::Report;

    fn contract(
        &mut self,
        name: &str,
        args: Vec<ArgumentRef>,
    ) -> eyre::Result<ContractHandle> {
        if name.is_empty() {
            eyre::bail!(
                "Module {} registered a contract with an empty name",
                self.module_id
            );
        }

        let id = format!("{}#{}", self.module_id, name);

        if self.actions.iter().any(|action| action.id == id) {
            eyre::bail!(
                "Duplicated id {id} found in module {}",
                self.module_id
            );
        }

        debug!(%id, num_args = args.len(), "Registering contract");

        self.actions.push(ContractAction {
            id: id.clone(),
            contract_name: name.to_string(),
            args,
        });

        Ok(ContractHandle::new(id, name))
    }

    fn get_account(&mut self, index: usize) -> AccountRef {
        AccountRef::new(index)
    }
}
