//! Declarative deployment modules.
//!
//! A [`Module`] describes *what* to deploy by calling back into a
//! [`ModuleBuilder`] supplied by whoever executes it. Nothing here touches
//! the network: accounts and contract addresses stay symbolic until the
//! engine resolves them at execution time.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::AccountIndex;

pub mod deployment_module;

/// Logical name -> handle of the contract registered under it
pub type ModuleResult = BTreeMap<String, ContractHandle>;

/// Capabilities a module needs from the engine while it is being built.
pub trait ModuleBuilder {
    type Error;

    /// Registers a contract deployment with the given constructor arguments.
    fn contract(
        &mut self,
        name: &str,
        args: Vec<ArgumentRef>,
    ) -> Result<ContractHandle, Self::Error>;

    /// Returns a deferred reference to account #`index` of the execution
    /// environment.
    fn get_account(&mut self, index: usize) -> AccountRef;
}

pub trait Module {
    const ID: &'static str;

    fn build<B: ModuleBuilder>(
        &self,
        m: &mut B,
    ) -> Result<ModuleResult, B::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountRef {
    pub index: AccountIndex,
}

impl AccountRef {
    pub fn new(index: usize) -> Self {
        Self {
            index: AccountIndex(index),
        }
    }
}

/// Opaque token for a registered contract deployment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractHandle {
    id: String,
    contract_name: String,
}

impl ContractHandle {
    pub fn new(id: impl ToString, contract_name: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            contract_name: contract_name.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentRef {
    Account(AccountRef),
    /// Address of a contract deployed earlier in the same graph
    Contract(ContractHandle),
    Literal(String),
}

impl From<AccountRef> for ArgumentRef {
    fn from(value: AccountRef) -> Self {
        Self::Account(value)
    }
}

impl From<&str> for ArgumentRef {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for ArgumentRef {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<ContractHandle> for ArgumentRef {
    fn from(value: ContractHandle) -> Self {
        Self::Contract(value)
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account[{}]", self.index)
    }
}

impl fmt::Display for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Display for ArgumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(account) => write!(f, "{account}"),
            Self::Contract(handle) => write!(f, "address({handle})"),
            Self::Literal(value) => write!(f, "{value:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_display() {
        let account: ArgumentRef = AccountRef::new(0).into();
        let contract: ArgumentRef =
            ContractHandle::new("DeploymentModule#Token", "Token").into();
        let literal: ArgumentRef = "hello".into();

        assert_eq!(account.to_string(), "account[0]");
        assert_eq!(contract.to_string(), "address(DeploymentModule#Token)");
        assert_eq!(literal.to_string(), "\"hello\"");
    }

    #[test]
    fn handle_accessors() {
        let handle = ContractHandle::new("Mod#Token", "Token");

        assert_eq!(handle.id(), "Mod#Token");
        assert_eq!(handle.contract_name(), "Token");
    }
}
