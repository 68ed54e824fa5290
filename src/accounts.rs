use ethers::providers::Middleware;
use ethers::types::Address;
use eyre::ContextCompat;
use tracing::{info, instrument, warn};

use crate::module::AccountRef;

/// Signing accounts available to a run, resolved once and then frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accounts {
    addresses: Vec<Address>,
}

impl Accounts {
    /// The deployer comes first, followed by any accounts the node manages.
    pub fn new(
        deployer: Address,
        node_accounts: impl IntoIterator<Item = Address>,
    ) -> Self {
        let mut addresses = vec![deployer];

        for address in node_accounts {
            if !addresses.contains(&address) {
                addresses.push(address);
            }
        }

        Self { addresses }
    }

    /// Hosted endpoints usually refuse `eth_accounts`, in which case only the
    /// deployer is available.
    #[instrument(skip(provider))]
    pub async fn resolve<M: Middleware>(
        provider: &M,
        deployer: Address,
    ) -> Self {
        let node_accounts = match provider.get_accounts().await {
            Ok(node_accounts) => node_accounts,
            Err(err) => {
                warn!(
                    "Node accounts unavailable, using the deployer only: {err}"
                );
                vec![]
            }
        };

        let accounts = Self::new(deployer, node_accounts);

        info!(
            num_accounts = accounts.addresses.len(),
            "Resolved accounts"
        );

        accounts
    }

    pub fn get(&self, account: AccountRef) -> eyre::Result<Address> {
        self.addresses.get(account.index.0).copied().with_context(|| {
            format!(
                "Account index {} out of range ({} accounts configured)",
                account.index,
                self.addresses.len()
            )
        })
    }
}
