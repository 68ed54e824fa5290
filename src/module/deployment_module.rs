use super::{Module, ModuleBuilder, ModuleResult};

pub const SUPPLY_MATE_NFT: &str = "SupplyMateNFT";

#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentModule;

impl Module for DeploymentModule {
    const ID: &'static str = "DeploymentModule";

    fn build<B: ModuleBuilder>(
        &self,
        m: &mut B,
    ) -> Result<ModuleResult, B::Error> {
        // The first account becomes the initial owner
        let initial_owner = m.get_account(0);

        let supply_mate_nft =
            m.contract(SUPPLY_MATE_NFT, vec![initial_owner.into()])?;

        Ok(ModuleResult::from([(
            SUPPLY_MATE_NFT.to_string(),
            supply_mate_nft,
        )]))
    }
}
