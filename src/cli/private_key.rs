use std::fmt;
use std::str::FromStr;

use ethers::prelude::k256::SecretKey;
use ethers::signers::LocalWallet;

#[derive(Debug, Clone)]
pub struct PrivateKey {
    pub key: SecretKey,
}

impl PrivateKey {
    pub fn wallet(&self) -> LocalWallet {
        LocalWallet::from(self.key.clone())
    }
}

impl FromStr for PrivateKey {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches("0x");

        let bytes = hex::decode(s)?;

        let key = SecretKey::from_slice(&bytes)?;

        Ok(Self { key })
    }
}

/// `{:#}` renders the `0x` prefix forge expects
impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }

        write!(f, "{}", hex::encode(self.key.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use ethers::signers::Signer;
    use ethers::types::Address;

    use super::*;

    // First default anvil account
    const KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn parses_with_and_without_prefix() -> eyre::Result<()> {
        let prefixed: PrivateKey = KEY.parse()?;
        let bare: PrivateKey = KEY.trim_start_matches("0x").parse()?;

        assert_eq!(prefixed.key, bare.key);
        assert_eq!(format!("{prefixed:#}"), KEY);
        assert_eq!(prefixed.to_string(), KEY.trim_start_matches("0x"));

        Ok(())
    }

    #[test]
    fn derives_wallet_address() -> eyre::Result<()> {
        let key: PrivateKey = KEY.parse()?;

        let expected: Address =
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse()?;

        assert_eq!(key.wallet().address(), expected);

        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!("0xnot-a-key".parse::<PrivateKey>().is_err());
        assert!("abcd".parse::<PrivateKey>().is_err());
    }
}
