use alloy::primitives::Address;

/// Who submits an action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SenderType {
    /// Whoever owns the registry at execution time.
    RegistryOwner,
    /// A specific account, e.g. a holder moving or burning its own token.
    Account(Address),
}

impl SenderType {
    pub fn resolve(&self, owner: Address) -> Address {
        match self {
            SenderType::RegistryOwner => owner,
            SenderType::Account(account) => *account,
        }
    }
}
