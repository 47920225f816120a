use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Set of up to 256 roles, bit `i` set means role `i` is a member.
///
/// Used both for the roles bound to a function and the roles held by an
/// address, so an access check is a single AND of two words. The fixed width
/// is the scalability boundary of the registry: more than 256 roles would
/// need an array of words and an AND across all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleBitmask(U256);

impl RoleBitmask {
    pub const EMPTY: Self = Self(U256::ZERO);

    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> U256 {
        self.0
    }

    pub fn single(role_id: u8) -> Self {
        Self::EMPTY.with(role_id)
    }

    pub fn with(mut self, role_id: u8) -> Self {
        self.0.set_bit(role_id as usize, true);
        self
    }

    pub fn without(mut self, role_id: u8) -> Self {
        self.0.set_bit(role_id as usize, false);
        self
    }

    pub fn contains(&self, role_id: u8) -> bool {
        self.0.bit(role_id as usize)
    }

    pub fn intersects(&self, other: &Self) -> bool {
        !(self.0 & other.0).is_zero()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_zero()
    }

    pub fn count(&self) -> usize {
        self.0.count_ones()
    }

    /// Role ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |id| self.contains(*id))
    }
}

impl FromIterator<u8> for RoleBitmask {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |mask, id| mask.with(id))
    }
}

impl fmt::Display for RoleBitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
