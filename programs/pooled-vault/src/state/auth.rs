use anchor_lang::prelude::*;

use crate::{constants::*, errors::VaultError};

/// Privileged vault operations that an authority can grant
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Deposit,
    TriggerPause,
    SetDepositLimits,
    SetAuth,
    SetBlocksPerYear,
    SetHarvestFeePercent,
    SetBurningFeePercent,
    SetHarvestFeeReceiver,
    SetBurningFeeReceiver,
    SetHarvestWindow,
    SetHarvestDelay,
    SetWithdrawalQueue,
    TrustStrategy,
    DistrustStrategy,
    ExecBatchBurn,
    Harvest,
    DepositIntoStrategy,
    WithdrawFromStrategy,
}

impl Capability {
    pub fn mask(self) -> u32 {
        1 << (self as u32)
    }
}

/// Answers "may `caller` invoke `capability` on `target`"
pub trait Authority {
    fn can_call(&self, caller: &Pubkey, target: &Pubkey, capability: Capability) -> bool;
}

/// Fail with `Unauthorized` unless the authority grants the capability
pub fn authorize(
    authority: &impl Authority,
    caller: &Pubkey,
    target: &Pubkey,
    capability: Capability,
) -> Result<()> {
    require!(
        authority.can_call(caller, target, capability),
        VaultError::Unauthorized
    );
    Ok(())
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, InitSpace)]
pub struct UserRoles {
    pub user: Pubkey,
    /// bit `n` set = user holds role `n`
    pub roles: u8,
}

/// Roles-and-capabilities authority
///
/// - `owner` may call anything and is the only one who can edit the tables
/// - capabilities in `public_capabilities` are open to every caller
/// - otherwise the caller needs a role whose bitmask includes the capability
///
/// The tables apply to every vault that delegates to this authority.
#[account]
#[derive(InitSpace)]
pub struct VaultAuth {
    pub owner: Pubkey,

    #[max_len(MAX_USER_ROLES)]
    pub user_roles: Vec<UserRoles>,

    /// capability bitmask per role
    pub role_capabilities: [u32; 8],

    pub public_capabilities: u32,

    pub bump: u8,
}

impl VaultAuth {
    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            user_roles: Vec::new(),
            role_capabilities: [0; 8],
            public_capabilities: 0,
            bump,
        }
    }

    pub fn roles_of(&self, user: &Pubkey) -> u8 {
        self.user_roles
            .iter()
            .find(|entry| entry.user == *user)
            .map(|entry| entry.roles)
            .unwrap_or(0)
    }

    pub fn set_user_role(&mut self, user: Pubkey, role: u8, enabled: bool) -> Result<()> {
        require!(role < MAX_ROLES, VaultError::InvalidRole);
        let bit = 1u8 << role;

        if let Some(entry) = self.user_roles.iter_mut().find(|entry| entry.user == user) {
            if enabled {
                entry.roles |= bit;
            } else {
                entry.roles &= !bit;
            }
        } else if enabled {
            require!(
                self.user_roles.len() < MAX_USER_ROLES,
                VaultError::RoleListFull
            );
            self.user_roles.push(UserRoles { user, roles: bit });
        }

        // drop entries without roles so the table does not fill up
        self.user_roles.retain(|entry| entry.roles != 0);
        Ok(())
    }

    pub fn set_role_capability(
        &mut self,
        role: u8,
        capability: Capability,
        enabled: bool,
    ) -> Result<()> {
        require!(role < MAX_ROLES, VaultError::InvalidRole);
        let caps = &mut self.role_capabilities[role as usize];
        if enabled {
            *caps |= capability.mask();
        } else {
            *caps &= !capability.mask();
        }
        Ok(())
    }

    pub fn set_public_capability(&mut self, capability: Capability, enabled: bool) {
        if enabled {
            self.public_capabilities |= capability.mask();
        } else {
            self.public_capabilities &= !capability.mask();
        }
    }
}

impl Authority for VaultAuth {
    fn can_call(&self, caller: &Pubkey, _target: &Pubkey, capability: Capability) -> bool {
        if *caller == self.owner || self.public_capabilities & capability.mask() != 0 {
            return true;
        }

        let roles = self.roles_of(caller);
        (0..MAX_ROLES)
            .filter(|role| roles & (1u8 << *role) != 0)
            .any(|role| self.role_capabilities[role as usize] & capability.mask() != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOV_ROLE: u8 = 0;
    const KEEPER_ROLE: u8 = 1;

    fn auth_with_roles() -> (VaultAuth, Pubkey, Pubkey) {
        let owner = Pubkey::new_unique();
        let keeper = Pubkey::new_unique();
        let gov = Pubkey::new_unique();

        let mut auth = VaultAuth::new(owner, 255);
        auth.set_user_role(gov, GOV_ROLE, true).unwrap();
        auth.set_user_role(keeper, KEEPER_ROLE, true).unwrap();
        auth.set_public_capability(Capability::Deposit, true);
        for cap in [Capability::Harvest, Capability::ExecBatchBurn] {
            auth.set_role_capability(KEEPER_ROLE, cap, true).unwrap();
            auth.set_role_capability(GOV_ROLE, cap, true).unwrap();
        }
        auth.set_role_capability(GOV_ROLE, Capability::TrustStrategy, true)
            .unwrap();

        (auth, gov, keeper)
    }

    #[test]
    fn test_owner_can_call_everything() {
        let (auth, _, _) = auth_with_roles();
        let target = Pubkey::new_unique();
        assert!(auth.can_call(&auth.owner, &target, Capability::SetAuth));
    }

    #[test]
    fn test_role_capabilities() {
        let (auth, gov, keeper) = auth_with_roles();
        let target = Pubkey::new_unique();

        assert!(auth.can_call(&keeper, &target, Capability::Harvest));
        assert!(!auth.can_call(&keeper, &target, Capability::TrustStrategy));
        assert!(auth.can_call(&gov, &target, Capability::TrustStrategy));

        let stranger = Pubkey::new_unique();
        assert!(auth.can_call(&stranger, &target, Capability::Deposit));
        assert!(!auth.can_call(&stranger, &target, Capability::Harvest));
    }

    #[test]
    fn test_revoking_last_role_removes_entry() {
        let (mut auth, _, keeper) = auth_with_roles();
        auth.set_user_role(keeper, KEEPER_ROLE, false).unwrap();

        assert_eq!(auth.roles_of(&keeper), 0);
        assert_eq!(auth.user_roles.len(), 1);
    }

    #[test]
    fn test_role_list_full() {
        let mut auth = VaultAuth::new(Pubkey::new_unique(), 255);
        for _ in 0..MAX_USER_ROLES {
            auth.set_user_role(Pubkey::new_unique(), 0, true).unwrap();
        }
        assert!(auth.set_user_role(Pubkey::new_unique(), 0, true).is_err());
    }

    #[test]
    fn test_invalid_role() {
        let mut auth = VaultAuth::new(Pubkey::new_unique(), 255);
        assert!(auth.set_user_role(Pubkey::new_unique(), MAX_ROLES, true).is_err());
        assert!(auth
            .set_role_capability(MAX_ROLES, Capability::Harvest, true)
            .is_err());
    }
}
