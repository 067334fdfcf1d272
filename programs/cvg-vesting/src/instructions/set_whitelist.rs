use anchor_lang::prelude::*;

use crate::constants::VESTING_CONFIG_SEED;
use crate::error::VestingError;
use crate::state::{VestingConfig, VestingState};

/// Role bound to a single whitelisted address.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhitelistRole {
    Team,
    Dao,
}

pub fn set_whitelist(ctx: Context<SetWhitelist>, role: WhitelistRole, address: Pubkey) -> Result<()> {
    require!(address != Pubkey::default(), VestingError::InvalidPubkey);

    let config = &mut ctx.accounts.vesting_config;
    config.require_admin(&ctx.accounts.admin.key())?;
    // Virtual positions are bound to the addresses at `set_vesting`.
    require!(
        config.state == VestingState::NotSet,
        VestingError::VestingAlreadySet
    );

    let old = match role {
        WhitelistRole::Team => {
            require_keys_neq!(address, config.dao, VestingError::InvalidConfig);
            std::mem::replace(&mut config.team, address)
        }
        WhitelistRole::Dao => {
            require_keys_neq!(address, config.team, VestingError::InvalidConfig);
            std::mem::replace(&mut config.dao, address)
        }
    };

    emit!(WhitelistSet {
        role,
        old_address: old,
        new_address: address,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetWhitelist<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    pub admin: Signer<'info>,
}

#[event]
pub struct WhitelistSet {
    pub role: WhitelistRole,
    pub old_address: Pubkey,
    pub new_address: Pubkey,
}
