use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable;
use anchor_lang::solana_program::program::invoke_signed;

use super::contexts::*;
use super::events::*;
use crate::constants::SEED_VALIDATION_CONFIG;
use crate::error::ValidationError;
use crate::IDENTITY_REGISTRY_ID;

/// Initialize the Validation Registry
pub fn initialize(
    ctx: Context<Initialize>,
    identity_registry: Pubkey,
    require_registered_agent: bool,
) -> Result<()> {
    require_keys_eq!(
        identity_registry,
        IDENTITY_REGISTRY_ID,
        ValidationError::InvalidIdentityRegistry
    );

    let authority = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.init(
        authority,
        identity_registry,
        require_registered_agent,
        ctx.bumps.config,
    );

    emit!(RegistryInitialized {
        authority,
        identity_registry,
        require_registered_agent,
    });

    msg!("Validation Registry initialized");
    msg!("Identity Registry: {}", identity_registry);
    msg!("Authority: {}", authority);

    Ok(())
}

/// Change whether validation_request requires a registered agent
pub fn set_agent_check_policy(
    ctx: Context<SetAgentCheckPolicy>,
    require_registered_agent: bool,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.require_owner(&authority)?;
    config.require_registered_agent = require_registered_agent;

    emit!(AgentCheckPolicyUpdated {
        authority,
        require_registered_agent,
    });

    msg!("Agent check policy: require_registered_agent = {}", require_registered_agent);

    Ok(())
}

/// Upgrade the program from `buffer`, signing as the config PDA
pub fn upgrade(ctx: Context<Upgrade>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let config = &ctx.accounts.config;
    config.require_owner(&authority)?;

    let ix = bpf_loader_upgradeable::upgrade(
        &crate::ID,
        &ctx.accounts.buffer.key(),
        &config.key(),
        &ctx.accounts.spill.key(),
    );
    let signer_seeds: &[&[&[u8]]] = &[&[SEED_VALIDATION_CONFIG, &[config.bump]]];

    invoke_signed(
        &ix,
        &[
            ctx.accounts.program_data.to_account_info(),
            ctx.accounts.program.to_account_info(),
            ctx.accounts.buffer.to_account_info(),
            ctx.accounts.spill.to_account_info(),
            ctx.accounts.rent.to_account_info(),
            ctx.accounts.clock.to_account_info(),
            config.to_account_info(),
            ctx.accounts.bpf_loader_upgradeable_program.to_account_info(),
        ],
        signer_seeds,
    )?;

    emit!(RegistryUpgraded {
        authority,
        buffer: ctx.accounts.buffer.key(),
    });

    msg!("Validation Registry upgraded from buffer {}", ctx.accounts.buffer.key());

    Ok(())
}

/// Return the identity registry this instance validates agents against
pub fn get_identity_registry(ctx: Context<GetIdentityRegistry>) -> Result<Pubkey> {
    Ok(ctx.accounts.config.identity_registry)
}
