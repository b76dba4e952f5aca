use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable;

use super::state::ValidationConfig;
use crate::constants::SEED_VALIDATION_CONFIG;
use crate::error::ValidationError;

/// Create the registry config
/// Only the program's upgrade authority can initialize (prevents front-running)
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + ValidationConfig::SIZE,
        seeds = [SEED_VALIDATION_CONFIG],
        bump
    )]
    pub config: Account<'info, ValidationConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// Program data account for upgrade authority verification
    #[account(
        seeds = [crate::ID.as_ref()],
        bump,
        seeds::program = bpf_loader_upgradeable::ID,
        constraint = program_data.upgrade_authority_address == Some(authority.key())
            @ ValidationError::NotAuthorized
    )]
    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}

/// Toggle the registered-agent requirement (owner only)
#[derive(Accounts)]
pub struct SetAgentCheckPolicy<'info> {
    #[account(
        mut,
        seeds = [SEED_VALIDATION_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ValidationConfig>,

    pub authority: Signer<'info>,
}

/// Replace the program code from a buffer (owner only)
///
/// The config PDA must hold the program's upgrade authority. Record PDAs are
/// untouched by an upgrade, so storage carries over to the new code.
#[derive(Accounts)]
pub struct Upgrade<'info> {
    #[account(
        seeds = [SEED_VALIDATION_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ValidationConfig>,

    pub authority: Signer<'info>,

    /// CHECK: This program, verified by address
    #[account(mut, address = crate::ID)]
    pub program: UncheckedAccount<'info>,

    /// CHECK: Program data PDA of this program, verified by seeds
    #[account(
        mut,
        seeds = [crate::ID.as_ref()],
        bump,
        seeds::program = bpf_loader_upgradeable::ID
    )]
    pub program_data: UncheckedAccount<'info>,

    /// CHECK: Buffer holding the new code, validated by the loader
    #[account(mut)]
    pub buffer: UncheckedAccount<'info>,

    /// CHECK: Receives the buffer's lamports
    #[account(mut)]
    pub spill: UncheckedAccount<'info>,

    pub rent: Sysvar<'info, Rent>,

    pub clock: Sysvar<'info, Clock>,

    /// CHECK: Verified by address constraint
    #[account(address = bpf_loader_upgradeable::ID)]
    pub bpf_loader_upgradeable_program: UncheckedAccount<'info>,
}

/// Read the configured identity registry
#[derive(Accounts)]
pub struct GetIdentityRegistry<'info> {
    #[account(
        seeds = [SEED_VALIDATION_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ValidationConfig>,
}
