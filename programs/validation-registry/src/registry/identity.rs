//! Link to the identity registry.
//!
//! An agent exists when its `AgentAccount` PDA (seeds ["agent", agent_id])
//! under the configured identity registry program is initialized.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::constants::SEED_IDENTITY_AGENT;

/// Anchor discriminator of the identity registry's `AgentAccount`
pub fn agent_account_discriminator() -> [u8; 8] {
    let digest = hash(b"account:AgentAccount").to_bytes();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}

/// True if `agent_account` is the initialized identity record for `agent_id`
pub fn agent_exists(
    agent_account: &AccountInfo,
    identity_registry: &Pubkey,
    agent_id: &Pubkey,
) -> bool {
    let (expected, _) = Pubkey::find_program_address(
        &[SEED_IDENTITY_AGENT, agent_id.as_ref()],
        identity_registry,
    );
    if *agent_account.key != expected || agent_account.owner != identity_registry {
        return false;
    }
    match agent_account.try_borrow_data() {
        Ok(data) => data.len() >= 8 && data[..8] == agent_account_discriminator(),
        Err(_) => false,
    }
}
