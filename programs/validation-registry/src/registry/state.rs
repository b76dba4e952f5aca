use anchor_lang::prelude::*;

use super::identity;
use crate::error::ValidationError;

/// Global validation registry configuration
/// Seeds: ["validation_config"]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct ValidationConfig {
    /// Registry owner (may upgrade the program and change policy)
    pub authority: Pubkey,

    /// Identity registry program this instance validates agents against
    /// Set once at initialization, never changed
    pub identity_registry: Pubkey,

    /// When true, validation_request requires a registered agent account
    pub require_registered_agent: bool,

    /// Total validation requests created
    pub total_requests: u64,

    /// Total validation responses recorded
    pub total_responses: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl ValidationConfig {
    /// Account size: 32 + 32 + 1 + 8 + 8 + 1 = 82 bytes
    pub const SIZE: usize = 32 + 32 + 1 + 8 + 8 + 1;

    pub fn init(
        &mut self,
        authority: Pubkey,
        identity_registry: Pubkey,
        require_registered_agent: bool,
        bump: u8,
    ) {
        self.authority = authority;
        self.identity_registry = identity_registry;
        self.require_registered_agent = require_registered_agent;
        self.total_requests = 0;
        self.total_responses = 0;
        self.bump = bump;
    }

    /// Owner-only gate for administrative instructions
    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.authority, *caller, ValidationError::NotAuthorized);
        Ok(())
    }

    /// Registered-agent gate for validation_request. A no-op unless the
    /// policy is on, then `agent_account` must be the agent's identity record.
    pub fn check_agent(&self, agent_account: Option<&AccountInfo>, agent_id: &Pubkey) -> Result<()> {
        if !self.require_registered_agent {
            return Ok(());
        }
        let agent_account = agent_account.ok_or(ValidationError::AgentNotFound)?;
        require!(
            identity::agent_exists(agent_account, &self.identity_registry, agent_id),
            ValidationError::AgentNotFound
        );
        Ok(())
    }
}
