use anchor_lang::prelude::*;

/// Emitted once when the registry config is created
#[event]
pub struct RegistryInitialized {
    pub authority: Pubkey,
    pub identity_registry: Pubkey,
    pub require_registered_agent: bool,
}

/// Emitted when the owner changes the agent registration policy
#[event]
pub struct AgentCheckPolicyUpdated {
    pub authority: Pubkey,
    pub require_registered_agent: bool,
}

/// Emitted after the program code is replaced from a buffer
#[event]
pub struct RegistryUpgraded {
    pub authority: Pubkey,
    pub buffer: Pubkey,
}
