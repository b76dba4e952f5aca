use anchor_lang::prelude::*;

/// Event emitted when a validator opens a request (ERC-8004: ValidationRecord)
/// Timestamp available from transaction blockTime
#[event]
pub struct ValidationRequest {
    pub validator: Pubkey,
    pub agent_id: Pubkey,
    pub request_uri: String,
    pub request_hash: [u8; 32],
}

/// Event emitted when the validator finalizes its request (ERC-8004 ValidationResponse)
#[event]
pub struct ValidationResponse {
    pub validator: Pubkey,
    pub agent_id: Pubkey,
    pub request_hash: [u8; 32],
    pub response: u8,
    pub response_uri: String,
    pub response_hash: [u8; 32],
    pub tag: String,
}
