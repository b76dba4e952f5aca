use anchor_lang::prelude::*;

#[error_code]
pub enum ValidationError {
    // ========== Lifecycle ==========
    #[msg("A validation request with this hash already exists")]
    DuplicateRequest,

    #[msg("Validation request not found")]
    RequestNotFound,

    #[msg("Caller is not authorized for this operation")]
    NotAuthorized,

    #[msg("Validation request already has a response")]
    AlreadyResponded,

    // ========== Arguments ==========
    #[msg("Request hash must not be zero")]
    InvalidRequestHash,

    #[msg("Request URI exceeds 200 bytes")]
    RequestUriTooLong,

    #[msg("Response URI exceeds 200 bytes")]
    ResponseUriTooLong,

    #[msg("Tag exceeds 32 bytes")]
    TagTooLong,

    #[msg("Tag hash does not match SHA256(tag)")]
    TagHashMismatch,

    #[msg("Response code 0 is reserved for pending")]
    InvalidResponse,

    // ========== Indices & accounts ==========
    #[msg("Index page does not match the next append position")]
    InvalidIndexPage,

    #[msg("Supplied accounts do not match the index page")]
    IndexAccountMismatch,

    #[msg("Account address does not match the expected PDA")]
    InvalidAccountAddress,

    #[msg("Required account was not supplied")]
    MissingAccount,

    // ========== Identity registry ==========
    #[msg("Agent is not registered in the identity registry")]
    AgentNotFound,

    #[msg("Identity registry does not match this deployment")]
    InvalidIdentityRegistry,

    #[msg("Arithmetic overflow")]
    Overflow,
}
