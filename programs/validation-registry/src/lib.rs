use anchor_lang::prelude::*;

declare_id!("GPn4dkxufboUy6QUSKyAQgfhsSgbNkWDunsFRazt6hor");

pub mod constants;
pub mod error;
pub mod registry;
pub mod validation;

// Re-export all contexts at crate root for Anchor macro
pub use registry::contexts::*;
pub use registry::events::*;
pub use registry::state::*;

pub use validation::contexts::*;
pub use validation::events::*;
pub use validation::state::*;
pub use validation::summary::Summary;

pub use error::ValidationError;

// SECURITY: Identity Registry Program ID based on deployment environment
// Only an instance bound to the legitimate Identity Registry can be initialized
// Configured via Cargo features matching Anchor.toml deployment targets

#[cfg(feature = "devnet")]
pub const IDENTITY_REGISTRY_ID: Pubkey =
    anchor_lang::solana_program::pubkey!("CAHKQ2amAyKGzPhSE1mJx5qgxn1nJoNToDaiU6Kmacss");

// Default to localnet for local development and testing
#[cfg(not(feature = "devnet"))]
pub const IDENTITY_REGISTRY_ID: Pubkey =
    anchor_lang::solana_program::pubkey!("3ah8M3viTAGHRkAqGshRF4b48Ey1ZwrMViQ6bkUNamTi");

#[program]
pub mod validation_registry {
    use super::*;

    // ============================================================================
    // Registry Instructions
    // ============================================================================

    /// Create the config PDA and bind the identity registry (upgrade authority only)
    pub fn initialize(
        ctx: Context<Initialize>,
        identity_registry: Pubkey,
        require_registered_agent: bool,
    ) -> Result<()> {
        registry::instructions::initialize(ctx, identity_registry, require_registered_agent)
    }

    /// Toggle the registered-agent requirement (owner only)
    pub fn set_agent_check_policy(
        ctx: Context<SetAgentCheckPolicy>,
        require_registered_agent: bool,
    ) -> Result<()> {
        registry::instructions::set_agent_check_policy(ctx, require_registered_agent)
    }

    /// Replace program code from a buffer, storage preserved (owner only)
    pub fn upgrade(ctx: Context<Upgrade>) -> Result<()> {
        registry::instructions::upgrade(ctx)
    }

    /// Get the identity registry this instance validates agents against
    pub fn get_identity_registry(ctx: Context<GetIdentityRegistry>) -> Result<Pubkey> {
        registry::instructions::get_identity_registry(ctx)
    }

    // ============================================================================
    // Validation Instructions
    // ============================================================================

    /// Open a validation request for an agent (signed by the validator)
    pub fn validation_request(
        ctx: Context<RequestValidation>,
        agent_id: Pubkey,
        request_uri: String,
        request_hash: [u8; 32],
        agent_page: u32,
        validator_page: u32,
    ) -> Result<()> {
        validation::instructions::validation_request(
            ctx,
            agent_id,
            request_uri,
            request_hash,
            agent_page,
            validator_page,
        )
    }

    /// Record the validator's response (once per request)
    #[allow(clippy::too_many_arguments)]
    pub fn validation_response(
        ctx: Context<RespondToValidation>,
        agent_id: Pubkey,
        request_hash: [u8; 32],
        response: u8,
        response_uri: String,
        response_hash: [u8; 32],
        tag: String,
        tag_hash: [u8; 32],
    ) -> Result<()> {
        validation::instructions::validation_response(
            ctx,
            agent_id,
            request_hash,
            response,
            response_uri,
            response_hash,
            tag,
            tag_hash,
        )
    }

    /// Get response status (zero-valued unless responded by validator for agent_id)
    pub fn get_validation_status(
        ctx: Context<GetValidationStatus>,
        validator: Pubkey,
        agent_id: Pubkey,
        request_hash: [u8; 32],
    ) -> Result<ValidationStatus> {
        validation::instructions::get_validation_status(ctx, validator, agent_id, request_hash)
    }

    /// Check whether a request exists
    pub fn request_exists(ctx: Context<RequestExists>, request_hash: [u8; 32]) -> Result<bool> {
        validation::instructions::request_exists(ctx, request_hash)
    }

    /// Get request details (all-default when absent)
    pub fn get_request(ctx: Context<GetRequest>, request_hash: [u8; 32]) -> Result<RequestView> {
        validation::instructions::get_request(ctx, request_hash)
    }

    /// Aggregate responses for an agent under a tag, optionally per validator
    pub fn get_summary(
        ctx: Context<GetSummary>,
        agent_id: Pubkey,
        tag: String,
        validator_addresses: Vec<Pubkey>,
        page: u32,
    ) -> Result<Summary> {
        validation::instructions::get_summary(ctx, agent_id, tag, validator_addresses, page)
    }

    /// Page of request hashes opened for an agent
    pub fn get_agent_validations(
        ctx: Context<GetAgentValidations>,
        agent_id: Pubkey,
        page: u32,
    ) -> Result<IndexPageView> {
        validation::instructions::get_agent_validations(ctx, agent_id, page)
    }

    /// Page of request hashes opened by a validator
    pub fn get_validator_requests(
        ctx: Context<GetValidatorRequests>,
        validator: Pubkey,
        page: u32,
    ) -> Result<IndexPageView> {
        validation::instructions::get_validator_requests(ctx, validator, page)
    }
}
