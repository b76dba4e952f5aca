use anchor_lang::prelude::*;

use super::state::{
    ValidationContent, ValidationIndex, ValidationIndexPage, ValidationRecord, ValidationSummary,
};
use crate::constants::*;
use crate::registry::state::ValidationConfig;

/// Open a validation request (signed by the validator)
#[derive(Accounts)]
#[instruction(
    agent_id: Pubkey,
    _request_uri: String,
    request_hash: [u8; 32],
    agent_page: u32,
    validator_page: u32
)]
pub struct RequestValidation<'info> {
    /// ValidationConfig for tracking global counters
    #[account(
        mut,
        seeds = [SEED_VALIDATION_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ValidationConfig>,

    /// Validator opening the request (only it may respond)
    pub validator: Signer<'info>,

    /// Payer for the new accounts (can be different from validator)
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Validation record, keyed by request hash alone.
    /// Already opened records are rejected with DuplicateRequest.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ValidationRecord::SIZE,
        seeds = [SEED_VALIDATION, request_hash.as_ref()],
        bump
    )]
    pub validation_request: Account<'info, ValidationRecord>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ValidationContent::SIZE,
        seeds = [SEED_VALIDATION_CONTENT, request_hash.as_ref()],
        bump
    )]
    pub validation_content: Account<'info, ValidationContent>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ValidationIndex::SIZE,
        seeds = [SEED_AGENT_INDEX, agent_id.as_ref()],
        bump
    )]
    pub agent_index: Account<'info, ValidationIndex>,

    /// Page receiving the hash; must be agent_index.len / INDEX_PAGE_CAPACITY
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ValidationIndexPage::SIZE,
        seeds = [SEED_AGENT_INDEX_PAGE, agent_id.as_ref(), agent_page.to_le_bytes().as_ref()],
        bump
    )]
    pub agent_index_page: Account<'info, ValidationIndexPage>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ValidationIndex::SIZE,
        seeds = [SEED_VALIDATOR_INDEX, validator.key().as_ref()],
        bump
    )]
    pub validator_index: Account<'info, ValidationIndex>,

    /// Page receiving the hash; must be validator_index.len / INDEX_PAGE_CAPACITY
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ValidationIndexPage::SIZE,
        seeds = [
            SEED_VALIDATOR_INDEX_PAGE,
            validator.key().as_ref(),
            validator_page.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub validator_index_page: Account<'info, ValidationIndexPage>,

    /// Identity registry agent account, required when the config demands
    /// registered agents
    /// CHECK: Address, owner and discriminator verified in instruction
    pub identity_agent: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

/// Record the response to a request (signed by the request's validator)
#[derive(Accounts)]
#[instruction(
    agent_id: Pubkey,
    request_hash: [u8; 32],
    _response: u8,
    _response_uri: String,
    _response_hash: [u8; 32],
    _tag: String,
    tag_hash: [u8; 32]
)]
pub struct RespondToValidation<'info> {
    #[account(
        mut,
        seeds = [SEED_VALIDATION_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ValidationConfig>,

    /// Validator (signer, pays for a first summary under this tag)
    #[account(mut)]
    pub validator: Signer<'info>,

    /// CHECK: PDA verified by seeds; loaded in instruction so an absent
    /// record surfaces as RequestNotFound
    #[account(
        mut,
        seeds = [SEED_VALIDATION, request_hash.as_ref()],
        bump
    )]
    pub validation_request: UncheckedAccount<'info>,

    /// CHECK: PDA verified by seeds; loaded in instruction
    #[account(
        mut,
        seeds = [SEED_VALIDATION_CONTENT, request_hash.as_ref()],
        bump
    )]
    pub validation_content: UncheckedAccount<'info>,

    /// Running counters for (agent_id, tag)
    #[account(
        init_if_needed,
        payer = validator,
        space = 8 + ValidationSummary::SIZE,
        seeds = [SEED_VALIDATION_SUMMARY, agent_id.as_ref(), tag_hash.as_ref()],
        bump
    )]
    pub validation_summary: Account<'info, ValidationSummary>,

    pub system_program: Program<'info, System>,
}

/// Read the response status of a request
#[derive(Accounts)]
#[instruction(_validator: Pubkey, _agent_id: Pubkey, request_hash: [u8; 32])]
pub struct GetValidationStatus<'info> {
    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(seeds = [SEED_VALIDATION, request_hash.as_ref()], bump)]
    pub validation_request: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(request_hash: [u8; 32])]
pub struct RequestExists<'info> {
    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(seeds = [SEED_VALIDATION, request_hash.as_ref()], bump)]
    pub validation_request: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(request_hash: [u8; 32])]
pub struct GetRequest<'info> {
    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(seeds = [SEED_VALIDATION, request_hash.as_ref()], bump)]
    pub validation_request: UncheckedAccount<'info>,

    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(seeds = [SEED_VALIDATION_CONTENT, request_hash.as_ref()], bump)]
    pub validation_content: UncheckedAccount<'info>,
}

/// Aggregate responses for an agent under a tag.
///
/// Unfiltered queries pass `validation_summary`. Validator-filtered queries
/// pass one page of the agent index plus, as remaining accounts, the
/// validation records of that page in index order.
#[derive(Accounts)]
#[instruction(agent_id: Pubkey, _tag: String, _validator_addresses: Vec<Pubkey>, page: u32)]
pub struct GetSummary<'info> {
    /// CHECK: Address verified in instruction against SHA256(tag)
    pub validation_summary: Option<UncheckedAccount<'info>>,

    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(
        seeds = [SEED_AGENT_INDEX_PAGE, agent_id.as_ref(), page.to_le_bytes().as_ref()],
        bump
    )]
    pub agent_index_page: Option<UncheckedAccount<'info>>,
}

#[derive(Accounts)]
#[instruction(agent_id: Pubkey, page: u32)]
pub struct GetAgentValidations<'info> {
    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(seeds = [SEED_AGENT_INDEX, agent_id.as_ref()], bump)]
    pub index: UncheckedAccount<'info>,

    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(
        seeds = [SEED_AGENT_INDEX_PAGE, agent_id.as_ref(), page.to_le_bytes().as_ref()],
        bump
    )]
    pub index_page: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(validator: Pubkey, page: u32)]
pub struct GetValidatorRequests<'info> {
    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(seeds = [SEED_VALIDATOR_INDEX, validator.as_ref()], bump)]
    pub index: UncheckedAccount<'info>,

    /// CHECK: PDA verified by seeds, may be uninitialized
    #[account(
        seeds = [SEED_VALIDATOR_INDEX_PAGE, validator.as_ref(), page.to_le_bytes().as_ref()],
        bump
    )]
    pub index_page: UncheckedAccount<'info>,
}
