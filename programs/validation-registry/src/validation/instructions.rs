use anchor_lang::prelude::*;

use super::contexts::*;
use super::index::{page_view, IndexSlot};
use super::lifecycle::{
    open_request, record_response, OpenRequest, RecordResponse, RequestAccounts,
    ResponseAccounts,
};
use super::state::*;
use super::storage;
use super::summary::{self, Summary};
use crate::constants::SEED_VALIDATION_SUMMARY;
use crate::error::ValidationError;

pub fn validation_request(
    ctx: Context<RequestValidation>,
    agent_id: Pubkey,
    request_uri: String,
    request_hash: [u8; 32],
    agent_page: u32,
    validator_page: u32,
) -> Result<()> {
    let validator = ctx.accounts.validator.key();
    let now = Clock::get()?.unix_timestamp;
    let bumps = &ctx.bumps;

    let event = open_request(
        RequestAccounts {
            config: &mut ctx.accounts.config,
            request: &mut ctx.accounts.validation_request,
            content: &mut ctx.accounts.validation_content,
            agent_index: IndexSlot {
                head: &mut ctx.accounts.agent_index,
                page: &mut ctx.accounts.agent_index_page,
                head_bump: bumps.agent_index,
                page_bump: bumps.agent_index_page,
            },
            validator_index: IndexSlot {
                head: &mut ctx.accounts.validator_index,
                page: &mut ctx.accounts.validator_index_page,
                head_bump: bumps.validator_index,
                page_bump: bumps.validator_index_page,
            },
            request_bump: bumps.validation_request,
            content_bump: bumps.validation_content,
            identity_agent: ctx.accounts.identity_agent.as_deref(),
        },
        OpenRequest {
            validator,
            agent_id,
            request_uri,
            request_hash,
            agent_page,
            validator_page,
            now,
        },
    )?;

    emit!(event);

    msg!("Validation requested: agent {} validator {}", agent_id, validator);
    msg!("Total requests: {}", ctx.accounts.config.total_requests);

    Ok(())
}

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
    let now = Clock::get()?.unix_timestamp;
    let validator = ctx.accounts.validator.key();
    let summary_bump = ctx.bumps.validation_summary;

    let request_info = ctx.accounts.validation_request.to_account_info();
    let content_info = ctx.accounts.validation_content.to_account_info();
    let mut request = storage::load::<ValidationRecord>(&request_info)?;
    let mut content = storage::load::<ValidationContent>(&content_info)?;

    let event = record_response(
        ResponseAccounts {
            config: &mut ctx.accounts.config,
            request: request.as_mut(),
            content: content.as_mut(),
            summary: &mut ctx.accounts.validation_summary,
            summary_bump,
        },
        RecordResponse {
            validator,
            agent_id,
            request_hash,
            response,
            response_uri,
            response_hash,
            tag,
            tag_hash,
            now,
        },
    )?;

    if let (Some(request), Some(content)) = (&request, &content) {
        storage::store(&request_info, request)?;
        storage::store(&content_info, content)?;
    }

    emit!(event);

    msg!(
        "Validation responded: agent {} validator {} response {}",
        agent_id,
        validator,
        response
    );

    Ok(())
}

/// Zero-valued unless a response exists for (validator, agent_id)
pub fn get_validation_status(
    ctx: Context<GetValidationStatus>,
    validator: Pubkey,
    agent_id: Pubkey,
    _request_hash: [u8; 32],
) -> Result<ValidationStatus> {
    let record = storage::load::<ValidationRecord>(&ctx.accounts.validation_request)?;
    Ok(ValidationStatus::of(record.as_ref(), &validator, &agent_id))
}

pub fn request_exists(ctx: Context<RequestExists>, _request_hash: [u8; 32]) -> Result<bool> {
    let record = storage::load::<ValidationRecord>(&ctx.accounts.validation_request)?;
    Ok(record.is_some_and(|r| r.is_opened()))
}

pub fn get_request(ctx: Context<GetRequest>, _request_hash: [u8; 32]) -> Result<RequestView> {
    let record = storage::load::<ValidationRecord>(&ctx.accounts.validation_request)?;
    let content = storage::load::<ValidationContent>(&ctx.accounts.validation_content)?;
    Ok(RequestView::of(record.as_ref(), content.as_ref()))
}

/// Empty `validator_addresses` reads the (agent, tag) counters. Otherwise
/// tallies one page of the agent index; callers merge pages.
pub fn get_summary(
    ctx: Context<GetSummary>,
    agent_id: Pubkey,
    tag: String,
    validator_addresses: Vec<Pubkey>,
    _page: u32,
) -> Result<Summary> {
    let tag_hash = summary::tag_hash(&tag);

    if validator_addresses.is_empty() {
        let info = ctx
            .accounts
            .validation_summary
            .as_ref()
            .ok_or(ValidationError::MissingAccount)?;
        storage::require_pda(
            info,
            &[SEED_VALIDATION_SUMMARY, agent_id.as_ref(), tag_hash.as_ref()],
        )?;
        let counters = storage::load::<ValidationSummary>(info)?;
        return Ok(counters.map(|c| c.summary()).unwrap_or_default());
    }

    let page_info = ctx
        .accounts
        .agent_index_page
        .as_ref()
        .ok_or(ValidationError::MissingAccount)?;
    let index_page = storage::load::<ValidationIndexPage>(page_info)?;
    let records = ctx
        .remaining_accounts
        .iter()
        .map(|info| storage::load::<ValidationRecord>(info))
        .collect::<Result<Vec<_>>>()?;

    summary::tally_page(
        index_page.as_ref(),
        &records,
        &agent_id,
        &tag_hash,
        &validator_addresses,
    )
}

pub fn get_agent_validations(
    ctx: Context<GetAgentValidations>,
    _agent_id: Pubkey,
    page: u32,
) -> Result<IndexPageView> {
    let head = storage::load::<ValidationIndex>(&ctx.accounts.index)?;
    let index_page = storage::load::<ValidationIndexPage>(&ctx.accounts.index_page)?;
    Ok(page_view(head.as_ref(), index_page.as_ref(), page))
}

pub fn get_validator_requests(
    ctx: Context<GetValidatorRequests>,
    _validator: Pubkey,
    page: u32,
) -> Result<IndexPageView> {
    let head = storage::load::<ValidationIndex>(&ctx.accounts.index)?;
    let index_page = storage::load::<ValidationIndexPage>(&ctx.accounts.index_page)?;
    Ok(page_view(head.as_ref(), index_page.as_ref(), page))
}
