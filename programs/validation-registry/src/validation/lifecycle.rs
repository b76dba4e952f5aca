//! Request/response state machine.
//!
//! Per request hash: `NonExistent -> Requested -> Responded` (terminal).
//! Both transitions validate every precondition before the first write, so a
//! rejected call leaves all records untouched.

use anchor_lang::prelude::*;

use super::events::{ValidationRequest, ValidationResponse};
use super::index::IndexSlot;
use super::state::{ValidationContent, ValidationRecord, ValidationSummary};
use super::summary::tag_hash;
use crate::constants::{MAX_TAG_LENGTH, MAX_URI_LENGTH, RESPONSE_PENDING};
use crate::error::ValidationError;
use crate::registry::state::ValidationConfig;

/// Records written by validation_request
pub struct RequestAccounts<'a, 'info> {
    pub config: &'a mut ValidationConfig,
    pub request: &'a mut ValidationRecord,
    pub content: &'a mut ValidationContent,
    pub agent_index: IndexSlot<'a>,
    pub validator_index: IndexSlot<'a>,
    pub request_bump: u8,
    pub content_bump: u8,
    /// Identity registry agent account, read only when the config requires
    /// registered agents
    pub identity_agent: Option<&'a AccountInfo<'info>>,
}

pub struct OpenRequest {
    pub validator: Pubkey,
    pub agent_id: Pubkey,
    pub request_uri: String,
    pub request_hash: [u8; 32],
    pub agent_page: u32,
    pub validator_page: u32,
    pub now: i64,
}

/// Records written by validation_response
pub struct ResponseAccounts<'a> {
    pub config: &'a mut ValidationConfig,
    /// None when the request PDA holds no record
    pub request: Option<&'a mut ValidationRecord>,
    pub content: Option<&'a mut ValidationContent>,
    pub summary: &'a mut ValidationSummary,
    pub summary_bump: u8,
}

pub struct RecordResponse {
    pub validator: Pubkey,
    pub agent_id: Pubkey,
    pub request_hash: [u8; 32],
    pub response: u8,
    pub response_uri: String,
    pub response_hash: [u8; 32],
    pub tag: String,
    pub tag_hash: [u8; 32],
    pub now: i64,
}

/// NonExistent -> Requested
pub fn open_request(accounts: RequestAccounts, args: OpenRequest) -> Result<ValidationRequest> {
    let RequestAccounts {
        config,
        request,
        content,
        mut agent_index,
        mut validator_index,
        request_bump,
        content_bump,
        identity_agent,
    } = accounts;

    require!(!request.is_opened(), ValidationError::DuplicateRequest);
    config.check_agent(identity_agent, &args.agent_id)?;
    require!(
        args.request_hash != [0u8; 32],
        ValidationError::InvalidRequestHash
    );
    require!(
        args.request_uri.len() <= MAX_URI_LENGTH,
        ValidationError::RequestUriTooLong
    );
    agent_index.check_append(&args.agent_id, args.agent_page)?;
    validator_index.check_append(&args.validator, args.validator_page)?;

    let total_requests = config
        .total_requests
        .checked_add(1)
        .ok_or(ValidationError::Overflow)?;

    request.open(
        args.validator,
        args.agent_id,
        args.request_hash,
        args.now,
        request_bump,
    );

    content.request_hash = args.request_hash;
    content.request_uri = args.request_uri.clone();
    content.response_uri = String::new();
    content.tag = String::new();
    content.bump = content_bump;

    agent_index.append(args.agent_id, args.agent_page, args.request_hash);
    validator_index.append(args.validator, args.validator_page, args.request_hash);

    config.total_requests = total_requests;

    Ok(ValidationRequest {
        validator: args.validator,
        agent_id: args.agent_id,
        request_uri: args.request_uri,
        request_hash: args.request_hash,
    })
}

/// Requested -> Responded
pub fn record_response(
    accounts: ResponseAccounts,
    args: RecordResponse,
) -> Result<ValidationResponse> {
    let ResponseAccounts {
        config,
        request,
        content,
        summary,
        summary_bump,
    } = accounts;

    let request = match request {
        Some(r) if r.is_opened() && r.request_hash == args.request_hash => r,
        _ => return Err(ValidationError::RequestNotFound.into()),
    };
    let content = content.ok_or(ValidationError::RequestNotFound)?;

    require_keys_eq!(request.validator, args.validator, ValidationError::NotAuthorized);
    require_keys_eq!(request.agent_id, args.agent_id, ValidationError::NotAuthorized);
    require!(!request.has_response, ValidationError::AlreadyResponded);

    require!(
        args.response != RESPONSE_PENDING,
        ValidationError::InvalidResponse
    );
    require!(
        args.response_uri.len() <= MAX_URI_LENGTH,
        ValidationError::ResponseUriTooLong
    );
    require!(args.tag.len() <= MAX_TAG_LENGTH, ValidationError::TagTooLong);
    require!(
        tag_hash(&args.tag) == args.tag_hash,
        ValidationError::TagHashMismatch
    );

    let counts = summary.summary().record(args.response)?;
    let total_responses = config
        .total_responses
        .checked_add(1)
        .ok_or(ValidationError::Overflow)?;

    request.finalize(args.response, args.response_hash, args.tag_hash, args.now);
    content.response_uri = args.response_uri.clone();
    content.tag = args.tag.clone();
    summary.store(args.agent_id, args.tag_hash, counts, summary_bump);
    config.total_responses = total_responses;

    Ok(ValidationResponse {
        validator: args.validator,
        agent_id: args.agent_id,
        request_hash: args.request_hash,
        response: args.response,
        response_uri: args.response_uri,
        response_hash: args.response_hash,
        tag: args.tag,
    })
}
