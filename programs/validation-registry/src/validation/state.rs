use anchor_lang::prelude::*;

use crate::constants::INDEX_PAGE_CAPACITY;

/// Fixed-size validation record (hot path for status lookups)
/// Seeds: [b"validation", request_hash]
///
/// Holds the request and, once written, its response. The response is keyed
/// identically to the request it finalizes, so a single PDA covers both.
/// URIs and the tag string live in `ValidationContent`.
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct ValidationRecord {
    /// Validator that opened the request (only it may respond)
    pub validator: Pubkey,

    /// Agent being validated (identity registry asset)
    pub agent_id: Pubkey,

    /// Content hash of the off-chain request payload (primary key)
    pub request_hash: [u8; 32],

    /// Request creation time (unix seconds)
    pub timestamp: i64,

    /// Response code: 0 until responded, then 1 = valid, 2 = invalid, ...
    pub response: u8,

    /// Hash of the off-chain response payload
    pub response_hash: [u8; 32],

    /// SHA256(tag), used by validator-filtered aggregation
    pub tag_hash: [u8; 32],

    /// Time of the response write (0 while pending)
    pub last_update: i64,

    /// False until a response is recorded, then true forever
    pub has_response: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl ValidationRecord {
    /// 32 + 32 + 32 + 8 + 1 + 32 + 32 + 8 + 1 + 1 = 179 bytes
    pub const SIZE: usize = 32 + 32 + 32 + 8 + 1 + 32 + 32 + 8 + 1 + 1;

    /// A signer can never be the default pubkey, so an unset validator
    /// marks a freshly allocated (or never created) record.
    pub fn is_opened(&self) -> bool {
        self.validator != Pubkey::default()
    }

    /// Check if response is pending
    pub fn is_pending(&self) -> bool {
        self.is_opened() && !self.has_response
    }

    pub(crate) fn open(
        &mut self,
        validator: Pubkey,
        agent_id: Pubkey,
        request_hash: [u8; 32],
        now: i64,
        bump: u8,
    ) {
        *self = Self {
            validator,
            agent_id,
            request_hash,
            timestamp: now,
            bump,
            ..Self::default()
        };
    }

    pub(crate) fn finalize(
        &mut self,
        response: u8,
        response_hash: [u8; 32],
        tag_hash: [u8; 32],
        now: i64,
    ) {
        self.response = response;
        self.response_hash = response_hash;
        self.tag_hash = tag_hash;
        self.last_update = now;
        self.has_response = true;
    }
}

/// Variable-length fields kept apart from the fixed record
/// Seeds: [b"validation_content", request_hash]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct ValidationContent {
    /// Request hash this content belongs to
    pub request_hash: [u8; 32],

    /// Off-chain request payload pointer (max 200 bytes)
    pub request_uri: String,

    /// Off-chain response payload pointer (max 200 bytes, empty while pending)
    pub response_uri: String,

    /// Category tag (max 32 bytes, empty while pending)
    pub tag: String,

    /// PDA bump seed
    pub bump: u8,
}

impl ValidationContent {
    /// 32 + (4 + 200) + (4 + 200) + (4 + 32) + 1 = 477 bytes
    pub const SIZE: usize = 32 + (4 + 200) + (4 + 200) + (4 + 32) + 1;
}

/// Running counters for one (agent, tag) pair across all validators
/// Seeds: [b"validation_summary", agent_id, tag_hash]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct ValidationSummary {
    pub agent_id: Pubkey,
    pub tag_hash: [u8; 32],
    /// Total responses recorded under this tag
    pub count: u64,
    /// Responses with code 1
    pub valid_count: u64,
    /// Responses with code 2
    pub invalid_count: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl ValidationSummary {
    /// 32 + 32 + 8 + 8 + 8 + 1 = 89 bytes
    pub const SIZE: usize = 32 + 32 + 8 + 8 + 8 + 1;
}

/// Head of an append-only request-hash index (per agent or per validator)
/// Seeds: [b"agent_validations", agent_id] or [b"validator_requests", validator]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct ValidationIndex {
    /// Agent or validator this index belongs to
    pub subject: Pubkey,
    /// Number of hashes appended so far
    pub len: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl ValidationIndex {
    /// 32 + 8 + 1 = 41 bytes
    pub const SIZE: usize = 32 + 8 + 1;

    /// Page the next appended hash lands on
    pub fn next_page(&self) -> u64 {
        self.len / INDEX_PAGE_CAPACITY as u64
    }

    /// Number of pages holding at least one hash
    pub fn page_count(&self) -> u64 {
        self.len.div_ceil(INDEX_PAGE_CAPACITY as u64)
    }
}

/// One page of an append-only request-hash index
/// Seeds: [b"agent_validations_page", agent_id, page] or
///        [b"validator_requests_page", validator, page]
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct ValidationIndexPage {
    pub subject: Pubkey,
    pub page: u32,
    /// Request hashes in insertion order (max INDEX_PAGE_CAPACITY)
    pub hashes: Vec<[u8; 32]>,
    /// PDA bump seed
    pub bump: u8,
}

impl ValidationIndexPage {
    /// 32 + 4 + (4 + 32 * 20) + 1 = 681 bytes
    pub const SIZE: usize = 32 + 4 + (4 + 32 * INDEX_PAGE_CAPACITY) + 1;

    pub fn is_full(&self) -> bool {
        self.hashes.len() >= INDEX_PAGE_CAPACITY
    }
}

/// Returned by get_validation_status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq)]
pub struct ValidationStatus {
    pub response: u8,
    pub last_update: i64,
    pub response_hash: [u8; 32],
    pub has_response: bool,
}

impl ValidationStatus {
    /// Zero-valued unless a response exists for exactly (validator, agent_id)
    pub fn of(record: Option<&ValidationRecord>, validator: &Pubkey, agent_id: &Pubkey) -> Self {
        match record {
            Some(r) if r.has_response && r.validator == *validator && r.agent_id == *agent_id => {
                Self {
                    response: r.response,
                    last_update: r.last_update,
                    response_hash: r.response_hash,
                    has_response: true,
                }
            }
            _ => Self::default(),
        }
    }
}

/// Returned by get_request
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq)]
pub struct RequestView {
    pub validator: Pubkey,
    pub agent_id: Pubkey,
    pub request_hash: [u8; 32],
    pub request_uri: String,
    pub timestamp: i64,
}

impl RequestView {
    /// All-default when the request does not exist
    pub fn of(record: Option<&ValidationRecord>, content: Option<&ValidationContent>) -> Self {
        match record {
            Some(r) if r.is_opened() => Self {
                validator: r.validator,
                agent_id: r.agent_id,
                request_hash: r.request_hash,
                request_uri: content.map(|c| c.request_uri.clone()).unwrap_or_default(),
                timestamp: r.timestamp,
            },
            _ => Self::default(),
        }
    }
}

/// Returned by get_agent_validations / get_validator_requests
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq)]
pub struct IndexPageView {
    /// Total hashes in the index (all pages)
    pub total: u64,
    pub page: u32,
    pub hashes: Vec<[u8; 32]>,
}
