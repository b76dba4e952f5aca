//! PDA seeds and protocol limits for the Validation Registry.
//!
//! Seeds are defined once here so account constraints, manual address
//! derivation in views, and off-chain clients all agree.

/// Registry configuration PDA seed
/// PDA: ["validation_config"]
pub const SEED_VALIDATION_CONFIG: &[u8] = b"validation_config";

/// Validation record PDA seed (request + response fixed fields)
/// PDA: ["validation", request_hash]
pub const SEED_VALIDATION: &[u8] = b"validation";

/// Variable-length side storage PDA seed (URIs, tag)
/// PDA: ["validation_content", request_hash]
pub const SEED_VALIDATION_CONTENT: &[u8] = b"validation_content";

/// Running per-(agent, tag) counters PDA seed
/// PDA: ["validation_summary", agent_id, sha256(tag)]
pub const SEED_VALIDATION_SUMMARY: &[u8] = b"validation_summary";

/// Agent index head PDA seed
/// PDA: ["agent_validations", agent_id]
pub const SEED_AGENT_INDEX: &[u8] = b"agent_validations";

/// Agent index page PDA seed
/// PDA: ["agent_validations_page", agent_id, page.to_le_bytes()]
pub const SEED_AGENT_INDEX_PAGE: &[u8] = b"agent_validations_page";

/// Validator index head PDA seed
/// PDA: ["validator_requests", validator]
pub const SEED_VALIDATOR_INDEX: &[u8] = b"validator_requests";

/// Validator index page PDA seed
/// PDA: ["validator_requests_page", validator, page.to_le_bytes()]
pub const SEED_VALIDATOR_INDEX_PAGE: &[u8] = b"validator_requests_page";

/// Identity registry agent account seed (foreign PDA)
/// PDA: ["agent", agent_id] under the identity registry program
pub const SEED_IDENTITY_AGENT: &[u8] = b"agent";

/// Maximum request/response URI length in bytes
pub const MAX_URI_LENGTH: usize = 200;

/// Maximum tag length in bytes
pub const MAX_TAG_LENGTH: usize = 32;

/// Request hashes per index page
pub const INDEX_PAGE_CAPACITY: usize = 20;

/// Response codes. 0 is reserved for "no response yet" and is never stored.
pub const RESPONSE_PENDING: u8 = 0;
pub const RESPONSE_VALID: u8 = 1;
pub const RESPONSE_INVALID: u8 = 2;
