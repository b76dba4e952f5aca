//! Aggregation engine.
//!
//! Two query shapes:
//!
//! - All validators: `ValidationSummary` counters are bumped on every response
//!   (O(1) update, O(1) read).
//! - A validator subset: the running counters cannot be split per validator,
//!   so the agent's index is walked page by page and each finalized record is
//!   tallied. Cost is linear in the agent's validation count; callers
//!   page through the index and merge the per-page results.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use super::state::{ValidationIndexPage, ValidationRecord, ValidationSummary};
use crate::constants::{RESPONSE_INVALID, RESPONSE_VALID};
use crate::error::ValidationError;

/// Aggregate returned by get_summary (CPI-friendly)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Responses counted
    pub count: u64,
    /// Responses with code 1 (valid)
    pub valid_count: u64,
    /// Responses with code 2 (invalid)
    pub invalid_count: u64,
}

impl Summary {
    /// Count one response. Codes other than valid/invalid only bump `count`.
    pub fn record(self, response: u8) -> Result<Self> {
        let count = self.count.checked_add(1).ok_or(ValidationError::Overflow)?;
        let mut next = Self { count, ..self };
        match response {
            RESPONSE_VALID => {
                next.valid_count = self
                    .valid_count
                    .checked_add(1)
                    .ok_or(ValidationError::Overflow)?;
            }
            RESPONSE_INVALID => {
                next.invalid_count = self
                    .invalid_count
                    .checked_add(1)
                    .ok_or(ValidationError::Overflow)?;
            }
            _ => {}
        }
        Ok(next)
    }

    /// Combine two partial summaries (e.g. consecutive index pages)
    pub fn merge(self, other: Self) -> Result<Self> {
        Ok(Self {
            count: self
                .count
                .checked_add(other.count)
                .ok_or(ValidationError::Overflow)?,
            valid_count: self
                .valid_count
                .checked_add(other.valid_count)
                .ok_or(ValidationError::Overflow)?,
            invalid_count: self
                .invalid_count
                .checked_add(other.invalid_count)
                .ok_or(ValidationError::Overflow)?,
        })
    }
}

impl From<&ValidationSummary> for Summary {
    fn from(counters: &ValidationSummary) -> Self {
        Self {
            count: counters.count,
            valid_count: counters.valid_count,
            invalid_count: counters.invalid_count,
        }
    }
}

impl ValidationSummary {
    pub fn summary(&self) -> Summary {
        Summary::from(self)
    }

    pub(crate) fn store(&mut self, agent_id: Pubkey, tag_hash: [u8; 32], counts: Summary, bump: u8) {
        self.agent_id = agent_id;
        self.tag_hash = tag_hash;
        self.count = counts.count;
        self.valid_count = counts.valid_count;
        self.invalid_count = counts.invalid_count;
        self.bump = bump;
    }
}

/// SHA256 of the tag, the summary PDA seed and the stored record tag key
pub fn tag_hash(tag: &str) -> [u8; 32] {
    hash(tag.as_bytes()).to_bytes()
}

/// Tally finalized records for `agent_id` under `tag_hash` whose validator is
/// in `validators`. Pending records and other agents are skipped.
pub fn tally<'a, I>(
    records: I,
    agent_id: &Pubkey,
    tag_hash: &[u8; 32],
    validators: &[Pubkey],
) -> Result<Summary>
where
    I: IntoIterator<Item = &'a ValidationRecord>,
{
    records
        .into_iter()
        .filter(|r| {
            r.has_response
                && r.agent_id == *agent_id
                && r.tag_hash == *tag_hash
                && validators.contains(&r.validator)
        })
        .try_fold(Summary::default(), |acc, r| acc.record(r.response))
}

/// Tally one agent index page. `records` are the accounts supplied for the
/// page, in page order; `None` is an account holding no record. Any
/// disagreement with the page is `IndexAccountMismatch`. A missing page
/// reads as empty and takes no records.
pub fn tally_page(
    page: Option<&ValidationIndexPage>,
    records: &[Option<ValidationRecord>],
    agent_id: &Pubkey,
    tag_hash: &[u8; 32],
    validators: &[Pubkey],
) -> Result<Summary> {
    let hashes: &[[u8; 32]] = page.map(|p| p.hashes.as_slice()).unwrap_or_default();
    require!(
        records.len() == hashes.len(),
        ValidationError::IndexAccountMismatch
    );

    let mut verified = Vec::with_capacity(records.len());
    for (hash, record) in hashes.iter().zip(records) {
        match record {
            Some(r) if r.request_hash == *hash => verified.push(r),
            _ => return Err(ValidationError::IndexAccountMismatch.into()),
        }
    }

    tally(verified, agent_id, tag_hash, validators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responded(validator: Pubkey, agent: Pubkey, tag: &str, response: u8) -> ValidationRecord {
        let mut record = ValidationRecord::default();
        record.open(validator, agent, Pubkey::new_unique().to_bytes(), 1, 255);
        record.finalize(response, [0; 32], tag_hash(tag), 2);
        record
    }

    #[test]
    fn test_record_buckets() {
        let s = Summary::default()
            .record(RESPONSE_VALID)
            .and_then(|s| s.record(RESPONSE_INVALID))
            .and_then(|s| s.record(RESPONSE_VALID))
            .and_then(|s| s.record(7))
            .unwrap();
        assert_eq!(
            s,
            Summary {
                count: 4,
                valid_count: 2,
                invalid_count: 1
            }
        );
    }

    #[test]
    fn test_record_overflow() {
        let s = Summary {
            count: u64::MAX,
            valid_count: 0,
            invalid_count: 0,
        };
        assert!(s.record(RESPONSE_VALID).is_err());
    }

    #[test]
    fn test_merge() {
        let a = Summary { count: 3, valid_count: 2, invalid_count: 1 };
        let b = Summary { count: 5, valid_count: 0, invalid_count: 4 };
        assert_eq!(a.merge(b).unwrap(), Summary { count: 8, valid_count: 2, invalid_count: 5 });
        assert_eq!(a.merge(Summary::default()).unwrap(), a);
    }

    #[test]
    fn test_tag_hash_is_sha256() {
        // sha256("") = e3b0c442...
        assert_eq!(&tag_hash("")[..4], &[0xe3, 0xb0, 0xc4, 0x42]);
        assert_ne!(tag_hash("quality"), tag_hash("Quality"));
    }

    #[test]
    fn test_tally_filters() {
        let v1 = Pubkey::new_unique();
        let v2 = Pubkey::new_unique();
        let v3 = Pubkey::new_unique();
        let agent = Pubkey::new_unique();
        let other_agent = Pubkey::new_unique();

        let mut pending = ValidationRecord::default();
        pending.open(v1, agent, [5; 32], 1, 255);

        let records = vec![
            responded(v1, agent, "quality", RESPONSE_VALID),
            responded(v2, agent, "quality", RESPONSE_INVALID),
            responded(v3, agent, "quality", RESPONSE_VALID),
            responded(v1, agent, "latency", RESPONSE_VALID),
            responded(v1, other_agent, "quality", RESPONSE_VALID),
            pending,
        ];

        let quality = tag_hash("quality");
        assert_eq!(
            tally(&records, &agent, &quality, &[v1]).unwrap(),
            Summary { count: 1, valid_count: 1, invalid_count: 0 }
        );
        assert_eq!(
            tally(&records, &agent, &quality, &[v1, v2]).unwrap(),
            Summary { count: 2, valid_count: 1, invalid_count: 1 }
        );
        assert_eq!(
            tally(&records, &agent, &quality, &[v1, v2, v3]).unwrap(),
            Summary { count: 3, valid_count: 2, invalid_count: 1 }
        );
        // Duplicate validators do not double count
        assert_eq!(
            tally(&records, &agent, &quality, &[v2, v2]).unwrap(),
            Summary { count: 1, valid_count: 0, invalid_count: 1 }
        );
        assert_eq!(tally(&records, &agent, &quality, &[]).unwrap(), Summary::default());
    }

    fn page_of(subject: Pubkey, records: &[ValidationRecord]) -> ValidationIndexPage {
        ValidationIndexPage {
            subject,
            page: 0,
            hashes: records.iter().map(|r| r.request_hash).collect(),
            bump: 255,
        }
    }

    fn expect_mismatch(result: Result<Summary>) {
        assert_eq!(
            result.err(),
            Some(anchor_lang::error::Error::from(ValidationError::IndexAccountMismatch))
        );
    }

    #[test]
    fn test_tally_page_matches_tally() {
        let (v1, v2) = (Pubkey::new_unique(), Pubkey::new_unique());
        let agent = Pubkey::new_unique();
        let records = vec![
            responded(v1, agent, "quality", RESPONSE_VALID),
            responded(v2, agent, "quality", RESPONSE_INVALID),
            responded(v1, agent, "quality", RESPONSE_INVALID),
        ];
        let page = page_of(agent, &records);
        let supplied: Vec<Option<ValidationRecord>> = records.iter().cloned().map(Some).collect();
        let quality = tag_hash("quality");

        assert_eq!(
            tally_page(Some(&page), &supplied, &agent, &quality, &[v1]).unwrap(),
            Summary { count: 2, valid_count: 1, invalid_count: 1 }
        );
        assert_eq!(
            tally_page(Some(&page), &supplied, &agent, &quality, &[v1, v2]).unwrap(),
            tally(&records, &agent, &quality, &[v1, v2]).unwrap()
        );
    }

    #[test]
    fn test_tally_page_account_count_must_match() {
        let v1 = Pubkey::new_unique();
        let agent = Pubkey::new_unique();
        let records = vec![
            responded(v1, agent, "", RESPONSE_VALID),
            responded(v1, agent, "", RESPONSE_VALID),
        ];
        let page = page_of(agent, &records);
        let th = tag_hash("");

        let too_few = vec![Some(records[0].clone())];
        expect_mismatch(tally_page(Some(&page), &too_few, &agent, &th, &[v1]));

        let mut too_many: Vec<Option<ValidationRecord>> = records.iter().cloned().map(Some).collect();
        too_many.push(Some(responded(v1, agent, "", RESPONSE_VALID)));
        expect_mismatch(tally_page(Some(&page), &too_many, &agent, &th, &[v1]));

        expect_mismatch(tally_page(Some(&page), &[], &agent, &th, &[v1]));
    }

    #[test]
    fn test_tally_page_rejects_wrong_records() {
        let v1 = Pubkey::new_unique();
        let agent = Pubkey::new_unique();
        let records = vec![
            responded(v1, agent, "", RESPONSE_VALID),
            responded(v1, agent, "", RESPONSE_INVALID),
        ];
        let page = page_of(agent, &records);
        let th = tag_hash("");

        // Swapped order
        let swapped = vec![Some(records[1].clone()), Some(records[0].clone())];
        expect_mismatch(tally_page(Some(&page), &swapped, &agent, &th, &[v1]));

        // A record whose hash is not on the page
        let stranger = vec![
            Some(records[0].clone()),
            Some(responded(v1, agent, "", RESPONSE_VALID)),
        ];
        expect_mismatch(tally_page(Some(&page), &stranger, &agent, &th, &[v1]));

        // An account holding no record
        let absent = vec![Some(records[0].clone()), None];
        expect_mismatch(tally_page(Some(&page), &absent, &agent, &th, &[v1]));
    }

    #[test]
    fn test_tally_page_missing_page() {
        let v1 = Pubkey::new_unique();
        let agent = Pubkey::new_unique();
        let th = tag_hash("");

        assert_eq!(
            tally_page(None, &[], &agent, &th, &[v1]).unwrap(),
            Summary::default()
        );
        let extra = vec![Some(responded(v1, agent, "", RESPONSE_VALID))];
        expect_mismatch(tally_page(None, &extra, &agent, &th, &[v1]));
    }
}
