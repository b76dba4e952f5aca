//! Append-only request-hash indices.
//!
//! Each index is a head (`ValidationIndex`, total length) plus fixed-capacity
//! pages (`ValidationIndexPage`). Hash `i` lives on page `i / INDEX_PAGE_CAPACITY`
//! at offset `i % INDEX_PAGE_CAPACITY`; pages are only ever appended to.

use anchor_lang::prelude::*;

use super::state::{IndexPageView, ValidationIndex, ValidationIndexPage};
use crate::error::ValidationError;

/// Mutable view of the head and the page receiving the next append
pub struct IndexSlot<'a> {
    pub head: &'a mut ValidationIndex,
    pub page: &'a mut ValidationIndexPage,
    pub head_bump: u8,
    pub page_bump: u8,
}

impl IndexSlot<'_> {
    /// Check that `page` is the append position for `subject` and that the
    /// append cannot fail. Does not mutate.
    pub fn check_append(&self, subject: &Pubkey, page: u32) -> Result<()> {
        if self.head.len > 0 {
            require_keys_eq!(self.head.subject, *subject, ValidationError::InvalidIndexPage);
        }
        require!(
            u64::from(page) == self.head.next_page(),
            ValidationError::InvalidIndexPage
        );
        if !self.page.hashes.is_empty() {
            require!(self.page.page == page, ValidationError::InvalidIndexPage);
        }
        require!(!self.page.is_full(), ValidationError::InvalidIndexPage);
        self.head
            .len
            .checked_add(1)
            .ok_or(ValidationError::Overflow)?;
        Ok(())
    }

    /// Append `request_hash`. Callers run `check_append` first.
    pub fn append(&mut self, subject: Pubkey, page: u32, request_hash: [u8; 32]) {
        self.head.subject = subject;
        self.head.bump = self.head_bump;
        self.head.len += 1;

        self.page.subject = subject;
        self.page.page = page;
        self.page.bump = self.page_bump;
        self.page.hashes.push(request_hash);
    }
}

/// Page view for get_agent_validations / get_validator_requests.
/// Missing head or page reads as empty.
pub fn page_view(
    head: Option<&ValidationIndex>,
    page: Option<&ValidationIndexPage>,
    page_number: u32,
) -> IndexPageView {
    IndexPageView {
        total: head.map(|h| h.len).unwrap_or_default(),
        page: page_number,
        hashes: page.map(|p| p.hashes.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INDEX_PAGE_CAPACITY;
    use crate::error::ValidationError;

    fn expect_err(result: Result<()>, expected: ValidationError) {
        assert_eq!(result.err(), Some(anchor_lang::error::Error::from(expected)));
    }

    #[test]
    fn test_append_fills_pages_in_order() {
        let subject = Pubkey::new_unique();
        let mut head = ValidationIndex::default();
        let mut pages: Vec<ValidationIndexPage> = Vec::new();

        for i in 0..(INDEX_PAGE_CAPACITY * 2 + 3) {
            let page_no = head.next_page() as u32;
            if pages.len() <= page_no as usize {
                pages.push(ValidationIndexPage::default());
            }
            let mut slot = IndexSlot {
                head: &mut head,
                page: &mut pages[page_no as usize],
                head_bump: 250,
                page_bump: 251,
            };
            slot.check_append(&subject, page_no).unwrap();
            slot.append(subject, page_no, [i as u8; 32]);
        }

        assert_eq!(head.len, (INDEX_PAGE_CAPACITY * 2 + 3) as u64);
        assert_eq!(pages.len(), 3);
        assert!(pages[0].is_full() && pages[1].is_full());
        assert_eq!(pages[2].hashes.len(), 3);
        assert_eq!(pages[1].page, 1);
        assert_eq!(pages[1].hashes[0], [INDEX_PAGE_CAPACITY as u8; 32]);
        assert_eq!(pages[2].hashes[2], [(INDEX_PAGE_CAPACITY * 2 + 2) as u8; 32]);
    }

    #[test]
    fn test_wrong_page_rejected_without_mutation() {
        let subject = Pubkey::new_unique();
        let mut head = ValidationIndex { subject, len: 3, bump: 1 };
        let mut page = ValidationIndexPage {
            subject,
            page: 0,
            hashes: vec![[1; 32], [2; 32], [3; 32]],
            bump: 1,
        };
        let before = (head.clone(), page.clone());

        let slot = IndexSlot { head: &mut head, page: &mut page, head_bump: 1, page_bump: 1 };
        expect_err(slot.check_append(&subject, 1), ValidationError::InvalidIndexPage);
        expect_err(
            slot.check_append(&Pubkey::new_unique(), 0),
            ValidationError::InvalidIndexPage,
        );

        assert_eq!((head, page), before);
    }

    #[test]
    fn test_full_page_rejected() {
        let subject = Pubkey::new_unique();
        // Head claims page 0 still has room but the page is full: inconsistent input
        let mut head = ValidationIndex { subject, len: 0, bump: 1 };
        let mut page = ValidationIndexPage {
            subject,
            page: 0,
            hashes: vec![[0; 32]; INDEX_PAGE_CAPACITY],
            bump: 1,
        };
        let slot = IndexSlot { head: &mut head, page: &mut page, head_bump: 1, page_bump: 1 };
        expect_err(slot.check_append(&subject, 0), ValidationError::InvalidIndexPage);
    }

    #[test]
    fn test_page_view_missing_accounts() {
        let view = page_view(None, None, 4);
        assert_eq!(view.total, 0);
        assert_eq!(view.page, 4);
        assert!(view.hashes.is_empty());
    }
}
