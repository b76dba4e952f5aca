//! Manual account loading for records that may not exist yet.
//!
//! Anchor's `Account<T>` rejects uninitialized accounts with a framework
//! error. Views and the response path need "absent" to be an ordinary value
//! (zero-valued status, `RequestNotFound`), so those accounts are taken as
//! `UncheckedAccount`s with a seeds constraint and read through here.

use anchor_lang::prelude::*;

use crate::error::ValidationError;

/// Deserialize `T` if the account is initialized and owned by this program.
/// Empty or foreign-owned accounts read as `None`.
pub fn load<T>(info: &AccountInfo) -> Result<Option<T>>
where
    T: AccountDeserialize + Owner,
{
    if info.data_is_empty() || *info.owner != T::owner() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice).map(Some)
}

/// Write `value` back (discriminator + fields) into an account owned by this program.
pub fn store<T>(info: &AccountInfo, value: &T) -> Result<()>
where
    T: AccountSerialize + Owner,
{
    require_keys_eq!(*info.owner, T::owner(), ValidationError::InvalidAccountAddress);
    let mut data = info.try_borrow_mut_data()?;
    let dst: &mut [u8] = &mut data;
    let mut cursor = std::io::Cursor::new(dst);
    value.try_serialize(&mut cursor)
}

/// Fail unless `info` sits at the PDA derived from `seeds`.
pub fn require_pda(info: &AccountInfo, seeds: &[&[u8]]) -> Result<()> {
    let (expected, _) = Pubkey::find_program_address(seeds, &crate::ID);
    require_keys_eq!(*info.key, expected, ValidationError::InvalidAccountAddress);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::state::ValidationSummary;

    fn serialized(summary: &ValidationSummary) -> Vec<u8> {
        let mut buf = Vec::new();
        summary.try_serialize(&mut buf).unwrap();
        buf.resize(8 + ValidationSummary::SIZE, 0);
        buf
    }

    #[test]
    fn test_load_empty_account_is_none() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert!(load::<ValidationSummary>(&info).unwrap().is_none());
    }

    #[test]
    fn test_load_foreign_owner_is_none() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 1u64;
        let mut data = serialized(&ValidationSummary { count: 3, ..Default::default() });
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert!(load::<ValidationSummary>(&info).unwrap().is_none());
    }

    #[test]
    fn test_store_then_load() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 1u64;
        let mut data = serialized(&ValidationSummary::default());
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let updated = ValidationSummary {
            agent_id: Pubkey::new_unique(),
            tag_hash: [4; 32],
            count: 2,
            valid_count: 1,
            invalid_count: 1,
            bump: 253,
        };
        store(&info, &updated).unwrap();
        assert_eq!(load::<ValidationSummary>(&info).unwrap(), Some(updated));
    }

    #[test]
    fn test_wrong_discriminator_fails() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 1u64;
        let mut data = vec![0xAB; 8 + ValidationSummary::SIZE];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert!(load::<ValidationSummary>(&info).is_err());
    }

    #[test]
    fn test_require_pda() {
        let request_hash = [7u8; 32];
        let (pda, _) = Pubkey::find_program_address(
            &[crate::constants::SEED_VALIDATION, request_hash.as_ref()],
            &crate::ID,
        );
        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&pda, false, false, &mut lamports, &mut data, &owner, false, 0);
        assert!(require_pda(&info, &[crate::constants::SEED_VALIDATION, request_hash.as_ref()]).is_ok());
        assert!(require_pda(&info, &[crate::constants::SEED_VALIDATION, [8u8; 32].as_ref()]).is_err());
    }
}
