//! Steem account-name syntax validation.
//!
//! Mirrors the blockchain's account naming rules: 3 to 16 characters overall,
//! lowercase, split into dot-separated segments where each segment starts with
//! a letter, contains only letters, digits, or dashes, ends with a letter or
//! digit, and is at least 3 characters long.

use crate::error::AccountNameError;

/// Validate a candidate account name. Returns `Ok(())` when the name is
/// syntactically valid on the Steem blockchain.
pub fn validate_account_name(name: &str) -> Result<(), AccountNameError> {
    if name.is_empty() {
        return Err(AccountNameError::Empty);
    }
    if name.len() < 3 {
        return Err(AccountNameError::TooShort);
    }
    if name.len() > 16 {
        return Err(AccountNameError::TooLong);
    }
    for segment in name.split('.') {
        if segment.len() < 3 {
            return Err(AccountNameError::SegmentTooShort);
        }
        let bytes = segment.as_bytes();
        if !bytes[0].is_ascii_lowercase() {
            return Err(AccountNameError::BadSegmentStart);
        }
        if !bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        {
            return Err(AccountNameError::BadSegmentChar);
        }
        let last = bytes[bytes.len() - 1];
        if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
            return Err(AccountNameError::BadSegmentEnd);
        }
    }
    Ok(())
}
