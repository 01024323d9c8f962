//! CEP input normalization and validation
//!
//! A CEP has exactly 8 digits and is displayed as `NNNNN-NNN`. Everything
//! here is pure and safe to call on every keystroke.

/// Number of digits in a complete CEP.
pub const CEP_DIGITS: usize = 8;

/// Number of digits before the `-` separator.
const PREFIX_DIGITS: usize = 5;

/// Removes every character that is not an ASCII digit.
pub fn strip_formatting(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats free text as the CEP field should display it.
///
/// Non-digits are dropped, the result is clipped to 8 digits and a `-` is
/// inserted after the 5th digit once there are more than 5.
///
/// # Example
///
/// ```rust
/// use rust_cep_api::cep::format_cep;
///
/// assert_eq!(format_cep("01310930"), "01310-930");
/// assert_eq!(format_cep("0131"), "0131");
/// ```
pub fn format_cep(text: &str) -> String {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CEP_DIGITS)
        .collect();

    if digits.len() > PREFIX_DIGITS {
        // Only ASCII digits remain, so byte indexing is safe
        format!("{}-{}", &digits[..PREFIX_DIGITS], &digits[PREFIX_DIGITS..])
    } else {
        digits
    }
}

/// Returns true iff the value holds exactly 8 digits once formatting is removed.
pub fn is_valid_cep(value: &str) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() == CEP_DIGITS
}
