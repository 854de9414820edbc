//! Text parsing.
//!
//! Three grammars are provided, from most to least lenient:
//!
//! - [`Uuid::parse_hex`] accepts the hyphenated form plain, wrapped in braces, or prefixed with
//!   `urn:uuid:`, in any letter case. The first digit of the third group must be `1`–`5`.
//! - [`Uuid::parse_hyphenated`] accepts only the bare 36-character hyphenated form, with the same
//!   version-digit rule. This is the grammar used by text serialization.
//! - [`Uuid::parse_clean`] accepts exactly 32 hex digits with no separators.
//!
//! The braces in [`Uuid::parse_hex`] are matched independently: `{6ba7b810-…` and `…30c8}` are
//! accepted as well as the balanced form.

use crate::value::{CLEAN_LEN, UUID_LEN};
use crate::{Uuid, UuidError, UuidResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static HEX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(urn:uuid:)?\{?([0-9a-f]{8})-([0-9a-f]{4})-",
        r"([1-5][0-9a-f]{3})-([0-9a-f]{4})-([0-9a-f]{12})\}?$",
    ))
    .expect("hex pattern is a valid regex")
});

static HYPHENATED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^([0-9a-f]{8})-([0-9a-f]{4})-",
        r"([1-5][0-9a-f]{3})-([0-9a-f]{4})-([0-9a-f]{12})$",
    ))
    .expect("hyphenated pattern is a valid regex")
});

impl Uuid {
    /// Parses the hyphenated form, optionally braced or `urn:uuid:` prefixed.
    ///
    /// The input is lowercased before matching. The first digit of the third group must be
    /// `1`–`5`; this is a loose check on the version nibble, not a full version validation.
    ///
    /// # Arguments
    ///
    /// * `input` - UUID text in any of the accepted forms, in any letter case.
    ///
    /// # Returns
    ///
    /// Returns the parsed [`Uuid`] on success.
    ///
    /// ```
    /// use ruid_uuid::{Uuid, NAMESPACE_DNS};
    ///
    /// for input in [
    ///     "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
    ///     "{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}",
    ///     "urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8",
    /// ] {
    ///     assert_eq!(Uuid::parse_hex(input).unwrap(), NAMESPACE_DNS);
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Format`] carrying the original input if it does not match the grammar.
    pub fn parse_hex(input: &str) -> UuidResult<Self> {
        parse_with(&HEX_PATTERN, input, 2)
    }

    /// Parses the bare hyphenated form `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
    ///
    /// This is [`Uuid::parse_hex`] without the brace and URN forms. The version digit is still
    /// required to be `1`–`5`, so values outside that range do not survive text serialization.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Format`] carrying the original input if it does not match the grammar.
    pub fn parse_hyphenated(input: &str) -> UuidResult<Self> {
        parse_with(&HYPHENATED_PATTERN, input, 1)
    }

    /// Parses 32 hex digits with no separators, e.g. `6ba7b8149dad11d180b400c04fd430c8`.
    ///
    /// The length is checked first and a mismatch returns immediately, before any decoding.
    ///
    /// # Arguments
    ///
    /// * `input` - Candidate clean string. Must be exactly 32 hex characters.
    ///
    /// # Returns
    ///
    /// Returns the decoded [`Uuid`] on success.
    ///
    /// # Errors
    ///
    /// - [`UuidError::Length`] if `input` is not exactly 32 bytes long. No decoding is attempted.
    /// - [`UuidError::Format`] if `input` contains a non-hex character.
    pub fn parse_clean(input: &str) -> UuidResult<Self> {
        if input.len() != CLEAN_LEN {
            tracing::debug!(input, "rejected clean UUID string of wrong length");
            return Err(UuidError::Length {
                expected: CLEAN_LEN,
                actual: input.len(),
            });
        }

        decode(input, input)
    }
}

impl FromStr for Uuid {
    type Err = UuidError;

    /// Equivalent to [`Uuid::parse_hex`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_hex(s)
    }
}

/// Matches `input` against `pattern` and decodes the five capture groups starting at `first`.
fn parse_with(pattern: &Regex, input: &str, first: usize) -> UuidResult<Uuid> {
    let normalized = input.to_lowercase();
    let Some(captures) = pattern.captures(&normalized) else {
        tracing::debug!(input, "rejected malformed UUID string");
        return Err(UuidError::Format(input.to_owned()));
    };

    let digits: String = (first..first + 5)
        .filter_map(|i| captures.get(i))
        .map(|m| m.as_str())
        .collect();

    decode(&digits, input)
}

fn decode(digits: &str, input: &str) -> UuidResult<Uuid> {
    let mut bytes = [0u8; UUID_LEN];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
        tracing::debug!(input, error = %e, "rejected non-hex UUID string");
        UuidError::Format(input.to_owned())
    })?;
    Ok(Uuid::from_bytes(bytes))
}
