//! Service address of the news canister.

use std::fmt;
use std::str::FromStr;

use candid::Principal;

use super::NewsClientError;

/// Textual principal identifying the target canister.
///
/// # Examples
/// ```
/// use newshub_client::domain::CanisterId;
///
/// let id = CanisterId::parse("bkyz2-fmaaa-aaaaa-qaaaq-cai").expect("valid principal");
/// assert_eq!(id.to_string(), "bkyz2-fmaaa-aaaaa-qaaaq-cai");
/// assert!(CanisterId::parse("not a principal").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanisterId(Principal);

impl CanisterId {
    /// Parse a textual principal.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::AddressResolution`] when the text is not a
    /// well-formed principal (bad alphabet, grouping, or checksum).
    pub fn parse(text: &str) -> Result<Self, NewsClientError> {
        Principal::from_text(text.trim())
            .map(Self)
            .map_err(|error| NewsClientError::address_resolution(text, error.to_string()))
    }

    /// Wrap an already-decoded principal.
    pub const fn from_principal(principal: Principal) -> Self {
        Self(principal)
    }

    /// Access the underlying principal.
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

impl From<Principal> for CanisterId {
    fn from(value: Principal) -> Self {
        Self(value)
    }
}

impl FromStr for CanisterId {
    type Err = NewsClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CanisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::backend("bkyz2-fmaaa-aaaaa-qaaaq-cai")]
    #[case::frontend("bd3sg-teaaa-aaaaa-qaaba-cai")]
    #[case::padded("  be2us-64aaa-aaaaa-qaabq-cai ")]
    fn parses_textual_principals(#[case] text: &str) {
        let id = CanisterId::parse(text).expect("principal should parse");
        assert_eq!(id.to_string(), text.trim());
    }

    #[rstest]
    #[case::empty_groups("----")]
    #[case::bad_alphabet("bkyz2-fmaaa-aaaaa-qaaaq-ca!")]
    #[case::bad_checksum("bkyz2-fmaaa-aaaaa-qaaaq-caa")]
    fn rejects_malformed_principals(#[case] text: &str) {
        let error = CanisterId::parse(text).expect_err("principal must be rejected");
        assert!(
            matches!(error, NewsClientError::AddressResolution { ref address, .. } if address == text),
            "malformed text should map to AddressResolution, got {error:?}",
        );
    }
}
