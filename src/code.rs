//! Invite code parsing.
//!
//! Users paste codes as free text; codes may be separated by commas,
//! spaces, or newlines in any combination. Tokens are read leniently:
//! the leading digit run counts, so `"80abc"` reads as 80. Tokens with
//! no leading digits or out of port range are dropped silently.

use crate::models::InviteCode;

/// Extracts every well-formed invite code from free text, in order of
/// first occurrence. Duplicates are kept as written; an empty result is
/// the caller's signal to refuse the batch.
pub fn parse_codes(input: &str) -> Vec<InviteCode> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(InviteCode::parse)
        .collect()
}
