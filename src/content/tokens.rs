// Character-based token estimation
// Author: kelexine (https://github.com/kelexine)

/// Rough character-to-token ratio used for every budget decision.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate token count (rough approximation: 1 token ≈ 4 characters)
pub fn estimate_token_count(text: &str) -> usize {
    tokens_for_chars(text.chars().count())
}

/// Token estimate for a known character count, rounded up.
pub fn tokens_for_chars(chars: usize) -> usize {
    chars.div_ceil(CHARS_PER_TOKEN)
}
