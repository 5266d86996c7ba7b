use super::record::Record;

/// Sequence number and descriptor precede the dates on every card.
const LEADING_TOKENS_SKIPPED: usize = 2;

/// Fills START and END from the first two year-like header tokens. Leaves
/// both unset when fewer than two are found.
pub fn extract_start_end(record: &mut Record) {
    let mut years = record
        .header
        .split_whitespace()
        .skip(LEADING_TOKENS_SKIPPED)
        .filter(|token| is_year_like(token));

    if let (Some(start), Some(end)) = (years.next(), years.next()) {
        record.start = Some(start.to_string());
        record.end = Some(end.to_string());
    }
}

/// 3 to 5 characters, at least 3 of them digits. OCR often swaps one digit
/// for a letter, so this is no stricter.
fn is_year_like(token: &str) -> bool {
    let length = token.chars().count();
    let digits = token.chars().filter(|character| character.is_ascii_digit()).count();
    (3..=5).contains(&length) && digits >= 3
}
