//! Numeric text input parsing
//!
//! Form fields hold exactly what the user typed. A blank field reads as
//! zero wherever a number is required by the budget computation; anything
//! that is not blank must be a finite decimal number.

/// Why a numeric field could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericInputError {
    /// The field contains something that is not a number
    NotANumber,
}

/// Parse a field, returning `Ok(None)` for a blank field
///
/// Accepts a decimal comma ("12,5"). Submissions post the parsed value,
/// never the typed text.
pub fn parse_optional(input: &str) -> Result<Option<f64>, NumericInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(NumericInputError::NotANumber),
    }
}

/// Parse a field, reading a blank field as zero
pub fn parse_or_zero(input: &str) -> Result<f64, NumericInputError> {
    Ok(parse_optional(input)?.unwrap_or(0.0))
}

/// Render a number the way a numeric input would show it ("10", "12.5")
pub fn format_input(value: f64) -> String {
    format!("{}", value)
}

/// Whether a typed character may appear in a numeric field
pub fn accepts_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ',' || c == '-'
}
