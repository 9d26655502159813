//! Write gate for user-supplied text fields.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectCode {
	RejectEmpty,
	RejectTooLong,
}

/// Trims `value` and enforces the configured length bound. Length counts
/// chars, not bytes, so multi-byte text is not penalized.
pub fn check_text(value: &str, max_chars: u32) -> Result<&str, RejectCode> {
	let trimmed = value.trim();

	if trimmed.is_empty() {
		return Err(RejectCode::RejectEmpty);
	}
	if trimmed.chars().count() > max_chars as usize {
		return Err(RejectCode::RejectTooLong);
	}

	Ok(trimmed)
}
