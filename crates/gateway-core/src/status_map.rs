//! Mapping of vendor status codes to the canonical order status.
//!
//! Venues report progress through two code fields: an order-status code and
//! an execution-type code, each arriving either as a compact numeric code or
//! a symbolic name. The order-status code takes precedence; the
//! execution-type code is the fallback. Codes neither side recognizes map to
//! `None` rather than an error, so callers leave the existing status
//! untouched.

use gateway_types::OrderStatus;

/// Derives the canonical order status from the two vendor code fields.
///
/// Pure and referentially transparent; safe to call concurrently.
pub fn map_status(exec_type: Option<&str>, ord_status: Option<&str>) -> Option<OrderStatus> {
	from_ord_status(ord_status).or_else(|| from_exec_type(exec_type))
}

fn from_ord_status(ord_status: Option<&str>) -> Option<OrderStatus> {
	match normalize(ord_status)?.as_str() {
		"0" | "NEW" => Some(OrderStatus::New),
		"1" | "PARTIALLY_FILLED" => Some(OrderStatus::PartiallyFilled),
		"2" | "FILLED" => Some(OrderStatus::Filled),
		"4" | "CANCELED" | "CANCELLED" => Some(OrderStatus::Canceled),
		"8" | "REJECTED" => Some(OrderStatus::Rejected),
		_ => None,
	}
}

fn from_exec_type(exec_type: Option<&str>) -> Option<OrderStatus> {
	match normalize(exec_type)?.as_str() {
		"0" | "NEW" => Some(OrderStatus::New),
		"1" | "PARTIAL_FILL" | "PARTIALLY_FILLED" => Some(OrderStatus::PartiallyFilled),
		"2" | "FILL" | "FILLED" => Some(OrderStatus::Filled),
		"4" | "CANCELED" | "CANCELLED" => Some(OrderStatus::Canceled),
		"8" | "REJECTED" => Some(OrderStatus::Rejected),
		_ => None,
	}
}

/// Trim, uppercase, and collapse `-`/` ` separators to `_`. Blank input
/// normalizes to `None`.
fn normalize(value: Option<&str>) -> Option<String> {
	let trimmed = value?.trim();
	if trimmed.is_empty() {
		return None;
	}
	Some(trimmed.to_uppercase().replace(['-', ' '], "_"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ord_status_takes_precedence_over_exec_type() {
		assert_eq!(map_status(Some("1"), Some("2")), Some(OrderStatus::Filled));
	}

	#[test]
	fn falls_back_to_exec_type_when_ord_status_is_unknown() {
		assert_eq!(
			map_status(Some("1"), Some("junk")),
			Some(OrderStatus::PartiallyFilled)
		);
		assert_eq!(map_status(Some("2"), None), Some(OrderStatus::Filled));
	}

	#[test]
	fn numeric_and_symbolic_codes_are_equivalent() {
		assert_eq!(map_status(None, Some("0")), Some(OrderStatus::New));
		assert_eq!(map_status(None, Some("NEW")), Some(OrderStatus::New));
		assert_eq!(map_status(None, Some("8")), Some(OrderStatus::Rejected));
		assert_eq!(
			map_status(None, Some("REJECTED")),
			Some(OrderStatus::Rejected)
		);
	}

	#[test]
	fn alias_spellings_are_accepted() {
		assert_eq!(map_status(None, Some("CANCELED")), Some(OrderStatus::Canceled));
		assert_eq!(map_status(None, Some("CANCELLED")), Some(OrderStatus::Canceled));
		assert_eq!(
			map_status(Some("PARTIAL_FILL"), None),
			Some(OrderStatus::PartiallyFilled)
		);
		assert_eq!(map_status(Some("FILL"), None), Some(OrderStatus::Filled));
	}

	#[test]
	fn normalization_handles_case_whitespace_and_separators() {
		assert_eq!(
			map_status(None, Some("  partially-filled ")),
			Some(OrderStatus::PartiallyFilled)
		);
		assert_eq!(
			map_status(None, Some("partially filled")),
			Some(OrderStatus::PartiallyFilled)
		);
	}

	#[test]
	fn unknown_or_blank_codes_map_to_none() {
		assert_eq!(map_status(Some("x"), Some("y")), None);
		assert_eq!(map_status(None, None), None);
		assert_eq!(map_status(Some("   "), Some("")), None);
	}
}
