//! Text parsing helpers for selector names.
//!
//! The `from_text` constructors on [`Side`](crate::Side),
//! [`Model`](crate::Model), [`IrKey`](crate::IrKey) and friends accept
//! loosely formatted input from command lines or config files. Matching is
//! ASCII case-insensitive and ignores surrounding whitespace, without
//! allocating.

/// Returns true if `input` (trimmed) equals any of `names`, ignoring ASCII
/// case.
///
/// ```
/// use rs_robobit::parsing::matches_any;
///
/// assert!(matches_any("  Fwd ", &["forward", "fwd"]));
/// assert!(!matches_any("back", &["forward", "fwd"]));
/// ```
pub fn matches_any(input: &str, names: &[&str]) -> bool {
    let input = input.trim();
    names.iter().any(|name| input.eq_ignore_ascii_case(name))
}

/// Parses a trimmed decimal integer, accepting a leading `+` or `-`.
///
/// Returns `None` for empty or malformed input.
///
/// ```
/// use rs_robobit::parsing::parse_int;
///
/// assert_eq!(parse_int(" -400 "), Some(-400));
/// assert_eq!(parse_int("+7"), Some(7));
/// assert_eq!(parse_int("fast"), None);
/// ```
pub fn parse_int(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}

/// Picks the first entry whose names match `input`.
///
/// Used to build lookup tables for enums with many variants.
pub fn lookup<T: Copy>(input: &str, table: &[(&[&str], T)]) -> Option<T> {
    table
        .iter()
        .find(|(names, _)| matches_any(input, names))
        .map(|(_, value)| *value)
}
