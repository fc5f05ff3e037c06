// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

/// Name prefix the terminal reports in its SII.
pub const IDENTIFIER: &str = "EL2574";

/// Checks whether a slave `name` starts with `identifier`. Anything after
/// the identifier (revision suffix, NUL padding) is ignored.
pub fn matches(name: &[u8], identifier: &str) -> bool {
    name.starts_with(identifier.as_bytes())
}

#[test]
fn test_matches() {
    assert!(matches(b"EL2574X", IDENTIFIER));
    assert!(matches(b"EL2574", IDENTIFIER));
    assert!(matches(b"EL2574-0000\0\0\0\0", IDENTIFIER));
    assert!(!matches(b"EL2573", IDENTIFIER));
    assert!(!matches(b"EL257", IDENTIFIER));
    assert!(!matches(b"", IDENTIFIER));
    assert!(!matches(b"el2574", IDENTIFIER));
}
