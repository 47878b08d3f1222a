//! XML name validation used in strict mode.

/// Returns whether the string can be used as an element or attribute name.
pub fn is_valid(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_start(c) => chars.all(is_continue),
        _ => false,
    }
}

#[cfg(feature = "unicode")]
fn is_start(c: char) -> bool {
    c == '_' || c == ':' || unicode_ident::is_xid_start(c)
}

#[cfg(feature = "unicode")]
fn is_continue(c: char) -> bool {
    matches!(c, '-' | '.' | ':') || unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_start(c: char) -> bool {
    c == '_' || c == ':' || c.is_ascii_alphabetic()
}

#[cfg(not(feature = "unicode"))]
fn is_continue(c: char) -> bool {
    matches!(c, '-' | '.' | ':' | '_') || c.is_ascii_alphanumeric()
}
