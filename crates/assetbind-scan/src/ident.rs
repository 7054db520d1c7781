//! Identifier generation for logical asset names.

use std::collections::HashMap;

/// First suffix handed out when a base identifier collides.
const FIRST_SUFFIX: u32 = 2;

/// Identifiers issued during one discovery run.
///
/// Maps every issued identifier to the next suffix to try when the same base
/// is requested again.
#[derive(Debug, Default)]
pub struct KnownIdentifiers {
    next: HashMap<String, u32>,
}

impl KnownIdentifiers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            next: HashMap::new(),
        }
    }

    /// Check if an identifier has been issued.
    pub fn contains(&self, ident: &str) -> bool {
        self.next.contains_key(ident)
    }

    /// Number of identifiers issued.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// Check if nothing has been issued.
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Issue `base` or the first free `base{n}`, registering the result.
    fn claim(&mut self, base: String) -> String {
        if !self.next.contains_key(&base) {
            self.next.insert(base.clone(), FIRST_SUFFIX);
            return base;
        }
        loop {
            let n = self.next.get(&base).copied().unwrap_or(FIRST_SUFFIX);
            self.next.insert(base.clone(), n + 1);
            let candidate = format!("{base}{n}");
            // `a`, `a`, `a2` would otherwise hand out `a2` twice.
            if !self.next.contains_key(&candidate) {
                self.next.insert(candidate.clone(), FIRST_SUFFIX);
                return candidate;
            }
        }
    }
}

/// Convert a logical name into an identifier unique within `known`.
///
/// The name is lower-cased, every run of characters outside `[a-z0-9_]` is
/// dropped and upper-cases the character after it, and a leading digit gets
/// an underscore. `icons/app-logo.PNG` becomes `iconsAppLogoPng`.
pub fn sanitize(name: &str, known: &mut KnownIdentifiers) -> String {
    known.claim(base_identifier(name))
}

/// The collision-free part of [`sanitize`].
pub fn base_identifier(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len() + 1);
    let mut pending_capitalize = false;

    for b in lower.bytes() {
        if !(b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_') {
            pending_capitalize = true;
        } else if pending_capitalize {
            out.push(b.to_ascii_uppercase() as char);
            pending_capitalize = false;
        } else {
            out.push(b as char);
        }
    }

    match out.as_bytes().first() {
        None => "_".to_string(),
        Some(b) if b.is_ascii_digit() => format!("_{out}"),
        Some(_) => out,
    }
}

/// Check if `ident` could have been produced by [`sanitize`].
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut bytes = ident.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
