// src/names.rs
//! Species-name reconciliation between the registry and the inventory.
//!
//! The inventory qualifies some names with a population number
//! (`Agelaius tricolor pop. 2`). The occurrence API only knows the bare name,
//! so the qualifier is cut before names are compared.

const POP_MARKER: &str = "pop. ";

/// Text before the first `pop. `, trimmed.
pub fn strip_population_qualifier(name: &str) -> &str {
    match name.find(POP_MARKER) {
        Some(ix) => name[..ix].trim(),
        None => name.trim(),
    }
}

/// Registry names first (unique, in order), then bare inventory names that
/// are not already listed. Empty names are dropped.
pub fn build_search_list<A, B>(registry: &[A], inventory: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut out: Vec<String> = Vec::with_capacity(registry.len() + inventory.len());

    let mut push = |name: &str| {
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(s!(name));
        }
    };

    for name in registry {
        push(name.as_ref().trim());
    }
    for name in inventory {
        push(strip_population_qualifier(name.as_ref()));
    }
    out
}
