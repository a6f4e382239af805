use rand::Rng;

use crate::node::MenuNode;

/// Alphabet used for generated identifiers.
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated identifier.
pub const ID_LENGTH: usize = 20;

/// Generate one random identifier from the fixed alphabet.
///
/// Uniqueness is probabilistic, not checked: the 62^20 key space makes a
/// collision within one tree generation negligible in practice. The
/// randomness is non-cryptographic; identifiers only need to be unique
/// within a session.
pub fn generate_identifier() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Stamp every node in the tree with a fresh identifier, overwriting any
/// prior one. Hidden nodes are stamped too: identity assignment does not
/// depend on visibility. Mutates the tree in place.
pub fn assign_identifiers(nodes: &mut [MenuNode]) {
    for node in nodes {
        node.id = Some(generate_identifier());
        if let Some(items) = node.items.as_mut() {
            assign_identifiers(items);
        }
    }
}
