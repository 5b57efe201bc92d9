//! ID prefixes and generation.
//!
//! IDs look like `fil-a3f8b2c1`: a short entity prefix followed by 8 lowercase
//! hex characters. They are opaque and only need to be unique for a session.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix for [`FileEntry`](crate::entities::FileEntry) IDs.
pub const PREFIX_FILE: &str = "fil";
/// Prefix for [`Triple`](crate::entities::Triple) IDs.
pub const PREFIX_TRIPLE: &str = "trp";

static FALLBACK_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Generate a prefixed ID, e.g. `trp-0c9e41aa`.
///
/// Uses OS randomness; if that is unavailable the suffix is derived from the
/// clock and a process-wide counter so generation never fails.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut bytes = [0u8; 4];
    if getrandom::fill(&mut bytes).is_err() {
        bytes = fallback_bytes();
    }
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{suffix}")
}

/// Replace `id` with a fresh one for as long as `taken` reports it in use.
/// Returns `true` if the ID was replaced.
pub fn reissue_if_taken(id: &mut String, prefix: &str, taken: impl Fn(&str) -> bool) -> bool {
    let mut reissued = false;
    while taken(id) {
        *id = generate_id(prefix);
        reissued = true;
    }
    reissued
}

fn fallback_bytes() -> [u8; 4] {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    (nanos ^ count.rotate_left(16)).to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_id_has_prefix_and_hex_suffix() {
        let id = generate_id(PREFIX_FILE);
        let (prefix, suffix) = id.split_once('-').expect("dash separator");
        assert_eq!(prefix, "fil");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..200).map(|_| generate_id(PREFIX_TRIPLE)).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn colliding_id_is_reissued() {
        let taken: HashSet<String> = ["trp-00000000".to_string()].into();
        let mut id = "trp-00000000".to_string();
        assert!(reissue_if_taken(&mut id, PREFIX_TRIPLE, |c| taken.contains(c)));
        assert!(id.starts_with("trp-"));
        assert!(!taken.contains(&id));

        let mut free = "trp-11111111".to_string();
        assert!(!reissue_if_taken(&mut free, PREFIX_TRIPLE, |c| taken.contains(c)));
        assert_eq!(free, "trp-11111111");
    }

    #[test]
    fn fallback_bytes_vary_between_calls() {
        assert_ne!(fallback_bytes(), fallback_bytes());
    }
}
