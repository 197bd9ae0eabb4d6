//! Deterministic tie-break jitter (spec §8, invariant 12): a SHA-256-based
//! function of the team name in `[0, 0.009)`, used only to break exact ties
//! on `weighted_total` before falling back to name ordering.

use sha2::{Digest, Sha256};

const JITTER_SPAN: f64 = 0.009;

/// `stable_jitter(name)`: deterministic, in `[0, JITTER_SPAN)`, independent
/// of process/run — same name always yields the same jitter.
pub fn stable_jitter(name: &str) -> f64 {
    let digest = Sha256::digest(name.to_ascii_lowercase().as_bytes());
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&digest[..4]);
    let n = u32::from_be_bytes(buf);
    (n as f64 / u32::MAX as f64) * JITTER_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_is_deterministic_and_bounded() {
        let a = stable_jitter("Alpha Squad");
        let b = stable_jitter("Alpha Squad");
        assert_eq!(a, b);
        assert!((0.0..JITTER_SPAN).contains(&a));
    }

    #[test]
    fn jitter_is_case_insensitive() {
        assert_eq!(stable_jitter("Alpha"), stable_jitter("ALPHA"));
    }

    #[test]
    fn different_names_usually_differ() {
        assert_ne!(stable_jitter("Alpha"), stable_jitter("Zeta"));
    }
}
