//! # Twostep Auth TOTP
//!
//! Time-based one-time-code generation and verification.
//!
//! Codes are derived per RFC 4226/6238: an HMAC-SHA1 over the big-endian
//! time counter, dynamically truncated to a fixed-length decimal code.
//! Verification tolerates one full step of clock skew in either
//! direction so a code does not flicker invalid at a step boundary, and
//! compares candidates in constant time.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::{Choice, ConstantTimeEq};

type HmacSha1 = Hmac<Sha1>;

const SECRET_ALPHABET: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

/// Verifies time-based one-time codes against a base32 shared secret.
#[derive(Debug, Clone)]
pub struct TotpVerifier {
    /// Number of decimal digits per code.
    digits: u32,
    /// Time step in seconds.
    step_secs: u64,
}

impl TotpVerifier {
    /// Creates a verifier with the given code length and time step.
    pub fn new(digits: u32, step_secs: u64) -> Self {
        Self { digits, step_secs }
    }

    /// Number of decimal digits per code.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Time step in seconds.
    pub fn step_secs(&self) -> u64 {
        self.step_secs
    }

    /// Generates a new shared secret: 20 random bytes, base32-encoded
    /// without padding.
    pub fn generate_secret(&self) -> String {
        use rand::RngCore;
        let mut rng = rand::thread_rng();
        let mut secret = vec![0u8; 20];
        rng.fill_bytes(&mut secret);
        base32::encode(SECRET_ALPHABET, &secret)
    }

    /// Computes the code for the given secret at the given Unix time.
    ///
    /// Returns `None` when the secret does not decode as base32.
    pub fn code_at(&self, secret: &str, time: u64) -> Option<String> {
        let key = base32::decode(SECRET_ALPHABET, secret)?;
        Some(self.hotp(&key, time / self.step_secs))
    }

    /// Checks a candidate code against the secret at the given Unix time.
    ///
    /// The counters one step before and after the derived one are
    /// accepted as well. An absent-length, non-numeric, or otherwise
    /// malformed candidate fails before any HMAC is computed; every
    /// code comparison is constant-time.
    pub fn verify_at(&self, secret: &str, candidate: &str, time: u64) -> bool {
        if candidate.len() != self.digits as usize
            || !candidate.bytes().all(|b| b.is_ascii_digit())
        {
            return false;
        }
        let Some(key) = base32::decode(SECRET_ALPHABET, secret) else {
            return false;
        };

        let counter = (time / self.step_secs) as i64;
        let mut matched = Choice::from(0u8);
        for offset in [-1i64, 0, 1] {
            let Some(counter) = counter.checked_add(offset).filter(|c| *c >= 0) else {
                continue;
            };
            let expected = self.hotp(&key, counter as u64);
            matched |= expected.as_bytes().ct_eq(candidate.as_bytes());
        }
        matched.into()
    }

    /// Checks a candidate code against the secret at the current time.
    pub fn verify(&self, secret: &str, candidate: &str) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.verify_at(secret, candidate, now)
    }

    /// RFC 4226 HOTP: HMAC-SHA1 over the counter, dynamic truncation,
    /// zero-padded decimal output.
    fn hotp(&self, key: &[u8], counter: u64) -> String {
        let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = u32::from_be_bytes([
            digest[offset] & 0x7f,
            digest[offset + 1],
            digest[offset + 2],
            digest[offset + 3],
        ]);
        let code = binary % 10u32.pow(self.digits);
        format!("{:0>width$}", code, width = self.digits as usize)
    }
}

impl Default for TotpVerifier {
    fn default() -> Self {
        Self::new(6, 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Base32 of the RFC 4226/6238 reference secret "12345678901234567890".
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn test_rfc_reference_vector() {
        // RFC 6238, time 59s: counter 1, six-digit code 287082.
        let verifier = TotpVerifier::default();
        assert_eq!(verifier.code_at(RFC_SECRET, 59), Some("287082".to_string()));
        assert!(verifier.verify_at(RFC_SECRET, "287082", 59));
    }

    #[test]
    fn test_round_trip_within_skew() {
        let verifier = TotpVerifier::default();
        let secret = verifier.generate_secret();
        let code = verifier.code_at(&secret, 1_000_000).unwrap();

        assert!(verifier.verify_at(&secret, &code, 1_000_000 - 30));
        assert!(verifier.verify_at(&secret, &code, 1_000_000));
        assert!(verifier.verify_at(&secret, &code, 1_000_000 + 30));
        assert!(!verifier.verify_at(&secret, &code, 1_000_000 + 90));
    }

    #[test]
    fn test_rejects_code_from_other_secret() {
        let verifier = TotpVerifier::default();
        let secret = verifier.generate_secret();
        let other = verifier.generate_secret();
        let code = verifier.code_at(&other, 1_000_000).unwrap();

        assert!(!verifier.verify_at(&secret, &code, 1_000_000));
    }

    #[test]
    fn test_rejects_malformed_candidates() {
        let verifier = TotpVerifier::default();
        assert!(!verifier.verify_at(RFC_SECRET, "", 59));
        assert!(!verifier.verify_at(RFC_SECRET, "123", 59));
        assert!(!verifier.verify_at(RFC_SECRET, "28708a", 59));
        assert!(!verifier.verify_at(RFC_SECRET, "2870822", 59));
    }

    #[test]
    fn test_undecodable_secret_fails_closed() {
        let verifier = TotpVerifier::default();
        assert_eq!(verifier.code_at("not base32!", 59), None);
        assert!(!verifier.verify_at("not base32!", "287082", 59));
    }

    #[test]
    fn test_secret_generation() {
        let verifier = TotpVerifier::default();
        let secret = verifier.generate_secret();

        // Base32 encoded 20 bytes = 32 characters
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_custom_digit_count() {
        let verifier = TotpVerifier::new(8, 30);
        // RFC 6238, time 59s, eight digits: 94287082.
        assert_eq!(
            verifier.code_at(RFC_SECRET, 59),
            Some("94287082".to_string())
        );
        assert!(!verifier.verify_at(RFC_SECRET, "287082", 59));
    }
}
