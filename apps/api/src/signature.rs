//! Webhook signature verification.
//!
//! Paystack signs every webhook delivery with HMAC-SHA512 over the raw
//! request body, keyed by the account's secret key, and sends the
//! lowercase-hex MAC in the `x-paystack-signature` header.
//!
//! Verification MUST run against the raw body bytes, before any JSON
//! parsing: re-serialized JSON is not byte-identical and would never match.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the gateway's signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Verifies a webhook signature against the raw request body.
///
/// ## Arguments
/// * `secret` - The Paystack secret key
/// * `body` - The raw request body bytes, exactly as received
/// * `signature` - The hex MAC from the signature header
///
/// Comparison is constant time so a mismatch reveals nothing about how
/// many leading characters were correct.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        // HMAC accepts keys of any length; this arm is unreachable with a
        // non-empty secret but we fail closed regardless.
        return false;
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "sk_test_secret";

    fn sign(body: &[u8]) -> String {
        let mut mac = HmacSha512::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_accepted() {
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign(body);

        assert!(verify_signature(SECRET, body, &signature));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign(body);

        let tampered = br#"{"event":"charge.failure"}"#;
        assert!(!verify_signature(SECRET, tampered, &signature));
    }

    #[test]
    fn test_single_bit_flip_rejected() {
        let body = br#"{"event":"charge.success","data":{"reference":"PAY-1"}}"#;
        let mut signature = sign(body).into_bytes();
        // Flip one hex digit.
        signature[0] = if signature[0] == b'0' { b'1' } else { b'0' };
        let signature = String::from_utf8(signature).unwrap();

        assert!(!verify_signature(SECRET, body, &signature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign(body);

        assert!(!verify_signature("sk_live_other", body, &signature));
    }

    #[test]
    fn test_wrong_length_signature_rejected() {
        let body = br#"{}"#;
        assert!(!verify_signature(SECRET, body, "deadbeef"));
        assert!(!verify_signature(SECRET, body, ""));
    }
}
