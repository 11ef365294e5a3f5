use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Recompute the gateway's payment signature: HMAC-SHA256 over
/// `"{gateway_order_id}|{gateway_payment_id}"` keyed with the merchant
/// secret, hex encoded.
///
/// Note: new_from_slice only fails for algorithms with key length
/// constraints. SHA256 accepts any key length, so this is infallible in
/// practice.
pub fn sign_payment(secret: &str, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    let data = format!("{}|{}", gateway_order_id, gateway_payment_id);
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts any key length");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compare a caller-supplied signature against the recomputed one.
///
/// The comparison is constant-time; any mismatch means the confirmation was
/// not produced by the gateway holding the shared secret.
pub fn verify_payment(
    secret: &str,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature: &str,
) -> bool {
    let expected = sign_payment(secret, gateway_order_id, gateway_payment_id);
    subtle::ConstantTimeEq::ct_eq(expected.as_bytes(), signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_payment_format() {
        let sig = sign_payment("secret", "order_abc", "pay_xyz");

        assert_eq!(sig.len(), 64, "HMAC-SHA256 hex digest is 64 chars");
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_payment_deterministic() {
        let sig1 = sign_payment("secret", "order_abc", "pay_xyz");
        let sig2 = sign_payment("secret", "order_abc", "pay_xyz");

        assert_eq!(sig1, sig2, "same inputs should produce same signature");
    }

    #[test]
    fn test_sign_payment_different_secrets() {
        let sig1 = sign_payment("secret1", "order_abc", "pay_xyz");
        let sig2 = sign_payment("secret2", "order_abc", "pay_xyz");

        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_sign_payment_single_byte_change() {
        let sig1 = sign_payment("secret", "order_abc", "pay_xyz");
        let sig2 = sign_payment("secret", "order_abd", "pay_xyz");
        let sig3 = sign_payment("secret", "order_abc", "pay_xyy");

        assert_ne!(sig1, sig2);
        assert_ne!(sig1, sig3);
    }

    #[test]
    fn test_verify_payment_valid() {
        let sig = sign_payment("secret", "order_abc", "pay_xyz");

        assert!(verify_payment("secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_verify_payment_swapped_ids() {
        // A signature computed over swapped order/payment ids must not pass.
        let sig = sign_payment("secret", "pay_xyz", "order_abc");

        assert!(!verify_payment("secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_verify_payment_tampered_signature() {
        let mut sig = sign_payment("secret", "order_abc", "pay_xyz");
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });

        assert!(!verify_payment("secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_verify_payment_malformed() {
        assert!(!verify_payment("secret", "order_abc", "pay_xyz", ""));
        assert!(!verify_payment(
            "secret",
            "order_abc",
            "pay_xyz",
            "not_a_valid_signature"
        ));
    }
}
