use bip39::{Language, Mnemonic};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use hex;
use rand::rngs::OsRng;
use rand::RngCore;

/// Ed25519 keypair used by sponsors to sign transfer authorizations and by
/// operator tooling to manage sponsor identities.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new Ed25519 keypair
    pub fn new() -> Self {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        KeyPair { signing_key }
    }

    /// Generate a new 12-word mnemonic
    pub fn generate_mnemonic() -> String {
        let mut entropy = [0u8; 16]; // 128 bits = 12 words
        let mut csprng = OsRng;
        csprng.fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy(&entropy).expect("Failed to create mnemonic");
        mnemonic.to_string()
    }

    /// Restore keypair from mnemonic
    pub fn from_mnemonic(phrase: &str) -> Result<Self, String> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
            .map_err(|e| format!("Invalid mnemonic: {}", e))?;
        let seed = mnemonic.to_seed("");

        // Use first 32 bytes for the Ed25519 secret
        let secret: [u8; 32] = seed[0..32]
            .try_into()
            .map_err(|_| "seed too short".to_string())?;
        let signing_key = SigningKey::from_bytes(&secret);

        Ok(KeyPair { signing_key })
    }

    /// Sign a message with the private key
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Verify a signature against a message using this keypair's public key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.signing_key
            .verifying_key()
            .verify(message, signature)
            .is_ok()
    }

    /// Get the public key
    pub fn public_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a message and return hex string
    pub fn sign_hex(&self, message: &[u8]) -> String {
        let signature = self.sign(message);
        hex::encode(signature.to_bytes())
    }

    /// Get public key as hex string
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key().to_bytes())
    }
}

/// Verify a signature against a message with a provided public key (hex)
pub fn verify_with_pubkey_hex(message: &[u8], signature_hex: &str, pubkey_hex: &str) -> bool {
    let (Ok(sig_bytes), Ok(pk_bytes)) = (hex::decode(signature_hex), hex::decode(pubkey_hex))
    else {
        return false;
    };
    let Ok(sig_arr) = <[u8; 64]>::try_from(sig_bytes.as_slice()) else {
        return false;
    };
    let Ok(pk_arr) = <[u8; 32]>::try_from(pk_bytes.as_slice()) else {
        return false;
    };
    let signature = Signature::from_bytes(&sig_arr);
    match VerifyingKey::from_bytes(&pk_arr) {
        Ok(pubkey) => pubkey.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_hex_roundtrip() {
        let kp = KeyPair::new();
        let msg = b"authorization payload";
        let sig_hex = kp.sign_hex(msg);

        assert!(verify_with_pubkey_hex(msg, &sig_hex, &kp.public_key_hex()));
        assert!(!verify_with_pubkey_hex(b"tampered", &sig_hex, &kp.public_key_hex()));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let kp = KeyPair::new();
        let other = KeyPair::new();
        let sig_hex = kp.sign_hex(b"msg");
        assert!(!verify_with_pubkey_hex(b"msg", &sig_hex, &other.public_key_hex()));
    }

    #[test]
    fn test_mnemonic_restore_is_deterministic() {
        let phrase = KeyPair::generate_mnemonic();
        let a = KeyPair::from_mnemonic(&phrase).unwrap();
        let b = KeyPair::from_mnemonic(&phrase).unwrap();
        assert_eq!(a.public_key_hex(), b.public_key_hex());
    }
}
