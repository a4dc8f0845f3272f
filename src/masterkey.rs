//! Icarus (CIP-3) master-key derivation: PBKDF2-HMAC-SHA512 over the
//! mnemonic entropy, followed by Ed25519-BIP32 bit-clamping.

use zeroize::{Zeroize, ZeroizeOnDrop};

const PBKDF2_ITERS: u32 = 4096;
const MASTER_KEY_LEN: usize = 96;

/// A 96-byte Icarus master key: `k_L(32) || k_R(32) || chaincode(32)`.
/// Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop, Clone)]
pub struct MasterKey([u8; MASTER_KEY_LEN]);

impl MasterKey {
    /// Derive the master key from raw BIP-39 entropy, no passphrase.
    pub fn from_entropy(entropy: &[u8]) -> Self {
        let mut output = [0u8; MASTER_KEY_LEN];
        pbkdf2::pbkdf2_hmac::<sha2::Sha512>(b"", entropy, PBKDF2_ITERS, &mut output);

        output[0] &= 0b1111_1000;
        output[31] &= 0b0001_1111;
        output[31] |= 0b0100_0000;

        Self(output)
    }

    /// `k_L || k_R`, 64 bytes.
    pub fn key(&self) -> &[u8] {
        &self.0[..64]
    }

    /// `k_L`, the 32-byte scalar used for point multiplication.
    pub fn k_l(&self) -> &[u8] {
        &self.0[..32]
    }

    /// `k_R`, the 32-byte nonce half of the extended key.
    pub fn k_r(&self) -> &[u8] {
        &self.0[32..64]
    }

    /// Chain code, 32 bytes.
    pub fn chain_code(&self) -> &[u8] {
        &self.0[64..96]
    }
}
