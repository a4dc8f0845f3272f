//! BIP32-Ed25519 (Khovratovich/Law, CIP-3) hierarchical child-key derivation.
//!
//! The scalar arithmetic here is deliberately hand-rolled: `k_L` is carried
//! forward *unreduced* modulo the Ed25519 group order between derivation
//! rounds, which `curve25519_dalek::Scalar` cannot represent (it always
//! reduces on construction). Only the final scalar-multiply-by-base-point
//! step is delegated to the curve library, since that operation is
//! inherently a computation modulo the base point's order regardless of how
//! the scalar is represented.

use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::scalar::Scalar;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::masterkey::MasterKey;

type HmacSha512 = Hmac<Sha512>;

/// Errors raised during child-key derivation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DerivationError {
    #[error("derived scalar k_L is congruent to 0 mod the curve order; node is invalid")]
    ZeroScalar,
    #[error("malformed derivation path component: {0:?}")]
    BadPathComponent(String),
}

/// An extended Ed25519-BIP32 key node: 64-byte private scalar pair, its
/// compressed public point, and the chain code. The 64-byte private part is
/// zeroized on drop; the public point and chain code are not secret.
#[derive(Clone)]
pub struct ExtendedKeyNode {
    k: Private64,
    a: [u8; 32],
    c: [u8; 32],
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct Private64([u8; 64]);

impl ExtendedKeyNode {
    /// Build the root node from an Icarus master key.
    pub fn from_master(master: &MasterKey) -> Self {
        let mut k = [0u8; 64];
        k[..32].copy_from_slice(master.k_l());
        k[32..].copy_from_slice(master.k_r());
        let a = encode_point(master.k_l());
        Self {
            k: Private64(k),
            a,
            c: master.chain_code().try_into().expect("32 bytes"),
        }
    }

    /// `k_L`, the 32-byte unreduced scalar.
    pub fn k_l(&self) -> &[u8] {
        &self.k.0[..32]
    }

    /// `k_R`.
    pub fn k_r(&self) -> &[u8] {
        &self.k.0[32..]
    }

    /// Compressed Ed25519 public point, `k_L * G`.
    pub fn public_key(&self) -> &[u8; 32] {
        &self.a
    }

    /// Chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.c
    }

    /// Derive the child node at index `i`. `i < 2^31` is a soft derivation
    /// (uses the parent public point); `i >= 2^31` is hardened (uses the
    /// parent private scalar pair).
    pub fn derive_child(&self, i: u32) -> Result<Self, DerivationError> {
        let i_le = i.to_le_bytes();
        let hardened = i >= 1 << 31;
        let tagged_input: &[u8] = if hardened { &self.k.0[..] } else { &self.a[..] };
        let (z_tag, c_tag): (u8, u8) = if hardened { (0x00, 0x01) } else { (0x02, 0x03) };

        let z = hmac_sha512(&self.c, &[&[z_tag], tagged_input, &i_le]);
        let c_hash = hmac_sha512(&self.c, &[&[c_tag], tagged_input, &i_le]);

        let z_l = &z[..28];
        let z_r = &z[32..64];

        let k_l_child = add_8x_plus(z_l, self.k_l());
        if is_zero_mod_order(&k_l_child) {
            return Err(DerivationError::ZeroScalar);
        }
        let k_r_child = add_mod_2_256(z_r, self.k_r());

        let mut k_child = [0u8; 64];
        k_child[..32].copy_from_slice(&k_l_child);
        k_child[32..].copy_from_slice(&k_r_child);

        let a_child = encode_point(&k_l_child);
        let c_child: [u8; 32] = c_hash[32..64].try_into().expect("32 bytes");

        Ok(Self {
            k: Private64(k_child),
            a: a_child,
            c: c_child,
        })
    }

    /// Walk a `/`-separated derivation path (e.g. `1852'/1815'/0'/2/0`),
    /// returning the final node.
    pub fn derive_path(&self, path: &str) -> Result<Self, DerivationError> {
        let mut node = self.clone();
        for component in path.split('/') {
            if component.is_empty() {
                return Err(DerivationError::BadPathComponent(component.to_string()));
            }
            let (digits, hardened) = match component.strip_suffix('\'') {
                Some(d) => (d, true),
                None => (component, false),
            };
            let base: u32 = digits
                .parse()
                .map_err(|_| DerivationError::BadPathComponent(component.to_string()))?;
            let index = if hardened { base | (1 << 31) } else { base };
            node = node.derive_child(index)?;
        }
        Ok(node)
    }
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts any key length");
    for p in parts {
        mac.update(p);
    }
    mac.finalize().into_bytes().into()
}

/// `k_L_child = z_l * 8 + k_parent_l`, as a little-endian 32-byte unreduced
/// value (carry out of the top byte is discarded, matching the reference
/// derivation: the result is known to stay within 32 bytes for valid keys).
fn add_8x_plus(z_l: &[u8], k_parent_l: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry: u16 = 0;
    for i in 0..28 {
        let r = u16::from(k_parent_l[i]) + (u16::from(z_l[i]) << 3) + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    for i in 28..32 {
        let r = u16::from(k_parent_l[i]) + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    out
}

/// `(a + b) mod 2^256`, little-endian bytes.
fn add_mod_2_256(a: &[u8], b: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry: u16 = 0;
    for i in 0..32 {
        let r = u16::from(a[i]) + u16::from(b[i]) + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    out
}

fn is_zero_mod_order(k_l: &[u8; 32]) -> bool {
    Scalar::from_bytes_mod_order(*k_l) == Scalar::ZERO
}

/// Encode `scalar * G` as a compressed Edwards point. `scalar` need not be
/// reduced mod the group order: multiplying the base point by an unreduced
/// scalar and by its reduction are the same group element, since `G` has
/// order `n` and `from_bytes_mod_order` only folds off multiples of `n`.
fn encode_point(scalar_le: &[u8]) -> [u8; 32] {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&scalar_le[..32]);
    let s = Scalar::from_bytes_mod_order(buf);
    (s * ED25519_BASEPOINT_POINT).compress().to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex32(s: &str) -> [u8; 32] {
        let v = hex::decode(s).unwrap();
        v.try_into().unwrap()
    }

    #[test]
    fn test_add_8x_plus_no_overflow() {
        let z_l = [0u8; 28];
        let k = [1u8; 32];
        assert_eq!(add_8x_plus(&z_l, &k), k);
    }

    #[test]
    fn test_add_mod_2_256_wraps() {
        let a = [0xffu8; 32];
        let b = [1u8; 32];
        let r = add_mod_2_256(&a, &b);
        assert_eq!(r[0], 0);
        assert_eq!(r[1], 1);
    }

    #[test]
    fn test_derive_path_empty_component_rejected() {
        let master = MasterKey::from_entropy(&[0u8; 16]);
        let root = ExtendedKeyNode::from_master(&master);
        assert!(matches!(
            root.derive_path("1852'//0'"),
            Err(DerivationError::BadPathComponent(_))
        ));
    }

    #[test]
    fn test_derive_path_stake_key_succeeds() {
        let master = MasterKey::from_entropy(&[0u8; 16]);
        let root = ExtendedKeyNode::from_master(&master);
        let node = root.derive_path("1852'/1815'/0'/2/0").unwrap();
        assert_eq!(node.public_key().len(), 32);
    }

    #[test]
    fn test_hex32_helper_roundtrips() {
        let mut expected = [0u8; 32];
        expected[0] = 1;
        let hex_str = hex::encode(expected);
        assert_eq!(hex32(&hex_str), expected);
    }
}
