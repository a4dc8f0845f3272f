//! CIP-19 Shelley address composition.

use blake2::digest::consts::U28;
use blake2::{Blake2b, Digest};
use thiserror::Error;

use crate::bech32;

type Blake2b224 = Blake2b<U28>;

/// Errors raised while composing an address.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressError {
    #[error("at least one of a payment key or a stake key is required")]
    NoKey,
    #[error(transparent)]
    Bech32(#[from] bech32::Bech32Error),
}

fn hash28(pubkey: &[u8]) -> [u8; 28] {
    Blake2b224::digest(pubkey).into()
}

/// Compose a bech32-encoded CIP-19 address from an optional payment key and
/// an optional stake key (both 32-byte compressed Ed25519 points).
///
/// - Only a stake key: stake-only address, header `0xE1`, hrp `"stake"`.
/// - Only a payment key: enterprise address, header `0x61`, hrp `"addr"`.
/// - Both: base address, header `0x01`, hrp `"addr"`.
pub fn compose(payment_pub: Option<&[u8]>, stake_pub: Option<&[u8]>) -> Result<String, AddressError> {
    let (header, payload, hrp): (u8, Vec<u8>, &str) = match (payment_pub, stake_pub) {
        (None, None) => return Err(AddressError::NoKey),
        (None, Some(stake)) => (0xE1, hash28(stake).to_vec(), "stake"),
        (Some(payment), None) => (0x61, hash28(payment).to_vec(), "addr"),
        (Some(payment), Some(stake)) => {
            let mut payload = hash28(payment).to_vec();
            payload.extend_from_slice(&hash28(stake));
            (0x01, payload, "addr")
        }
    };

    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(header);
    data.extend_from_slice(&payload);
    Ok(bech32::encode(hrp, &data)?)
}

/// Compose the stake-only address for a 32-byte stake public key.
pub fn stake_address(stake_pub: &[u8]) -> Result<String, AddressError> {
    compose(None, Some(stake_pub))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_rejected() {
        assert_eq!(compose(None, None), Err(AddressError::NoKey));
    }

    #[test]
    fn test_stake_address_header_and_hrp() {
        let stake_pub = [0x42u8; 32];
        let addr = stake_address(&stake_pub).unwrap();
        assert!(addr.starts_with("stake1"));
    }

    #[test]
    fn test_enterprise_address_hrp() {
        let payment_pub = [0x11u8; 32];
        let addr = compose(Some(&payment_pub), None).unwrap();
        assert!(addr.starts_with("addr1"));
    }

    #[test]
    fn test_base_address_hrp() {
        let payment_pub = [0x11u8; 32];
        let stake_pub = [0x22u8; 32];
        let addr = compose(Some(&payment_pub), Some(&stake_pub)).unwrap();
        assert!(addr.starts_with("addr1"));
    }
}
