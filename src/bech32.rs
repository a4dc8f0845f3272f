//! BECH32 (BIP-173) encoding and decoding.

use thiserror::Error;

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Errors raised by [`encode`] and [`decode`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Bech32Error {
    #[error("hrp must not be empty")]
    EmptyHrp,
    #[error("hrp contains a character outside [0x21,0x7e]: {0:?}")]
    BadHrpChar(char),
    #[error("mixed-case bech32 string")]
    MixedCase,
    #[error("no '1' separator found")]
    NoSeparator,
    #[error("data part shorter than 6 characters")]
    DataTooShort,
    #[error("data part contains a character outside the bech32 charset: {0:?}")]
    BadDataChar(char),
    #[error("checksum verification failed")]
    BadChecksum,
}

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ff_ffff) << 5) ^ u32::from(v);
        for i in 0..5 {
            if (top >> i) & 1 == 1 {
                chk ^= GENERATOR[i];
            }
        }
    }
    chk
}

fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut v = Vec::with_capacity(bytes.len() * 2 + 1);
    v.extend(bytes.iter().map(|b| b >> 5));
    v.push(0);
    v.extend(bytes.iter().map(|b| b & 31));
    v
}

fn create_checksum(hrp: &str, data5: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data5);
    values.extend_from_slice(&[0u8; 6]);
    let poly = polymod(&values) ^ 1;
    let mut checksum = [0u8; 6];
    for (i, c) in checksum.iter_mut().enumerate() {
        *c = ((poly >> (5 * (5 - i))) & 31) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &str, data5: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data5);
    polymod(&values) == 1
}

/// Regroup an 8-bit byte stream into 5-bit groups, MSB first, zero-padding
/// the final partial group.
fn bytes_to_5bit(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity((data.len() * 8).div_ceil(5));
    for &b in data {
        acc = (acc << 8) | u32::from(b);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 31) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 31) as u8);
    }
    out
}

/// Inverse of [`bytes_to_5bit`], dropping a trailing incomplete byte group.
fn bits5_to_bytes(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * 5 / 8);
    for &v in data {
        acc = (acc << 5) | u32::from(v);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    out
}

/// Encode `data` under human-readable part `hrp`.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, Bech32Error> {
    if hrp.is_empty() {
        return Err(Bech32Error::EmptyHrp);
    }
    for c in hrp.chars() {
        if !('\u{21}'..='\u{7e}').contains(&c) {
            return Err(Bech32Error::BadHrpChar(c));
        }
    }
    let hrp_lower = hrp.to_ascii_lowercase();
    let data5 = bytes_to_5bit(data);
    let checksum = create_checksum(&hrp_lower, &data5);

    let mut out = String::with_capacity(hrp.len() + 1 + data5.len() + 6);
    out.push_str(hrp);
    out.push('1');
    for &v in data5.iter().chain(checksum.iter()) {
        out.push(CHARSET[v as usize] as char);
    }
    Ok(out)
}

/// Decode a bech32 string, returning the original `(hrp, data)`.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower {
        return Err(Bech32Error::MixedCase);
    }
    let lower = s.to_ascii_lowercase();

    let sep = lower.rfind('1').ok_or(Bech32Error::NoSeparator)?;
    let (hrp, rest) = lower.split_at(sep);
    let data_part = &rest[1..];

    if hrp.is_empty() {
        return Err(Bech32Error::EmptyHrp);
    }
    for c in hrp.chars() {
        if !('\u{21}'..='\u{7e}').contains(&c) {
            return Err(Bech32Error::BadHrpChar(c));
        }
    }
    if data_part.len() < 6 {
        return Err(Bech32Error::DataTooShort);
    }

    let mut data5 = Vec::with_capacity(data_part.len());
    for c in data_part.chars() {
        let v = CHARSET
            .iter()
            .position(|&x| x as char == c)
            .ok_or(Bech32Error::BadDataChar(c))?;
        data5.push(v as u8);
    }

    if !verify_checksum(hrp, &data5) {
        return Err(Bech32Error::BadChecksum);
    }

    let payload5 = &data5[..data5.len() - 6];
    let data = bits5_to_bytes(payload5);
    Ok((hrp.to_string(), data))
}
