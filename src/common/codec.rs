use super::{
    bitstream::BitStream,
    error::{QrError, QrResult},
    metadata::{ECLevel, Version},
};

// Byte mode encoder
//------------------------------------------------------------------------------

// Byte mode indicator, the only mode this crate emits
const MODE_INDICATOR: u8 = 0b0100;
const MODE_INDICATOR_BIT_LEN: usize = 4;

const TERMINATOR_MAX_BIT_LEN: usize = 4;

// Alternating padding codewords from the QR standard
const PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

/// Encodes `data` as a byte mode segment and resolves the smallest version
/// that holds it. When `ec_level` is `None` the highest level that still
/// fits the chosen version wins. The returned stream is padded out to the
/// full data codeword capacity.
pub fn encode(
    data: &[u8],
    ec_level: Option<ECLevel>,
    max_version: Version,
) -> QrResult<(BitStream, Version, ECLevel)> {
    let (version, ec_level) = find_version_and_level(data.len(), ec_level, max_version)?;

    let capacity = version.data_bit_capacity(ec_level);
    let mut bs = BitStream::new(capacity);
    push_header(&mut bs, data.len(), version);
    push_payload(&mut bs, data);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);

    assert!(
        bs.len() == bs.capacity(),
        "Encoded stream length doesn't match data capacity: Length {}, Capacity {}",
        bs.len(),
        bs.capacity()
    );

    Ok((bs, version, ec_level))
}

// Bit cost of the segment before terminator and padding
fn encoded_bit_len(data_len: usize, version: Version) -> usize {
    MODE_INDICATOR_BIT_LEN + version.char_count_bits() + (data_len << 3)
}

/// Scans versions in ascending order and picks the first that fits. Within
/// a version the error correction levels are tried strongest first, so the
/// smallest symbol always carries the most protection it can afford.
fn find_version_and_level(
    data_len: usize,
    ec_level: Option<ECLevel>,
    max_version: Version,
) -> QrResult<(Version, ECLevel)> {
    let levels: &[ECLevel] = match ec_level {
        Some(ecl) => &[ecl],
        None => &ECLevel::PRIORITY,
    };

    for v in 1..=*max_version {
        let version = Version::new(v);
        let required = encoded_bit_len(data_len, version);
        for &ecl in levels {
            if required <= version.data_bit_capacity(ecl) {
                return Ok((version, ecl));
            }
        }
    }

    // Report the loosest capacity still on the table
    let weakest = match ec_level {
        Some(ecl) => ecl,
        None => ECLevel::L,
    };
    Err(QrError::CapacityExceeded(max_version.byte_mode_capacity(weakest)))
}

fn push_header(bs: &mut BitStream, data_len: usize, version: Version) {
    bs.push_bits(MODE_INDICATOR, MODE_INDICATOR_BIT_LEN);
    bs.push_bits(data_len as u16, version.char_count_bits());
}

fn push_payload(bs: &mut BitStream, data: &[u8]) {
    if bs.len() & 7 == 0 {
        bs.extend(data);
    } else {
        for &b in data {
            bs.push_bits(b, 8);
        }
    }
}

fn push_terminator(bs: &mut BitStream) {
    let remaining = bs.capacity() - bs.len();
    bs.push_bits(0u8, remaining.min(TERMINATOR_MAX_BIT_LEN));
}

fn pad_remaining_capacity(bs: &mut BitStream) {
    let offset = bs.len() & 7;
    if offset != 0 {
        bs.push_bits(0u8, 8 - offset);
    }
    let remaining_codewords = (bs.capacity() - bs.len()) >> 3;
    for i in 0..remaining_codewords {
        bs.push_bits(PADDING_CODEWORDS[i & 1], 8);
    }
}
