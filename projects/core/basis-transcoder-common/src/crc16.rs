//! CRC-16 as used by `.basis` headers and payloads (polynomial 0x1021, MSB-first, inverted).

/// Computes the CRC-16 of `data`, continuing from `crc`.
///
/// Pass `0` as `crc` to start a new checksum.
#[inline]
pub fn crc16(data: &[u8], crc: u16) -> u16 {
    let mut crc = !crc;
    for &byte in data {
        let q = (byte as u16) ^ (crc >> 8);
        let k = (q >> 4) ^ q;
        crc = (((crc << 8) ^ k) ^ (k << 5)) ^ (k << 12);
    }
    !crc
}
