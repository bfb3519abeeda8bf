//! CRC-8 payload checksum ("OC8").
//!
//! MSB-first, polynomial `0x07`, initial value `0x00`, no input/output
//! reflection and no final XOR.

/// Default generator polynomial (x^8 + x^2 + x + 1).
pub const DEFAULT_POLYNOMIAL: u8 = 0x07;

/// Default initial register value.
pub const DEFAULT_INITIAL: u8 = 0x00;

const TABLE: [u8; 256] = build_table(DEFAULT_POLYNOMIAL);

const fn build_table(polynomial: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ polynomial
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Checksum `data` with the default polynomial and initial value.
pub fn checksum8(data: &[u8]) -> u8 {
    data.iter()
        .fold(DEFAULT_INITIAL, |crc, &byte| TABLE[(crc ^ byte) as usize])
}

/// Checksum `data` bit by bit with an explicit polynomial and initial value.
pub fn checksum8_with(data: &[u8], polynomial: u8, initial: u8) -> u8 {
    let mut crc = initial;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ polynomial
            } else {
                crc << 1
            };
        }
    }
    crc
}
