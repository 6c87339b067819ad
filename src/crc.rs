//! Table-driven CRC-32 (reflected, polynomial `0xEDB88320`)
//!
//! This is the checksum variant PNG mandates for every chunk. The engine only
//! runs the update step; seeding with [`CRC_SEED`] and the final XOR with
//! [`CRC_FINAL_XOR`] are left to the caller so a checksum can be fed in
//! several pieces (chunk type first, then data).

/// Reflected CRC-32 polynomial
pub const CRC_POLYNOMIAL: u32 = 0xEDB8_8320;

/// Initial register value for a PNG chunk CRC
pub const CRC_SEED: u32 = 0xFFFF_FFFF;

/// Value XORed into the register after the last byte
pub const CRC_FINAL_XOR: u32 = 0xFFFF_FFFF;

/// Lookup table, built at compile time
pub static CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            if c & 1 != 0 {
                c = (c >> 1) ^ CRC_POLYNOMIAL;
            } else {
                c >>= 1;
            }
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Run the CRC-32 update step over `bytes`, starting from `initial`
///
/// No seeding or final XOR is applied. Total over any input.
pub fn checksum(initial: u32, bytes: &[u8]) -> u32 {
    bytes.iter().fold(initial, |crc, &byte| {
        CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8)
    })
}
