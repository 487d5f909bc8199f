//! 64-bit Rabin fingerprint (CRC-64-AVRO) over canonical schema text.

/// Fingerprint of the empty input; also the polynomial seed.
pub const EMPTY_FINGERPRINT: u64 = 0xc15d_213a_a4d7_a795;

const TABLE: [u64; 256] = build_table();

const fn build_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0;
    while i < 256 {
        let mut fp = i as u64;
        let mut bit = 0;
        while bit < 8 {
            fp = (fp >> 1) ^ (EMPTY_FINGERPRINT & 0u64.wrapping_sub(fp & 1));
            bit += 1;
        }
        table[i] = fp;
        i += 1;
    }
    table
}

/// Compute the 64-bit Rabin fingerprint of `bytes`.
pub fn fingerprint64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(EMPTY_FINGERPRINT, |fp, &b| {
        (fp >> 8) ^ TABLE[((fp ^ u64::from(b)) & 0xff) as usize]
    })
}
