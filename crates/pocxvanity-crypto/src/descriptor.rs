//! Output descriptor checksum
//!
//! The 8-symbol checksum appended to descriptors as `desc#checksum`. Wallets
//! reject a descriptor whose checksum does not match this construction bit
//! for bit, so the tables and the polymod step must never change.

/// Characters a descriptor may contain, ordered so that `position & 31` is the
/// symbol and `position >> 5` its class (0, 1 or 2).
const INPUT_CHARSET: &[u8] =
    b"0123456789()[],'/*abcdefgh@:$%{}IJKLMNOPQRSTUVWXYZ&+-.;<=>?!^_|~ijklmnopqrstuvwxyzABCDEFGH`#\"\\ ";

/// Output alphabet (the Bech32 charset)
const CHECKSUM_CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const GENERATOR: [u64; 5] = [
    0xf5dee51989,
    0xa9fdca3312,
    0x1bab10e32d,
    0x3706b1677a,
    0x644d626ffd,
];

/// Number of symbols in a checksum
pub const CHECKSUM_LENGTH: usize = 8;

/// Reverse lookup from ASCII byte to charset position, `None` when absent
const INPUT_LOOKUP: [Option<u8>; 128] = build_lookup();

const fn build_lookup() -> [Option<u8>; 128] {
    let mut table = [None; 128];
    let mut i = 0;
    while i < INPUT_CHARSET.len() {
        table[INPUT_CHARSET[i] as usize] = Some(i as u8);
        i += 1;
    }
    table
}

fn position(c: char) -> Option<u64> {
    if c.is_ascii() {
        INPUT_LOOKUP[c as usize].map(u64::from)
    } else {
        None
    }
}

/// One step of the GF(32) polymod over a 40-bit accumulator
fn polymod(c: u64, value: u64) -> u64 {
    let c0 = c >> 35;
    let mut c = ((c & 0x7_ffff_ffff) << 5) ^ value;
    for (i, generator) in GENERATOR.iter().enumerate() {
        if (c0 >> i) & 1 == 1 {
            c ^= generator;
        }
    }
    c
}

/// Compute the 8-character checksum of a descriptor (without any `#` suffix).
///
/// Characters outside the descriptor charset are skipped: they contribute
/// nothing to the result. Any input, including the empty string, yields a
/// checksum.
pub fn descriptor_checksum(descriptor: &str) -> String {
    let mut c = 1u64;
    let mut class = 0u64;
    let mut class_count = 0;

    for pos in descriptor.chars().filter_map(position) {
        c = polymod(c, pos & 31);
        class = class * 3 + (pos >> 5);
        class_count += 1;
        if class_count == 3 {
            c = polymod(c, class);
            class = 0;
            class_count = 0;
        }
    }
    if class_count > 0 {
        c = polymod(c, class);
    }

    for _ in 0..CHECKSUM_LENGTH {
        c = polymod(c, 0);
    }
    c ^= 1;

    (0..CHECKSUM_LENGTH)
        .map(|j| CHECKSUM_CHARSET[((c >> (5 * (7 - j))) & 31) as usize] as char)
        .collect()
}

/// Append the checksum: `"{descriptor}#{checksum}"`
pub fn add_checksum(descriptor: &str) -> String {
    format!("{}#{}", descriptor, descriptor_checksum(descriptor))
}

/// Check a `desc#checksum` string.
///
/// Returns `false` when there is no `#` separator or the checksum differs.
pub fn verify_checksum(full: &str) -> bool {
    match full.rsplit_once('#') {
        Some((descriptor, checksum)) => {
            checksum.len() == CHECKSUM_LENGTH && descriptor_checksum(descriptor) == checksum
        }
        None => false,
    }
}
