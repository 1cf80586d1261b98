//! SM3 cryptographic hash function as defined in GB/T 32905-2016.
//!
//! A Merkle–Damgård construction over 512-bit blocks with a 256-bit
//! chaining value and a 64-round compression function.
//!
//! ```
//! use shangmi::sm3::Sm3;
//!
//! let digest = Sm3::new().chain_update(b"ab").chain_update(b"c").finalize();
//! assert_eq!(digest, Sm3::digest(b"abc"));
//! ```

use core::fmt::{self, Debug};

/// SM3 hash output.
pub type Hash = [u8; Sm3::OUTPUT_SIZE];

/// Initial chaining value.
const IV: [u32; 8] = [
    0x7380_166f,
    0x4914_b2b9,
    0x1724_42d7,
    0xda8a_0600,
    0xa96f_30bc,
    0x1631_38aa,
    0xe38d_ee4d,
    0xb0fb_0e4e,
];

/// Round constants `T_j <<< (j mod 32)`.
const T: [u32; 64] = {
    let mut t = [0u32; 64];
    let mut j = 0;

    while j < 64 {
        let tj: u32 = if j < 16 { 0x79cc_4519 } else { 0x7a87_9d8a };
        t[j] = tj.rotate_left(j as u32);
        j += 1;
    }

    t
};

/// SM3 hasher state.
#[derive(Clone)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; Sm3::BLOCK_SIZE],
    buffer_len: usize,
    /// Total message length in bytes.
    total_len: u64,
}

impl Sm3 {
    /// Digest size in bytes.
    pub const OUTPUT_SIZE: usize = 32;

    /// Compression block size in bytes.
    pub const BLOCK_SIZE: usize = 64;

    /// Create a new hasher.
    pub const fn new() -> Self {
        Self {
            state: IV,
            buffer: [0; Self::BLOCK_SIZE],
            buffer_len: 0,
            total_len: 0,
        }
    }

    /// Create a new hasher which has already absorbed `data`.
    pub fn new_with_prefix(data: impl AsRef<[u8]>) -> Self {
        Self::new().chain_update(data)
    }

    /// Compute the digest of `data` in one call.
    pub fn digest(data: impl AsRef<[u8]>) -> Hash {
        Self::new().chain_update(data).finalize()
    }

    /// Absorb `data`.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        let mut data = data.as_ref();
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.buffer_len > 0 {
            let take = (Self::BLOCK_SIZE - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < Self::BLOCK_SIZE {
                return;
            }

            let block = self.buffer;
            compress(&mut self.state, &block);
            self.buffer_len = 0;
        }

        let mut blocks = data.chunks_exact(Self::BLOCK_SIZE);

        for block in &mut blocks {
            let mut buf = [0u8; Self::BLOCK_SIZE];
            buf.copy_from_slice(block);
            compress(&mut self.state, &buf);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Absorb `data`, returning the updated hasher.
    #[must_use]
    pub fn chain_update(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data);
        self
    }

    /// Pad the message and return the digest.
    ///
    /// Padding appends a single `1` bit, zeros up to 448 mod 512 bits, and
    /// the message length in bits as a 64-bit big endian integer.
    pub fn finalize(mut self) -> Hash {
        let bit_len = self.total_len.wrapping_mul(8);
        let mut block = self.buffer;
        let mut len = self.buffer_len;

        block[len] = 0x80;
        len += 1;

        if len > Self::BLOCK_SIZE - 8 {
            block[len..].fill(0);
            compress(&mut self.state, &block);
            len = 0;
        }

        block[len..Self::BLOCK_SIZE - 8].fill(0);
        block[Self::BLOCK_SIZE - 8..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &block);

        let mut out = [0u8; Self::OUTPUT_SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        out
    }

    /// Return the digest and reset the hasher to its initial state.
    pub fn finalize_reset(&mut self) -> Hash {
        core::mem::take(self).finalize()
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Sm3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sm3 { ... }")
    }
}

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

#[inline(always)]
fn ff(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline(always)]
fn gg(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 { x ^ y ^ z } else { (x & y) | (!x & z) }
}

/// Compress one 512-bit block into the chaining value.
fn compress(state: &mut [u32; 8], block: &[u8; Sm3::BLOCK_SIZE]) {
    // message expansion
    let mut w = [0u32; 68];
    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }

    let mut w1 = [0u32; 64];
    for j in 0..64 {
        w1[j] = w[j] ^ w[j + 4];
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let a12 = a.rotate_left(12);
        let ss1 = a12.wrapping_add(e).wrapping_add(T[j]).rotate_left(7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff(a, b, c, j)
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(w1[j]);
        let tt2 = gg(e, f, g, j)
            .wrapping_add(h)
            .wrapping_add(ss1)
            .wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s ^= v;
    }
}
