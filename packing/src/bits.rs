//! MSB-first bit cursor over a byte buffer.

/// Appends bit fields to a growable byte buffer, most significant bit first.
#[derive(Default)]
pub struct BitWriter {
    output: Vec<u8>,
    buf: u8,
    bits_used: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            buf: 0,
            bits_used: 0,
        }
    }

    /// Writes the low `count` bits of `value` (at most 64).
    pub fn write_bits(&mut self, value: u64, count: usize) {
        debug_assert!(count <= 64);
        (0..count).rev().for_each(|i| self.push_bit((value >> i) & 1 == 1));
    }

    /// Writes `count` zero bits.
    pub fn pad_zeros(&mut self, count: usize) {
        (0..count).for_each(|_| self.push_bit(false));
    }

    /// Number of bits written so far.
    pub fn bits_written(&self) -> usize {
        self.output.len() * 8 + self.bits_used as usize
    }

    /// Flushes a trailing partial byte, zero-filled on the right.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_used > 0 {
            self.output.push(self.buf << (8 - self.bits_used));
        }
        self.output
    }

    #[inline(always)]
    fn push_bit(&mut self, bit: bool) {
        self.buf = (self.buf << 1) | bit as u8;
        self.bits_used += 1;
        if self.bits_used == 8 {
            self.output.push(self.buf);
            self.buf = 0;
            self.bits_used = 0;
        }
    }
}

/// Reads bit fields written by [`BitWriter`].
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Reads `count` bits (at most 64), or `None` past the end of the data.
    pub fn read_bits(&mut self, count: usize) -> Option<u64> {
        debug_assert!(count <= 64);
        if self.pos + count > self.data.len() * 8 {
            return None;
        }
        let mut value: u64 = 0;
        (0..count).for_each(|_| {
            let bit: u8 = (self.data[self.pos >> 3] >> (7 - (self.pos & 7))) & 1;
            value = (value << 1) | bit as u64;
            self.pos += 1;
        });
        Some(value)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }
}
