use std::cmp::Ordering;

use rug::Integer;
use rug::integer::Order;

use crate::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::layout::PackingLayout;

/// Packs `values` into blocks of `layout.block_bytes()` bytes.
///
/// Each block starts with `layout.guard_bits()` zero bits followed by
/// `layout.values_per_block()` fields. Slots past the end of `values` are
/// zero, so the last block is as long as the others. An empty input packs to
/// no blocks.
pub fn pack<T: Copy + Into<u64>>(values: &[T], layout: &PackingLayout) -> Result<Vec<Vec<u8>>> {
    let value_bits: usize = layout.value_bits();
    let max: u64 = layout.max_value();
    let per_block: usize = layout.values_per_block();

    let blocks: Vec<Vec<u8>> = (0..layout.block_count(values.len()))
        .map(|b| {
            let mut writer: BitWriter = BitWriter::with_capacity(layout.block_bytes());
            writer.pad_zeros(layout.guard_bits());
            for index in b * per_block..(b + 1) * per_block {
                let value: u64 = values.get(index).map_or(0, |&v| v.into());
                if value > max {
                    return Err(Error::ValueTooWide { index, value, value_bits });
                }
                writer.write_bits(value, value_bits);
            }
            debug_assert_eq!(writer.bits_written(), layout.modulus_bits());
            Ok(writer.finish())
        })
        .collect::<Result<_>>()?;

    tracing::debug!(values = values.len(), blocks = blocks.len(), "packed values");
    Ok(blocks)
}

/// Inverse of [`pack`]: returns `blocks.len() * values_per_block` values,
/// including the zero padding of the last block.
pub fn unpack<B: AsRef<[u8]>>(blocks: &[B], layout: &PackingLayout) -> Result<Vec<u64>> {
    let mut values: Vec<u64> = Vec::with_capacity(blocks.len() * layout.values_per_block());
    for (index, block) in blocks.iter().enumerate() {
        let block: &[u8] = block.as_ref();
        if block.len() != layout.block_bytes() {
            return Err(Error::BlockLength {
                index,
                got: block.len(),
                expected: layout.block_bytes(),
            });
        }
        let mut reader: BitReader = BitReader::new(block);
        let guard_clear: bool = (0..layout.guard_bits()).all(|_| reader.read_bits(1) == Some(0));
        if !guard_clear {
            return Err(Error::GuardBitsSet { index });
        }
        (0..layout.values_per_block()).for_each(|_| {
            // The block length was checked, every field is present.
            values.push(reader.read_bits(layout.value_bits()).unwrap_or_default());
        });
    }
    Ok(values)
}

/// Reads a block as a big-endian unsigned integer.
pub fn block_to_integer(block: &[u8]) -> Integer {
    Integer::from_digits(block, Order::Msf)
}

/// Writes `value` as a big-endian unsigned integer of exactly `bytes` bytes.
pub fn block_from_integer(value: &Integer, bytes: usize) -> Result<Vec<u8>> {
    let bits: u32 = value.significant_bits();
    if value.cmp0() == Ordering::Less || bits as usize > bytes * 8 {
        return Err(Error::IntegerTooWide { bits, bytes });
    }
    let digits: Vec<u8> = value.to_digits::<u8>(Order::Msf);
    let mut block: Vec<u8> = vec![0u8; bytes - digits.len()];
    block.extend_from_slice(&digits);
    Ok(block)
}
