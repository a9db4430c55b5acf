// Tick Bitmap
//
// One bit per spaced tick, packed into 256-bit words keyed by
// (tick / spacing) >> 8. A bit is set iff the tick has gross liquidity.

use tidalswap_math::{least_significant_bit, most_significant_bit, PoolError, U256};

use crate::store::BitmapStore;

/// Word index and bit index of a compressed tick
#[inline]
pub fn position(compressed: i32) -> (i16, u8) {
    ((compressed >> 8) as i16, (compressed & 0xff) as u8)
}

/// Toggle the bit for an initialized/uninitialized transition
pub fn flip_tick<S: BitmapStore>(
    store: &mut S,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), PoolError> {
    if tick % tick_spacing != 0 {
        return Err(PoolError::TickNotSpaced);
    }
    let (word_pos, bit_pos) = position(tick / tick_spacing);
    let mask = U256::one() << bit_pos;
    let word = store.word(word_pos);
    store.set_word(word_pos, word ^ mask);
    Ok(())
}

/// Next initialized tick in the same word as `tick`, or the word boundary.
///
/// With `lte` the search covers `tick` itself and everything to its left;
/// otherwise it starts one spaced tick to the right. The returned flag is
/// false when the word holds no initialized tick in that direction.
pub fn next_initialized_tick_within_one_word<S: BitmapStore>(
    store: &S,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> Result<(i32, bool), PoolError> {
    let compressed = tick.div_euclid(tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);
        // all the 1s at or to the right of bit_pos
        let mask = (U256::one() << bit_pos) - U256::one() + (U256::one() << bit_pos);
        let masked = store.word(word_pos) & mask;

        let initialized = !masked.is_zero();
        let next = if initialized {
            compressed - (bit_pos - most_significant_bit(masked)?) as i32
        } else {
            compressed - bit_pos as i32
        };
        Ok((next * tick_spacing, initialized))
    } else {
        let (word_pos, bit_pos) = position(compressed + 1);
        // all the 1s at or to the left of bit_pos
        let mask = !((U256::one() << bit_pos) - U256::one());
        let masked = store.word(word_pos) & mask;

        let initialized = !masked.is_zero();
        let next = if initialized {
            compressed + 1 + (least_significant_bit(masked)? - bit_pos) as i32
        } else {
            compressed + 1 + (u8::MAX - bit_pos) as i32
        };
        Ok((next * tick_spacing, initialized))
    }
}
