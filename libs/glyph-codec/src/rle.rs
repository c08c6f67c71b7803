//! Run-length coding of zero bytes.
//!
//! Only runs of `0x00` are compressed. A zero byte is always followed by a count byte in
//! `1..=255` giving the length of the run it starts, and runs longer than 255 bytes are split.
//! Every other byte is stored as itself.
//!
//! ```text
//! [0x00, 0x00, 0x00, 0x7E] -> [0x00, 3, 0x7E]
//! ```

use alloc::vec::Vec;

/// The longest zero run a single escape can describe.
pub const MAX_RUN: u8 = u8::MAX;

/// Compresses runs of zero bytes in `bytes`.
///
/// The output is never more than twice as long as the input.
pub fn encode(bytes: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(bytes.len());

    let mut index = 0;
    while let Some(&byte) = bytes.get(index) {
        encoded.push(byte);
        index += 1;

        if byte != 0 {
            continue;
        }

        let mut count = 1u8;
        while count < MAX_RUN && bytes.get(index) == Some(&0) {
            count += 1;
            index += 1;
        }
        encoded.push(count);
    }

    encoded
}

/// Expands an [`encode()`]d stream, keeping at most `expected_len` bytes.
///
/// A trailing zero byte without its count byte expands to a single zero byte.
pub fn decode(encoded: &[u8], expected_len: usize) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(expected_len);

    for run in Runs::new(encoded) {
        let remaining = expected_len - decoded.len();
        let count = usize::from(run.count).min(remaining);
        decoded.resize(decoded.len() + count, run.byte);

        if decoded.len() == expected_len {
            break;
        }
    }

    decoded
}

/// A single decoded element of an [`encode()`]d stream.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Run {
    /// The value repeated by the run.
    pub byte: u8,
    /// The number of times [`Run::byte`] is repeated.
    ///
    /// Always `1` for non-zero bytes. A malformed stream may yield `0`.
    pub count: u8,
}

/// An [`Iterator`] over the [`Run`]s of an [`encode()`]d stream.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Runs<'encoded> {
    /// The part of the stream that has not been consumed yet.
    remaining: &'encoded [u8],
}

impl<'encoded> Runs<'encoded> {
    /// Creates a new [`Runs`] over `encoded`.
    pub const fn new(encoded: &'encoded [u8]) -> Self {
        Self { remaining: encoded }
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Self::Item> {
        let (&byte, rest) = self.remaining.split_first()?;
        self.remaining = rest;

        if byte != 0 {
            return Some(Run { byte, count: 1 });
        }

        let count = match self.remaining.split_first() {
            Some((&count, rest)) => {
                self.remaining = rest;
                count
            }
            None => 1,
        };

        Some(Run { byte, count })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn literals_pass_through() {
        let bytes = [0x01, 0xFF, 0x7E, 0x80];
        assert_eq!(encode(&bytes), bytes);
    }

    #[test]
    fn run_of_255_fits_one_escape() {
        assert_eq!(encode(&[0; 255]), vec![0x00, 255]);
    }

    #[test]
    fn run_of_256_splits() {
        assert_eq!(encode(&[0; 256]), vec![0x00, 255, 0x00, 1]);
    }

    #[test]
    fn alternating_zeros_double_in_size() {
        let bytes = [0x00, 0x01, 0x00, 0x01];
        assert_eq!(encode(&bytes), vec![0x00, 1, 0x01, 0x00, 1, 0x01]);
    }

    #[test]
    fn round_trips() {
        let mixed = (0..2000u32)
            .map(|index| if index % 300 < 270 { 0 } else { index as u8 })
            .collect::<Vec<u8>>();

        let cases: [&[u8]; 5] = [&[], &[0; 1000], &[0xAA; 17], &[0x00, 0xFF, 0x00], &mixed];
        for bytes in cases {
            assert_eq!(decode(&encode(bytes), bytes.len()), bytes);
        }
    }

    #[test]
    fn missing_count_byte_yields_single_zero() {
        assert_eq!(decode(&[0x05, 0x00], 8), vec![0x05, 0x00]);
    }

    #[test]
    fn decode_truncates_to_expected_length() {
        assert_eq!(decode(&[0x00, 10, 0x07], 4), vec![0; 4]);
    }

    #[test]
    fn runs_yield_pairs() {
        let runs = Runs::new(&[0x00, 3, 0x42]).collect::<Vec<_>>();
        assert_eq!(
            runs,
            [Run { byte: 0, count: 3 }, Run { byte: 0x42, count: 1 }]
        );
    }
}
