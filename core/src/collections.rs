//! Array and string helpers built on `range`
//!
//! Everything here is a thin composition of [`Generator::range`]; the draws
//! consumed per call are fixed by the input size, so helpers replay exactly
//! under snapshots like any other operation.

use crate::error::RandError;
use crate::rng::Generator;

/// Lower and upper case ASCII letters plus digits
pub const ALNUM: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const NUM: &str = "0123456789";
pub const ALPHA_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const ALPHA_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const HEX_UPPER: &str = "0123456789ABCDEF";
pub const HEX_LOWER: &str = "0123456789abcdef";

/// Collection helpers for every [`Generator`]
pub trait RandExt: Generator {
    /// `len` random bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidLength` if `len` is zero.
    fn bytes(&mut self, len: usize) -> Result<Vec<u8>, RandError> {
        if len < 1 {
            return Err(RandError::InvalidLength(len));
        }
        (0..len)
            .map(|_| self.range(0, 255).map(|b| b.min(255) as u8))
            .collect()
    }

    /// Random string of `len` characters taken from `charset`
    ///
    /// `charset` is split into Unicode scalar values, so multi-byte characters
    /// are picked whole.
    ///
    /// # Example
    /// ```
    /// use replay_rand_core::{collections::HEX_LOWER, RandExt, HashRand};
    ///
    /// let mut rng = HashRand::with_seed("token");
    /// let token = rng.string(16, HEX_LOWER).unwrap();
    /// assert_eq!(token.len(), 16);
    /// assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    fn string(&mut self, len: usize, charset: &str) -> Result<String, RandError> {
        if len < 1 {
            return Err(RandError::InvalidLength(len));
        }
        let chars: Vec<char> = charset.chars().collect();
        if chars.is_empty() {
            return Err(RandError::EmptyCollection);
        }
        (0..len)
            .map(|_| self.choose(&chars).copied())
            .collect()
    }

    /// Uniform index into a collection of `len` items
    fn choose_index(&mut self, len: usize) -> Result<usize, RandError> {
        if len == 0 {
            return Err(RandError::EmptyCollection);
        }
        let index = self.range(0, len as i64 - 1)? as usize;
        Ok(index.min(len - 1))
    }

    /// Uniformly chosen element
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandError> {
        let index = self.choose_index(items.len())?;
        Ok(&items[index])
    }

    /// Shuffle in place
    ///
    /// Walks from the last element down, swapping each with a uniformly chosen
    /// element at or below it. Slices of length 0 or 1 consume no draws.
    ///
    /// # Errors
    ///
    /// Returns `RangeTooLarge` if the slice is longer than the generator's
    /// `int_max`.
    fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), RandError> {
        if items.len() <= 1 {
            return Ok(());
        }
        for i in (0..items.len()).rev() {
            let j = (self.range(0, i as i64)? as usize).min(i);
            items.swap(i, j);
        }
        Ok(())
    }

    /// Index picked with probability proportional to its weight
    ///
    /// # Errors
    ///
    /// - `EmptyCollection` if `weights` is empty
    /// - `NegativeWeight` if any weight is below zero
    /// - `NonPositiveWeightSum` if the weights sum to less than 1
    ///
    /// A single weight is returned without drawing or validation.
    fn weighted_index(&mut self, weights: &[i64]) -> Result<usize, RandError> {
        match weights.len() {
            0 => return Err(RandError::EmptyCollection),
            1 => return Ok(0),
            _ => {}
        }
        if let Some((index, &weight)) = weights.iter().enumerate().find(|&(_, &w)| w < 0) {
            return Err(RandError::NegativeWeight { index, weight });
        }
        let sum = weights.iter().fold(0i64, |acc, &w| acc.saturating_add(w));
        if sum < 1 {
            return Err(RandError::NonPositiveWeightSum(sum));
        }

        let mut target = self.range(1, sum)?;
        for (index, &weight) in weights.iter().enumerate() {
            target -= weight;
            if target <= 0 {
                return Ok(index);
            }
        }
        // Only reachable through the `max + 1` boundary of `range`
        Ok(weights.len() - 1)
    }

    /// Key picked by weight from `(key, weight)` pairs
    fn weighted_choice<'a, T>(&mut self, items: &'a [(T, i64)]) -> Result<&'a T, RandError> {
        let weights: Vec<i64> = items.iter().map(|(_, w)| *w).collect();
        let index = self.weighted_index(&weights)?;
        Ok(&items[index].0)
    }

    /// Order `(key, weight)` pairs by repeated weighted draws without replacement
    ///
    /// Heavier entries tend to come first. Once only zero-weight entries are
    /// left they follow in their original order. Like [`RandExt::weighted_index`],
    /// a single entry is returned as is, without drawing or validation.
    fn weighted_shuffle<T>(&mut self, mut items: Vec<(T, i64)>) -> Result<Vec<(T, i64)>, RandError> {
        if items.len() <= 1 {
            return Ok(items);
        }
        if let Some((index, &(_, weight))) = items.iter().enumerate().find(|(_, (_, w))| *w < 0) {
            return Err(RandError::NegativeWeight { index, weight });
        }

        let mut shuffled = Vec::with_capacity(items.len());
        while items.iter().any(|(_, w)| *w > 0) {
            let weights: Vec<i64> = items.iter().map(|(_, w)| *w).collect();
            let index = self.weighted_index(&weights)?;
            shuffled.push(items.remove(index));
        }
        shuffled.extend(items);
        Ok(shuffled)
    }
}

impl<G: Generator + ?Sized> RandExt for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{MtRand, XorShiftRand};

    #[test]
    fn test_zero_length_rejected() {
        let mut rng = MtRand::with_seed(1);
        assert_eq!(rng.bytes(0), Err(RandError::InvalidLength(0)));
        assert_eq!(rng.string(0, NUM), Err(RandError::InvalidLength(0)));
        assert_eq!(rng.string(3, ""), Err(RandError::EmptyCollection));
    }

    #[test]
    fn test_single_char_charset() {
        let mut rng = MtRand::with_seed(1);
        assert_eq!(rng.string(3, "AAAA").unwrap(), "AAA");
        assert_eq!(rng.string(3, "ЖЖЖЖЖЖЖ").unwrap(), "ЖЖЖ");
    }

    #[test]
    fn test_short_shuffle_consumes_nothing() {
        let mut rng = XorShiftRand::with_seed("short");
        let before = rng.state();
        let mut one = [1];
        rng.shuffle(&mut one).unwrap();
        let mut none: [u8; 0] = [];
        rng.shuffle(&mut none).unwrap();
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_weighted_single_entry_skips_validation() {
        let mut rng = XorShiftRand::with_seed("one");
        let before = rng.state();
        assert_eq!(rng.weighted_index(&[-3]), Ok(0));
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_weighted_shuffle_single_entry_skips_validation() {
        let mut rng = XorShiftRand::with_seed("one");
        let before = rng.state();
        assert_eq!(rng.weighted_shuffle(vec![("only", -3)]), Ok(vec![("only", -3)]));
        assert_eq!(rng.weighted_shuffle(Vec::<(&str, i64)>::new()), Ok(vec![]));
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_weighted_errors() {
        let mut rng = XorShiftRand::with_seed("w");
        assert_eq!(rng.weighted_index(&[]), Err(RandError::EmptyCollection));
        assert_eq!(
            rng.weighted_index(&[-1, 2, 3]),
            Err(RandError::NegativeWeight { index: 0, weight: -1 })
        );
        assert_eq!(
            rng.weighted_index(&[0, 0, 0]),
            Err(RandError::NonPositiveWeightSum(0))
        );
    }
}
