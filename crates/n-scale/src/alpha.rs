// SPDX-License-Identifier: MIT

//! Alpha sets — integer opacity percentages stored as range strings.
//!
//! `"0-30,35,40"` expands to 0, 1, …, 30, 35, 40. The canonical compact
//! form collapses runs of three or more consecutive values into `a-b` and
//! lists everything else, so `expand(compact(s)) == s` and compacting a
//! compact string is a no-op.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest valid alpha percentage.
pub const MAX_ALPHA: u8 = 100;

/// Shortest run written as a range.
const MIN_RUN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphaSetError {
    #[error("'{0}' is not an integer alpha")]
    NotAnInteger(String),

    #[error("alpha {0} is above {MAX_ALPHA}")]
    OutOfRange(u32),
}

/// A sorted, de-duplicated set of alpha percentages in `0..=100`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlphaSet(BTreeSet<u8>);

impl AlphaSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Expand a range string.
    ///
    /// Items are comma separated; whitespace and empty items are ignored.
    /// A reversed range (`30-0`) is read as its ascending equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaSetError`] for non-integer items or values above 100.
    pub fn parse(s: &str) -> Result<Self, AlphaSetError> {
        let mut set = BTreeSet::new();

        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            match item.split_once('-') {
                Some((lo, hi)) => {
                    let lo = parse_alpha(lo.trim())?;
                    let hi = parse_alpha(hi.trim())?;
                    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                    set.extend(lo..=hi);
                }
                None => {
                    set.insert(parse_alpha(item)?);
                }
            }
        }

        Ok(Self(set))
    }

    /// The canonical compact string.
    #[must_use]
    pub fn compact(&self) -> String {
        let values: Vec<u8> = self.0.iter().copied().collect();
        let mut parts: Vec<String> = Vec::new();

        let mut start = 0;
        while start < values.len() {
            let mut end = start;
            while end + 1 < values.len() && values[end + 1] == values[end] + 1 {
                end += 1;
            }

            if end - start + 1 >= MIN_RUN {
                parts.push(format!("{}-{}", values[start], values[end]));
            } else {
                parts.extend(values[start..=end].iter().map(u8::to_string));
            }
            start = end + 1;
        }

        parts.join(",")
    }

    #[must_use]
    pub fn contains(&self, alpha: u8) -> bool {
        self.0.contains(&alpha)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

fn parse_alpha(s: &str) -> Result<u8, AlphaSetError> {
    let value: u32 = s
        .parse()
        .map_err(|_| AlphaSetError::NotAnInteger(s.to_owned()))?;
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_ALPHA)
        .ok_or(AlphaSetError::OutOfRange(value))
}

impl FromStr for AlphaSet {
    type Err = AlphaSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AlphaSet {
    type Error = AlphaSetError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AlphaSet> for String {
    fn from(set: AlphaSet) -> Self {
        set.compact()
    }
}

impl fmt::Display for AlphaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact())
    }
}

impl FromIterator<u8> for AlphaSet {
    /// Values above 100 are dropped.
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|v| *v <= MAX_ALPHA).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(values: &[u8]) -> AlphaSet {
        values.iter().copied().collect()
    }

    #[test]
    fn expands_ranges_and_singles() {
        let s = AlphaSet::parse("0-3, 35,40").unwrap();
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 35, 40]);
    }

    #[test]
    fn compacts_long_runs_only() {
        assert_eq!(set(&[0, 1, 2, 3, 35, 40]).compact(), "0-3,35,40");
        assert_eq!(set(&[5, 6]).compact(), "5,6");
        assert_eq!(set(&[5, 6, 7]).compact(), "5-7");
        assert_eq!(set(&[]).compact(), "");
    }

    #[test]
    fn canonical_example() {
        let s = AlphaSet::parse("0-30,35,40").unwrap();
        assert_eq!(s.len(), 33);
        assert_eq!(s.compact(), "0-30,35,40");
    }

    #[test]
    fn roundtrip_many_sets() {
        // Walk a deterministic spread of subsets of 0..=100.
        let mut state: u32 = 0x9e37_79b9;
        for _ in 0..200 {
            let values: Vec<u8> = (0..=MAX_ALPHA)
                .filter(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state % 3 == 0
                })
                .collect();
            let original = set(&values);
            let compact = original.compact();
            let expanded = AlphaSet::parse(&compact).unwrap();
            assert_eq!(expanded, original);
            assert_eq!(expanded.compact(), compact, "compaction must be idempotent");
        }
    }

    #[test]
    fn unsorted_duplicate_input_is_canonicalised() {
        let s = AlphaSet::parse("40, 10-12, 11, 30-28,40").unwrap();
        assert_eq!(s.compact(), "10-12,28-30,40");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            AlphaSet::parse("10,abc"),
            Err(AlphaSetError::NotAnInteger("abc".into()))
        );
        assert_eq!(AlphaSet::parse("90-120"), Err(AlphaSetError::OutOfRange(120)));
        assert!(AlphaSet::parse("1.5").is_err());
    }

    #[test]
    fn empty_string_is_empty_set() {
        assert!(AlphaSet::parse("").unwrap().is_empty());
        assert!(AlphaSet::parse(" , ").unwrap().is_empty());
    }

    #[test]
    fn serde_uses_compact_string() {
        let s = set(&[0, 1, 2, 50]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#""0-2,50""#);
        let back: AlphaSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
