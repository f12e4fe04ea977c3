// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Canonical set of half-open spans and the algebra over it.
//!
//! A [`SpanSet`] stores its spans as one packed vector of `2n` bounds
//! `b0, b1, ..` representing `[b0, b1), [b2, b3), ..`. The vector is kept
//! canonical at every public boundary: bounds are finite, every span is
//! non-empty, and consecutive spans are strictly separated (two spans that
//! touch are coalesced into one). Canonical form is unique for the covered
//! set of values, so equality is a plain element-wise comparison.
//!
//! All binary operations are linear two-cursor sweeps over the packed
//! vectors. Before sweeping, each operation inspects the operand extremes
//! and short-circuits the trivial shapes (an empty side, or operands that
//! do not reach into each other) into a copy or a concatenation; the
//! outcome is identical to the full sweep either way.

use crate::errors::SpanSetError;
use crate::ops::*;
use crate::span::{Span, ToSpan};
use num_traits::Float;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::VecDeque;
use std::convert::TryFrom;
use std::fmt;
use std::mem;
use std::ops::Range;
use std::ptr;
use std::slice::ChunksExact;

/// Outcome of testing a value or a span set against a [`SpanSet`].
///
/// The discriminants are part of the API and will not change.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Coverage {
  /// The query does not touch the set.
  None = 0,
  /// The query is entirely covered by the set.
  Full = 1,
  /// The query is partially covered. Scalars are never partial.
  Part = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpanSet<B: Float> {
  data: Vec<B>,
}

impl<B: Float> SpanSet<B> {
  /// Canonicalizes a packed vector of bounds.
  ///
  /// Pairs may be reversed (swapped silently), degenerate (dropped
  /// silently), unsorted or overlapping (merged). An odd number of bounds
  /// is `InvalidShape` and a NaN or infinite bound is `InvalidBound`.
  /// Already-canonical input is wrapped without reallocating.
  pub fn from_bounds(bounds: Vec<B>) -> Result<SpanSet<B>, SpanSetError> {
    if bounds.len() % 2 != 0 {
      return Err(SpanSetError::InvalidShape);
    }
    if Self::is_canonical(&bounds) {
      return Ok(SpanSet { data: bounds });
    }
    let data = normalize(bounds.chunks_exact(2).map(|pair| (pair[0], pair[1])))?;
    Ok(SpanSet { data })
  }

  /// Canonicalizes a sequence of `(lo, hi)` pairs.
  pub fn from_pairs<I>(pairs: I) -> Result<SpanSet<B>, SpanSetError>
  where
    I: IntoIterator<Item = (B, B)>,
  {
    Ok(SpanSet { data: normalize(pairs)? })
  }

  /// Canonicalizes a sequence of spans or span-like values.
  pub fn from_spans<I, S>(spans: I) -> Result<SpanSet<B>, SpanSetError>
  where
    I: IntoIterator<Item = S>,
    S: ToSpan<B>,
  {
    Self::from_pairs(spans.into_iter().map(|s| {
      let span = s.to_span();
      (span.lower(), span.upper())
    }))
  }

  /// Checks whether `bounds` is a canonical packed vector: even length,
  /// finite bounds, every span non-empty, spans sorted and strictly
  /// separated.
  pub fn is_canonical(bounds: &[B]) -> bool {
    if bounds.len() % 2 != 0 {
      return false;
    }
    if bounds.is_empty() {
      return true;
    }

    let mut last = bounds[1];
    if !bounds[0].is_finite() || !last.is_finite() || bounds[0] >= last {
      return false;
    }

    let mut i = 2;
    while i < bounds.len() {
      let lo = bounds[i];
      let hi = bounds[i + 1];
      if !lo.is_finite() || !hi.is_finite() {
        return false;
      }
      if last >= lo || lo >= hi {
        return false;
      }
      last = hi;
      i += 2;
    }
    true
  }

  /// Number of spans held (half the number of bounds).
  pub fn span_count(&self) -> usize {
    self.data.len() / 2
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Removes every span, keeping the allocation.
  pub fn clear(&mut self) {
    self.data.clear();
  }

  /// Borrowed view of the packed bounds.
  pub fn as_bounds(&self) -> &[B] {
    &self.data
  }

  /// Consumes the set, yielding the packed bounds.
  pub fn into_bounds(self) -> Vec<B> {
    self.data
  }

  /// Smallest single span covering the whole set, empty for an empty set.
  pub fn span(&self) -> Span<B> {
    if self.is_empty() {
      Span::empty()
    } else {
      Span::new(self.data[0], self.data[self.data.len() - 1])
    }
  }

  pub fn iter(&self) -> Spans<B> {
    Spans { bounds: self.data.chunks_exact(2) }
  }

  pub fn to_pairs(&self) -> Vec<(B, B)> {
    self.iter().map(|span| (span.lower(), span.upper())).collect()
  }

  pub fn to_spans(&self) -> Vec<Span<B>> {
    self.iter().collect()
  }

  /// Classifies a scalar against the set. The upper bound of a span is
  /// exclusive, so a scalar is either fully inside one span or outside all
  /// of them; `Part` never occurs.
  pub fn test_value(&self, value: B) -> Coverage {
    let data = &self.data;
    let len = data.len();
    if len == 0 {
      return Coverage::None;
    }
    if value < data[0] || value >= data[len - 1] {
      return Coverage::None;
    }
    let i = locate(data, value);
    if value >= data[i] && value < data[i + 1] {
      Coverage::Full
    } else {
      Coverage::None
    }
  }

  /// Classifies a single span against the set.
  pub fn test_span<S>(&self, span: S) -> Coverage
  where
    S: ToSpan<B>,
  {
    let span = span.to_span();
    if span.is_empty() {
      return Coverage::None;
    }
    test_bounds(&self.data, &[span.lower(), span.upper()])
  }

  /// Classifies another span set against this one: `Full` when every span
  /// of `other` is absorbed, `Part` on any partial overlap, `None` when
  /// the two never meet or `other` is empty.
  pub fn test_set(&self, other: &SpanSet<B>) -> Coverage {
    if ptr::eq(self, other) {
      return if self.is_empty() { Coverage::None } else { Coverage::Full };
    }
    test_bounds(&self.data, &other.data)
  }

  /// Translates every span by `offset`.
  ///
  /// Spans whose bounds stop being finite, or collapse onto one point
  /// under rounding, are dropped; spans brought into contact by rounding
  /// are coalesced. A non-finite offset therefore yields the empty set.
  pub fn shift(&self, offset: B) -> SpanSet<B> {
    if offset == B::zero() {
      return self.clone();
    }
    let mut output = Vec::with_capacity(self.data.len());
    let mut last = B::neg_infinity();
    let mut i = 0;
    while i < self.data.len() {
      let lo = self.data[i] + offset;
      let hi = self.data[i + 1] + offset;
      if lo.is_finite() && hi.is_finite() && lo < hi {
        if lo > last || output.is_empty() {
          output.push(lo);
          output.push(hi);
        } else {
          let end = output.len() - 1;
          output[end] = hi;
        }
        last = hi;
      }
      i += 2;
    }
    SpanSet { data: output }
  }

  /// In-place [`shift`](Self::shift): compacts the surviving spans to the
  /// front of the backing storage and truncates, allocating nothing.
  pub fn shift_in_place(&mut self, offset: B) {
    if offset == B::zero() {
      return;
    }
    let mut last = B::neg_infinity();
    let mut store = 0;
    let mut i = 0;
    while i < self.data.len() {
      let lo = self.data[i] + offset;
      let hi = self.data[i + 1] + offset;
      if lo.is_finite() && hi.is_finite() && lo < hi {
        if lo > last || store == 0 {
          self.data[store] = lo;
          self.data[store + 1] = hi;
          store += 2;
        } else {
          self.data[store - 1] = hi;
        }
        last = hi;
      }
      i += 2;
    }
    self.data.truncate(store);
  }

  /// Multiplies every bound by `factor`, which must be non-negative.
  ///
  /// A zero or non-finite factor collapses every span, yielding the empty
  /// set; otherwise the same drop/coalesce rule as [`shift`](Self::shift)
  /// applies. Scaling by a non-negative factor is monotonic, so the span
  /// order is preserved.
  pub fn scale(&self, factor: B) -> Result<SpanSet<B>, SpanSetError> {
    if factor < B::zero() {
      return Err(SpanSetError::InvalidArgument("scale factor must be non-negative"));
    }
    if factor == B::one() {
      return Ok(self.clone());
    }
    let mut output = Vec::with_capacity(self.data.len());
    let mut last = B::neg_infinity();
    let mut i = 0;
    while i < self.data.len() {
      let lo = self.data[i] * factor;
      let hi = self.data[i + 1] * factor;
      if lo.is_finite() && hi.is_finite() && lo < hi {
        if lo > last || output.is_empty() {
          output.push(lo);
          output.push(hi);
        } else {
          let end = output.len() - 1;
          output[end] = hi;
        }
        last = hi;
      }
      i += 2;
    }
    Ok(SpanSet { data: output })
  }

  /// In-place [`scale`](Self::scale). A negative factor fails without
  /// touching the set.
  pub fn scale_in_place(&mut self, factor: B) -> Result<(), SpanSetError> {
    if factor < B::zero() {
      return Err(SpanSetError::InvalidArgument("scale factor must be non-negative"));
    }
    if factor == B::one() {
      return Ok(());
    }
    let mut last = B::neg_infinity();
    let mut store = 0;
    let mut i = 0;
    while i < self.data.len() {
      let lo = self.data[i] * factor;
      let hi = self.data[i + 1] * factor;
      if lo.is_finite() && hi.is_finite() && lo < hi {
        if lo > last || store == 0 {
          self.data[store] = lo;
          self.data[store + 1] = hi;
          store += 2;
        } else {
          self.data[store - 1] = hi;
        }
        last = hi;
      }
      i += 2;
    }
    self.data.truncate(store);
    Ok(())
  }

  /// Folds `operands` into `self ∪ ..`, left to right.
  pub fn union_all<'a, I>(&self, operands: I) -> SpanSet<B>
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    let mut result = self.clone();
    result.union_in_place(operands);
    result
  }

  /// Folds `operands` into `self ∩ ..`, left to right.
  pub fn intersection_all<'a, I>(&self, operands: I) -> SpanSet<B>
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    let mut result = self.clone();
    result.intersection_in_place(operands);
    result
  }

  /// Folds `operands` into `self ⊕ ..`, left to right.
  pub fn symmetric_difference_all<'a, I>(&self, operands: I) -> SpanSet<B>
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    let mut result = self.clone();
    result.symmetric_difference_in_place(operands);
    result
  }

  /// Folds `operands` into `self ∖ ..`, left to right.
  pub fn difference_all<'a, I>(&self, operands: I) -> SpanSet<B>
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    let mut result = self.clone();
    result.difference_in_place(operands);
    result
  }

  /// Unions `operands` into the receiver. Disjoint operands extend the
  /// backing storage directly instead of sweeping.
  pub fn union_in_place<'a, I>(&mut self, operands: I)
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    for rhs in operands {
      if rhs.is_empty() {
        continue;
      }
      if self.data.is_empty() {
        self.data.extend_from_slice(&rhs.data);
        continue;
      }
      let last = self.data[self.data.len() - 1];
      if last <= rhs.data[0] {
        if last == rhs.data[0] {
          let end = self.data.len() - 1;
          self.data[end] = rhs.data[1];
          self.data.extend_from_slice(&rhs.data[2..]);
        } else {
          self.data.extend_from_slice(&rhs.data);
        }
      } else if rhs.data[rhs.data.len() - 1] <= self.data[0] {
        self.data = concat_disjoint(&rhs.data, &self.data);
      } else {
        self.data = union_bounds(&self.data, &rhs.data);
      }
    }
  }

  /// Intersects `operands` into the receiver.
  pub fn intersection_in_place<'a, I>(&mut self, operands: I)
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    for rhs in operands {
      if self.data.is_empty() {
        break;
      }
      if rhs.is_empty() || extremes_apart(&self.data, &rhs.data) {
        self.data.clear();
        break;
      }
      self.data = intersect_bounds(&self.data, &rhs.data);
    }
  }

  /// Xors `operands` into the receiver.
  pub fn symmetric_difference_in_place<'a, I>(&mut self, operands: I)
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    for rhs in operands {
      if rhs.is_empty() {
        continue;
      }
      if self.data.is_empty() {
        self.data.extend_from_slice(&rhs.data);
        continue;
      }
      let last = self.data[self.data.len() - 1];
      if last <= rhs.data[0] {
        if last == rhs.data[0] {
          let end = self.data.len() - 1;
          self.data[end] = rhs.data[1];
          self.data.extend_from_slice(&rhs.data[2..]);
        } else {
          self.data.extend_from_slice(&rhs.data);
        }
      } else if rhs.data[rhs.data.len() - 1] <= self.data[0] {
        self.data = concat_disjoint(&rhs.data, &self.data);
      } else {
        self.data = xor_bounds(&self.data, &rhs.data);
      }
    }
  }

  /// Subtracts `operands` from the receiver.
  pub fn difference_in_place<'a, I>(&mut self, operands: I)
  where
    I: IntoIterator<Item = &'a SpanSet<B>>,
    B: 'a,
  {
    for rhs in operands {
      if self.data.is_empty() {
        break;
      }
      if rhs.is_empty() || extremes_apart(&self.data, &rhs.data) {
        continue;
      }
      self.data = subtract_bounds(&self.data, &rhs.data);
    }
  }
}

impl<B: Float> Empty for SpanSet<B> {
  fn empty() -> SpanSet<B> {
    SpanSet { data: vec![] }
  }
}

impl<B: Float> Default for SpanSet<B> {
  fn default() -> SpanSet<B> {
    SpanSet::empty()
  }
}

impl<B: Float> Bounded for SpanSet<B> {
  type Bound = B;

  fn lower(&self) -> B {
    assert!(!self.is_empty(), "Cannot access the lower bound of an empty span set.");
    self.data[0]
  }

  fn upper(&self) -> B {
    assert!(!self.is_empty(), "Cannot access the upper bound of an empty span set.");
    self.data[self.data.len() - 1]
  }
}

impl<B: Float> Contains<B> for SpanSet<B> {
  fn contains(&self, value: &B) -> bool {
    self.test_value(*value) == Coverage::Full
  }
}

impl<B: Float> Overlap for SpanSet<B> {
  fn overlap(&self, rhs: &SpanSet<B>) -> bool {
    self.test_set(rhs) != Coverage::None
  }
}

impl<B: Float> Disjoint for SpanSet<B> {
  fn is_disjoint(&self, rhs: &SpanSet<B>) -> bool {
    !self.overlap(rhs)
  }
}

impl<B: Float> Subset for SpanSet<B> {
  fn is_subset(&self, rhs: &SpanSet<B>) -> bool {
    self.is_empty() || rhs.test_set(self) == Coverage::Full
  }
}

impl<B: Float> Union for SpanSet<B> {
  type Output = SpanSet<B>;

  fn union(&self, rhs: &SpanSet<B>) -> SpanSet<B> {
    if ptr::eq(self, rhs) || rhs.is_empty() {
      return self.clone();
    }
    if self.is_empty() {
      return rhs.clone();
    }
    let a = &self.data;
    let b = &rhs.data;
    let data = if a[a.len() - 1] <= b[0] {
      concat_disjoint(a, b)
    } else if b[b.len() - 1] <= a[0] {
      concat_disjoint(b, a)
    } else {
      union_bounds(a, b)
    };
    SpanSet { data }
  }
}

impl<B: Float> Intersection for SpanSet<B> {
  type Output = SpanSet<B>;

  fn intersection(&self, rhs: &SpanSet<B>) -> SpanSet<B> {
    if ptr::eq(self, rhs) {
      return self.clone();
    }
    if self.is_empty() || rhs.is_empty() || extremes_apart(&self.data, &rhs.data) {
      return SpanSet::empty();
    }
    SpanSet { data: intersect_bounds(&self.data, &rhs.data) }
  }
}

impl<B: Float> SymmetricDifference for SpanSet<B> {
  type Output = SpanSet<B>;

  fn symmetric_difference(&self, rhs: &SpanSet<B>) -> SpanSet<B> {
    if ptr::eq(self, rhs) {
      return SpanSet::empty();
    }
    if rhs.is_empty() {
      return self.clone();
    }
    if self.is_empty() {
      return rhs.clone();
    }
    let a = &self.data;
    let b = &rhs.data;
    let data = if a[a.len() - 1] <= b[0] {
      concat_disjoint(a, b)
    } else if b[b.len() - 1] <= a[0] {
      concat_disjoint(b, a)
    } else {
      xor_bounds(a, b)
    };
    SpanSet { data }
  }
}

impl<B: Float> Difference for SpanSet<B> {
  type Output = SpanSet<B>;

  fn difference(&self, rhs: &SpanSet<B>) -> SpanSet<B> {
    if ptr::eq(self, rhs) {
      return SpanSet::empty();
    }
    if self.is_empty() || rhs.is_empty() || extremes_apart(&self.data, &rhs.data) {
      return self.clone();
    }
    SpanSet { data: subtract_bounds(&self.data, &rhs.data) }
  }
}

impl<B: Float> From<Span<B>> for SpanSet<B> {
  fn from(span: Span<B>) -> SpanSet<B> {
    if span.is_empty() {
      SpanSet::empty()
    } else {
      SpanSet { data: vec![span.lower(), span.upper()] }
    }
  }
}

impl<B: Float> From<Range<B>> for SpanSet<B> {
  fn from(range: Range<B>) -> SpanSet<B> {
    SpanSet::from(range.to_span())
  }
}

impl<B: Float> TryFrom<Vec<B>> for SpanSet<B> {
  type Error = SpanSetError;

  fn try_from(bounds: Vec<B>) -> Result<SpanSet<B>, SpanSetError> {
    SpanSet::from_bounds(bounds)
  }
}

impl<B: Float + fmt::Display> fmt::Display for SpanSet<B> {
  fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    for (i, bound) in self.data.iter().enumerate() {
      if i > 0 {
        write!(formatter, ", ")?;
      }
      write!(formatter, "{}", bound)?;
    }
    Ok(())
  }
}

/// Iterator over the spans of a [`SpanSet`], in ascending order.
pub struct Spans<'a, B: Float> {
  bounds: ChunksExact<'a, B>,
}

impl<'a, B: Float> Iterator for Spans<'a, B> {
  type Item = Span<B>;

  fn next(&mut self) -> Option<Span<B>> {
    self.bounds.next().map(|pair| Span::new(pair[0], pair[1]))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.bounds.size_hint()
  }
}

impl<'a, B: Float> ExactSizeIterator for Spans<'a, B> {}

impl<'a, B: Float> IntoIterator for &'a SpanSet<B> {
  type Item = Span<B>;
  type IntoIter = Spans<'a, B>;

  fn into_iter(self) -> Spans<'a, B> {
    self.iter()
  }
}

impl<B: Float + Serialize> Serialize for SpanSet<B> {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    self.data.serialize(serializer)
  }
}

impl<'de, B: Float + Deserialize<'de>> Deserialize<'de> for SpanSet<B> {
  fn deserialize<D>(deserializer: D) -> Result<SpanSet<B>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let bounds = Vec::<B>::deserialize(deserializer)?;
    SpanSet::from_bounds(bounds).map_err(D::Error::custom)
  }
}

/// Canonicalizes raw pairs in one left-to-right pass.
///
/// Pairs that extend or touch the back of the run are appended or
/// coalesced; pairs that land entirely before its front are prepended the
/// same way. A pair that falls strictly inside the run closes it as a
/// chunk and starts a new one; the chunks are reduced at the end. Sorted
/// or nearly-sorted input therefore never pays for more than the single
/// pass.
fn normalize<B, I>(pairs: I) -> Result<Vec<B>, SpanSetError>
where
  B: Float,
  I: IntoIterator<Item = (B, B)>,
{
  let mut chunks: Vec<Vec<B>> = vec![];
  let mut chunk: VecDeque<B> = VecDeque::new();
  let mut last = B::neg_infinity();

  for (mut lo, mut hi) in pairs {
    if !lo.is_finite() || !hi.is_finite() {
      return Err(SpanSetError::InvalidBound);
    }
    if lo >= hi {
      if lo == hi {
        continue;
      }
      mem::swap(&mut lo, &mut hi);
    }

    // Extend or coalesce at the back of the run.
    if lo >= last {
      if lo == last && !chunk.is_empty() {
        *chunk.back_mut().unwrap() = hi;
      } else {
        chunk.push_back(lo);
        chunk.push_back(hi);
      }
      last = hi;
      continue;
    }

    // Extend or coalesce at the front of the run.
    if let Some(&front) = chunk.front() {
      if front >= hi {
        if front == hi {
          *chunk.front_mut().unwrap() = lo;
        } else {
          chunk.push_front(hi);
          chunk.push_front(lo);
        }
        continue;
      }
    }

    // The pair lands inside the run; close it and start a new one.
    chunks.push(chunk.drain(..).collect());
    chunk.push_back(lo);
    chunk.push_back(hi);
    last = hi;
  }

  if chunks.is_empty() {
    return Ok(Vec::from(chunk));
  }
  if !chunk.is_empty() {
    chunks.push(Vec::from(chunk));
  }
  Ok(reduce_chunks(chunks))
}

/// Reduces the chunks produced by [`normalize`] into one canonical vector.
/// Ordered neighbours concatenate (coalescing a touching boundary); the
/// rest go through the union sweep.
fn reduce_chunks<B: Float>(chunks: Vec<Vec<B>>) -> Vec<B> {
  let mut iter = chunks.into_iter();
  let mut acc = match iter.next() {
    Some(chunk) => chunk,
    None => return vec![],
  };
  for next in iter {
    let back = acc[acc.len() - 1];
    let front = next[0];
    if back <= front {
      if back == front {
        let end = acc.len() - 1;
        acc[end] = next[1];
        acc.extend_from_slice(&next[2..]);
      } else {
        acc.extend_from_slice(&next);
      }
    } else {
      acc = union_bounds(&acc, &next);
    }
  }
  acc
}

/// True when the operand extremes prove the two sets never reach into each
/// other (touching counts: the boundary point belongs to one side only).
fn extremes_apart<B: Float>(a: &[B], b: &[B]) -> bool {
  a[a.len() - 1] <= b[0] || b[b.len() - 1] <= a[0]
}

/// Concatenates two canonical vectors where `lo` ends at or before `hi`
/// starts, coalescing a touching boundary.
fn concat_disjoint<B: Float>(lo: &[B], hi: &[B]) -> Vec<B> {
  let mut output = Vec::with_capacity(lo.len() + hi.len());
  output.extend_from_slice(lo);
  if output[lo.len() - 1] == hi[0] {
    let end = output.len() - 1;
    output[end] = hi[1];
    output.extend_from_slice(&hi[2..]);
  } else {
    output.extend_from_slice(hi);
  }
  output
}

/// Appends `[lo, hi)` to `output`, coalescing with the previous span when
/// their boundaries meet.
fn push_coalesced<B: Float>(output: &mut Vec<B>, lo: B, hi: B) {
  if let Some(end) = output.last_mut() {
    if *end == lo {
      *end = hi;
      return;
    }
  }
  output.push(lo);
  output.push(hi);
}

/// Even index of the span bracketing `value` the closest, clamped to the
/// first and last span. `data` must be canonical and non-empty.
fn locate<B: Float>(data: &[B], value: B) -> usize {
  let len = data.len();
  if value <= data[1] {
    return 0;
  }
  if value >= data[len - 2] {
    return len - 2;
  }

  let mut base = 0;
  let mut i = 0;
  let mut lim = len >> 1;
  while lim != 0 {
    i = base + (lim & !1);
    let lo = data[i];
    let hi = data[i + 1];
    if hi <= value {
      base = i + 2;
      lim -= 1;
    } else if lo <= value {
      return i;
    }
    lim >>= 1;
  }
  i
}

/// Two-cursor classification of the canonical query `b` against the
/// canonical target `a`. Counts the query bounds fully absorbed by `a`
/// and bails out to `Part` on the first partial overlap.
fn test_bounds<B: Float>(a: &[B], b: &[B]) -> Coverage {
  let a_len = a.len();
  if a_len == 0 {
    return Coverage::None;
  }
  let b_len = b.len();
  if b_len == 0 {
    return Coverage::None;
  }

  let mut b0 = b[0];
  if b[b_len - 1] <= a[0] || b0 >= a[a_len - 1] {
    return Coverage::None;
  }

  let mut a_index = locate(a, b0);
  let mut b_index = 0;
  let mut full = 0;
  let mut b1 = b[1];

  loop {
    // Skip target spans ending before the query span starts.
    let mut a1 = a[a_index + 1];
    while a1 <= b0 {
      a_index += 2;
      if a_index >= a_len {
        return if full != 0 { Coverage::Part } else { Coverage::None };
      }
      a1 = a[a_index + 1];
    }

    let a0 = a[a_index];
    if b0 >= a0 && b1 <= a1 {
      full += 2;
    } else if a0.max(b0) < a1.min(b1) {
      return Coverage::Part;
    }

    loop {
      b_index += 2;
      if b_index >= b_len {
        return if b_len == full { Coverage::Full } else { Coverage::Part };
      }
      b0 = b[b_index];
      b1 = b[b_index + 1];
      if b1 > a1 {
        break;
      }
      full += 2;
    }
  }
}

/// Interval-merge sweep: takes the smaller next start, extends its end
/// over every span from either side reaching into it, emits the coalesced
/// span, then appends whatever is left.
fn union_bounds<B: Float>(a: &[B], b: &[B]) -> Vec<B> {
  let a_len = a.len();
  let b_len = b.len();
  let mut output = Vec::with_capacity(a_len + b_len);

  let mut ai = 0;
  let mut bi = 0;

  while ai < a_len && bi < b_len {
    let lo;
    let mut hi;
    if a[ai] < b[bi] {
      lo = a[ai];
      hi = a[ai + 1];
      ai += 2;
    } else {
      lo = b[bi];
      hi = b[bi + 1];
      bi += 2;
    }

    loop {
      let mut extended = false;
      while ai < a_len && a[ai] <= hi {
        hi = hi.max(a[ai + 1]);
        ai += 2;
        extended = true;
      }
      while bi < b_len && b[bi] <= hi {
        hi = hi.max(b[bi + 1]);
        bi += 2;
        extended = true;
      }
      if !extended {
        break;
      }
    }

    output.push(lo);
    output.push(hi);
  }

  output.extend_from_slice(&a[ai..]);
  output.extend_from_slice(&b[bi..]);
  output
}

/// Intersection sweep: discards spans from either side ending at or
/// before the other side's cursor, emits the overlap of the current pair,
/// and advances whichever span ends first.
fn intersect_bounds<B: Float>(a: &[B], b: &[B]) -> Vec<B> {
  let a_len = a.len();
  let b_len = b.len();
  let mut output = vec![];
  if a_len == 0 || b_len == 0 {
    return output;
  }

  let mut ai = 0;
  let mut bi = 0;

  let mut a0;
  let mut a1;
  let mut b0;
  let mut b1;

  'scan: loop {
    b0 = b[bi];
    loop {
      while a[ai + 1] <= b0 {
        ai += 2;
        if ai >= a_len {
          return output;
        }
      }
      a0 = a[ai];
      while b[bi + 1] <= a0 {
        bi += 2;
        if bi >= b_len {
          return output;
        }
      }
      b0 = b[bi];
      a1 = a[ai + 1];
      if a1 > b0 {
        break;
      }
    }

    b1 = b[bi + 1];
    loop {
      let lo = a0.max(b0);
      let hi = a1.min(b1);
      if lo >= hi {
        continue 'scan;
      }
      output.push(lo);
      output.push(hi);

      if hi == a1 {
        ai += 2;
        if ai >= a_len {
          return output;
        }
      }
      if hi == b1 {
        bi += 2;
        if bi >= b_len {
          return output;
        }
      }

      a0 = a[ai];
      a1 = a[ai + 1];
      b0 = b[bi];
      b1 = b[bi + 1];
    }
  }
}

/// Symmetric-difference sweep: walks a position cursor through the merged
/// boundaries, emitting the regions covered by exactly one side and
/// coalescing contiguous output. When one side runs out, the rest of the
/// other side is flushed clipped to the sweep position.
fn xor_bounds<B: Float>(a: &[B], b: &[B]) -> Vec<B> {
  let a_len = a.len();
  let b_len = b.len();
  if a_len == 0 {
    return b.to_vec();
  }
  if b_len == 0 {
    return a.to_vec();
  }

  let mut output = vec![];
  let mut ai = 0;
  let mut bi = 0;

  let mut a0 = a[0];
  let mut a1 = a[1];
  let mut b0 = b[0];
  let mut b1 = b[1];

  let mut pos = a0.min(b0);

  loop {
    let lo;
    let hi;
    if a1 <= b0 {
      lo = a0.max(pos);
      hi = a1;
      pos = a1;
    } else if b1 <= a0 {
      lo = b0.max(pos);
      hi = b1;
      pos = b1;
    } else {
      lo = pos;
      hi = a0.max(b0);
      pos = a1.min(b1);
    }

    if lo < hi {
      push_coalesced(&mut output, lo, hi);
    }

    if a1 <= pos {
      ai += 2;
    }
    if b1 <= pos {
      bi += 2;
    }

    if ai >= a_len {
      if bi >= b_len {
        return output;
      }
      push_coalesced(&mut output, b[bi].max(pos), b[bi + 1]);
      output.extend_from_slice(&b[bi + 2..]);
      return output;
    }

    a0 = a[ai];
    a1 = a[ai + 1];

    if bi >= b_len {
      push_coalesced(&mut output, a0.max(pos), a1);
      output.extend_from_slice(&a[ai + 2..]);
      return output;
    }

    b0 = b[bi];
    b1 = b[bi + 1];

    pos = pos.max(a0.min(b0));
  }
}

/// Subtraction sweep over `a`: emits the part of the current `a` span
/// left of the current `b` span, skips the covered region, and once `b`
/// is exhausted flushes the rest of `a` clipped to the sweep position.
fn subtract_bounds<B: Float>(a: &[B], b: &[B]) -> Vec<B> {
  let a_len = a.len();
  let b_len = b.len();
  if a_len == 0 {
    return vec![];
  }
  if b_len == 0 {
    return a.to_vec();
  }

  let mut output = vec![];
  let mut ai = 0;
  let mut bi = 0;

  let mut a0 = a[0];
  let mut a1 = a[1];
  let mut b0 = b[0];
  let mut b1 = b[1];

  let mut pos = a0;
  let mut sub = b0;

  loop {
    if a1 <= sub {
      // The whole remainder of the `a` span survives.
      if pos < a1 {
        output.push(pos);
        output.push(a1);
      }
      pos = a1;
    } else if a0 >= sub {
      // The `a` span starts under the `b` span; nothing survives here.
      pos = b1;
    } else {
      // The `a` span straddles the start of the `b` span.
      output.push(pos);
      output.push(b0);
      pos = b1;
    }

    while a1 <= pos {
      ai += 2;
      if ai >= a_len {
        return output;
      }
      a0 = a[ai];
      a1 = a[ai + 1];
    }

    if b1 <= pos {
      bi += 2;
      if bi >= b_len {
        // Flush the rest of `a`.
        while ai < a_len {
          let lo = a[ai].max(pos);
          let hi = a[ai + 1];
          if lo < hi {
            output.push(lo);
            output.push(hi);
          }
          ai += 2;
        }
        return output;
      }
      b0 = b[bi];
      b1 = b[bi + 1];
    }

    sub = b0;
    pos = pos.max(a0);
  }
}
