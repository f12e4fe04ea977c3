// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Property-based tests for the span set algebra.
//!
//! Bounds are drawn from small integers so every operation is exact; the
//! rounding-sensitive behavior is covered by the unit tests.

use proptest::prelude::*;
use spanset::ops::{Bounded, Difference, Empty, Intersection, SymmetricDifference, Union};
use spanset::{Coverage, SpanSet};

fn raw_pairs() -> impl Strategy<Value = Vec<(f64, f64)>> {
  prop::collection::vec(
    (-50i32..50, -50i32..50).prop_map(|(a, b)| (f64::from(a), f64::from(b))),
    0..12,
  )
}

fn set_of(pairs: &[(f64, f64)]) -> SpanSet<f64> {
  SpanSet::from_pairs(pairs.iter().copied()).expect("finite pairs always canonicalize")
}

proptest! {
  #[test]
  fn canonicalization_is_idempotent(pairs in raw_pairs()) {
    let once = set_of(&pairs);
    let twice = SpanSet::from_bounds(once.as_bounds().to_vec()).unwrap();
    prop_assert_eq!(once, twice);
  }

  #[test]
  fn canonicalization_ignores_input_order(
    (pairs, shuffled) in raw_pairs().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
  ) {
    prop_assert_eq!(set_of(&pairs), set_of(&shuffled));
  }

  #[test]
  fn canonical_invariants_hold(pairs in raw_pairs()) {
    let set = set_of(&pairs);
    prop_assert!(SpanSet::is_canonical(set.as_bounds()));
  }

  #[test]
  fn union_commutes(a in raw_pairs(), b in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);
    prop_assert_eq!(a.union(&b), b.union(&a));
  }

  #[test]
  fn union_associates(a in raw_pairs(), b in raw_pairs(), c in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);
    let c = set_of(&c);
    prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
  }

  #[test]
  fn union_identity_and_self(a in raw_pairs()) {
    let a = set_of(&a);
    let empty = SpanSet::<f64>::empty();
    prop_assert_eq!(a.union(&empty), a.clone());
    prop_assert_eq!(empty.union(&a), a.clone());
    prop_assert_eq!(a.union(&a.clone()), a);
  }

  #[test]
  fn intersection_commutes(a in raw_pairs(), b in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);
    prop_assert_eq!(a.intersection(&b), b.intersection(&a));
  }

  #[test]
  fn intersection_associates(a in raw_pairs(), b in raw_pairs(), c in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);
    let c = set_of(&c);
    prop_assert_eq!(a.intersection(&b).intersection(&c), a.intersection(&b.intersection(&c)));
  }

  #[test]
  fn intersection_identity_and_self(a in raw_pairs()) {
    let a = set_of(&a);
    let empty = SpanSet::<f64>::empty();
    prop_assert!(a.intersection(&empty).is_empty());
    prop_assert!(empty.intersection(&a).is_empty());
    prop_assert_eq!(a.intersection(&a.clone()), a);
  }

  #[test]
  fn symmetric_difference_laws(a in raw_pairs(), b in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);
    let empty = SpanSet::<f64>::empty();

    prop_assert!(a.symmetric_difference(&a.clone()).is_empty());
    prop_assert_eq!(a.symmetric_difference(&empty), a.clone());
    prop_assert_eq!(empty.symmetric_difference(&a), a.clone());
    // Self-inverse: xoring `b` twice lands back on `a`.
    prop_assert_eq!(a.symmetric_difference(&b).symmetric_difference(&b), a);
  }

  #[test]
  fn difference_and_intersection_decompose(a in raw_pairs(), b in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);
    let kept = a.difference(&b);
    let shared = a.intersection(&b);

    prop_assert!(kept.intersection(&shared).is_empty());
    prop_assert_eq!(kept.union(&shared), a);
  }

  #[test]
  fn coverage_agrees_with_the_sweeps(a in raw_pairs(), b in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);
    let shared = a.intersection(&b);
    let leftover = b.difference(&a);

    let expected = if b.is_empty() || shared.is_empty() {
      Coverage::None
    } else if leftover.is_empty() {
      Coverage::Full
    } else {
      Coverage::Part
    };
    prop_assert_eq!(a.test_set(&b), expected);
  }

  #[test]
  fn scalar_coverage_respects_span_bounds(pairs in raw_pairs()) {
    let set = set_of(&pairs);
    for span in set.iter() {
      let mid = (span.lower() + span.upper()) / 2.0;
      prop_assert_eq!(set.test_value(span.lower()), Coverage::Full);
      prop_assert_eq!(set.test_value(mid), Coverage::Full);
      prop_assert_eq!(set.test_value(span.upper()), Coverage::None);
    }
  }

  #[test]
  fn shift_round_trips(pairs in raw_pairs(), offset in -1000i32..1000) {
    let set = set_of(&pairs);
    let offset = f64::from(offset);
    prop_assert_eq!(set.shift(offset).shift(-offset), set.clone());
    prop_assert_eq!(set.shift(0.0), set);
  }

  #[test]
  fn scale_identity_and_collapse(pairs in raw_pairs()) {
    let set = set_of(&pairs);
    prop_assert_eq!(set.scale(1.0).unwrap(), set.clone());
    prop_assert!(set.scale(0.0).unwrap().is_empty());
  }

  #[test]
  fn in_place_variants_match_the_pure_ones(a in raw_pairs(), b in raw_pairs()) {
    let a = set_of(&a);
    let b = set_of(&b);

    let mut union = a.clone();
    union.union_in_place([&b]);
    prop_assert_eq!(union, a.union(&b));

    let mut intersection = a.clone();
    intersection.intersection_in_place([&b]);
    prop_assert_eq!(intersection, a.intersection(&b));

    let mut xor = a.clone();
    xor.symmetric_difference_in_place([&b]);
    prop_assert_eq!(xor, a.symmetric_difference(&b));

    let mut difference = a.clone();
    difference.difference_in_place([&b]);
    prop_assert_eq!(difference, a.difference(&b));
  }
}
