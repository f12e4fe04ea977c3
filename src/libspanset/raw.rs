// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Record-shaped ingestion and export.
//!
//! External data often arrives as a list of objects naming their bounds
//! `from`/`to`, `start`/`end` or `a`/`b` depending on the producer. The
//! [`SpanRecord`] type resolves those spellings once, at the serde
//! boundary, so the set constructors only ever see plain numeric pairs.

use crate::errors::SpanSetError;
use crate::ops::Bounded;
use crate::span_set::SpanSet;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// One span as an external record.
///
/// Deserialization accepts `from`/`start`/`a` for the lower bound and
/// `to`/`end`/`b` for the upper bound; serialization always writes
/// `from`/`to`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord<B> {
  #[serde(alias = "start", alias = "a")]
  pub from: B,
  #[serde(alias = "end", alias = "b")]
  pub to: B,
}

impl<B: Float> SpanSet<B> {
  /// Canonicalizes a sequence of records.
  pub fn from_records<I>(records: I) -> Result<SpanSet<B>, SpanSetError>
  where
    I: IntoIterator<Item = SpanRecord<B>>,
  {
    Self::from_pairs(records.into_iter().map(|record| (record.from, record.to)))
  }

  /// Exports the set as records, one per span.
  pub fn to_records(&self) -> Vec<SpanRecord<B>> {
    self
      .iter()
      .map(|span| SpanRecord { from: span.lower(), to: span.upper() })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ops::Bounded;

  fn spans(bounds: Vec<f64>) -> SpanSet<f64> {
    SpanSet::from_bounds(bounds).expect("test data must canonicalize")
  }

  #[test]
  fn records_round_trip() {
    let set = spans(vec![1.0, 2.0, 4.0, 5.0]);
    let records = set.to_records();
    assert_eq!(records, vec![
      SpanRecord { from: 1.0, to: 2.0 },
      SpanRecord { from: 4.0, to: 5.0 },
    ]);
    assert_eq!(SpanSet::from_records(records).unwrap(), set);
  }

  #[test]
  fn records_are_canonicalized() {
    let records = vec![
      SpanRecord { from: 4.0, to: 5.0 },
      SpanRecord { from: 1.0, to: 2.0 },
      SpanRecord { from: 2.0, to: 3.0 },
    ];
    assert_eq!(SpanSet::from_records(records).unwrap(), spans(vec![1.0, 3.0, 4.0, 5.0]));
  }

  #[test]
  fn records_reject_non_finite_bounds() {
    let records = vec![SpanRecord { from: 0.0, to: f64::NAN }];
    assert_eq!(SpanSet::from_records(records), Err(SpanSetError::InvalidBound));
  }

  #[test]
  fn record_field_names_are_detected() {
    let parsed: Vec<SpanRecord<f64>> = serde_json::from_str(
      r#"[{"from": 1, "to": 2}, {"start": 4, "end": 5}, {"a": 7, "b": 8}]"#,
    )
    .unwrap();
    let set = SpanSet::from_records(parsed).unwrap();
    assert_eq!(set.as_bounds(), &[1.0, 2.0, 4.0, 5.0, 7.0, 8.0]);
  }

  #[test]
  fn records_serialize_with_default_field_names() {
    let set = spans(vec![1.0, 2.0]);
    let json = serde_json::to_string(&set.to_records()).unwrap();
    assert_eq!(json, r#"[{"from":1.0,"to":2.0}]"#);
  }

  #[test]
  fn exported_records_mirror_the_spans() {
    let set = spans(vec![1.0, 2.0, 4.0, 5.0]);
    for (record, span) in set.to_records().into_iter().zip(set.iter()) {
      assert_eq!(record.from, span.lower());
      assert_eq!(record.to, span.upper());
    }
  }
}
