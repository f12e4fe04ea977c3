// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors raised at the ingestion and control-parameter boundaries.
//!
//! Every error is detected synchronously by the call receiving the bad
//! input; nothing is retried or recovered internally. Non-finite bounds
//! produced *during* arithmetic (a shift by infinity, a span collapsed by
//! rounding) are not errors: the affected span is dropped from the result.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanSetError {
  /// A raw bound was NaN or infinite where a finite number is required.
  #[error("span bound must be a finite number")]
  InvalidBound,

  /// An out-of-domain control parameter, such as a negative scale factor.
  #[error("invalid argument: {0}")]
  InvalidArgument(&'static str),

  /// Raw input is not a recognizable sequence of bound pairs.
  #[error("packed span data must hold an even number of bounds")]
  InvalidShape,
}
