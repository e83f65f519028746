//! Test suite: known-answer vectors and quantified cipher properties.
