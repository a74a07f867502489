#![deny(unsafe_code)]

//! Rule-based validation of extracted candidate records.
//!
//! Rules run in a fixed order and every triggered reason is collected,
//! so a rejected row reports all of its problems at once. Hard rules
//! reject; the recommended-field rule only flags for review. Rejection
//! is never an error: the run continues and the rejected rows land in
//! the [`patron_model::RejectionReport`].

mod checks;
mod validator;

pub use validator::{ValidationOutcome, Validator};
