//! The sixteen analyses, one module each.
//!
//! Every analysis is a pure function of the dataset and its configuration
//! returning an [`Outcome`](crate::Outcome).

pub mod bands;
pub mod checkpoints;
pub mod correlation;
pub mod dashboard;
pub mod density;
pub mod distribution;
pub mod efficiency;
pub mod participation;
pub mod quadrants;
pub mod radar;
pub mod regression;
pub mod roles;
pub mod stability;
pub mod structure;
pub mod top_scorers;
pub mod trajectory;
