//! Testing infrastructure for sleepmerge integration tests.
//!
//! - `codec`: a JSON stand-in for the signal container codec
//! - `fixtures`: builders for synthetic signal files and oximetry images
//! - `card`: export directory layouts, in memory or on disk
//! - `assertions`: checks on merged output

pub mod assertions;
pub mod card;
pub mod codec;
pub mod fixtures;

pub use card::CardBuilder;
pub use codec::JsonCodec;
pub use fixtures::{SignalFileBuilder, at, flat_oximetry};
