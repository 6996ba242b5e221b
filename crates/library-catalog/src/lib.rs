mod browse;
mod catalog;
mod config;
mod download;
mod favorites;
mod positions;
mod rating;
pub mod sample;
mod store;
mod types;
pub mod verify;

pub use browse::*;
pub use catalog::*;
pub use config::*;
pub use download::*;
pub use favorites::*;
pub use positions::*;
pub use rating::StarRating;
pub use sample::{SampleBookOptions, generate_sample_book};
pub use store::*;
pub use types::*;
pub use verify::{VerifyOutcome, VerifyReport, verify_catalog};
