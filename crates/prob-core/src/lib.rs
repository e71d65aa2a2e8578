#![deny(missing_docs)]
#![doc = "Shared error family, deterministic RNG handle and provenance types for the probability fixture generator."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, ErrorKind, ProbError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
