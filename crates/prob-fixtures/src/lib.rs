#![deny(missing_docs)]
//! Seeded sampling, dataset generation and fixture persistence.
//!
//! Every dataset routine receives its own [`prob_core::RngHandle`], derived
//! from the configured master seed and the dataset's fixed substream index, so
//! the same seed always reproduces byte-identical fixture files.

pub mod config;
pub mod dataset;
pub mod fixture;
pub mod generators;
pub mod hash;
pub mod manifest;
pub mod runner;
pub mod sampling;
pub mod serde;

pub use config::{
    AdvancedParams, BoxPlotParams, CentralTendencyParams, CoinFlipParams, DatasetParams,
    DispersionParams, FiveCoinParams, GeneratorConfig, NormalParams, QuantileParams,
    SpeciesParams,
};
pub use dataset::DatasetKind;
pub use fixture::{
    stage_bytes, write_bytes_atomic, write_fixture, FixtureRecord, StagedFile,
};
pub use generators::{
    build_records, generate_advanced_visualization, generate_box_plot, generate_central_tendency,
    generate_coin_flip, generate_dispersion, generate_five_coin_distribution, generate_quantiles,
    AdvancedFixture, BoxPlotFixture, CentralTendencyFixture, CoinFlipFixture, DispersionFixture,
    FiveCoinFixture, QuantilesFixture,
};
pub use hash::{sha256_hex, stable_hash_string};
pub use manifest::{FixtureManifest, ManifestEntry, SkippedDataset, MANIFEST_FILE_NAME};
pub use runner::{generate_all, GenerateError, GenerationReport};
pub use sampling::{
    sample_binomial, sample_bivariate_normal, sample_categorical, sample_exponential,
    sample_normal, sample_skew_normal, BivariateNormal, SampleSet,
};
pub use crate::serde::{from_json_slice, to_canonical_json_bytes, to_canonical_value};
