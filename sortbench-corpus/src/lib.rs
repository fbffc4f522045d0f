#![warn(missing_docs)]
//! SortBench Corpus Generator
//!
//! Produces integer sequences whose *shape* is fixed by a test class and whose
//! *content* is drawn from an injected random source:
//! - Sorted and reverse-sorted runs (step 1)
//! - Partially sorted sequences (sorted prefix, random tail)
//! - Distinct random samples
//! - Random samples with one large-magnitude outlier
//!
//! Every generator is a pure function of its arguments and the `Rng` it is
//! handed. Seed a `rand::rngs::StdRng` for reproducible corpora.

mod class;
mod generators;
mod sequence;

pub use class::{ParseTestClassError, TestClass};
pub use generators::{
    CorpusParams, GenerationError, OUTLIER_RANGE, generate, partially_sorted, random,
    random_with_outliers, reverse_sorted, sorted,
};
pub use sequence::{ParseSequenceError, format_sequence, parse_sequence};
