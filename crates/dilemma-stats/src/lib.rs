//! Statistical summaries for simulation output.
//!
//! # Example
//!
//! ```
//! use dilemma_stats::descriptive::DescriptiveStats;
//!
//! let fitness = [0.25, 0.5, 0.75];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.mean, 0.5);
//! ```

pub mod descriptive;
