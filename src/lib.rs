pub mod analysis;
pub mod capability;
pub mod catalog;
pub mod config;
pub mod deserializers;
pub mod error;
pub mod flavor;
pub mod heatmap;
pub mod interventions;
pub mod strategic;
pub mod survey;
pub mod taxonomy;
pub mod weakness;

pub use analysis::{WaveAnalysis, analyze_wave};
pub use capability::{Benchmarks, compute_capability_weaknesses};
pub use catalog::{Catalog, CatalogLoader, CatalogSource, MiniIntervention, load_catalog};
pub use config::Config;
pub use error::{InsightsError, Result};
pub use flavor::Flavor;
pub use heatmap::{ColorBand, Heatmap, SentimentCell, compute_sentiment_heatmap};
pub use interventions::{InterventionRecommendation, recommend_interventions};
pub use survey::{CapabilityRow, DemographicFilter, Demographics, SentimentRow};
pub use taxonomy::{CellId, ConcernLevel, Dimension, RootCause};
pub use weakness::{
    SentimentWeaknessOptions, Severity, Weakness, WeaknessKind, compute_sentiment_weaknesses,
};
