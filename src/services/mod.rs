pub mod catalog;
pub mod encoder;
pub mod predictor;
pub mod ranker;
pub mod recommendations;
pub mod scaler;

pub use catalog::CatalogStore;
pub use encoder::CategoryEncoder;
pub use predictor::{EmbeddingPredictor, FeedForwardPredictor};
pub use recommendations::{Encoders, RecommendationService};
pub use scaler::FeatureScaler;
