pub mod loader;

pub use loader::load_recommender;
pub use loader::ArtifactPaths;
