pub mod dependency_engine;
pub mod feature_parser;
pub mod lifecycle_runner;
pub mod priority_comparator;
pub mod start_time_predictor;

pub use dependency_engine::{DependencyEngine, DependencyStatus};
pub use feature_parser::FeatureParser;
pub use lifecycle_runner::{LifecycleResult, LifecycleRunner};
pub use priority_comparator::PriorityComparator;
pub use start_time_predictor::{StartPrediction, StartTimePredictor};
