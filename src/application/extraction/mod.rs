mod filename_strategy;
mod heuristic_strategy;
mod minimal_strategy;
mod normalizer;
pub mod prompts;
mod strategy;
mod text_strategy;
mod verifier;
mod vision_strategy;

pub use filename_strategy::FilenameStrategy;
pub use heuristic_strategy::HeuristicStrategy;
pub use minimal_strategy::MinimalStrategy;
pub use normalizer::{normalize, NormalizerError};
pub use strategy::{ExtractionStrategy, StrategyError};
pub use text_strategy::TextStrategy;
pub use verifier::CompletenessVerifier;
pub use vision_strategy::VisionStrategy;
