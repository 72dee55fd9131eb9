pub mod config;
pub mod engine;
pub mod format;
pub mod output;
pub mod params;
pub mod types;

pub use engine::{compute, ResultSet};
pub use params::{AiTier, IndustryId, ParamKey, ParameterSet, ParameterStore};
