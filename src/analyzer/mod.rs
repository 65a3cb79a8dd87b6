pub mod version_analyzer;

pub use version_analyzer::{
    Classification, ClassificationRuleSet, ReplayStep, VersionAccumulator,
};
