pub mod cli;
pub mod config;
pub mod input;
pub mod kb;
pub mod model;
pub mod narrative;
pub mod pipeline;
pub mod report;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::kb::defs::KnowledgeBase;
    pub use crate::model::result::AnalysisResult;
    pub use crate::pipeline::orchestrator::{AnalysisError, Analyzer, parse_drug_list};
}
