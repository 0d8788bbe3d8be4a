pub mod accessibility;
pub mod color;
pub mod config;
pub mod engine;
pub mod fix;
pub mod id;
pub mod layout;
pub mod model;
pub mod palette;
pub mod report;
pub mod score;
pub mod spacing;
pub mod typography;

pub use config::{CategoryWeights, CritiqueConfig, SeverityWeights};
pub use engine::{critique_document, critique_document_with};
pub use fix::apply_auto_fixes;
pub use id::{ElementId, IdGen, SequentialIds};
pub use model::*;
pub use report::render_report;
