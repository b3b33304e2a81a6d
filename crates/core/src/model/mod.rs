mod category;
mod ids;
mod problem;
mod settings;

pub use ids::SessionId;

pub use category::{AgeCategory, Category, CategoryError};
pub use problem::{GeneratedProblem, ProblemRequest};
pub use settings::{GenerationSettings, GenerationSettingsDraft, GenerationSettingsError};
