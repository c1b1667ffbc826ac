//! goalpath-core: expense summary model, goal requests, and the savings projector

pub mod error;
pub mod goal;
pub mod projection;
pub mod summary;

pub use error::InputValidationError;
pub use goal::GoalRequest;
pub use projection::{
    project, project_with_policy, AdjustedPlan, AdjustedScenario, BaselineScenario, Cut,
    CutPolicy, ProjectionResult,
};
pub use summary::ExpenseSummary;
