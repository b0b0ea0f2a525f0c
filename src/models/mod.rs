pub mod analytics;
pub mod task;
pub mod user;

pub use analytics::{AnalyticsSnapshot, SummaryRequest, SummaryResponse};
pub use task::{Task, TaskChanges, TaskInput, TaskUpdate};
pub use user::{Acknowledgement, NewUser, OnboardingRequest, ProfileResponse, User, UserUpdate};
