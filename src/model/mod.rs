pub mod bar;
pub mod plan;
pub mod profile;
pub mod task;
pub mod timeline;

pub use bar::TimelineBar;
pub use plan::TimelinePlan;
pub use profile::{Branch, CareerTrack, Profile};
pub use task::Task;
pub use timeline::TimelineConfig;
