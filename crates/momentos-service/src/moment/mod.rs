//! Moments: posting, feeds, detail, and engagement (likes and views).

pub mod engagement;
pub mod service;
pub mod view;

pub use engagement::{EngagementService, ViewOutcome};
pub use service::{MomentChanges, MomentService, NewMoment};
pub use view::{MomentCard, MomentDetail};
