//! Moment (short video post) entities, feed ordering, and visibility.

pub mod feed;
pub mod model;
pub mod visibility;

pub use feed::{FeedFilter, FeedSort, like_pattern};
pub use model::{CreateMoment, Moment, MomentListing, MomentTag, UpdateMoment, reached_view_milestone};
pub use visibility::can_view;
