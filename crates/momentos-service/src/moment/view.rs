//! Moments as returned to callers, with tags and comments attached.

use std::collections::HashMap;

use uuid::Uuid;

use momentos_entity::comment::CommentWithAuthor;
use momentos_entity::moment::{MomentListing, MomentTag};
use momentos_entity::tag::Tag;

/// A listed moment with its tags.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MomentCard {
    /// Moment, owner, and like data.
    pub listing: MomentListing,
    /// Attached tags, by name.
    pub tags: Vec<Tag>,
}

/// A moment with everything the detail page shows.
#[derive(Debug, Clone)]
pub struct MomentDetail {
    /// The listed moment.
    pub card: MomentCard,
    /// Comments, oldest first.
    pub comments: Vec<CommentWithAuthor>,
}

/// Attach each tag row to its moment, keeping listing order.
pub fn attach_tags(listings: Vec<MomentListing>, tags: Vec<MomentTag>) -> Vec<MomentCard> {
    let mut by_moment: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for tag in tags {
        by_moment.entry(tag.moment_id).or_default().push(Tag {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        });
    }

    listings
        .into_iter()
        .map(|listing| {
            let tags = by_moment.remove(&listing.moment.id).unwrap_or_default();
            MomentCard { listing, tags }
        })
        .collect()
}
