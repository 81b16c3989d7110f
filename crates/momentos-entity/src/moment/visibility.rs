//! Who may see a moment.

use uuid::Uuid;

/// A moment is hidden from everyone except its owner when either the
/// owner's profile or the moment itself is private.
pub fn can_view(
    owner_id: Uuid,
    owner_is_private: bool,
    moment_is_private: bool,
    viewer: Option<Uuid>,
) -> bool {
    if viewer == Some(owner_id) {
        return true;
    }
    !owner_is_private && !moment_is_private
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_moment_is_visible_to_anyone() {
        let owner = Uuid::new_v4();
        assert!(can_view(owner, false, false, None));
        assert!(can_view(owner, false, false, Some(Uuid::new_v4())));
    }

    #[test]
    fn private_profile_hides_from_others() {
        let owner = Uuid::new_v4();
        assert!(!can_view(owner, true, false, None));
        assert!(!can_view(owner, true, false, Some(Uuid::new_v4())));
    }

    #[test]
    fn private_moment_hides_from_others() {
        let owner = Uuid::new_v4();
        assert!(!can_view(owner, false, true, Some(Uuid::new_v4())));
    }

    #[test]
    fn owner_bypasses_both_flags() {
        let owner = Uuid::new_v4();
        assert!(can_view(owner, true, true, Some(owner)));
    }
}
