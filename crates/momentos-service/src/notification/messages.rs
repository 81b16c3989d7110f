//! Human-readable notification text.

/// "ana liked your moment "Sunset"".
pub fn liked(actor_username: &str, moment_title: &str) -> String {
    format!("{actor_username} liked your moment \"{moment_title}\"")
}

/// "Your moment "Sunset" reached 15 views".
pub fn view_milestone(moment_title: &str, views: i64) -> String {
    format!("Your moment \"{moment_title}\" reached {views} views")
}

/// "ana commented on your moment "Sunset"".
pub fn commented(actor_username: &str, moment_title: &str) -> String {
    format!("{actor_username} commented on your moment \"{moment_title}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_actor_and_moment() {
        assert_eq!(liked("ana", "Praia"), "ana liked your moment \"Praia\"");
        assert_eq!(
            view_milestone("Praia", 15),
            "Your moment \"Praia\" reached 15 views"
        );
        assert!(commented("rui", "Praia").starts_with("rui commented"));
    }
}
