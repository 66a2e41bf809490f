use ammonia::Builder;

/// Strips scripts, event handlers and unknown tags from user-authored HTML.
pub fn sanitize_user_html(input: &str) -> String {
    Builder::default()
        .link_rel(Some("noopener noreferrer nofollow"))
        .clean(input.trim())
        .to_string()
}
