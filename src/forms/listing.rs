//! Admin listing helpers

use crate::db::schemas::BlogPostDoc;

/// Case-insensitive search over title, category and author.
/// A blank query matches everything.
pub fn search_blog_posts<'a>(posts: &'a [BlogPostDoc], query: &str) -> Vec<&'a BlogPostDoc> {
    let needle = query.trim().to_lowercase();
    posts
        .iter()
        .filter(|post| {
            needle.is_empty()
                || post.title.to_lowercase().contains(&needle)
                || post.category.as_str().contains(&needle)
                || post.author.to_lowercase().contains(&needle)
        })
        .collect()
}
