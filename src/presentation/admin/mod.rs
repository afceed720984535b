//! Admin-area rendering.

pub mod form;
pub mod table;

use crate::domain::entities::ForumPost;
use crate::util::timestamp::display_date;

pub const NO_FORUM_POSTS: &str = "No forum posts yet.";

/// Moderation listing; the empty message depends on the post count alone.
pub fn render_moderation(posts: &[ForumPost]) -> String {
    if posts.is_empty() {
        return NO_FORUM_POSTS.to_string();
    }
    posts
        .iter()
        .map(|post| {
            let date = post.created_at.as_deref().map(display_date).unwrap_or_default();
            let category = post.category_name.as_deref().unwrap_or("Uncategorized");
            format!(
                "#{} {} | by {} | {} | {} | {} replies | delete-post {}\n",
                post.id, post.title, post.author_name, category, date, post.reply_count, post.id
            )
        })
        .collect()
}
