//! Public forum rendering for the terminal.

use crate::application::forum::ThreadView;
use crate::domain::entities::{ForumCategory, ForumPost};
use crate::util::timestamp::display_date;

pub const NO_DISCUSSIONS: &str = "No discussions yet. Be the first to start a conversation!";
pub const POST_NOT_FOUND: &str = "Post not found.";
pub const BACK_TO_FORUM: &str = "Back to Forum: clubsite-cli forum list";
pub const UNAVAILABLE: &str = "The forum is unavailable right now. Try again later.";

/// `Posted by Rafi • Mar 1, 2024 • Help • 2 replies`
pub fn post_meta(post: &ForumPost) -> String {
    let mut meta = format!("Posted by {}", post.author_name);
    if let Some(created) = post.created_at.as_deref() {
        meta.push_str(&format!(" • {}", display_date(created)));
    }
    if let Some(category) = post.category_name.as_deref() {
        meta.push_str(&format!(" • {category}"));
    }
    if post.reply_count > 0 {
        meta.push_str(&format!(" • {} replies", post.reply_count));
    }
    meta
}

pub fn render_categories(categories: &[ForumCategory]) -> String {
    let mut out = String::from("All Topics\n");
    for category in categories {
        out.push_str(&format!("  [{}] {}", category.id, category.name));
        if let Some(description) = category.description.as_deref() {
            out.push_str(&format!(" - {description}"));
        }
        out.push('\n');
    }
    out
}

pub fn render_post_list(posts: &[ForumPost]) -> String {
    if posts.is_empty() {
        return NO_DISCUSSIONS.to_string();
    }
    posts
        .iter()
        .map(|post| format!("#{} {}\n    {}\n", post.id, post.title, post_meta(post)))
        .collect()
}

pub fn render_thread(view: &ThreadView) -> String {
    let detail = match view {
        ThreadView::Found(detail) => detail,
        ThreadView::NotFound => return format!("{POST_NOT_FOUND}\n{BACK_TO_FORUM}"),
        ThreadView::Unavailable => return format!("{UNAVAILABLE}\n{BACK_TO_FORUM}"),
    };

    let post = &detail.post;
    let mut out = format!("{}\n{}\n\n", post.title, post_meta(post));
    for paragraph in post.content.split('\n') {
        out.push_str(paragraph);
        out.push('\n');
    }
    if !detail.replies.is_empty() {
        out.push_str(&format!("\n{} Replies\n", detail.replies.len()));
        for reply in &detail.replies {
            let date = reply.created_at.as_deref().map(display_date).unwrap_or_default();
            out.push_str(&format!(
                "  #{} {} • {date}\n    {}\n",
                reply.id, reply.author_name, reply.content
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ForumPostDetail, ForumReply};

    fn post() -> ForumPost {
        ForumPost {
            id: 7,
            title: "Line follower".into(),
            content: "PID tuning?\nKp is 2".into(),
            author_name: "Rafi".into(),
            author_email: None,
            category_id: Some(2),
            category_name: Some("Help".into()),
            reply_count: 2,
            created_at: Some("2024-03-01T10:00:00".into()),
        }
    }

    #[test]
    fn meta_joins_optional_parts() {
        assert_eq!(
            post_meta(&post()),
            "Posted by Rafi • Mar 1, 2024 • Help • 2 replies"
        );
        let bare = ForumPost {
            category_name: None,
            reply_count: 0,
            created_at: None,
            ..post()
        };
        assert_eq!(post_meta(&bare), "Posted by Rafi");
    }

    #[test]
    fn not_found_offers_way_back() {
        let rendered = render_thread(&ThreadView::NotFound);
        assert!(rendered.contains(POST_NOT_FOUND));
        assert!(rendered.contains(BACK_TO_FORUM));
        assert!(!render_thread(&ThreadView::Unavailable).contains(POST_NOT_FOUND));
    }

    #[test]
    fn thread_lists_replies_in_order() {
        let detail = ForumPostDetail {
            post: post(),
            replies: vec![
                ForumReply {
                    id: 1,
                    post_id: 7,
                    content: "Lower Kd".into(),
                    author_name: "Mim".into(),
                    author_email: None,
                    created_at: None,
                },
                ForumReply {
                    id: 2,
                    post_id: 7,
                    content: "Check wiring".into(),
                    author_name: "Nadia".into(),
                    author_email: None,
                    created_at: None,
                },
            ],
        };
        let rendered = render_thread(&ThreadView::Found(Box::new(detail)));
        assert!(rendered.contains("2 Replies"));
        let first = rendered.find("Lower Kd").expect("first reply");
        let second = rendered.find("Check wiring").expect("second reply");
        assert!(first < second);
    }
}
