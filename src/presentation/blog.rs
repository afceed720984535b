use crate::application::blog::BlogView;
use crate::domain::entities::Record;
use crate::presentation::admin::table::truncate;
use crate::util::timestamp::display_date;

pub const NO_POSTS: &str = "No blog posts yet";
const EXCERPT_FALLBACK_CHARS: usize = 150;

pub fn render_list(posts: &[Record]) -> String {
    if posts.is_empty() {
        return NO_POSTS.to_string();
    }
    posts
        .iter()
        .map(|post| {
            let title = post.text("title").unwrap_or_default();
            let excerpt = match post.text("excerpt").filter(|text| !text.is_empty()) {
                Some(excerpt) => excerpt.to_string(),
                None => truncate(post.text("content").unwrap_or_default(), EXCERPT_FALLBACK_CHARS),
            };
            format!("#{} {title}\n    {}\n    {excerpt}\n", post.id, byline(post))
        })
        .collect()
}

pub fn render_post(view: &BlogView) -> String {
    match view {
        BlogView::Found(post) => format!(
            "{}\n{}\n\n{}\n",
            post.text("title").unwrap_or_default(),
            byline(post),
            post.text("content").unwrap_or_default()
        ),
        BlogView::NotFound => "Post not found.\nBack to Blog: clubsite-cli blog list".to_string(),
        BlogView::Unavailable => "The blog is unavailable right now.".to_string(),
    }
}

fn byline(post: &Record) -> String {
    let author = post.text("author").unwrap_or("Admin");
    match post.text("created_at") {
        Some(created) => format!("By {author} • {}", display_date(created)),
        None => format!("By {author}"),
    }
}
