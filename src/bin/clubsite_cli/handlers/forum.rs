#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clubsite::application::error::AppError;
use clubsite::application::forum::{ForumThread, ThreadView};
use clubsite::domain::forum::{CategoryFilter, PostDraft, ReplyDraft};
use clubsite::presentation::forum::{render_categories, render_post_list, render_thread};

use crate::args::ForumCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_value;
use crate::print::print_text;

pub async fn handle(ctx: &Ctx, cmd: ForumCmd) -> Result<(), CliError> {
    match cmd {
        ForumCmd::Categories => categories(ctx).await,
        ForumCmd::List { category } => list(ctx, category).await,
        ForumCmd::Show { id } => show(ctx, id).await,
        ForumCmd::Post {
            title,
            content,
            content_file,
            author,
            email,
            category,
        } => {
            let draft = PostDraft {
                title,
                content: read_value(content, content_file)?,
                author_name: author,
                author_email: email,
                category_id: category,
            };
            post(ctx, draft).await
        }
        ForumCmd::Reply {
            post_id,
            content,
            content_file,
            author,
            email,
        } => reply(ctx, post_id, content, content_file, author, email).await,
    }
}

async fn categories(ctx: &Ctx) -> Result<(), CliError> {
    let board = ctx.forum_board();
    board.load_overview().await;
    print_text(&render_categories(&board.categories()));
    Ok(())
}

async fn list(ctx: &Ctx, category: Option<i64>) -> Result<(), CliError> {
    let board = ctx.forum_board();
    board.load_overview().await;
    if category.is_some() {
        board.filter_by_category(CategoryFilter::from(category)).await;
    }
    print_text(&render_post_list(&board.posts()));
    Ok(())
}

async fn show(ctx: &Ctx, id: i64) -> Result<(), CliError> {
    let thread = ctx.forum_thread();
    let view = load_thread(&thread, id).await?;
    print_text(&render_thread(&view));
    Ok(())
}

async fn post(ctx: &Ctx, draft: PostDraft) -> Result<(), CliError> {
    let board = ctx.forum_board();
    board.create_post(draft).await?;
    print_text("Discussion created.");
    Ok(())
}

async fn reply(
    ctx: &Ctx,
    post_id: i64,
    content: Option<String>,
    content_file: Option<PathBuf>,
    author: String,
    email: Option<String>,
) -> Result<(), CliError> {
    if !ctx.settings.forum.replies_enabled {
        return Err(CliError::RepliesDisabled);
    }
    let draft = ReplyDraft {
        content: read_value(content, content_file)?,
        author_name: author,
        author_email: email,
    };
    draft.validate().map_err(AppError::from)?;

    let thread = ctx.forum_thread();
    load_thread(&thread, post_id).await?;
    thread.create_reply(draft).await?;
    if let Some(view) = thread.view() {
        print_text(&render_thread(&view));
    }
    Ok(())
}

/// Not-found and unavailable posts print their notice and fail the command.
async fn load_thread(thread: &ForumThread, id: i64) -> Result<ThreadView, CliError> {
    match thread.load(id).await {
        Some(view @ ThreadView::Found(_)) => Ok(view),
        Some(view @ ThreadView::NotFound) => {
            print_text(&render_thread(&view));
            Err(CliError::NotFound {
                entity: "forum post",
                id,
            })
        }
        Some(view @ ThreadView::Unavailable) => {
            print_text(&render_thread(&view));
            Err(CliError::Unavailable)
        }
        None => Err(CliError::Unavailable),
    }
}
