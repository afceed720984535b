#![deny(clippy::all, clippy::pedantic)]

use clubsite::application::blog::BlogView;
use clubsite::presentation::blog::{render_list, render_post};

use crate::args::BlogCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_text;

pub async fn handle(ctx: &Ctx, cmd: BlogCmd) -> Result<(), CliError> {
    match cmd {
        BlogCmd::List => list(ctx).await,
        BlogCmd::Show { id } => show(ctx, id).await,
    }
}

async fn list(ctx: &Ctx) -> Result<(), CliError> {
    let blog = ctx.blog();
    blog.list_published().await;
    print_text(&render_list(&blog.posts()));
    Ok(())
}

async fn show(ctx: &Ctx, id: i64) -> Result<(), CliError> {
    let view = ctx.blog().get(id).await;
    print_text(&render_post(&view));
    match view {
        BlogView::Found(_) => Ok(()),
        BlogView::NotFound => Err(CliError::NotFound {
            entity: "blog post",
            id,
        }),
        BlogView::Unavailable => Err(CliError::Unavailable),
    }
}
