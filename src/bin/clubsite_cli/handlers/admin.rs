#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;

use clubsite::application::auth::AdminSession;
use clubsite::application::binding::ResourceKind;
use clubsite::application::confirm::Confirm;
use clubsite::application::crud::{CrudController, RemoveOutcome};
use clubsite::application::shell::{AdminSection, AdminShell, Entry};
use clubsite::domain::forum::CategoryDraft;
use clubsite::presentation::admin::{form, render_moderation, table::ListTable};
use tracing::info;

use crate::args::{AdminArgs, AdminCmd, ModerationCmd, ResourceCmd};
use crate::client::{CliError, Credentials, Ctx, resolve_credentials};
use crate::io::parse_assignments;
use crate::print::{print_json, print_text};
use crate::prompt::confirmer;

const SEED_PROMPT: &str = "Seed sample data? Running it twice may duplicate records.";

pub async fn handle(ctx: &Ctx, cmd: AdminArgs) -> Result<(), CliError> {
    let shell = ctx.admin_shell()?;
    if matches!(cmd.action, AdminCmd::Check) {
        return check(&shell).await;
    }

    let credentials = resolve_credentials(&cmd.credentials)?;
    shell
        .login(&credentials.username, credentials.password())
        .await?;
    let result = run(&shell, &credentials, cmd.action).await;
    shell.logout().await;
    result
}

async fn check(shell: &AdminShell) -> Result<(), CliError> {
    match shell.gate().check_session().await {
        Ok(_) => {
            print_text("Session active.");
            Ok(())
        }
        Err(_) => Err(CliError::LoginRequired),
    }
}

fn section_for(action: &AdminCmd) -> AdminSection {
    match (action, action.resource()) {
        (_, Some(kind)) => AdminSection::Resource(kind),
        (AdminCmd::Forum(_), None) => AdminSection::Forum,
        _ => AdminSection::Dashboard,
    }
}

async fn run(
    shell: &AdminShell,
    credentials: &Credentials,
    action: AdminCmd,
) -> Result<(), CliError> {
    let section = section_for(&action);
    let session = match shell.enter(section).await {
        Entry::Ready(session) => session,
        Entry::RedirectToLogin => return Err(CliError::LoginRequired),
    };
    info!(%section, "admin section entered");

    let result = match action {
        AdminCmd::Check | AdminCmd::LoginTest => {
            dashboard(&credentials.username);
            Ok(())
        }
        AdminCmd::ChangePassword { new_password_file } => {
            change_password(shell, &session, credentials, &new_password_file).await
        }
        AdminCmd::Seed { yes } => seed(shell, &session, yes).await,
        AdminCmd::Forum(args) => moderate(shell, &session, args.action).await,
        AdminCmd::Achievements(args)
        | AdminCmd::Initiatives(args)
        | AdminCmd::Workshops(args)
        | AdminCmd::Alumni(args)
        | AdminCmd::Projects(args)
        | AdminCmd::Blog(args) => match section {
            AdminSection::Resource(kind) => {
                let controller = shell.resource(&session, kind)?;
                manage(controller, kind, args.action).await
            }
            _ => Err(CliError::InvalidInput(format!("{section} is not a resource"))),
        },
    };
    shell.leave(section);
    result
}

fn dashboard(username: &str) {
    let mut out = format!("Logged in as {username}\n\nSections:\n");
    for section in AdminSection::all() {
        out.push_str(&format!("  {section}\n"));
    }
    print_text(&out);
}

async fn change_password(
    shell: &AdminShell,
    session: &AdminSession,
    credentials: &Credentials,
    new_password_file: &Path,
) -> Result<(), CliError> {
    let new_password = fs::read_to_string(new_password_file)
        .map_err(CliError::PasswordFile)?
        .trim_end_matches(['\r', '\n'])
        .to_string();
    shell
        .gate()
        .change_password(session, credentials.password(), &new_password)
        .await?;
    print_text("Password changed.");
    Ok(())
}

async fn seed(shell: &AdminShell, session: &AdminSession, yes: bool) -> Result<(), CliError> {
    if !confirmer(yes).confirm(SEED_PROMPT) {
        print_text("Cancelled.");
        return Ok(());
    }
    shell.seed(session).await?;
    print_text("Sample data seeded.");
    Ok(())
}

async fn manage(
    controller: &CrudController,
    kind: ResourceKind,
    cmd: ResourceCmd,
) -> Result<(), CliError> {
    match cmd {
        ResourceCmd::List { json } => {
            if controller.last_error().is_some() {
                return Err(CliError::Unavailable);
            }
            let items = controller.items();
            if json {
                print_json(&items)
            } else {
                print_text(&ListTable::build(controller.schema(), &items).render());
                Ok(())
            }
        }
        ResourceCmd::Schema => {
            let buffer = controller.open_create_form();
            let lines = form::describe(controller.schema(), &buffer);
            controller.cancel_form();
            print_text(&form::render(&format!("New {}", kind.singular()), &lines));
            Ok(())
        }
        ResourceCmd::Create { set } => {
            controller.open_create_form();
            submit_assignments(controller, &set).await?;
            print_text(&format!("{} created.", kind.singular()));
            Ok(())
        }
        ResourceCmd::Update { id, set } => {
            let item = controller.item(id).ok_or(CliError::NotFound {
                entity: kind.singular(),
                id,
            })?;
            controller.open_edit_form(&item);
            submit_assignments(controller, &set).await?;
            print_text(&format!("{} {id} updated.", kind.singular()));
            Ok(())
        }
        ResourceCmd::Delete { id, yes } => {
            if controller.item(id).is_none() {
                return Err(CliError::NotFound {
                    entity: kind.singular(),
                    id,
                });
            }
            let confirm = confirmer(yes);
            report_removal(controller.remove(id, confirm.as_ref()).await?);
            Ok(())
        }
    }
}

/// Applies every assignment to the open form before a single submit.
async fn submit_assignments(controller: &CrudController, set: &[String]) -> Result<(), CliError> {
    for (name, value) in parse_assignments(set)? {
        controller.set_field(&name, &value)?;
    }
    let buffer = controller
        .form()
        .map(|form| form.buffer)
        .ok_or_else(|| CliError::InvalidInput("no form is open".into()))?;
    controller.submit(buffer).await?;
    Ok(())
}

async fn moderate(
    shell: &AdminShell,
    session: &AdminSession,
    cmd: ModerationCmd,
) -> Result<(), CliError> {
    let forum = shell.forum(session)?;
    match cmd {
        ModerationCmd::List => {
            print_text(&render_moderation(&forum.posts()));
        }
        ModerationCmd::DeletePost { id, yes } => {
            let confirm = confirmer(yes);
            report_removal(forum.delete_post(id, confirm.as_ref()).await?);
        }
        ModerationCmd::DeleteReply { id, yes } => {
            let confirm = confirmer(yes);
            report_removal(forum.delete_reply(id, confirm.as_ref()).await?);
        }
        ModerationCmd::AddCategory {
            name,
            description,
            order,
        } => {
            forum
                .create_category(CategoryDraft {
                    name,
                    description,
                    order,
                })
                .await?;
            print_text("Category created.");
        }
    }
    Ok(())
}

fn report_removal(outcome: RemoveOutcome) {
    match outcome {
        RemoveOutcome::Deleted => print_text("Deleted."),
        RemoveOutcome::Cancelled => print_text("Cancelled."),
    }
}
