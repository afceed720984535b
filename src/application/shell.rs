//! Admin shell: navigation over the guarded admin sections.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::auth::{AdminSession, AuthError, AuthGate};
use crate::application::binding::ResourceKind;
use crate::application::crud::CrudController;
use crate::application::error::AppError;
use crate::application::forum::ForumModeration;
use crate::application::ports::MaintenanceApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Dashboard,
    Resource(ResourceKind),
    Forum,
}

impl AdminSection {
    /// Navigation order.
    pub fn all() -> Vec<AdminSection> {
        let mut sections = vec![AdminSection::Dashboard];
        sections.extend(ResourceKind::ALL.into_iter().map(AdminSection::Resource));
        sections.push(AdminSection::Forum);
        sections
    }

    pub fn title(self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Dashboard",
            AdminSection::Resource(kind) => kind.title(),
            AdminSection::Forum => "Forum",
        }
    }
}

impl fmt::Display for AdminSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    RedirectToLogin,
    Ready(AdminSession),
}

pub struct AdminShell {
    gate: AuthGate,
    controllers: Vec<CrudController>,
    forum: ForumModeration,
    maintenance: Arc<dyn MaintenanceApi>,
}

impl AdminShell {
    pub fn new(
        gate: AuthGate,
        controllers: Vec<CrudController>,
        forum: ForumModeration,
        maintenance: Arc<dyn MaintenanceApi>,
    ) -> Self {
        Self {
            gate,
            controllers,
            forum,
            maintenance,
        }
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        self.gate.login(username, password).await
    }

    pub async fn logout(&self) {
        self.gate.logout().await;
    }

    /// Checks the session, then loads the section's data.
    ///
    /// Nothing protected is fetched unless the session check succeeds.
    pub async fn enter(&self, section: AdminSection) -> Entry {
        let session = match self.gate.check_session().await {
            Ok(session) => session,
            Err(_) => {
                info!(%section, "session missing; redirecting to login");
                return Entry::RedirectToLogin;
            }
        };

        match section {
            AdminSection::Dashboard => {}
            AdminSection::Resource(kind) => {
                if let Some(controller) = self.find(kind) {
                    controller.attach();
                    if let Err(err) = controller.load_all().await {
                        warn!(%section, error = %err, "section opened without data");
                    }
                }
            }
            AdminSection::Forum => {
                self.forum.attach();
                self.forum.list_all_posts().await;
            }
        }
        Entry::Ready(session)
    }

    /// Tears the section's view down so in-flight loads are ignored.
    pub fn leave(&self, section: AdminSection) {
        match section {
            AdminSection::Dashboard => {}
            AdminSection::Resource(kind) => {
                if let Some(controller) = self.find(kind) {
                    controller.detach();
                }
            }
            AdminSection::Forum => self.forum.detach(),
        }
    }

    pub fn resource(
        &self,
        session: &AdminSession,
        kind: ResourceKind,
    ) -> Result<&CrudController, AppError> {
        self.gate.require(session)?;
        self.find(kind).ok_or(AppError::not_found("resource section"))
    }

    pub fn forum(&self, session: &AdminSession) -> Result<&ForumModeration, AppError> {
        self.gate.require(session)?;
        Ok(&self.forum)
    }

    /// Populates sample data once; a failure is reported, never retried.
    pub async fn seed(&self, session: &AdminSession) -> Result<(), AppError> {
        self.gate.require(session)?;
        self.maintenance.seed().await.map_err(|err| {
            warn!(error = %err, "seeding failed");
            AppError::operation("seed sample data", err)
        })?;
        info!("sample data seeded");
        Ok(())
    }

    fn find(&self, kind: ResourceKind) -> Option<&CrudController> {
        self.controllers
            .iter()
            .find(|controller| controller.kind() == kind)
    }
}
