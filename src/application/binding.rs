//! Resource bindings: a field schema paired with the remote operations of one
//! entity type, plus the catalog of resources the admin shell manages.

use std::fmt;
use std::sync::Arc;

use crate::application::ports::ResourceApi;
use crate::domain::error::DomainError;
use crate::domain::schema::{FieldSchema, FieldSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Achievements,
    Initiatives,
    Workshops,
    Alumni,
    Projects,
    Blog,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Achievements,
        ResourceKind::Initiatives,
        ResourceKind::Workshops,
        ResourceKind::Alumni,
        ResourceKind::Projects,
        ResourceKind::Blog,
    ];

    /// Collection path under the API base, e.g. `achievements`.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Achievements => "achievements",
            ResourceKind::Initiatives => "initiatives",
            ResourceKind::Workshops => "workshops",
            ResourceKind::Alumni => "alumni",
            ResourceKind::Projects => "projects",
            ResourceKind::Blog => "blog",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Achievements => "Achievements",
            ResourceKind::Initiatives => "Initiatives",
            ResourceKind::Workshops => "Workshops",
            ResourceKind::Alumni => "Alumni",
            ResourceKind::Projects => "Projects",
            ResourceKind::Blog => "Blog Posts",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Achievements => "Achievement",
            ResourceKind::Initiatives => "Initiative",
            ResourceKind::Workshops => "Workshop",
            ResourceKind::Alumni => "Alumni",
            ResourceKind::Projects => "Project",
            ResourceKind::Blog => "Blog Post",
        }
    }

    /// Extra query for the admin list; the blog otherwise hides drafts.
    pub fn admin_list_query(self) -> Option<(&'static str, &'static str)> {
        match self {
            ResourceKind::Blog => Some(("published", "false")),
            _ => None,
        }
    }

    pub fn schema(self) -> Result<FieldSchema, DomainError> {
        let fields = match self {
            ResourceKind::Achievements => vec![
                FieldSpec::text("title", "Title").required(),
                FieldSpec::textarea("description", "Description").required(),
                FieldSpec::text("image", "Image URL"),
                FieldSpec::number("order", "Order").with_default(0),
            ],
            ResourceKind::Initiatives => vec![
                FieldSpec::text("title", "Title").required(),
                FieldSpec::textarea("description", "Description").required(),
                FieldSpec::text("image", "Image URL"),
                FieldSpec::select(
                    "status",
                    "Status",
                    &[
                        ("ongoing", "Ongoing"),
                        ("completed", "Completed"),
                        ("upcoming", "Upcoming"),
                    ],
                ),
                FieldSpec::number("order", "Order").with_default(0),
            ],
            ResourceKind::Workshops => vec![
                FieldSpec::text("title", "Title").required(),
                FieldSpec::textarea("description", "Description"),
                FieldSpec::text("image", "Image URL"),
                FieldSpec::text("location", "Location"),
                FieldSpec::number("order", "Order").with_default(0),
            ],
            ResourceKind::Alumni => vec![
                FieldSpec::text("name", "Name").required(),
                FieldSpec::text("department", "Department"),
                FieldSpec::text("batch", "Batch"),
                FieldSpec::text("image", "Image URL"),
                FieldSpec::text("current_position", "Current Position"),
                FieldSpec::text("linkedin", "LinkedIn URL"),
                FieldSpec::number("order", "Order").with_default(0),
            ],
            ResourceKind::Projects => vec![
                FieldSpec::text("title", "Title").required(),
                FieldSpec::textarea("description", "Description").required(),
                FieldSpec::text("image", "Image URL"),
                FieldSpec::select(
                    "status",
                    "Status",
                    &[("ongoing", "Ongoing"), ("completed", "Completed")],
                ),
                FieldSpec::text("github", "GitHub URL"),
                FieldSpec::text("demo", "Demo URL"),
                FieldSpec::number("order", "Order").with_default(0),
            ],
            ResourceKind::Blog => vec![
                FieldSpec::text("title", "Title").required(),
                FieldSpec::textarea("content", "Content").required(),
                FieldSpec::text("excerpt", "Excerpt"),
                FieldSpec::text("image", "Image URL"),
                FieldSpec::text("author", "Author"),
                FieldSpec::checkbox("published", "Published").with_default(false),
            ],
        };
        FieldSchema::new(fields)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone)]
pub struct ResourceBinding {
    kind: ResourceKind,
    schema: FieldSchema,
    api: Arc<dyn ResourceApi>,
}

impl ResourceBinding {
    /// Binds `api` to the catalog schema of `kind`.
    pub fn new(kind: ResourceKind, api: Arc<dyn ResourceApi>) -> Result<Self, DomainError> {
        Ok(Self::with_schema(kind, kind.schema()?, api))
    }

    pub fn with_schema(kind: ResourceKind, schema: FieldSchema, api: Arc<dyn ResourceApi>) -> Self {
        Self { kind, schema, api }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn api(&self) -> &Arc<dyn ResourceApi> {
        &self.api
    }
}

impl fmt::Debug for ResourceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBinding")
            .field("kind", &self.kind)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
