//! Portfolio and blog resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{FieldError, ValidationErrors, check_email};
use crate::types::{IdFields, ResourceId};

/// A showcased project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProjectWire")]
pub struct Project {
    pub id: ResourceId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

#[derive(Deserialize)]
struct ProjectWire {
    #[serde(flatten)]
    ids: IdFields,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl TryFrom<ProjectWire> for Project {
    type Error = &'static str;

    fn try_from(wire: ProjectWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.ids.require()?,
            name: wire.name,
            description: wire.description,
            image: wire.image,
            link: wire.link,
        })
    }
}

/// Fields submitted when creating or editing a project.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
}

impl ProjectInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "project name is required"));
        }
        errors.into_result()
    }
}

/// Author attached to a post or comment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AuthorWire")]
pub struct Author {
    pub id: Option<ResourceId>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Deserialize)]
struct AuthorWire {
    #[serde(flatten)]
    ids: IdFields,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

impl From<AuthorWire> for Author {
    fn from(wire: AuthorWire) -> Self {
        Self {
            id: wire.ids.resolve(),
            name: wire.name,
            avatar: wire.avatar,
        }
    }
}

impl Author {
    /// Display name, with a placeholder for anonymous authors.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

/// A blog post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BlogPostWire")]
pub struct BlogPost {
    pub id: ResourceId,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub author: Option<Author>,
    pub comment_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogPostWire {
    #[serde(flatten)]
    ids: IdFields,
    title: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    author: Option<Author>,
    #[serde(default)]
    comment_count: Option<u64>,
    #[serde(flatten)]
    stamps: Timestamps,
}

impl TryFrom<BlogPostWire> for BlogPost {
    type Error = &'static str;

    fn try_from(wire: BlogPostWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.ids.require()?,
            title: wire.title,
            content: wire.content,
            excerpt: wire.excerpt,
            image: wire.image,
            tags: wire.tags.unwrap_or_default(),
            author: wire.author,
            comment_count: wire.comment_count.unwrap_or_default(),
            created_at: wire.stamps.resolve(),
        })
    }
}

/// Fields submitted when writing or editing a post.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl PostInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "title is required"));
        }
        if self.content.trim().is_empty() {
            errors.push(FieldError::new("content", "content is required"));
        }
        errors.into_result()
    }
}

/// A reader's comment on a post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CommentWire")]
pub struct Comment {
    pub id: ResourceId,
    pub content: String,
    pub author: Option<Author>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct CommentWire {
    #[serde(flatten)]
    ids: IdFields,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    author: Option<Author>,
    #[serde(flatten)]
    stamps: Timestamps,
}

impl TryFrom<CommentWire> for Comment {
    type Error = &'static str;

    fn try_from(wire: CommentWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.ids.require()?,
            content: wire
                .content
                .or(wire.comment)
                .ok_or("missing field `content`")?,
            author: wire.author,
            created_at: wire.stamps.resolve(),
        })
    }
}

/// Creation time under either key the API has used.
#[derive(Default, Deserialize)]
struct Timestamps {
    #[serde(default, rename = "createdAt")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl Timestamps {
    fn resolve(self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.date)
    }
}

/// Request body for a new comment.
#[derive(Debug, Serialize)]
pub(crate) struct NewComment<'a> {
    pub comment: &'a str,
}

/// A message sent through the contact form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "name is required"));
        }
        check_email(&mut errors, self.email.trim());
        if self.message.trim().is_empty() {
            errors.push(FieldError::new("message", "message is required"));
        }
        errors.into_result()
    }
}
