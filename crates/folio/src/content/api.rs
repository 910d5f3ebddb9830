//! Content API client.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::auth::{FieldError, ValidationErrors};
use crate::error::{AuthError, Error};
use crate::http::endpoints::{self, BLOG, CONTACT, PROJECTS};
use crate::session::SessionManager;
use crate::types::ResourceId;

use super::models::{
    BlogPost, Comment, ContactMessage, NewComment, PostInput, Project, ProjectInput,
};

/// Access to the site's content through a session.
///
/// Reads are open to anyone. Writes require a signed-in user and are refused
/// locally, without a request, when there is none.
#[derive(Debug, Clone, Copy)]
pub struct ContentApi<'a> {
    session: &'a SessionManager,
}

impl<'a> ContentApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    // ========================================================================
    // Projects
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        self.get(PROJECTS).await
    }

    #[instrument(skip(self), fields(%id))]
    pub async fn get_project(&self, id: &ResourceId) -> Result<Project, Error> {
        self.get(&endpoints::project(id)).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, Error> {
        input.validate()?;
        self.require_session()?;
        let result = self.session.client().post(PROJECTS, input).await;
        self.session.check(result).await
    }

    #[instrument(skip(self, input), fields(%id))]
    pub async fn update_project(
        &self,
        id: &ResourceId,
        input: &ProjectInput,
    ) -> Result<Project, Error> {
        input.validate()?;
        self.require_session()?;
        let result = self
            .session
            .client()
            .put(&endpoints::project(id), input)
            .await;
        self.session.check(result).await
    }

    #[instrument(skip(self), fields(%id))]
    pub async fn delete_project(&self, id: &ResourceId) -> Result<(), Error> {
        self.require_session()?;
        let result = self.session.client().delete(&endpoints::project(id)).await;
        self.session.check(result).await
    }

    // ========================================================================
    // Blog
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, Error> {
        self.get(BLOG).await
    }

    #[instrument(skip(self), fields(%id))]
    pub async fn get_post(&self, id: &ResourceId) -> Result<BlogPost, Error> {
        self.get(&endpoints::post(id)).await
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_post(&self, input: &PostInput) -> Result<BlogPost, Error> {
        input.validate()?;
        self.require_session()?;
        let result = self.session.client().post(BLOG, input).await;
        self.session.check(result).await
    }

    #[instrument(skip(self, input), fields(%id))]
    pub async fn update_post(&self, id: &ResourceId, input: &PostInput) -> Result<BlogPost, Error> {
        input.validate()?;
        self.require_session()?;
        let result = self.session.client().put(&endpoints::post(id), input).await;
        self.session.check(result).await
    }

    #[instrument(skip(self), fields(%id))]
    pub async fn delete_post(&self, id: &ResourceId) -> Result<(), Error> {
        self.require_session()?;
        let result = self.session.client().delete(&endpoints::post(id)).await;
        self.session.check(result).await
    }

    #[instrument(skip(self), fields(%post_id))]
    pub async fn list_comments(&self, post_id: &ResourceId) -> Result<Vec<Comment>, Error> {
        self.get(&endpoints::comments(post_id)).await
    }

    /// Comment on a post as the signed-in user.
    #[instrument(skip(self, text), fields(%post_id))]
    pub async fn add_comment(&self, post_id: &ResourceId, text: &str) -> Result<Comment, Error> {
        let text = text.trim();
        if text.is_empty() {
            let mut errors = ValidationErrors::default();
            errors.push(FieldError::new("comment", "comment must not be empty"));
            return Err(errors.into());
        }
        self.require_session()?;

        let body = NewComment { comment: text };
        let result = self
            .session
            .client()
            .post(&endpoints::comments(post_id), &body)
            .await;
        self.session.check(result).await
    }

    // ========================================================================
    // Contact
    // ========================================================================

    /// Send a message through the contact form. No session is needed.
    #[instrument(skip(self, message), fields(email = %message.email))]
    pub async fn send_message(&self, message: &ContactMessage) -> Result<(), Error> {
        message.validate()?;
        let trimmed = ContactMessage {
            name: message.name.trim().to_string(),
            email: message.email.trim().to_string(),
            message: message.message.trim().to_string(),
        };
        let result = self.session.client().post_no_response(CONTACT, &trimmed).await;
        self.session.check(result).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, Error> {
        let result = self.session.client().get(path).await;
        self.session.check(result).await
    }

    fn require_session(&self) -> Result<(), Error> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            debug!("refusing write without a session");
            Err(AuthError::NotAuthenticated.into())
        }
    }
}
