//! Navigate to a view, applying the route guard to restricted ones.

use anyhow::{Context, Result, bail};
use clap::Args;

use folio::guard::{GuardDecision, RouteGuard};
use folio::routes::{HOME_PATH, Route};
use folio::{ContentApi, SessionManager};

use super::{blog, connect, explain, projects};
use crate::cli::ApiArgs;
use crate::output;

/// How many posts the home view previews.
const RECENT_POSTS: usize = 3;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Path of the view, e.g. /blog/12 or /admin
    pub path: String,
}

pub async fn run(api: &ApiArgs, args: OpenArgs) -> Result<()> {
    let route =
        Route::parse(&args.path).with_context(|| format!("No such page: {}", args.path))?;

    let session = connect(api).await?;

    if route.is_restricted() {
        let mut guard = RouteGuard::new(session.subscribe(), route.path());
        match guard.settled().await {
            GuardDecision::Render => {}
            GuardDecision::Redirect { to, from } => {
                output::redirect(&to, &from);
                return Ok(());
            }
            GuardDecision::Placeholder => bail!("Session could not be resolved"),
        }
    }

    render(&session, &route).await
}

async fn render(session: &SessionManager, route: &Route) -> Result<()> {
    let content = ContentApi::new(session);

    match route {
        Route::Home => {
            output::heading("folio");
            match session.user() {
                Some(user) => output::field("Signed in as", &user.name),
                None => output::status("Not signed in"),
            }
            let posts = content
                .list_posts()
                .await
                .map_err(explain("could not load posts"))?;
            println!();
            blog::print_list(&posts[..posts.len().min(RECENT_POSTS)]);
        }
        Route::Projects => {
            let projects = content
                .list_projects()
                .await
                .map_err(explain("could not load projects"))?;
            projects::print_list(&projects);
        }
        Route::Blog => {
            let posts = content
                .list_posts()
                .await
                .map_err(explain("could not load posts"))?;
            blog::print_list(&posts);
        }
        Route::BlogPost(id) => {
            let post = content
                .get_post(id)
                .await
                .map_err(explain("could not load post"))?;
            let comments = content
                .list_comments(id)
                .await
                .map_err(explain("could not load comments"))?;
            blog::print_post(&post);
            println!();
            blog::print_comments(&comments);
        }
        Route::Contact => {
            output::heading("Contact");
            output::status("Send a message with 'folio contact --name .. --email .. --message ..'");
        }
        Route::Login | Route::Register => {
            // Signed-in users have no business on the sign-in views.
            if session.is_authenticated() {
                output::redirect(HOME_PATH, &route.path());
                return Ok(());
            }
            let (heading, command) = match route {
                Route::Login => ("Log in", "login"),
                _ => ("Register", "register"),
            };
            output::heading(heading);
            output::status(&format!("Use 'folio {command}'"));
        }
        Route::Admin => {
            let user = session
                .user()
                .context("Not logged in. Run 'folio login' first.")?;
            let projects = content
                .list_projects()
                .await
                .map_err(explain("could not load projects"))?;
            let posts = content
                .list_posts()
                .await
                .map_err(explain("could not load posts"))?;

            output::heading("Admin");
            output::field("Signed in as", &user.name);
            output::field("Projects", &projects.len().to_string());
            output::field("Posts", &posts.len().to_string());
        }
    }

    Ok(())
}
