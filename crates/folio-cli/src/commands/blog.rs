//! Blog subcommands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use folio::ContentApi;
use folio::ResourceId;
use folio::content::{BlogPost, Comment, PostInput};

use super::{connect, explain};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BlogCommand {
    #[command(subcommand)]
    pub command: BlogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BlogSubcommand {
    /// List posts, newest first as the API orders them
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a post with its comments
    Get {
        id: ResourceId,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a post (requires login)
    Create(PostFields),

    /// Replace a post's fields (requires login)
    Update {
        id: ResourceId,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Delete a post (requires login)
    Delete { id: ResourceId },

    /// List the comments on a post
    Comments { id: ResourceId },

    /// Comment on a post (requires login)
    Comment {
        id: ResourceId,

        /// Comment text
        #[arg(long)]
        text: String,
    },
}

#[derive(Args, Debug)]
pub struct PostFields {
    /// Post title
    #[arg(long)]
    pub title: String,

    /// Post body
    #[arg(long)]
    pub content: String,

    /// Short summary shown in listings
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Cover image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Tag, may be repeated
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl From<PostFields> for PostInput {
    fn from(fields: PostFields) -> Self {
        PostInput {
            title: fields.title,
            content: fields.content,
            excerpt: fields.excerpt,
            image: fields.image,
            tags: fields.tags,
        }
    }
}

pub async fn handle(api: &ApiArgs, cmd: BlogCommand) -> Result<()> {
    let session = connect(api).await?;
    let content = ContentApi::new(&session);

    match cmd.command {
        BlogSubcommand::List { json } => {
            let posts = content
                .list_posts()
                .await
                .map_err(explain("could not load posts"))?;
            if json {
                output::json_pretty(&posts)?;
            } else {
                print_list(&posts);
            }
        }
        BlogSubcommand::Get { id, json } => {
            let post = content
                .get_post(&id)
                .await
                .map_err(explain("could not load post"))?;
            let comments = content
                .list_comments(&id)
                .await
                .map_err(explain("could not load comments"))?;
            if json {
                output::json_pretty(&serde_json::json!({
                    "post": post,
                    "comments": comments,
                }))?;
            } else {
                print_post(&post);
                println!();
                print_comments(&comments);
            }
        }
        BlogSubcommand::Create(fields) => {
            let post = content
                .create_post(&fields.into())
                .await
                .map_err(explain("could not publish post"))?;
            output::success(&format!("Published post {}", post.id));
        }
        BlogSubcommand::Update { id, fields } => {
            let post = content
                .update_post(&id, &fields.into())
                .await
                .map_err(explain("could not update post"))?;
            output::success(&format!("Updated post {}", post.id));
        }
        BlogSubcommand::Delete { id } => {
            content
                .delete_post(&id)
                .await
                .map_err(explain("could not delete post"))?;
            output::success(&format!("Deleted post {}", id));
        }
        BlogSubcommand::Comments { id } => {
            let comments = content
                .list_comments(&id)
                .await
                .map_err(explain("could not load comments"))?;
            print_comments(&comments);
        }
        BlogSubcommand::Comment { id, text } => {
            let comment = content
                .add_comment(&id, &text)
                .await
                .map_err(explain("could not post comment"))?;
            output::success(&format!("Added comment {}", comment.id));
        }
    }

    Ok(())
}

pub fn print_list(posts: &[BlogPost]) {
    if posts.is_empty() {
        output::status("No posts yet");
        return;
    }
    for post in posts {
        println!(
            "{}  {}  {}  {}",
            post.id.to_string().dimmed(),
            output::date(post.created_at.as_ref()),
            post.title.bold(),
            format!("({} comments)", post.comment_count).dimmed()
        );
        if let Some(excerpt) = post.excerpt.as_deref().filter(|e| !e.is_empty()) {
            println!("    {}", excerpt);
        }
    }
}

pub fn print_post(post: &BlogPost) {
    output::heading(&post.title);
    if let Some(ref author) = post.author {
        output::field("By", author.display_name());
    }
    output::field("Date", &output::date(post.created_at.as_ref()));
    output::optional_field("Image", post.image.as_deref());
    if !post.tags.is_empty() {
        output::field("Tags", &post.tags.join(", "));
    }
    if let Some(ref content) = post.content {
        println!();
        println!("{}", content);
    }
}

pub fn print_comments(comments: &[Comment]) {
    if comments.is_empty() {
        output::status("No comments yet");
        return;
    }
    output::heading(&format!("Comments ({})", comments.len()));
    for comment in comments {
        let author = comment
            .author
            .as_ref()
            .map(|a| a.display_name())
            .unwrap_or("anonymous");
        println!(
            "{} {}: {}",
            output::date(comment.created_at.as_ref()).dimmed(),
            author.bold(),
            comment.content
        );
    }
}
