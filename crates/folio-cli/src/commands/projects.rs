//! Project subcommands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use folio::ContentApi;
use folio::ResourceId;
use folio::content::{Project, ProjectInput};

use super::{connect, explain};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ProjectsCommand {
    #[command(subcommand)]
    pub command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsSubcommand {
    /// List all projects
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one project
    Get {
        id: ResourceId,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a project (requires login)
    Create(ProjectFields),

    /// Replace a project's fields (requires login)
    Update {
        id: ResourceId,

        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Delete a project (requires login)
    Delete { id: ResourceId },
}

#[derive(Args, Debug)]
pub struct ProjectFields {
    /// Project name
    #[arg(long)]
    pub name: String,

    /// Short description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Image URL
    #[arg(long, default_value = "")]
    pub image: String,

    /// Project link
    #[arg(long, default_value = "")]
    pub link: String,
}

impl From<ProjectFields> for ProjectInput {
    fn from(fields: ProjectFields) -> Self {
        ProjectInput {
            name: fields.name,
            description: fields.description,
            image: fields.image,
            link: fields.link,
        }
    }
}

pub async fn handle(api: &ApiArgs, cmd: ProjectsCommand) -> Result<()> {
    let session = connect(api).await?;
    let content = ContentApi::new(&session);

    match cmd.command {
        ProjectsSubcommand::List { json } => {
            let projects = content
                .list_projects()
                .await
                .map_err(explain("could not load projects"))?;
            if json {
                output::json_pretty(&projects)?;
            } else {
                print_list(&projects);
            }
        }
        ProjectsSubcommand::Get { id, json } => {
            let project = content
                .get_project(&id)
                .await
                .map_err(explain("could not load project"))?;
            if json {
                output::json_pretty(&project)?;
            } else {
                print_project(&project);
            }
        }
        ProjectsSubcommand::Create(fields) => {
            let project = content
                .create_project(&fields.into())
                .await
                .map_err(explain("could not create project"))?;
            output::success(&format!("Created project {}", project.id));
        }
        ProjectsSubcommand::Update { id, fields } => {
            let project = content
                .update_project(&id, &fields.into())
                .await
                .map_err(explain("could not update project"))?;
            output::success(&format!("Updated project {}", project.id));
        }
        ProjectsSubcommand::Delete { id } => {
            content
                .delete_project(&id)
                .await
                .map_err(explain("could not delete project"))?;
            output::success(&format!("Deleted project {}", id));
        }
    }

    Ok(())
}

pub fn print_list(projects: &[Project]) {
    if projects.is_empty() {
        output::status("No projects yet");
        return;
    }
    for project in projects {
        println!("{}  {}", project.id.to_string().dimmed(), project.name.bold());
        if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", description);
        }
    }
}

pub fn print_project(project: &Project) {
    output::heading(&project.name);
    output::field("ID", &project.id.to_string());
    output::optional_field("Description", project.description.as_deref());
    output::optional_field("Link", project.link.as_deref());
    output::optional_field("Image", project.image.as_deref());
}
