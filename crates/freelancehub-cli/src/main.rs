use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use freelancehub_core::config::HubConfig;
use freelancehub_core::gateway::{AuthToken, Gateway, HttpGateway};
use freelancehub_core::model::*;
use freelancehub_core::store::{ProjectStore, SessionStore};
use freelancehub_core::vault::FileVault;
use freelancehub_core::HubError;

#[derive(Parser)]
#[command(
    name = "freelancehub",
    about = "FreelanceHub: freelance project marketplace client",
    version
)]
enum Cli {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (log in separately afterwards)
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the persisted session
    Logout,
    /// Show the authenticated user
    Whoami,
    /// Write a starter global config file
    Init,
    /// Browse and manage projects
    #[command(subcommand)]
    Projects(ProjectsCmd),
}

#[derive(Subcommand)]
enum ProjectsCmd {
    /// List all projects
    List {
        /// Output raw JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Show one project
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Post a new project
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        budget: u64,
        /// Tech stack entry (repeat for more)
        #[arg(long = "tech")]
        tech: Vec<String>,
    },
    /// Edit fields of a project you posted
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        budget: Option<u64>,
        /// Replacement tech stack entry (repeat for more)
        #[arg(long = "tech")]
        tech: Option<Vec<String>>,
        /// New lifecycle status (OPEN or COMPLETED)
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a project you posted
    Delete { id: String },
    /// Mark a project as completed
    Complete { id: String },
    /// List projects you posted
    Mine {
        #[arg(long)]
        json: bool,
    },
    /// List projects you marked completed
    Completed {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config =
        HubConfig::load(Some(&std::env::current_dir()?)).unwrap_or_else(|_| HubConfig::default());

    let result = run(cli, &config).await;
    if let Err(ref err) = result {
        if let Some(hub) = err.downcast_ref::<HubError>() {
            if hub.is_auth_error() {
                eprintln!(
                    "{}",
                    "Not authenticated. Run `freelancehub login` first.".yellow()
                );
            }
        }
    }
    result
}

async fn run(cli: Cli, config: &HubConfig) -> Result<()> {
    let token = AuthToken::new();
    let gateway = HttpGateway::from_config(&config.api, token.clone())?;
    let vault = FileVault::new(config.session.vault_path()?);
    let mut session = SessionStore::new(Box::new(vault), token);
    session.restore();
    let mut projects = ProjectStore::new();

    match cli {
        Cli::Login { email, password } => {
            let user = session
                .login(&gateway, &Credentials { email, password })
                .await?;
            println!("Logged in as {} <{}>", user.name.green(), user.email);
            Ok(())
        }
        Cli::Signup {
            name,
            email,
            password,
        } => {
            let user = session
                .signup(
                    &gateway,
                    &SignupInput {
                        name,
                        email,
                        password,
                    },
                )
                .await?;
            println!(
                "Account created for {}. Log in with {}.",
                user.name.green(),
                "freelancehub login".bold()
            );
            Ok(())
        }
        Cli::Logout => {
            session.logout(&mut projects)?;
            println!("Logged out.");
            Ok(())
        }
        Cli::Whoami => {
            match session.user() {
                Some(user) => println!("{} <{}>", user.name.green(), user.email),
                None => println!("{}", "Not logged in.".dimmed()),
            }
            Ok(())
        }
        Cli::Init => {
            let path = HubConfig::default().save_global()?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Cli::Projects(cmd) => run_projects(cmd, &gateway, &mut projects).await,
    }
}

async fn run_projects(
    cmd: ProjectsCmd,
    gateway: &HttpGateway,
    projects: &mut ProjectStore,
) -> Result<()> {
    match cmd {
        ProjectsCmd::List { json } => {
            let list = projects.fetch_all(gateway).await?;
            print_project_list(list, json)
        }
        ProjectsCmd::Show { id, json } => {
            let project = projects.fetch_current(gateway, &id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(project)?);
            } else {
                print_project_detail(project);
            }
            Ok(())
        }
        ProjectsCmd::Create {
            title,
            description,
            budget,
            tech,
        } => {
            let draft = ProjectDraft {
                title,
                description,
                budget,
                tech_stack: tech,
            };
            validate_draft(&draft)?;
            let created = projects.create(gateway, &draft).await?;
            println!("Posted project {} ({})", created.title.green(), created.id);
            Ok(())
        }
        ProjectsCmd::Update {
            id,
            title,
            description,
            budget,
            tech,
            status,
        } => {
            let status = status
                .map(|s| s.parse::<ProjectStatus>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let patch = ProjectPatch {
                title,
                description,
                budget,
                tech_stack: tech,
                status,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update: pass at least one field");
            }
            validate_patch(&patch)?;
            let updated = projects.update(gateway, &id, &patch).await?;
            println!("Updated project {} ({})", updated.title.green(), updated.id);
            Ok(())
        }
        ProjectsCmd::Delete { id } => {
            projects.delete(gateway, &id).await?;
            println!("Deleted project {id}");
            Ok(())
        }
        ProjectsCmd::Complete { id } => {
            projects.complete(gateway, &id).await?;
            println!("Marked project {id} as {}", "COMPLETED".green());
            Ok(())
        }
        ProjectsCmd::Mine { json } => {
            // Pass-through query; the bulk list cache is not involved.
            let list = gateway.my_projects().await?;
            print_project_list(&list, json)
        }
        ProjectsCmd::Completed { json } => {
            let list = gateway.completed_projects().await?;
            print_project_list(&list, json)
        }
    }
}

fn print_project_list(list: &[Project], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(list)?);
        return Ok(());
    }
    if list.is_empty() {
        println!("{}", "No projects.".dimmed());
        return Ok(());
    }
    for project in list {
        print_project_line(project);
    }
    Ok(())
}

fn print_project_line(project: &Project) {
    let status = match project.status {
        ProjectStatus::Open => project.status.to_string().green().to_string(),
        ProjectStatus::Completed => project.status.to_string().dimmed().to_string(),
    };
    let badge = if project.is_completed { " ✓" } else { "" };
    println!(
        "{}  {:<32}  {:>10}  {}{}  {}",
        project.id.dimmed(),
        project.title,
        format!("${}", project.budget),
        status,
        badge.green(),
        tech_summary(&project.tech_stack).dimmed(),
    );
}

fn print_project_detail(project: &Project) {
    println!("{}", project.title.bold());
    println!("  id:          {}", project.id);
    println!("  status:      {}", project.status);
    println!("  budget:      ${}", project.budget);
    println!("  tech stack:  {}", project.tech_stack.join(", "));
    if let Some(ref created_by) = project.created_by {
        println!("  posted by:   {created_by}");
    }
    if let Some(created_at) = project.created_at {
        println!("  posted at:   {}", created_at.format("%Y-%m-%d %H:%M"));
    }
    if project.is_completed {
        println!("  {}", "completed by you ✓".green());
    }
    println!();
    println!("{}", project.description);
}

/// First four stack entries, with a `+N more` suffix for the rest.
fn tech_summary(stack: &[String]) -> String {
    const SHOWN: usize = 4;
    let shown = stack
        .iter()
        .take(SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if stack.len() > SHOWN {
        format!("{} +{} more", shown, stack.len() - SHOWN)
    } else {
        shown
    }
}
