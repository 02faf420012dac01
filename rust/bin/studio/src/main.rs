//! `studio`: admin CLI for the photography studio site.
//!
//! Works directly on the local document store: set up credentials, log in,
//! edit categories, photos and reviews, and preview what a page renders.

mod commands;
mod config;

use clap::{Parser, Subcommand};

use commands::Workspace;
use commands::photo::UploadSource;
use studio_gallery::upload::UploadInfo;

/// Studio admin tool.
#[derive(Parser, Debug)]
#[command(name = "studio", about = "Studio gallery admin CLI")]
struct Cli {
    /// Path to config file (default: ~/.studio/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write admin credentials and a fresh session secret.
    Init {
        /// Admin username.
        #[arg(long, default_value = "admin")]
        user: String,
        /// Data directory (default: ~/.studio/data).
        #[arg(long)]
        data_dir: Option<String>,
        /// Admin password (non-interactive, for CI/automation).
        #[arg(long)]
        password: Option<String>,
        /// Replace existing credentials.
        #[arg(long)]
        force: bool,
    },

    /// Sign in and save the session token.
    Login {
        #[arg(long)]
        user: Option<String>,
        /// Password (not recommended; use the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the saved session token.
    Logout,

    /// Gallery categories.
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Gallery photos.
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// Client reviews.
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Print the view state a page renders (e.g. /movements, /about).
    Show {
        path: String,
        /// Select this category first.
        #[arg(long)]
        category: Option<String>,
        /// Then open this photo in the lightbox.
        #[arg(long)]
        photo: Option<String>,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    List,
    Add {
        name: String,
        #[arg(long, default_value = "")]
        tagline: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a category. A rename moves its photos along.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tagline: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a category and all of its photos.
    Delete {
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Move the category at position FROM to position TO (1-based).
    Move { from: usize, to: usize },
    /// Fill in missing taglines and descriptions.
    MigrateCopy,
}

#[derive(Subcommand, Debug)]
enum PhotoAction {
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Register an uploaded image.
    Add {
        /// Category name.
        #[arg(long)]
        category: Option<String>,
        /// Upload widget callback JSON.
        #[arg(long, conflicts_with = "url")]
        event: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long, default_value = "")]
        public_id: String,
        #[arg(long, default_value_t = 0)]
        width: u32,
        #[arg(long, default_value_t = 0)]
        height: u32,
    },
    Delete {
        id: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Print the upload widget configuration.
    WidgetConfig,
    /// Check local files against the upload limits.
    Check { files: Vec<String> },
}

#[derive(Subcommand, Debug)]
enum ReviewAction {
    List,
    /// Submit a review as a visitor would.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 5)]
        rating: u8,
        #[arg(long)]
        text: String,
    },
    Delete {
        id: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Average rating and star row.
    Stats,
}

fn read_password_twice() -> anyhow::Result<String> {
    let pw = rpassword::prompt_password("Enter admin password: ")?;
    let confirm = rpassword::prompt_password("Confirm admin password: ")?;
    if pw != confirm {
        anyhow::bail!("Passwords do not match.");
    }
    Ok(pw)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_output = cli.output == "json";

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::StudioConfig::default_path);

    match cli.command {
        Commands::Init {
            user,
            data_dir,
            password,
            force,
        } => {
            let password = match password {
                Some(p) => p,
                None => read_password_twice()?,
            };
            if password.is_empty() {
                anyhow::bail!("Password cannot be empty.");
            }
            commands::init::init(&user, &password, data_dir.as_deref(), force, &config_path)?;
        }

        Commands::Login { user, password } => {
            let username = match user {
                Some(u) => u,
                None => {
                    eprint!("Username: ");
                    let mut s = String::new();
                    std::io::stdin().read_line(&mut s)?;
                    s.trim().to_string()
                }
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            commands::login::login(&username, &password, &config_path).await?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path)?;
        }

        Commands::Category { action } => {
            let ws = Workspace::open(&config_path)?;
            match action {
                CategoryAction::List => commands::category::list(&ws, json_output)?,
                CategoryAction::Add {
                    name,
                    tagline,
                    description,
                } => commands::category::add(&ws, &name, &tagline, &description)?,
                CategoryAction::Edit {
                    id,
                    name,
                    tagline,
                    description,
                } => commands::category::edit(
                    &ws,
                    &id,
                    name.as_deref(),
                    tagline.as_deref(),
                    description.as_deref(),
                )?,
                CategoryAction::Delete { id, yes } => commands::category::delete(&ws, &id, yes)?,
                CategoryAction::Move { from, to } => commands::category::reorder(&ws, from, to)?,
                CategoryAction::MigrateCopy => commands::category::migrate_copy(&ws, json_output)?,
            }
        }

        Commands::Photo { action } => {
            if let PhotoAction::Check { files } = &action {
                return commands::photo::check_files(files);
            }
            let ws = Workspace::open(&config_path)?;
            match action {
                PhotoAction::List { category } => {
                    commands::photo::list(&ws, category.as_deref(), json_output)?
                }
                PhotoAction::Add {
                    category,
                    event,
                    url,
                    public_id,
                    width,
                    height,
                } => {
                    let source = match (event.as_deref(), url) {
                        (Some(json), _) => UploadSource::Event(json),
                        (None, Some(secure_url)) => UploadSource::Info(UploadInfo {
                            secure_url,
                            public_id,
                            width,
                            height,
                        }),
                        (None, None) => anyhow::bail!("Provide --event or --url."),
                    };
                    commands::photo::add(&ws, category.as_deref(), source)?;
                }
                PhotoAction::Delete { id, yes } => commands::photo::delete(&ws, &id, yes)?,
                PhotoAction::WidgetConfig => commands::photo::widget_config(&ws)?,
                PhotoAction::Check { .. } => {}
            }
        }

        Commands::Review { action } => {
            let ws = Workspace::open(&config_path)?;
            match action {
                ReviewAction::List => commands::review::list(&ws, json_output)?,
                ReviewAction::Submit { name, rating, text } => {
                    commands::review::submit(&ws, &name, rating, &text)?
                }
                ReviewAction::Delete { id, yes } => commands::review::delete(&ws, &id, yes)?,
                ReviewAction::Stats => commands::review::stats(&ws, json_output)?,
            }
        }

        Commands::Show {
            path,
            category,
            photo,
        } => {
            let ws = Workspace::open(&config_path)?;
            commands::site::show(&ws, &path, category.as_deref(), photo.as_deref()).await?;
        }

        Commands::Version => {
            println!("studio cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
