use anyhow::{Context, Result, bail};
use clap::Subcommand;
use civic::{Category, Client, Coordinates, LocationMode, Priority, ReportDraft, Storage};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        password: String,
        /// Repeat of the password
        #[arg(long)]
        confirm: String,
    },

    /// Sign in with an existing account
    Login {
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// File a new report
    Submit {
        /// Reference to the captured photo
        #[arg(long)]
        image: String,
        #[arg(long, requires = "lon", conflicts_with = "place", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Typed location, used instead of coordinates
        #[arg(long)]
        place: Option<String>,
        #[arg(long)]
        description: String,
        /// road, water, electricity, waste, safety or other
        #[arg(long)]
        category: Category,
        /// low, medium or high
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// List reports, newest first
    #[command(alias = "ls")]
    List {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a report by id
    Delete { id: String },
}

pub fn run<S: Storage>(client: &mut Client<S>, command: Command) -> Result<()> {
    match command {
        Command::Register {
            name,
            mobile,
            password,
            confirm,
        } => {
            let session = client
                .sessions()
                .register(&name, &mobile, &password, &confirm)?;
            println!("Welcome, {}", session.account.full_name);
        }
        Command::Login { mobile, password } => {
            let session = client.sessions().login(&mobile, &password)?;
            println!("Signed in as {}", session.account.full_name);
        }
        Command::Logout => {
            client.sessions().logout()?;
            println!("Signed out");
        }
        Command::Whoami => match client.current_session() {
            Some(session) => println!(
                "{} ({})",
                session.account.full_name, session.account.mobile_number
            ),
            None => println!("Not signed in"),
        },
        Command::Submit {
            image,
            lat,
            lon,
            place,
            description,
            category,
            priority,
        } => {
            let draft = draft(image, lat.zip(lon), place, description, category, priority)?;
            let report = client.reports()?.submit(draft)?;
            println!("Submitted report {}", report.id);
        }
        Command::List { json } => {
            let reports = client.reports()?.list()?;
            if json {
                let text = serde_json::to_string_pretty(&reports)
                    .context("failed to render reports as JSON")?;
                println!("{text}");
            } else if reports.is_empty() {
                println!("No reports yet");
            } else {
                for report in reports {
                    println!(
                        "{}  [{}] {} ({}, {})  {}  by {}",
                        report.id,
                        report.status,
                        report.description,
                        report.category,
                        report.priority,
                        report.location,
                        report.reported_by_name,
                    );
                }
            }
        }
        Command::Delete { id } => {
            if client.reports()?.delete(&id)? {
                println!("Deleted report {id}");
            } else {
                println!("No report with id {id}");
            }
        }
    }
    Ok(())
}

fn draft(
    image: String,
    position: Option<(f64, f64)>,
    place: Option<String>,
    description: String,
    category: Category,
    priority: Priority,
) -> Result<ReportDraft> {
    let (location_mode, coordinates) = match (position, &place) {
        (Some((lat, lon)), None) => (LocationMode::Auto, Some(Coordinates::new(lat, lon)?)),
        (None, Some(_)) => (LocationMode::Manual, None),
        (None, None) => bail!("give either --lat and --lon or --place"),
        (Some(_), Some(_)) => bail!("--place cannot be combined with coordinates"),
    };
    Ok(ReportDraft {
        image_ref: Some(image),
        location_mode,
        coordinates,
        manual_location: place,
        description,
        category: Some(category),
        priority,
    })
}
