#![deny(missing_docs)]
//! Shipyard command-line interface.
//!
//! Browses and edits the ship catalog through a running Shipyard server.

mod client;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client::ShipClient;
use shipyard_core::{
    Ship, ShipOrder, ShipPatch, ShipType, render_json, render_ship_detail, render_ship_table,
};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "shipyard", version, about = "Shipyard catalog CLI")]
struct Cli {
    /// Base URL of the Shipyard server.
    #[arg(
        long,
        global = true,
        env = "SHIPYARD_API_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    server_url: String,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Clone, Debug, Default, PartialEq)]
struct FilterArgs {
    /// Substring of the ship name.
    #[arg(long)]
    name: Option<String>,
    /// Substring of the planet.
    #[arg(long)]
    planet: Option<String>,
    /// TRANSPORT, MILITARY or MERCHANT.
    #[arg(long = "type")]
    ship_type: Option<ShipType>,
    /// Earliest production date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    after: Option<DateTime<Utc>>,
    /// Latest production date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    before: Option<DateTime<Utc>>,
    /// Used flag (true or false).
    #[arg(long)]
    used: Option<bool>,
    /// Minimum speed.
    #[arg(long)]
    min_speed: Option<f64>,
    /// Maximum speed.
    #[arg(long)]
    max_speed: Option<f64>,
    /// Minimum crew size.
    #[arg(long)]
    min_crew: Option<i32>,
    /// Maximum crew size.
    #[arg(long)]
    max_crew: Option<i32>,
    /// Minimum rating.
    #[arg(long)]
    min_rating: Option<f64>,
    /// Maximum rating.
    #[arg(long)]
    max_rating: Option<f64>,
}

impl FilterArgs {
    /// Query string pairs understood by the server.
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push(&mut query, "name", self.name.as_ref());
        push(&mut query, "planet", self.planet.as_ref());
        push(&mut query, "shipType", self.ship_type.as_ref());
        push(
            &mut query,
            "after",
            self.after.map(|date| date.timestamp_millis()).as_ref(),
        );
        push(
            &mut query,
            "before",
            self.before.map(|date| date.timestamp_millis()).as_ref(),
        );
        push(&mut query, "isUsed", self.used.as_ref());
        push(&mut query, "minSpeed", self.min_speed.as_ref());
        push(&mut query, "maxSpeed", self.max_speed.as_ref());
        push(&mut query, "minCrewSize", self.min_crew.as_ref());
        push(&mut query, "maxCrewSize", self.max_crew.as_ref());
        push(&mut query, "minRating", self.min_rating.as_ref());
        push(&mut query, "maxRating", self.max_rating.as_ref());
        query
    }
}

fn push<T: ToString>(
    query: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&T>,
) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

#[derive(Args, Clone, Debug, Default, PartialEq)]
struct ShipFieldArgs {
    /// Ship name (1-50 characters).
    #[arg(long)]
    name: Option<String>,
    /// Home planet (1-50 characters).
    #[arg(long)]
    planet: Option<String>,
    /// TRANSPORT, MILITARY or MERCHANT.
    #[arg(long = "type")]
    ship_type: Option<ShipType>,
    /// Production date (YYYY-MM-DD), years 2800 to 3019.
    #[arg(long, value_parser = parse_date)]
    prod_date: Option<DateTime<Utc>>,
    /// Used flag (true or false).
    #[arg(long)]
    used: Option<bool>,
    /// Speed between 0.01 and 0.99.
    #[arg(long)]
    speed: Option<f64>,
    /// Crew size between 1 and 9999.
    #[arg(long)]
    crew_size: Option<i32>,
}

impl ShipFieldArgs {
    fn into_patch(self) -> ShipPatch {
        ShipPatch {
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.used,
            speed: self.speed,
            crew_size: self.crew_size,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// List ships matching a filter, sorted and paged.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// ID, SPEED, DATE or RATING.
        #[arg(long)]
        order: Option<ShipOrder>,
        /// Zero-based page index.
        #[arg(long)]
        page: Option<usize>,
        /// Ships per page.
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Count ships matching a filter.
    Count {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Create a ship; every field except --used is required.
    Create(ShipFieldArgs),
    /// Show one ship.
    Get {
        /// Ship identifier.
        id: i64,
    },
    /// Change the supplied fields of a ship.
    Update {
        /// Ship identifier.
        id: i64,
        #[command(flatten)]
        fields: ShipFieldArgs,
    },
    /// Delete a ship.
    Delete {
        /// Ship identifier.
        id: i64,
    },
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got {raw:?}: {err}"))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let client = ShipClient::new(&cli.server_url)?;
    let output = execute(&client, cli.command, cli.format).await?;
    print!("{output}");
    Ok(())
}

#[cfg(test)]
fn main() {}

/// Run one command and return the rendered output.
async fn execute(
    client: &ShipClient,
    command: Commands,
    format: OutputFormat,
) -> CliResult<String> {
    match command {
        Commands::List {
            filter,
            order,
            page,
            page_size,
        } => {
            let mut query = filter.to_query();
            push(&mut query, "order", order.as_ref());
            push(&mut query, "pageNumber", page.as_ref());
            push(&mut query, "pageSize", page_size.as_ref());
            let ships = client.list(&query).await?;
            match format {
                OutputFormat::Text => Ok(render_ship_table(&ships)),
                OutputFormat::Json => Ok(format!("{}\n", render_json(&ships)?)),
            }
        }
        Commands::Count { filter } => {
            let count = client.count(&filter.to_query()).await?;
            match format {
                OutputFormat::Text => Ok(format!("{count}\n")),
                OutputFormat::Json => Ok(format!("{}\n", render_json(&count)?)),
            }
        }
        Commands::Create(fields) => {
            let ship = client.create(&fields.into_patch()).await?;
            render_ship(&ship, format)
        }
        Commands::Get { id } => render_ship(&client.get(id).await?, format),
        Commands::Update { id, fields } => {
            let ship = client.update(id, &fields.into_patch()).await?;
            render_ship(&ship, format)
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            match format {
                OutputFormat::Text => Ok(format!("Deleted ship {id}.\n")),
                OutputFormat::Json => Ok(format!(
                    "{}\n",
                    render_json(&serde_json::json!({ "deleted": id }))?
                )),
            }
        }
    }
}

fn render_ship(ship: &Ship, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_ship_detail(ship)),
        OutputFormat::Json => Ok(format!("{}\n", render_json(ship)?)),
    }
}
