//! Command line definition

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use shared::{AvailabilityQuery, DEFAULT_PARTY_SIZE, Zone};

/// Floor plan operator console
#[derive(Debug, Parser)]
#[command(name = "floor-console", version, about)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "FLOOR_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Bearer token for admin calls
    #[arg(long, env = "FLOOR_API_TOKEN")]
    pub token: Option<String>,

    /// Canvas width in pixels
    #[arg(long, env = "FLOOR_CANVAS_WIDTH", default_value_t = 760.0)]
    pub canvas_width: f64,

    /// Canvas height in pixels
    #[arg(long, env = "FLOOR_CANVAS_HEIGHT", default_value_t = 520.0)]
    pub canvas_height: f64,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, env = "FLOOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Write daily log files here instead of stderr (must exist)
    #[arg(long, env = "FLOOR_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve and print card positions for one availability query
    Plan(QueryArgs),
    /// Print the persisted table layout
    Layout,
    /// Drag one table to a new position and save the layout
    Move {
        /// Table id, e.g. T3
        id: String,
        /// Target x (card top-left)
        x: f64,
        /// Target y (card top-left)
        y: f64,
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Reservation time, e.g. 2025-03-14T19:30 (defaults to now)
    #[arg(long, value_parser = parse_date_time)]
    pub at: Option<NaiveDateTime>,

    #[arg(long, default_value_t = DEFAULT_PARTY_SIZE)]
    pub party_size: i32,

    /// INDOOR, TERRACE or PRIVATE_ROOM
    #[arg(long, value_parser = parse_zone)]
    pub zone: Option<Zone>,

    #[arg(long)]
    pub privacy: bool,

    #[arg(long)]
    pub window: bool,

    #[arg(long)]
    pub accessibility: bool,

    #[arg(long)]
    pub kids_area: bool,
}

impl QueryArgs {
    pub fn to_query(&self) -> AvailabilityQuery {
        let at = self
            .at
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        AvailabilityQuery {
            date_time: at,
            party_size: self.party_size,
            zone: self.zone,
            privacy: self.privacy,
            window: self.window,
            accessibility: self.accessibility,
            kids_area: self.kids_area,
        }
    }
}

fn parse_date_time(raw: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("invalid date-time '{raw}', expected YYYY-MM-DDTHH:MM"))
}

fn parse_zone(raw: &str) -> Result<Zone, String> {
    match raw.to_ascii_uppercase().replace('-', "_").as_str() {
        "INDOOR" => Ok(Zone::Indoor),
        "TERRACE" => Ok(Zone::Terrace),
        "PRIVATE_ROOM" => Ok(Zone::PrivateRoom),
        _ => Err(format!("unknown zone '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_move_command() {
        let cli = Cli::try_parse_from([
            "floor-console",
            "move",
            "T3",
            "420",
            "180",
            "--at",
            "2025-03-14T19:30",
            "--zone",
            "private-room",
        ])
        .unwrap();

        let Command::Move { id, x, y, query } = cli.command else {
            panic!("expected move command");
        };
        assert_eq!(id, "T3");
        assert_eq!((x, y), (420.0, 180.0));
        let query = query.to_query();
        assert_eq!(query.zone, Some(Zone::PrivateRoom));
        assert_eq!(query.date_time.format("%H:%M").to_string(), "19:30");
        assert_eq!(query.party_size, DEFAULT_PARTY_SIZE);
    }

    #[test]
    fn test_rejects_unknown_zone() {
        assert!(Cli::try_parse_from(["floor-console", "plan", "--zone", "roof"]).is_err());
    }
}
