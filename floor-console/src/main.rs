//! Floor Console - operator CLI for the restaurant floor plan
//!
//! # Usage
//!
//! ```bash
//! floor-console plan --at 2025-03-14T19:30 --party-size 4 --zone TERRACE
//! floor-console layout
//! floor-console move T3 420 180 --token $FLOOR_API_TOKEN
//! ```

mod cli;
mod logger;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Command, QueryArgs};
use floor_client::{ClientConfig, HttpClient};
use floor_engine::{Canvas, DragTransition, FloorPlan, FloorService, LayoutConfig, PointerEvent};
use serde::Serialize;
use shared::{DisplayState, TableInfo};
use tracing::{info, warn};

/// Pointer used for console-driven drags
const CONSOLE_POINTER: i32 = 1;

#[derive(Debug, Serialize)]
struct CardRow<'a> {
    id: &'a str,
    state: DisplayState,
    x: f64,
    y: f64,
    seats: i32,
    zone: &'static str,
    merged: bool,
    draggable: bool,
    reason: &'a str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _guard = logger::init_logger(cli.log_level.as_deref(), cli.log_dir.as_deref());

    let mut client_config = ClientConfig::from_env();
    client_config.base_url = cli.api_url.clone();
    if let Some(token) = &cli.token {
        client_config.token = Some(token.clone());
    }
    let client = client_config
        .build_http_client()
        .context("failed to build HTTP client")?;
    let canvas = Canvas::new(cli.canvas_width, cli.canvas_height);

    info!(api_url = %client.base_url(), "Floor console starting");

    match cli.command {
        Command::Plan(args) => plan(client, canvas, &args, cli.json).await,
        Command::Layout => layout(&client, cli.json).await,
        Command::Move { id, x, y, query } => move_table(client, canvas, &query, &id, x, y, cli.json).await,
    }
}

fn floor_plan(client: HttpClient, canvas: Canvas, args: &QueryArgs) -> FloorPlan<HttpClient> {
    FloorPlan::new(client, LayoutConfig::from_env(), canvas, args.to_query())
}

async fn plan(client: HttpClient, canvas: Canvas, args: &QueryArgs, json: bool) -> anyhow::Result<()> {
    let mut plan = floor_plan(client, canvas, args);
    plan.refresh().await.context("failed to load availability")?;
    print_plan(&plan, json)
}

async fn layout<S: FloorService>(service: &S, json: bool) -> anyhow::Result<()> {
    let tables = service.fetch_layout().await.context("failed to load layout")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }
    println!("{:<10} {:>5} {:<13} {:>6} {:>6}", "TABLE", "SEATS", "ZONE", "X", "Y");
    for table in &tables {
        print_table(table);
    }
    Ok(())
}

async fn move_table(
    client: HttpClient,
    canvas: Canvas,
    args: &QueryArgs,
    id: &str,
    x: f64,
    y: f64,
    json: bool,
) -> anyhow::Result<()> {
    let mut plan = floor_plan(client, canvas, args);
    plan.set_admin_mode(true)
        .await
        .context("failed to load availability")?;

    let card = plan
        .card(id)
        .with_context(|| format!("table {id} is not on the floor plan"))?;
    if !card.is_draggable() {
        bail!("table {id} cannot be moved");
    }

    // Grab the card at its top-left corner so the pointer maps 1:1 to the card origin.
    let origin = card.position();
    let down = PointerEvent::primary(CONSOLE_POINTER, origin.x, origin.y);
    if plan.on_pointer_down(id, &down) == DragTransition::Ignored {
        bail!("table {id} rejected the drag");
    }
    let target = PointerEvent::primary(CONSOLE_POINTER, x, y);
    plan.on_pointer_move(&target);
    plan.on_pointer_up(&target);

    if let Some(moved) = plan.card(id) {
        let position = moved.position();
        if (position.x, position.y) != (x, y) {
            warn!(id, x = position.x, y = position.y, "Target clamped to the canvas");
        }
    }

    plan.save_layout().await.context("failed to save layout")?;
    print_plan(&plan, json)
}

fn print_plan(plan: &FloorPlan<HttpClient>, json: bool) -> anyhow::Result<()> {
    let rows: Vec<CardRow<'_>> = plan
        .cards()
        .iter()
        .map(|card| {
            let item = card.item();
            CardRow {
                id: card.id(),
                state: card.display_state(),
                x: card.position().x,
                y: card.position().y,
                seats: item.table.seats,
                zone: item.table.zone.as_str(),
                merged: card.is_merged(),
                draggable: card.is_draggable(),
                reason: &item.reason,
            }
        })
        .collect();

    if json {
        let output = serde_json::json!({
            "cards": rows,
            "status": plan.status(),
            "algorithmInfo": plan.algorithm_info(),
            "mealSuggestion": plan.meal_suggestion(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(status) = plan.status() {
        println!("{}", status.text);
    }
    println!(
        "{:<10} {:<12} {:>7} {:>7} {:>5} {:<13} {}",
        "TABLE", "STATE", "X", "Y", "SEATS", "ZONE", "REASON"
    );
    for row in &rows {
        let marker = if row.merged {
            " (merged)"
        } else if row.draggable {
            " *"
        } else {
            ""
        };
        println!(
            "{:<10} {:<12} {:>7.0} {:>7.0} {:>5} {:<13} {}{}",
            row.id,
            format!("{:?}", row.state),
            row.x,
            row.y,
            row.seats,
            row.zone,
            row.reason,
            marker
        );
    }
    if !plan.algorithm_info().is_empty() {
        println!("\n{}", plan.algorithm_info());
    }
    if let Some(meal) = plan.meal_suggestion() {
        println!("Meal: {} ({})", meal.name, meal.category);
    }
    Ok(())
}

fn print_table(table: &TableInfo) {
    println!(
        "{:<10} {:>5} {:<13} {:>6} {:>6}",
        table.id,
        table.seats,
        table.zone.as_str(),
        table.x,
        table.y
    );
}
