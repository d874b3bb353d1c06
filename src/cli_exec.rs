use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use mealwidget::model::{Dimensions, WidgetId};
use mealwidget::parse::parse_snapshot;
use mealwidget::provider::MenuListProvider;
use mealwidget::relay::{Broadcast, RenderedWidget, RequestLog, WidgetHost};
use mealwidget::render::{cells_for, render_to_lines};
use mealwidget::store::{MealStore, set_snapshot};
use mealwidget::{WidgetData, tui};

use crate::Commands;

pub(crate) fn handle_command(root: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::Init { force } => {
            MealStore::init(root, force)?;
            println!("Initialized widget store at {}", root.display());
        }
        Commands::Push { json, file } => {
            let store = MealStore::open(root)?;
            let json = match (json, file) {
                (Some(json), _) => json,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?,
                (None, None) => anyhow::bail!("provide snapshot JSON or --file"),
            };
            set_snapshot(store.snapshot_store().as_ref(), &json)?;
            println!("Widget data saved");
        }
        Commands::Show { json } => {
            let store = MealStore::open(root)?;
            let raw = store.snapshot_store().load()?;
            let data = parse_snapshot(raw.as_deref());
            if json {
                let error = match &data {
                    WidgetData::Malformed(err) => Some(err.to_string()),
                    _ => None,
                };
                let value = serde_json::json!({
                    "raw": raw,
                    "state": data.label(),
                    "snapshot": data.snapshot(),
                    "error": error,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&value).context("serialize snapshot json")?
                );
            } else {
                match &data {
                    WidgetData::Populated(snap) => {
                        println!("meal_type: {}", snap.meal_type);
                        println!("meal_date: {}", snap.meal_date);
                        if let Some(city) = snap.location() {
                            println!("city: {}", city);
                        }
                        println!("items: {}", snap.items.len());
                        for item in &snap.items {
                            println!("  {}", item);
                        }
                    }
                    WidgetData::NoData => println!("No widget data stored"),
                    WidgetData::Malformed(err) => println!("Malformed widget data: {}", err),
                }
            }
        }
        Commands::Render {
            width,
            height,
            id,
            json,
        } => {
            let store = MealStore::open(root)?;
            let mut host = WidgetHost::open(&store)?;
            let rendered = host.render(WidgetId(id), Dimensions::new(width, height));
            print_rendered(&host, &[rendered], json, Some(Dimensions::new(width, height)))?;
        }
        Commands::List { json } => {
            let store = MealStore::open(root)?;
            let mut provider = MenuListProvider::new(store.snapshot_store());
            provider.on_create()?;
            let rows: Vec<_> = (0..provider.count() as i64)
                .filter_map(|pos| provider.item_at(pos).map(|row| (provider.stable_id(pos), row)))
                .collect();
            if json {
                let value: Vec<_> = rows
                    .iter()
                    .map(|(id, row)| serde_json::json!({ "id": id, "text": row.text }))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&value).context("serialize rows json")?
                );
            } else if rows.is_empty() {
                println!("No menu items");
            } else {
                for (id, row) in rows {
                    println!("{} {}", id, row.text);
                }
            }
            provider.on_destroy();
        }
        Commands::Place { id, width, height } => {
            let store = MealStore::open(root)?;
            let mut host = WidgetHost::open(&store)?;
            host.place(WidgetId(id), Dimensions::new(width, height))?;
            println!("Placed widget {}", id);
        }
        Commands::Remove { id } => {
            let store = MealStore::open(root)?;
            let mut host = WidgetHost::open(&store)?;
            if host.remove(WidgetId(id))? {
                println!("Removed widget {}", id);
            } else {
                println!("No widget {}", id);
            }
        }
        Commands::Instances { json } => {
            let store = MealStore::open(root)?;
            let reg = store.read_instances()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&reg.instances)
                        .context("serialize instances json")?
                );
            } else if reg.instances.is_empty() {
                println!("No widgets placed");
            } else {
                for (id, rec) in &reg.instances {
                    let dims = rec.dimensions;
                    let variant = mealwidget::LayoutVariant::for_dimensions(dims);
                    println!(
                        "{} {}x{} {}{}",
                        id,
                        dims.min_width,
                        dims.min_height,
                        variant.as_str(),
                        if rec.configured_at.is_some() {
                            ""
                        } else {
                            " (unconfigured)"
                        }
                    );
                }
            }
        }
        Commands::Configure { id, width, height } => {
            let store = MealStore::open(root)?;
            let mut host = WidgetHost::open(&store)?;
            let rendered = host.configure(WidgetId(id), Dimensions::new(width, height))?;
            print_rendered(&host, &[rendered], false, None)?;
        }
        Commands::Update { ids, json } => {
            let store = MealStore::open(root)?;
            let mut host = WidgetHost::open(&store)?;
            let rendered = if ids.is_empty() {
                let (outcome, rendered) = host.update_widgets();
                if !json {
                    println!("{}", outcome.message());
                }
                rendered
            } else {
                let ids = ids.into_iter().map(WidgetId).collect();
                host.on_receive(Broadcast::RelayUpdate(Some(ids)))
            };
            print_rendered(&host, &rendered, json, None)?;
        }
        Commands::Boot => {
            let store = MealStore::open(root)?;
            let mut host = WidgetHost::open(&store)?;
            let rendered = host.on_receive(Broadcast::BootCompleted);
            if rendered.is_empty() {
                println!("No widgets placed");
            }
            print_rendered(&host, &rendered, false, None)?;
        }
        Commands::Info => {
            let store = MealStore::open(root)?;
            let host = WidgetHost::open(&store)?;
            println!("count: {}", host.widget_info());
        }
        Commands::Requests { drain, json } => {
            let store = MealStore::open(root)?;
            let log = RequestLog::new(store.requests_path());
            let reqs = if drain { log.drain()? } else { log.read_all()? };
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&reqs).context("serialize requests json")?
                );
            } else if reqs.is_empty() {
                println!("No pending data requests");
            } else {
                for req in reqs {
                    let target = req
                        .widget_id
                        .map(|id| format!("widget {}", id))
                        .unwrap_or_else(|| "all widgets".to_string());
                    println!("{} {:?} {}", req.requested_at, req.reason, target);
                }
            }
        }
        Commands::Preview => {
            let store = MealStore::open(root)?;
            let mut host = WidgetHost::open(&store)?;
            tui::run_preview(&mut host)?;
        }
    }

    Ok(())
}

fn print_rendered(
    host: &WidgetHost,
    rendered: &[RenderedWidget],
    json: bool,
    dims: Option<Dimensions>,
) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(rendered).context("serialize rendered widgets")?
        );
        return Ok(());
    }

    for widget in rendered {
        let dims = dims
            .or_else(|| {
                host.instances()
                    .find(|(id, _)| *id == widget.id)
                    .map(|(_, rec)| rec.dimensions)
            })
            .unwrap_or(Dimensions::new(0, 0));
        let (cols, rows) = cells_for(dims);
        println!("widget {} ({})", widget.id, widget.variant.as_str());
        for line in render_to_lines(widget, host.config(), cols, rows) {
            println!("{}", line);
        }
    }
    Ok(())
}
