//! A stand-in host runtime for skyview: seeds an in-memory store with a
//! few widgets, drives the provider hooks on a timer, and prints every
//! view the dispatcher hands back. Useful for poking at layouts and icon
//! rules without a real host.

#![warn(rust_2018_idioms)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use skyview::{
    constants::{DEFAULT_CONFIG_CONTENT, DEFAULT_CONFIG_FILE_LOCATION},
    dispatch::{HostRuntime, UpdateDispatcher},
    options::{self, Config, Layout},
    provider::{ForecastWidgetProvider, WidgetHooks, WidgetRenderer},
    store::{memory::MemoryStore, ForecastRecord, UnixMillis, UpdateStatus, WidgetId, WidgetRecord},
    view::{ClickAction, RenderedView, ViewOp},
};

#[derive(Parser, Debug)]
#[command(name = "skyview", version, about)]
struct Args {
    /// Sets the location of the config file.
    #[arg(short = 'C', long = "config", value_name = "PATH")]
    config_location: Option<PathBuf>,

    /// Overrides the configured refresh rate, e.g. '90s' or '2h'.
    #[arg(short, long, value_name = "RATE")]
    rate: Option<String>,

    /// Stops after this many update passes. 0 runs until interrupted.
    #[arg(long, default_value_t = 0, value_name = "COUNT")]
    cycles: u64,

    /// How many sample widgets to seed.
    #[arg(long, default_value_t = 3, value_name = "COUNT")]
    widgets: u64,

    /// Enables debug logging to the given file.
    #[cfg(feature = "logging")]
    #[arg(long, value_name = "PATH")]
    debug_file: Option<PathBuf>,
}

/// The host side of the demo: a fixed widget registry and a printer for
/// finished views, named through the configured layout table.
struct PrintHost {
    layout: Layout,
    ids: Vec<WidgetId>,
}

impl HostRuntime for PrintHost {
    fn registered_ids(&self) -> Vec<WidgetId> {
        self.ids.clone()
    }

    fn push_update(&self, id: WidgetId, view: RenderedView) {
        let ClickAction::OpenDetails(details) = view.click();
        println!(
            "[{}] widget {id} (tap opens details for {details})",
            self.layout.layout_name(view.kind())
        );
        for op in view.ops() {
            match op {
                ViewOp::SetText { slot, text } => {
                    println!("  {} = {text:?}", self.layout.slot_name(*slot));
                }
                ViewOp::SetImage { slot, icon } => {
                    println!("  {} = icon:{}", self.layout.slot_name(*slot), icon.key());
                }
                ViewOp::SetVisibility { slot, visible } => {
                    println!("  {} visible = {visible}", self.layout.slot_name(*slot));
                }
            }
        }
    }
}

fn create_or_get_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_CONTENT)?;
    }

    Ok(Config::load(path)?)
}

/// Seeds `count` widgets with forecast rows around `now`. The last widget
/// is left without forecasts so the fallback layout shows up too.
fn seed_store(store: &MemoryStore, count: u64, now: UnixMillis) {
    const HOUR: UnixMillis = 60 * 60 * 1000;
    const SAMPLES: [(&str, &str, i32, &str, Option<i32>, Option<i32>, &str, UpdateStatus); 4] = [
        ("Home", "°F", 72, "Clear", Some(80), Some(60), "clear.png", UpdateStatus::Success),
        ("Work", "°C", 18, "Partly Cloudy", Some(21), Some(9), "partly_cloudy.png", UpdateStatus::Success),
        ("Cottage", "°C", 4, "Snow Showers", None, Some(-6), "chance_of_snow.png", UpdateStatus::Failure),
        ("Harbor", "°F", 66, "Thunderstorm", Some(70), Some(58), "chance_of_storm.png", UpdateStatus::Success),
    ];

    for id in 1..=count {
        let (title, unit, temp, conditions, high, low, icon, status) =
            SAMPLES[(id as usize - 1) % SAMPLES.len()];

        store.upsert_widget(WidgetRecord {
            id,
            title: title.to_string(),
            temp_unit: unit.to_string(),
            current_temp: temp,
            update_status: status,
        });

        if id == count && count > 1 {
            // No forecast rows: this one renders the fallback layout.
            continue;
        }

        for offset in [-HOUR, 2 * HOUR, 8 * HOUR] {
            store.insert_forecast(ForecastRecord {
                widget_id: id,
                valid_at: now + offset,
                conditions: conditions.to_string(),
                temp_high: high,
                temp_low: low,
                icon_url: icon.to_string(),
            });
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    #[cfg(feature = "logging")]
    if let Some(debug_file) = &args.debug_file {
        skyview::utils::logging::init_logger(log::LevelFilter::Debug, Some(debug_file.as_path()))?;
    }

    let config_path = match &args.config_location {
        Some(path) => path.clone(),
        None => dirs::config_dir()
            .context("Unable to determine the user config directory.")?
            .join(DEFAULT_CONFIG_FILE_LOCATION),
    };
    let config = create_or_get_config(&config_path)
        .context("Unable to properly parse or create the config file.")?;

    let rate = match &args.rate {
        Some(value) => options::rate_from_arg(value)?,
        None => config.update_rate()?,
    };

    let store = Arc::new(MemoryStore::new());
    let now = (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as UnixMillis;
    seed_store(&store, args.widgets.max(1), now);

    let host = Arc::new(PrintHost {
        layout: config.layout(),
        ids: store.widget_ids(),
    });
    let renderer = Arc::new(WidgetRenderer::new(
        store.clone(),
        store.clone(),
        config.render_settings()?,
    ));
    let dispatcher = Arc::new(UpdateDispatcher::new(renderer, host.clone()));
    let provider = ForecastWidgetProvider::new(store.clone(), dispatcher.clone(), host);

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .context("Unable to install the interrupt handler.")?;
    }

    let mut passes = 0u64;
    while running.load(Ordering::SeqCst) {
        provider.on_update(&[]);
        passes += 1;

        if args.cycles != 0 && passes >= args.cycles {
            break;
        }

        // Sleep in short steps so an interrupt lands promptly.
        let mut slept = Duration::ZERO;
        while slept < rate && running.load(Ordering::SeqCst) {
            let step = Duration::from_millis(100).min(rate - slept);
            thread::sleep(step);
            slept += step;
        }
    }

    // Let the worker finish whatever is queued before tearing the host
    // down, then walk the deregistration path.
    dispatcher.shutdown();
    let ids = store.widget_ids();
    provider.on_removed(&ids);

    info!("host loop exited after {passes} passes");
    Ok(())
}
