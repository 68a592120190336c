use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use splat_timeline::cache::DiskCache;
use splat_timeline::config::{parse_timezone, Config};
use splat_timeline::format::entry_message;
use splat_timeline::ical;
use splat_timeline::model::{Feed, Game};
use splat_timeline::source::HttpSource;
use splat_timeline::store::ScheduleStore;
use splat_timeline::widget::{ScheduleWidget, WidgetProvider};

#[derive(Parser)]
#[command(name = "splatline", about = "Splatoon schedules from the terminal")]
struct Cli {
    /// splatoon2 or splatoon3
    #[arg(long, short, default_value = "splatoon3")]
    game: Game,
    /// IANA time zone for printed times (overrides SPLAT_TIMEZONE)
    #[arg(long)]
    tz: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// What is on right now
    Show { feed: Feed },
    /// Every entry a widget would display, and when it should reload
    Timeline { feed: Feed },
    /// Upcoming events as iCalendar
    Ics { feed: Feed },
    /// Fetch from the network and overwrite the cache
    Refresh,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> splat_timeline::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(tz) = &cli.tz {
        config.timezone = parse_timezone(tz)?;
    }
    let now = Utc::now();
    let store = ScheduleStore::new(HttpSource::new(&config), DiskCache::new(config.cache_dir.clone()), config.cache_ttl);

    match cli.command {
        Commands::Show { feed } => {
            let widget = ScheduleWidget::new(cli.game, feed, store)?;
            let snapshot = widget.snapshot(now, false);
            println!("{}", entry_message(&snapshot.entry, config.timezone));
        }
        Commands::Timeline { feed } => {
            let widget = ScheduleWidget::new(cli.game, feed, store)?;
            let timeline = widget.timeline(now);
            for entry in &timeline.entries {
                let local = entry.date.with_timezone(&config.timezone);
                println!("== {}", local.format("%Y-%m-%d %H:%M %Z"));
                println!("{}\n", entry_message(entry, config.timezone));
            }
            println!(
                "Reload after {} (source: {:?})",
                timeline.reload_after.with_timezone(&config.timezone).format("%Y-%m-%d %H:%M %Z"),
                timeline.origin
            );
        }
        Commands::Ics { feed } => {
            if !cli.game.supports(feed) {
                return Err(splat_timeline::Error::UnsupportedFeed {
                    game: cli.game.to_string(),
                    feed: feed.to_string(),
                });
            }
            let loaded = store.load(cli.game, now);
            print!("{}", ical::to_ics(&loaded.schedule, feed, now));
        }
        Commands::Refresh => {
            let schedule = store.refresh(cli.game, now)?;
            println!(
                "Cached {} schedule at {}",
                schedule.game,
                store.cache().path_for(schedule.game).display()
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
