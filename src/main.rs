mod app;
mod cli;
mod config;
mod error;
mod logic;
mod models;
mod platform;
mod ui;

use app::{App, CalendarState, Screen};
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::{OrchardCareError, Result};
use logic::{Integration, TimerKind};
use models::PlantKind;
use platform::{CalendarEntityState, LogSink, NotificationSink, SensorState};
use ratatui::{backend::CrosstermBackend, text::Span, widgets::Paragraph, Terminal};
use std::future::Future;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;
use ui::screens::{
    CalendarScreen, DashboardScreen, NotificationsScreen, PlantsScreen, SettingsScreen,
};
use ui::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Watch mode exists to surface notifications, which log at info
    let quiet_level = match cli.command {
        Some(Commands::Watch) => "info",
        _ => "warn",
    };
    let level = match cli.verbose {
        0 => quiet_level,
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Init) = cli.command {
        Config::setup_interactive(cli.config)?;
        return Ok(());
    }

    let (config, config_path) = load_config(cli.config.clone(), cli.command.is_none())?;

    match cli.command {
        Some(Commands::Check { json }) => run_check(&config, &config_path, json),
        Some(Commands::Events { from, to, plant }) => {
            run_events(&config, from, to, plant.as_deref())
        }
        Some(Commands::Watch) => run_watch(&config).await,
        Some(Commands::Init) | None => run_tui(config, config_path),
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Load configuration, offering interactive setup to the TUI on first run.
fn load_config(config_override: Option<PathBuf>, interactive: bool) -> Result<(Config, PathBuf)> {
    if !Config::exists(config_override.as_ref()) {
        if interactive {
            println!("No configuration found.");
            return Config::setup_interactive(config_override);
        }
        eprintln!("Configuration error: no config file found.");
        eprintln!("Run `orchardcare init` to create one.");
        std::process::exit(1);
    }

    let config_path = Config::resolve_path(config_override)?;
    match Config::load_from(&config_path) {
        Ok(c) => Ok((c, config_path)),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_check(config: &Config, config_path: &std::path::Path, json: bool) -> Result<()> {
    let now = local_now();
    Integration::new().run_once(config, now, |coordinator| {
        if json {
            print_check_json(coordinator, now)
        } else {
            print_check_report(config, config_path, coordinator, now);
            Ok(())
        }
    })
}

fn print_check_json(coordinator: &logic::CareCoordinator, now: NaiveDateTime) -> Result<()> {
    let sensors: Vec<SensorState> = coordinator
        .sensors()
        .iter()
        .map(|s| s.state(coordinator.cache(), now))
        .collect();
    let calendars: Vec<CalendarEntityState> = coordinator
        .calendars()
        .iter()
        .map(|c| c.state(coordinator.cache(), now))
        .collect();
    let report = serde_json::json!({ "sensors": sensors, "calendars": calendars });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_check_report(
    config: &Config,
    config_path: &std::path::Path,
    coordinator: &logic::CareCoordinator,
    now: NaiveDateTime,
) {
    println!("Config:   {}", config_path.display());
    println!("Catalog:  {} plants", coordinator.catalog().len());
    println!(
        "Entities: {} sensors, {} calendars",
        coordinator.sensors().len(),
        coordinator.calendars().len()
    );
    let prefs = coordinator.preferences();
    println!(
        "Settings: {} hemisphere, {} sprays",
        prefs.hemisphere,
        prefs.spray_type()
    );
    for warning in config.validate() {
        println!("Warning:  {}", warning);
    }
    println!();

    for &plant in &prefs.selected_plants {
        let Some(schedule) = coordinator.cache().get(plant) else {
            continue;
        };
        println!("{}", plant);
        for sensor in coordinator.sensors().iter().filter(|s| s.plant() == plant) {
            let months = ui::screens::plants::month_names(schedule.months(sensor.kind()));
            println!(
                "  {:<8} {:<16} ({})",
                sensor.kind().as_str(),
                sensor.native_value(coordinator.cache(), now),
                months
            );
        }
        println!("  Products: {}", schedule.spray_products.join(", "));
        if let Some(event) = coordinator
            .calendar(plant)
            .and_then(|c| c.event(coordinator.cache(), now))
        {
            println!("  Due:      {}", event.summary);
        }
    }
}

fn run_events(
    config: &Config,
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
    plant: Option<&str>,
) -> Result<()> {
    let plant = match plant {
        Some(key) => {
            let kind = PlantKind::from_key(key)
                .ok_or_else(|| OrchardCareError::UnknownPlantKey(key.to_string()))?;
            if !config.preferences().is_selected(kind) {
                return Err(OrchardCareError::NotFound(format!(
                    "{} is not in the orchard",
                    key
                )));
            }
            Some(kind)
        }
        None => None,
    };

    let now = local_now();
    let from = from.unwrap_or_else(|| now.date());
    let to = to.unwrap_or(from + ChronoDuration::days(30));
    if to < from {
        return Err(OrchardCareError::Config(format!(
            "--to {} is before --from {}",
            to, from
        )));
    }

    let start = from.and_time(NaiveTime::MIN);
    let end = to.and_time(NaiveTime::MIN) + ChronoDuration::days(1) - ChronoDuration::seconds(1);
    let events = Integration::new().run_once(config, now, |coordinator| {
        Ok(coordinator.events_between(start, end, plant))
    })?;

    if events.is_empty() {
        println!("No care events between {} and {}", from, to);
    }
    for event in &events {
        let indent = if event.is_primary() { "" } else { "  " };
        println!(
            "{}  {}{}",
            event.start.format("%Y-%m-%d %H:%M"),
            indent,
            event.summary
        );
        println!("                  {}{}", indent, event.description);
    }
    Ok(())
}

fn to_std(interval: ChronoDuration) -> Result<Duration> {
    interval
        .to_std()
        .map_err(|e| OrchardCareError::Config(format!("Invalid interval: {}", e)))
}

async fn run_watch(config: &Config) -> Result<()> {
    let mut integration = Integration::new();
    integration.initialize(config, local_now())?;
    let result = watch_until(&mut integration, config, &mut LogSink, tokio::signal::ctrl_c()).await;
    integration.teardown()?;
    result
}

/// Drive both timers from tokio intervals until `shutdown` completes.
async fn watch_until<F: Future>(
    integration: &mut Integration,
    config: &Config,
    sink: &mut dyn NotificationSink,
    shutdown: F,
) -> Result<()> {
    let mut refresh = tokio::time::interval(to_std(config.refresh_interval())?);
    let mut scan = tokio::time::interval(to_std(config.reminder_interval())?);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
    scan.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Schedules were computed by initialize; skip the immediate first tick
    refresh.tick().await;

    let plants = integration
        .coordinator()
        .map(|c| c.cache().len())
        .unwrap_or(0);
    tracing::info!(
        timers = integration.timers().len(),
        next_due = ?integration.timers().next_due(),
        "Watching {} plants, press Ctrl-C to stop",
        plants
    );

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                integration.run_timer(TimerKind::ScheduleRefresh, local_now(), &mut *sink)?;
            }
            _ = scan.tick() => {
                integration.run_timer(TimerKind::ReminderScan, local_now(), &mut *sink)?;
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn run_tui(config: Config, config_path: PathBuf) -> Result<()> {
    let mut app = App::new(config, config_path, local_now())?;
    app.refresh_now()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.integration.teardown()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let upcoming = app.upcoming_events(30);
        let month_events = app.month_events();
        let plant_rows = app.plant_rows();

        terminal.draw(|f| {
            let area = f.area();

            let Some(coordinator) = app.coordinator() else {
                let msg = Span::styled(
                    format!("Orchard care is {}", app.integration.state_name()),
                    Theme::warning(),
                );
                f.render_widget(Paragraph::new(msg), area);
                return;
            };

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(coordinator, &upcoming, app.now)
                        .with_notifications(coordinator.dispatcher().sent_count())
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Calendar => {
                    let screen = CalendarScreen::new(&month_events, app.now.date())
                        .with_date(app.calendar_state.year, app.calendar_state.month)
                        .selected(app.calendar_state.selected_date);
                    f.render_widget(screen, area);
                }
                Screen::Plants => {
                    let screen = PlantsScreen::new(coordinator, &plant_rows, app.now)
                        .with_selection(app.plants_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Notifications => {
                    let screen = NotificationsScreen::new(&app.notifications)
                        .enabled(app.config.notifications.enabled);
                    f.render_widget(screen, area);
                }
                Screen::Settings => {
                    let screen = SettingsScreen::new(&app.settings_state.draft)
                        .with_focus(app.settings_state.focused_field)
                        .modified(app.settings_state.modified);
                    f.render_widget(screen, area);
                }
            }
        })?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.clear_status();
                match key.code {
                    KeyCode::Char('q') => {
                        app.quit();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        handle_screen_input(app, key.code, key.modifiers);
                    }
                    KeyCode::Esc => {
                        if app.screen == Screen::Settings && app.settings_state.modified {
                            app.discard_settings();
                            app.set_status("Unsaved settings discarded");
                        }
                        app.switch_screen(Screen::Dashboard);
                    }
                    KeyCode::Char(c) => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code, key.modifiers);
                        }
                    }
                    _ => {
                        handle_screen_input(app, key.code, key.modifiers);
                    }
                }
            }
        }

        // Drive the refresh and reminder timers
        app.tick(local_now())?;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.screen {
        Screen::Dashboard | Screen::Notifications => handle_refresh_input(app, code),
        Screen::Calendar => handle_calendar_input(app, code),
        Screen::Plants => handle_plants_input(app, code),
        Screen::Settings => handle_settings_input(app, code, modifiers),
    }
}

fn handle_refresh_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Char('r') = code {
        if let Err(e) = app.refresh_now() {
            app.set_status(&format!("Refresh failed: {}", e));
        }
    }
}

fn handle_calendar_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.calendar_state.prev_month(),
        KeyCode::Right => app.calendar_state.next_month(),
        KeyCode::Up => app.calendar_state.prev_day(),
        KeyCode::Down => app.calendar_state.next_day(),
        KeyCode::Char('t') => app.calendar_state = CalendarState::new(app.now.date()),
        _ => {}
    }
}

fn handle_plants_input(app: &mut App, code: KeyCode) {
    let count = app.plant_rows().len();
    match code {
        KeyCode::Up => app.plants_state.prev(),
        KeyCode::Down => app.plants_state.next(count),
        _ => {}
    }
}

fn handle_settings_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Up => app.settings_state.prev_field(),
        KeyCode::Down | KeyCode::Tab => app.settings_state.next_field(),
        KeyCode::Enter | KeyCode::Char(' ') => app.settings_state.toggle(),
        KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
            if let Err(e) = app.save_settings() {
                tracing::warn!("Failed to save settings: {}", e);
                app.set_status(&format!("Save failed: {}", e));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::MemorySink;

    #[tokio::test]
    async fn watch_returns_once_shutdown_fires() {
        let mut config = Config::default();
        config.orchard.selected_plants = vec!["apple".into()];
        let mut integration = Integration::new();
        integration.initialize(&config, local_now()).unwrap();
        let mut sink = MemorySink::default();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tx.send(()).unwrap();
        watch_until(&mut integration, &config, &mut sink, rx)
            .await
            .unwrap();

        assert_eq!(integration.state_name(), "active");
        integration.teardown().unwrap();
    }

    #[tokio::test]
    async fn shutdown_future_is_polled_across_ticks() {
        let config = Config::default();
        let mut integration = Integration::new();
        integration.initialize(&config, local_now()).unwrap();
        let mut sink = MemorySink::default();

        // Ready only on its second poll, so it must survive a loop iteration
        let mut polls = 0;
        let shutdown = std::future::poll_fn(move |cx| {
            polls += 1;
            if polls > 1 {
                std::task::Poll::Ready(())
            } else {
                cx.waker().wake_by_ref();
                std::task::Poll::Pending
            }
        });
        watch_until(&mut integration, &config, &mut sink, shutdown)
            .await
            .unwrap();
    }
}
