//! Runtime: terminal lifecycle and the event loop that ties the UI to the picker.
//!
//! A single `tokio::select!` loop multiplexes terminal input (forwarded by a
//! dedicated input task), snapshot changes published by the controller,
//! dialog requests, the completion signal raised by the picker's consumers,
//! and an animation tick that runs fast only while the picker is loading.
//! Picker gestures go to a driver task so the loop never blocks on a backend.

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::signal;
use tokio::sync::{Notify, mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};
use vellum_picker::{FilePicker, PendingDialog, spawn_driver};
use vellum_types::{PickerCommand, PickerSnapshot};

use crate::app::{App, Effect, Msg};
use crate::ui::main_component::MainView;

type PickerTerminal = Terminal<CrosstermBackend<Stdout>>;

const FAST_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(1000);

/// Forwards terminal events from a dedicated task over a channel.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => {
                    if sender.send(event).await.is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read terminal event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

fn setup_terminal() -> Result<PickerTerminal> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn cleanup_terminal(terminal: &mut PickerTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut PickerTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Runs the picker UI until the picker's consumers signal `finished`, or the user presses Ctrl+C.
///
/// `dialogs` is the receiving end of the [`ChannelDialogs`](vellum_picker::ChannelDialogs)
/// host the picker was built with.
pub async fn run_app(picker: Arc<FilePicker>, dialogs: mpsc::Receiver<PendingDialog>, finished: Arc<Notify>) -> Result<()> {
    let mut input = spawn_input_task();
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, picker, dialogs, finished, &mut input).await;
    cleanup_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(
    terminal: &mut PickerTerminal,
    picker: Arc<FilePicker>,
    mut dialogs: mpsc::Receiver<PendingDialog>,
    finished: Arc<Notify>,
    input: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut snapshots: watch::Receiver<PickerSnapshot> = picker.subscribe();
    let mut app = App::new(snapshots.borrow_and_update().clone());
    let mut main_view = MainView::default();

    let (commands, command_receiver) = mpsc::channel::<PickerCommand>(16);
    let driver = spawn_driver(picker, command_receiver);

    let mut current_interval = IDLE_TICK;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut dialogs_open = true;

    render(terminal, &mut app, &mut main_view)?;

    loop {
        let target_interval = if app.is_loading() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut effects = Vec::new();
        let needs_render = tokio::select! {
            maybe_event = input.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                if is_ctrl_c(&event) {
                    break;
                }
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        effects.extend(main_view.handle_key_events(&mut app, key));
                        true
                    }
                    Event::Resize(..) => true,
                    _ => false,
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                app.update(Msg::Snapshot(snapshot))
            }
            maybe_dialog = dialogs.recv(), if dialogs_open => {
                match maybe_dialog {
                    Some(pending) => app.update(Msg::Dialog(pending)),
                    None => {
                        dialogs_open = false;
                        false
                    }
                }
            }
            _ = finished.notified() => {
                debug!("picker finished");
                break;
            }
            _ = ticker.tick() => app.update(Msg::Tick),
            _ = signal::ctrl_c() => break,
        };

        for effect in effects {
            match effect {
                Effect::Command(command) => {
                    if commands.send(command).await.is_err() {
                        warn!("picker driver stopped; dropping command");
                    }
                }
                Effect::ResolveDialog(response) => app.resolve_dialog(response),
            }
        }

        if needs_render {
            render(terminal, &mut app, &mut main_view)?;
        }
    }

    driver.abort();
    Ok(())
}
