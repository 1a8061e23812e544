//! Event loop: draw, wait for input or a timer, apply, repeat.

use std::time::Instant;

use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, info, trace, warn};
use tokio::time::{sleep_until, Duration};

use crate::app::App;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::event::{convert_event, Input};
use crate::terminal::Terminal;
use crate::theme::Theme;
use crate::view;

/// Drains pending drag events, keeping only the latest position.
/// Anything else that was queued is returned in order.
async fn coalesce_drags(events: &mut EventStream, initial: Input) -> (Input, Vec<Input>, usize) {
    let mut latest = initial;
    let mut others = Vec::new();
    let mut skipped = 0;

    while let Ok(Some(Ok(event))) = tokio::time::timeout(Duration::from_millis(0), events.next()).await {
        match convert_event(event) {
            Some(input @ Input::Drag { .. }) if others.is_empty() => {
                latest = input;
                skipped += 1;
            }
            Some(input) => others.push(input),
            None => {}
        }
    }

    (latest, others, skipped)
}

async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let mut app = App::new(&config)?;
    let theme = Theme::default();
    let mut terminal = Terminal::new()?;
    let mut events = EventStream::new();
    let mut pending: Vec<Input> = Vec::new();

    info!("Event loop started");
    loop {
        let frame = terminal.draw(|buf| view::render(&app, &theme, buf))?;
        app.apply_frame(frame);

        if app.should_quit() {
            break;
        }

        if !pending.is_empty() {
            for input in pending.drain(..) {
                app.handle(input);
            }
            continue;
        }

        tokio::select! {
            next = events.next() => {
                match next {
                    Some(Ok(event)) => {
                        trace!("Crossterm event: {:?}", event);
                        let Some(input) = convert_event(event) else { continue };
                        let input = match input {
                            Input::Drag { .. } => {
                                let (latest, others, skipped) = coalesce_drags(&mut events, input).await;
                                if skipped > 0 {
                                    debug!("Drag coalesced: skipped {} events", skipped);
                                }
                                pending = others;
                                latest
                            }
                            other => other,
                        };
                        app.handle(input);
                    }
                    Some(Err(e)) => {
                        warn!("Event stream error: {}", e);
                        return Err(e.into());
                    }
                    None => break,
                }
            }
            _ = sleep_until_optional(app.status_deadline()) => {
                app.expire_status(Instant::now());
            }
        }
    }

    info!("Event loop stopped");
    Ok(())
}
