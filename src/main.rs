mod app;
mod calendar;
mod clock;
mod config;
mod data;
mod error;
mod flow;
mod input;
mod logging;
mod screens;
mod service;
mod widgets;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use app::App;
use clock::FrameClock;
use flow::history::BrowserHistory;
use flow::state::StepKind;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::style::Color;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use service::http::HttpService;
use service::{run_command, Command};
use tachyonfx::{fx, Duration, Effect, Interpolation, Motion, Shader};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type SharedApp = Rc<RefCell<App<BrowserHistory>>>;

/// Query the grid container's bounding rect and convert pixel coordinates
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Run each command off the UI path and apply its reply when it lands.
fn spawn_commands(app: &SharedApp, service: &Rc<HttpService>, commands: Vec<Command>) {
    for command in commands {
        let app = app.clone();
        let service = service.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let reply = run_command(service.as_ref(), command).await;
            app.borrow_mut().apply_reply(reply);
        });
    }
}

fn listen_popstate(app: &SharedApp) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let app = app.clone();
    let on_pop = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |event: web_sys::PopStateEvent| {
        let raw = event.state().as_string();
        app.borrow_mut().on_history_pop(raw.as_deref());
    });
    if let Err(e) = window.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref()) {
        log::warn!("popstate listener not installed: {e:?}");
    }
    // Lives as long as the page.
    on_pop.forget();
}

/// Sweep-in played whenever the wizard step changes.
struct Transition {
    last_kind: StepKind,
    effect: Option<Effect>,
    last_frame_ms: f64,
}

fn step_effect() -> Effect {
    fx::sweep_in(Motion::LeftToRight, 12, 0, Color::Black, (350, Interpolation::QuadOut))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let config = config::load();
    logging::init(config.log_level());
    log::info!("backend at {}", config.api_base);

    let service = Rc::new(HttpService::new(&config));
    let clock = RefCell::new(FrameClock::new(config.ticks_per_sec));
    let app: SharedApp = Rc::new(RefCell::new(App::new(
        BrowserHistory,
        config,
        chrono::Local::now().naive_local(),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    listen_popstate(&app);
    spawn_commands(&app, &service, vec![Command::FetchCalendar]);

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let service = service.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(id) = action {
                let commands = app.borrow_mut().handle_input(&InputEvent::Click(id));
                spawn_commands(&app, &service, commands);
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        let service = service.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Enter,
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Tab => InputEvent::Tab,
                KeyCode::Esc => InputEvent::Escape,
                _ => return,
            };
            let commands = app.borrow_mut().handle_input(&event);
            spawn_commands(&app, &service, commands);
        }
    });

    let transition = RefCell::new(Transition {
        last_kind: StepKind::Start,
        effect: None,
        last_frame_ms: now_ms(),
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let now = now_ms();
            let commands = {
                let mut a = app.borrow_mut();
                a.set_now(chrono::Local::now().naive_local());
                let ticks = clock.borrow_mut().update(now);
                a.tick(ticks)
            };
            spawn_commands(&app, &service, commands);

            let a = app.borrow();
            a.render(f, &click_state);

            let mut t = transition.borrow_mut();
            let kind = a.step_kind();
            if kind != t.last_kind {
                t.last_kind = kind;
                t.effect = Some(step_effect());
            }
            let elapsed = Duration::from_millis((now - t.last_frame_ms).max(0.0) as u32);
            t.last_frame_ms = now;
            let area = f.area();
            if let Some(effect) = t.effect.as_mut() {
                effect.process(elapsed, f.buffer_mut(), area);
                if effect.done() {
                    t.effect = None;
                }
            }
        }
    });

    Ok(())
}
