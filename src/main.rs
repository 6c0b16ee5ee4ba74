use macroquad::prelude::*;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use ringsnake::config::{Config, ConfigSource, Presentation};
use ringsnake::error::SinkError;
use ringsnake::event_log::EventLog;
use ringsnake::events::{dispatch_audio, present, AudioSink, Command, Cue, SessionEvent};
use ringsnake::input::{self, Input};
use ringsnake::planar::{PlanarView, TextPanel};
use ringsnake::records::JsonRecordStore;
use ringsnake::volumetric::VolumetricView;
use ringsnake::{EngineError, Session};

const CONFIG_PATH: &str = "config.toml";

/// Stand-in for sound playback: cues go to the log
#[derive(Default)]
struct LogAudio {
    muted: bool,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError> {
        if !self.muted {
            debug!(?cue, "play");
        }
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), SinkError> {
        self.muted = muted;
        Ok(())
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn window_conf() -> Conf {
    let (config, _) = Config::load(CONFIG_PATH);
    Conf {
        window_title: config.presentation.window_title.clone(),
        window_width: (config.board.cols as f32 * config.board.cell_size) as i32,
        window_height: (config.board.rows as f32 * config.board.cell_size) as i32,
        ..Default::default()
    }
}

/// Front-end state that is not part of the simulation
struct Shell {
    presentation: Presentation,
    fullscreen: bool,
    audio: LogAudio,
    log: Option<EventLog>,
}

impl Shell {
    fn run(&mut self, session: &mut Session, command: Command) -> Result<(), EngineError> {
        if let Some(log) = self.log.as_mut() {
            log.log_command(command);
        }
        let events = session.handle(command)?;
        self.react(&events);
        Ok(())
    }

    fn react(&mut self, events: &[SessionEvent]) {
        if events.is_empty() {
            return;
        }
        if let Some(log) = self.log.as_mut() {
            log.log_events(events);
        }
        dispatch_audio(&mut self.audio, events);
        for event in events {
            match event {
                SessionEvent::FullscreenToggled => {
                    self.fullscreen = !self.fullscreen;
                    set_fullscreen(self.fullscreen);
                }
                SessionEvent::GameOver { cause } => info!(?cause, "game over"),
                _ => {}
            }
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, source) = Config::load(CONFIG_PATH);
    init_logging(&config.logging.filter);
    match source {
        ConfigSource::File(path) => info!(%path, "loaded configuration"),
        ConfigSource::Missing(path) => info!(%path, "no configuration file, using defaults"),
        ConfigSource::Invalid { path, error } => warn!(%path, %error, "failed to parse configuration, using defaults"),
    }

    let store = JsonRecordStore::new(&config.records.path);
    let mut session = match Session::new(config.session_settings(), Box::new(store)) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "could not start a session");
            return;
        }
    };

    let background = Color::from_rgba(
        config.presentation.background_r,
        config.presentation.background_g,
        config.presentation.background_b,
        255,
    );
    let mut planar = PlanarView::new(config.board.cell_size, background);
    let mut volumetric = VolumetricView::default();
    let mut panel = TextPanel::default();
    let mut shell = Shell {
        presentation: config.presentation.mode,
        fullscreen: false,
        audio: LogAudio::default(),
        log: config.logging.enable_event_log.then(EventLog::new),
    };

    'frames: loop {
        for input in input::poll() {
            let command = match input {
                Input::Quit => break 'frames,
                Input::SwitchPresentation => {
                    shell.presentation = shell.presentation.toggled();
                    info!(presentation = ?shell.presentation, "switched presentation");
                    continue;
                }
                Input::NextMode => Command::SetMode(session.mode().toggled()),
                Input::Session(command) => command,
            };
            if let Err(err) = shell.run(&mut session, command) {
                error!(%err, "session could not be rebuilt");
                break 'frames;
            }
        }

        match session.advance(get_frame_time()) {
            Ok(events) => shell.react(&events),
            Err(err) => {
                error!(%err, "session could not be rebuilt");
                break 'frames;
            }
        }

        if shell.presentation == Presentation::Volumetric && is_mouse_button_down(MouseButton::Left) {
            volumetric.orbit(mouse_delta_position().x * 2.0);
        }

        let frame = session.frame();
        let hud = session.hud();
        match shell.presentation {
            Presentation::Planar => present(&mut planar, &mut panel, &frame, &hud),
            Presentation::Volumetric => present(&mut volumetric, &mut panel, &frame, &hud),
        }

        next_frame().await
    }

    if let Some(log) = &shell.log {
        println!("{}", log.summary());
        if let Err(e) = log.save_to_file(&config.logging.event_log_path) {
            warn!(error = %e, "failed to save event log");
        }
    }
}
