use std::collections::VecDeque;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use retrobooth_contracts::commands::{parse_command, BoothCommand, BOOTH_HELP_COMMANDS};
use retrobooth_engine::{
    load_source_image, Applied, Credential, EngineConfig, GenerationError, GenerationGateway,
    SessionCoordinator, SessionPhase, SessionStep, VideoHandle,
};

use crate::{print_styles, save_outputs};

const POLL_INTERVAL: Duration = Duration::from_millis(200);
const PROGRESS_INTERVAL: Duration = Duration::from_millis(1500);

pub(crate) enum BoothEvent {
    Line(String),
    InputClosed,
    Started {
        epoch: u64,
        outcome: Result<SessionStep, GenerationError>,
    },
    Remixed {
        epoch: u64,
        outcome: Result<SessionStep, GenerationError>,
    },
    VideoDone {
        epoch: u64,
        outcome: Result<VideoHandle, GenerationError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Wait,
    Quit,
}

/// Interactive driver: reads commands, runs gateway calls on worker threads and feeds
/// their outcomes back to the coordinator on this thread.
pub(crate) struct Booth {
    coordinator: SessionCoordinator,
    gateway: Arc<dyn GenerationGateway>,
    config: EngineConfig,
    out_dir: PathBuf,
    tx: mpsc::Sender<BoothEvent>,
    rx: Option<mpsc::Receiver<BoothEvent>>,
    pending: usize,
    input_closed: bool,
    progress_tick: usize,
    last_progress: Instant,
}

impl Booth {
    pub(crate) fn new(
        coordinator: SessionCoordinator,
        gateway: Arc<dyn GenerationGateway>,
        config: EngineConfig,
        out_dir: PathBuf,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            coordinator,
            gateway,
            config,
            out_dir,
            tx,
            rx: Some(rx),
            pending: 0,
            input_closed: false,
            progress_tick: 0,
            last_progress: Instant::now(),
        }
    }

    pub(crate) fn coordinator(&self) -> &SessionCoordinator {
        &self.coordinator
    }

    pub(crate) fn handle_line(&mut self, line: &str) -> Flow {
        let command = parse_command(line);
        match command.action.as_str() {
            "noop" => {}
            "help" => {
                println!("Commands: {}", BOOTH_HELP_COMMANDS.join(" "));
                println!("Any other text remixes the current photo.");
            }
            "list_styles" => print_styles(self.coordinator.catalog()),
            "status" => self.print_status(),
            "capture" => self.capture(&command),
            "switch_style" => self.switch_style(&command),
            "remix" => self.remix(command.prompt.as_deref().unwrap_or_default()),
            "request_video" => self.request_video(command.prompt.as_deref().unwrap_or_default()),
            "set_credential" => match command.arg_str("value").and_then(Credential::new) {
                Some(credential) => {
                    self.coordinator.set_credential(credential);
                    println!("Video key stored for this session.");
                }
                None => println!("/key requires a value"),
            },
            "save" => {
                let dir = command
                    .arg_str("path")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| self.out_dir.clone());
                match save_outputs(&self.coordinator, &dir) {
                    Ok(paths) => {
                        for path in paths {
                            println!("Saved {}", path.display());
                        }
                    }
                    Err(err) => println!("Save failed: {err:#}"),
                }
            }
            "reset" => {
                self.coordinator.reset();
                println!("Booth reset. Style stays {}.", self.coordinator.style_id());
            }
            "wait" => return Flow::Wait,
            "quit" => return Flow::Quit,
            _ => {
                let name = command.arg_str("command").unwrap_or_default();
                println!("Unknown command: /{name}. Type /help.");
            }
        }
        Flow::Continue
    }

    fn capture(&mut self, command: &BoothCommand) {
        let Some(path) = command.arg_str("path") else {
            println!("/capture requires a path");
            return;
        };
        let captured = match load_source_image(Path::new(path), &self.config.normalize) {
            Ok(captured) => captured,
            Err(err) => {
                println!("Capture failed: {err}");
                return;
            }
        };
        if let Some(err) = captured.fallback.as_ref() {
            self.coordinator.record_normalization_fallback(err);
            println!("Normalization skipped ({err}); using the original file.");
        }
        match self
            .coordinator
            .begin_capture(captured.image, command.arg_str("style"))
        {
            Ok(ticket) => {
                self.announce_processing();
                let gateway = Arc::clone(&self.gateway);
                self.spawn("retrobooth-start", move || BoothEvent::Started {
                    epoch: ticket.epoch,
                    outcome: gateway.start_session(&ticket.request),
                });
            }
            Err(err) => println!("Capture rejected: {err}"),
        }
    }

    fn switch_style(&mut self, command: &BoothCommand) {
        let Some(style_id) = command.arg_str("style") else {
            println!("/style requires a style id (see /styles)");
            return;
        };
        if !self.coordinator.catalog().contains(style_id.trim()) {
            println!(
                "Unknown style {style_id}; using {}.",
                self.coordinator.catalog().default_style().id
            );
        }
        if matches!(
            self.coordinator.phase(),
            SessionPhase::Idle | SessionPhase::Error
        ) {
            match self.coordinator.select_style(style_id) {
                Ok(style) => println!("Style set to {} ({}).", style.label, style.id),
                Err(err) => println!("Style change rejected: {err}"),
            }
            return;
        }
        match self.coordinator.begin_switch_style(style_id) {
            Ok(ticket) => {
                self.announce_processing();
                let gateway = Arc::clone(&self.gateway);
                self.spawn("retrobooth-start", move || BoothEvent::Started {
                    epoch: ticket.epoch,
                    outcome: gateway.start_session(&ticket.request),
                });
            }
            Err(err) => println!("Style switch rejected: {err}"),
        }
    }

    fn remix(&mut self, prompt: &str) {
        match self.coordinator.begin_remix(prompt) {
            Ok(ticket) => {
                println!("Remixing...");
                let gateway = Arc::clone(&self.gateway);
                self.spawn("retrobooth-remix", move || BoothEvent::Remixed {
                    epoch: ticket.epoch,
                    outcome: gateway.continue_session(&ticket.request),
                });
            }
            Err(err) => println!("Remix rejected: {err}"),
        }
    }

    fn request_video(&mut self, prompt: &str) {
        match self.coordinator.begin_video(prompt, None) {
            Ok(ticket) => {
                println!("Creating your video sequence...");
                let gateway = Arc::clone(&self.gateway);
                self.spawn("retrobooth-video", move || BoothEvent::VideoDone {
                    epoch: ticket.epoch,
                    outcome: gateway.generate_video(&ticket.request),
                });
            }
            Err(err) => println!("Video rejected: {err}"),
        }
    }

    fn spawn<F>(&mut self, name: &str, job: F)
    where
        F: FnOnce() -> BoothEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let _ = tx.send(job());
            });
        match spawned {
            Ok(_) => self.pending += 1,
            Err(err) => println!("Worker spawn failed: {err}"),
        }
    }

    fn announce_processing(&mut self) {
        self.progress_tick = 0;
        self.last_progress = Instant::now();
        let message = self
            .coordinator
            .catalog()
            .progress_message(Some(self.coordinator.style_id()), 0);
        println!("{message}");
    }

    fn tick_progress(&mut self) {
        if self.coordinator.phase() != SessionPhase::Processing
            || self.last_progress.elapsed() < PROGRESS_INTERVAL
        {
            return;
        }
        self.progress_tick += 1;
        self.last_progress = Instant::now();
        let message = self
            .coordinator
            .catalog()
            .progress_message(Some(self.coordinator.style_id()), self.progress_tick);
        println!("{message}");
    }

    pub(crate) fn apply(&mut self, event: BoothEvent) {
        let applied = match event {
            BoothEvent::Line(_) | BoothEvent::InputClosed => return,
            BoothEvent::Started { epoch, outcome } => {
                self.pending = self.pending.saturating_sub(1);
                self.coordinator.finish_start(epoch, outcome)
            }
            BoothEvent::Remixed { epoch, outcome } => {
                self.pending = self.pending.saturating_sub(1);
                let applied = self.coordinator.finish_remix(epoch, outcome);
                if applied == Applied::Current {
                    match self.coordinator.remix_error() {
                        Some(message) => println!("{message}"),
                        None => println!(
                            "Remix applied ({} turns).",
                            self.coordinator.history_len()
                        ),
                    }
                }
                applied
            }
            BoothEvent::VideoDone { epoch, outcome } => {
                self.pending = self.pending.saturating_sub(1);
                let applied = self.coordinator.finish_video(epoch, outcome);
                if applied == Applied::Current {
                    match (self.coordinator.video_error(), self.coordinator.video()) {
                        (Some(message), _) => println!("{message}"),
                        (None, Some(video)) => println!("Video ready: {}", video.path().display()),
                        (None, None) => {}
                    }
                }
                applied
            }
        };
        if applied == Applied::Stale {
            println!("(discarded a result from an earlier session)");
            return;
        }
        match self.coordinator.phase() {
            SessionPhase::Result if self.coordinator.history_len() == 1 => {
                let style = self.coordinator.style();
                println!(
                    "{} ({}) ready. Type a prompt to remix, /video <prompt>, or /save.",
                    style.label, style.era
                );
            }
            SessionPhase::Error => {
                if let Some(message) = self.coordinator.generation_error() {
                    println!("{message}");
                }
                println!("Use /reset to start over.");
            }
            _ => {}
        }
    }

    /// Applies worker results until none are outstanding. Lines typed meanwhile are queued.
    pub(crate) fn wait_for_calls(
        &mut self,
        rx: &mpsc::Receiver<BoothEvent>,
        deferred: &mut VecDeque<String>,
    ) {
        while self.pending > 0 {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(BoothEvent::Line(line)) => deferred.push_back(line),
                Ok(BoothEvent::InputClosed) => self.input_closed = true,
                Ok(event) => self.apply(event),
                Err(mpsc::RecvTimeoutError::Timeout) => self.tick_progress(),
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn print_status(&self) {
        let booth = &self.coordinator;
        println!(
            "phase={} epoch={} style={} turns={} remixing={} video_pending={} video={}",
            booth.phase(),
            booth.epoch(),
            booth.style_id(),
            booth.history_len(),
            booth.is_regenerating(),
            booth.is_generating_video(),
            booth
                .video()
                .map(|video| video.path().display().to_string())
                .unwrap_or_else(|| "none".to_string()),
        );
        for message in [
            booth.generation_error(),
            booth.remix_error(),
            booth.video_error(),
        ]
        .into_iter()
        .flatten()
        {
            println!("  {message}");
        }
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<BoothEvent>) -> Result<()> {
    thread::Builder::new()
        .name("retrobooth-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            let mut lock = stdin.lock();
            let mut line = String::new();
            loop {
                line.clear();
                match lock.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        let text = line.trim_end_matches(['\n', '\r']).to_string();
                        if tx.send(BoothEvent::Line(text)).is_err() {
                            return;
                        }
                    }
                    Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
            let _ = tx.send(BoothEvent::InputClosed);
        })
        .context("failed to start stdin reader")?;
    Ok(())
}

pub(crate) fn run_booth(mut booth: Booth) -> Result<()> {
    let rx = booth
        .rx
        .take()
        .context("booth event channel already taken")?;
    spawn_stdin_reader(booth.tx.clone())?;

    println!(
        "Retrobooth ready ({} gateway, style {}). Type /help for commands.",
        booth.gateway.name(),
        booth.coordinator().style_id()
    );
    let mut deferred: VecDeque<String> = VecDeque::new();
    loop {
        if deferred.is_empty() && booth.input_closed {
            booth.wait_for_calls(&rx, &mut deferred);
            if deferred.is_empty() {
                break;
            }
        }
        let event = match deferred.pop_front() {
            Some(line) => BoothEvent::Line(line),
            None => match rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => event,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    booth.tick_progress();
                    continue;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            },
        };
        match event {
            BoothEvent::Line(line) => {
                match booth.handle_line(&line) {
                    Flow::Continue => {}
                    Flow::Wait => booth.wait_for_calls(&rx, &mut deferred),
                    Flow::Quit => break,
                }
                print!("> ");
                io::stdout().flush()?;
            }
            BoothEvent::InputClosed => booth.input_closed = true,
            other => booth.apply(other),
        }
    }

    booth.coordinator.reset();
    println!("Bye.");
    Ok(())
}
