use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use council_core::{update, AppState, Msg};
use council_logging::{council_info, council_warn};

use super::commands::{parse_line, ShellCommand, HELP};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::render::render;
use super::selection::select_files;

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("reading configuration")?;
    logging::initialize(config.log_destination);
    council_info!("council_app starting, max file bytes {}", config.ingest.max_bytes);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.ingest.clone(), io::stdout(), msg_tx.clone())
        .context("starting attachment engine")?;
    let state = AppState::new().with_max_attachment_bytes(config.ingest.max_bytes);
    let mut shell = Shell::new(state, runner);
    shell.draw();

    spawn_input_reader(msg_tx).context("starting input reader")?;

    for msg in msg_rx {
        let quitting = matches!(msg, Msg::Shutdown);
        shell.dispatch(msg);
        if quitting {
            break;
        }
    }

    council_info!("council_app exiting");
    Ok(())
}

struct Shell<W: Write> {
    state: AppState,
    runner: EffectRunner<W>,
}

impl<W: Write> Shell<W> {
    fn new(state: AppState, runner: EffectRunner<W>) -> Self {
        Self { state, runner }
    }

    fn dispatch(&mut self, msg: Msg) {
        // Outside clicks only reach the core while a menu holds the watch.
        if matches!(msg, Msg::PointerDownOutsideMenu) && !self.runner.is_watching_pointer() {
            return;
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.draw();
        }
    }

    fn draw(&self) {
        let mut err = io::stderr().lock();
        for line in render(&self.state.view()) {
            let _ = writeln!(err, "{line}");
        }
    }
}

fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>) -> io::Result<()> {
    thread::Builder::new()
        .name("council-input".into())
        .spawn(move || {
            read_input(io::stdin().lock(), &msg_tx);
            let _ = msg_tx.send(Msg::Shutdown);
        })?;
    Ok(())
}

/// Feeds parsed lines to the loop until `/quit`, end of input or a closed loop.
fn read_input(input: impl BufRead, msg_tx: &mpsc::Sender<Msg>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                council_warn!("stdin read failed: {}", err);
                return;
            }
        };
        let msgs = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(ShellCommand::Quit)) => return,
            Ok(Some(ShellCommand::Help)) => {
                eprintln!("{HELP}");
                continue;
            }
            Ok(Some(ShellCommand::Dispatch(msgs))) => msgs,
            Ok(Some(ShellCommand::Attach(paths))) => {
                let selection = select_files(&paths);
                for reason in &selection.skipped {
                    eprintln!("! skipped {reason}");
                }
                if selection.files.is_empty() {
                    continue;
                }
                vec![Msg::FilesSelected(selection.files)]
            }
            Err(err) => {
                eprintln!("! {err}");
                continue;
            }
        };
        for msg in msgs {
            if msg_tx.send(msg).is_err() {
                return;
            }
        }
    }
}
