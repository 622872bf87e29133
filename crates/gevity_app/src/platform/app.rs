use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use gevity_core::{update, AppState, Msg};
use gevity_engine::EngineHandle;
use gevity_logging::{gevity_debug, gevity_info};
use log::LevelFilter;

use super::cli::Cli;
use super::config::load_config;
use super::effects::EffectRunner;
use super::input::{parse_command, Command, HELP};
use super::{logging, render};

/// Everything the dispatch loop reacts to. All state mutation happens on the loop thread.
pub enum LoopEvent {
    Dispatch(Msg),
    Notice(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .context("failed to load console config")?
        .apply_cli(&cli);

    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(config.log_destination, level);
    gevity_info!("gevity console starting server={}", config.server_url);

    let (engine, events) =
        EngineHandle::new(config.transport_settings()).context("failed to start engine")?;
    let (loop_tx, loop_rx) = mpsc::channel();
    let runner = EffectRunner::new(engine, events, loop_tx.clone());
    spawn_input_reader(loop_tx.clone());

    let mut startup = vec![Msg::SessionStarted];
    if let Some(username) = cli.username {
        startup.push(Msg::UsernameChanged(username));
    }
    if let Some(repo) = cli.repo {
        startup.push(Msg::LocatorChanged(repo));
    }
    for msg in startup {
        let _ = loop_tx.send(LoopEvent::Dispatch(msg));
    }
    drop(loop_tx);

    let mut console = Console::new(runner);
    console.print(&[HELP.to_string()])?;
    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Dispatch(msg) => console.dispatch(msg)?,
            LoopEvent::Notice(text) => console.print(&[text])?,
            LoopEvent::Quit => break,
        }
    }

    gevity_info!("gevity console exiting");
    Ok(())
}

struct Console {
    state: AppState,
    runner: EffectRunner,
}

impl Console {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        match &msg {
            Msg::TokenChanged(_) => gevity_debug!("dispatch TokenChanged(<redacted>)"),
            other => gevity_debug!("dispatch {:?}", other),
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);

        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        if was_dirty {
            self.print(&render::render(&view))?;
        }
        Ok(())
    }

    fn print(&self, lines: &[String]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        out.flush()
    }
}

fn spawn_input_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let event = match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Dispatch(msg))) => LoopEvent::Dispatch(msg),
                Ok(Some(Command::Help)) => LoopEvent::Notice(HELP.to_string()),
                Ok(Some(Command::Quit)) => break,
                Err(err) => LoopEvent::Notice(err.to_string()),
            };
            if loop_tx.send(event).is_err() {
                return;
            }
        }
        // End of input ends the session.
        let _ = loop_tx.send(LoopEvent::Quit);
    });
}
