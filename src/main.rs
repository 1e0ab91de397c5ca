// Copyright (c) 2026 rezky_nightky

mod cell;
mod charset;
mod column;
mod config;
mod error;
mod event_loop;
mod events;
mod frame;
mod palette;
mod resize;
mod runtime;
mod signals;
mod simulator;
mod spawner;
mod stream;
mod surface;
mod terminal;

use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::thread;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::column::ColumnTable;
use crate::config::{Args, Tunables};
use crate::error::{RainError, Result};
use crate::resize::ResizeCoordinator;
use crate::runtime::{shutdown_pair, SharedSize};
use crate::signals::Termination;
use crate::simulator::Simulator;
use crate::spawner::Spawner;
use crate::surface::Surface;
use crate::terminal::{restore_terminal_best_effort, Screen};

const DEFAULT_LOG_FILTER: &str = "matrix_rain=warn";

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| RainError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn spawn_named<T, F>(name: &str, f: F) -> Result<thread::JoinHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    Ok(thread::Builder::new().name(name.to_string()).spawn(f)?)
}

fn join_logged<T>(name: &str, handle: thread::JoinHandle<T>) -> Option<T> {
    match handle.join() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(task = name, "task panicked");
            None
        }
    }
}

fn run(tunables: Tunables) -> Result<()> {
    let termination = Termination::install();

    let screen = Screen::new().map_err(RainError::TerminalInit)?;
    let size = screen.size();
    tracing::info!(width = size.width, height = size.height, "display ready");

    let shared_size = Arc::new(SharedSize::new(size));
    let table = Arc::new(ColumnTable::new(size.width as usize));
    let (trigger, shutdown) = shutdown_pair();
    let (resize_tx, resize_rx) = crossbeam_channel::bounded(0);
    let (event_tx, event_rx) = crossbeam_channel::unbounded();

    let coordinator = ResizeCoordinator::new(Arc::clone(&table), size.width);
    let coordinator = spawn_named("resize", move || coordinator.run(resize_rx))?;

    let spawner = Spawner::new(
        Arc::clone(&table),
        Arc::clone(&shared_size),
        tunables.base_length,
        tunables.length_jitter,
    );
    let spawner = {
        let shutdown = shutdown.clone();
        let interval = tunables.provide_interval;
        spawn_named("spawner", move || spawner.run(interval, shutdown))?
    };

    let simulator = Simulator::new(
        screen,
        Arc::clone(&table),
        Arc::clone(&shared_size),
        tunables.glyphs,
        tunables.palette,
    );
    let simulator = {
        let shutdown = shutdown.clone();
        let interval = tunables.down_interval;
        spawn_named("simulator", move || simulator.run(interval, shutdown))?
    };

    let poller = {
        let shutdown = shutdown.clone();
        spawn_named("events", move || events::poll_display_events(event_tx, shutdown))?
    };

    let exit = event_loop::run(
        &event_rx,
        termination.receiver(),
        &shared_size,
        &resize_tx,
    );
    tracing::info!(?exit, "shutting down");

    drop(resize_tx);
    trigger.trigger();
    join_logged("spawner", spawner);
    join_logged("resize", coordinator);
    join_logged("events", poller);
    // dropping the screen restores the terminal
    drop(join_logged("simulator", simulator));
    termination.close();

    println!("The rain has stopped");
    Ok(())
}

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let tunables = match args.tunables() {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(tunables) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            restore_terminal_best_effort();
            tracing::error!(error = %e, "fatal");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
