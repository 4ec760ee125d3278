#![forbid(unsafe_code)]

mod banner;
mod cli;
mod config_builder;
mod signals;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};
use std::time::Duration;
use t50_core::socket::{RawSocket, MIN_SEND_BUFFER};
use t50_core::{priority, T50Error};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

enum Event {
    Finished(Result<t50_core::Stats, T50Error>),
    Signaled(i32),
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let cfg = match config_builder::build_config(&cli) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::from(1);
        }
    };

    if !priority::running_as_root() {
        error!(error = %T50Error::NotRoot, "refusing to start");
        return ExitCode::from(1);
    }

    let socket = match RawSocket::create(MIN_SEND_BUFFER) {
        Ok(s) => Arc::new(s),
        Err(err) => {
            error!(%err, "failed to create raw socket");
            return ExitCode::from(1);
        }
    };

    banner::print_launch(&cfg);

    let stop = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();

    let (sig_tx, sig_rx) = mpsc::channel::<i32>();
    signals::spawn_watcher(Arc::clone(&stop), sig_tx);
    {
        let tx = tx.clone();
        std::thread::spawn(move || {
            if let Ok(signo) = sig_rx.recv() {
                let _ = tx.send(Event::Signaled(signo));
            }
        });
    }

    {
        let tx = tx.clone();
        let cfg = cfg;
        let socket = Arc::clone(&socket);
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let result = t50_core::run(&cfg, socket, stop);
            let _ = tx.send(Event::Finished(result));
        });
    }
    drop(tx);

    match rx.recv() {
        Ok(Event::Finished(Ok(stats))) => {
            banner::print_termination(stats.sent);
            info!(sent = stats.sent, "clean completion");
            ExitCode::from(0)
        }
        Ok(Event::Finished(Err(err))) => {
            error!(%err, "injection loop failed");
            ExitCode::from(1)
        }
        Ok(Event::Signaled(signo)) => {
            let sent = match rx.recv_timeout(Duration::from_secs(5)) {
                Ok(Event::Finished(Ok(stats))) => stats.sent,
                Ok(Event::Finished(Err(_))) | Err(_) => 0,
                Ok(Event::Signaled(_)) => 0,
            };
            banner::print_signaled(signo, sent);
            // Exit code encodes the terminating signal, matching the
            // pre-threads `128 + signo` convention.
            ExitCode::from((128 + signo) as u8)
        }
        Err(_) => {
            error!("worker channel closed unexpectedly");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
