//! Точка входа `quote-view`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка таблицы курсов
//! - чтение ответа провайдера из файла или stdin
//! - нормализация котировок (последовательно или по нескольким потокам)
//! - печать таблицы или JSON
//! - в режиме `--watch`: повтор с интервалом, перечитывание курсов, остановка по `Ctrl+C`

mod cli;
mod config;
mod rates;
mod render;
mod watch;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use crate::cli::{Args, Format};
use crate::config::Input;
use crate::rates::RateSource;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = Args::parse();
    args.validate()?;

    let input = args.input();
    let rates_cfg = args.rates_config();
    let rates = RateSource::load(&rates_cfg).context("load currency rates")?;

    info!(
        "Starting quote-view: input={}, format={:?}, workers={}, watch={:?}",
        args.input, args.format, args.workers, args.watch
    );

    let Some(interval) = args.watch_interval() else {
        return run_cycle(&input, &rates, args.workers, args.format);
    };

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);

    // Ctrl+C => сигнал в канал остановки
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
        info!("shutting down...");
    })?;

    watch::run_watch(interval, shutdown_rx, || {
        if let Err(e) = rates.refresh(&rates_cfg) {
            warn!("rates reload failed, keeping previous: {e}");
        }
        if let Err(e) = run_cycle(&input, &rates, args.workers, args.format) {
            warn!("cycle skipped: {e:#}");
        }
    });

    Ok(())
}

fn run_cycle(
    input: &Input,
    rates: &RateSource,
    workers: usize,
    format: Format,
) -> anyhow::Result<()> {
    let raw = input
        .read_quotes()
        .with_context(|| format!("read quotes from {input:?}"))?;

    let quotes = quote_core::normalize_all_parallel(raw, rates, workers);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_quotes(&mut out, &quotes, format).context("write quotes")?;
    out.flush()?;

    Ok(())
}
