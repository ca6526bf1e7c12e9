use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use crate::config::{self, Input, RatesConfig};

/// Quote View - нормализует ответ провайдера котировок и печатает его.
///
/// Котировки читаются из файла (или stdin) в формате `quoteResponse`,
/// цены пересчитываются в валюту отображения по таблице курсов.
/// В режиме `--watch` файл перечитывается с заданным интервалом до Ctrl+C.
#[derive(Parser, Debug, Clone)]
#[command(name = "quote-view", version, about)]
pub(crate) struct Args {
    /// Файл с ответом провайдера, `-` = stdin
    #[arg(long, default_value = config::STDIN_MARKER)]
    pub(crate) input: String,

    /// JSON таблица курсов: {"target":"EUR","rates":{"USD":0.92}}
    #[arg(long)]
    pub(crate) rates: Option<PathBuf>,

    /// Валюта отображения; переопределяет target из --rates
    #[arg(long)]
    pub(crate) currency: Option<String>,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub(crate) format: Format,

    /// Перечитывать вход каждые N секунд
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) watch: Option<u64>,

    /// Число потоков нормализации
    #[arg(long, default_value_t = config::DEFAULT_WORKERS)]
    pub(crate) workers: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Table,
    Json,
}

impl Args {
    /// Валидация аргументов, которую clap сам не делает
    pub(crate) fn validate(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            bail!("--input is empty");
        }

        if self.watch.is_some() && self.input() == Input::Stdin {
            bail!("--watch needs a file for --input (stdin can be read only once)");
        }

        if let Input::File(path) = self.input() {
            let md = std::fs::metadata(&path)
                .with_context(|| format!("input file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("--input must point to a file: {:?}", path);
            }
        }

        if let Some(path) = &self.rates {
            let md = std::fs::metadata(path)
                .with_context(|| format!("rates file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("--rates must point to a file: {:?}", path);
            }
        }

        if let Some(code) = &self.currency {
            if code.trim().is_empty() {
                bail!("--currency is empty");
            }
        }

        if self.workers == 0 || self.workers > config::MAX_WORKERS {
            bail!(
                "--workers must be in 1..={} (got: {})",
                config::MAX_WORKERS,
                self.workers
            );
        }

        Ok(())
    }

    pub(crate) fn input(&self) -> Input {
        Input::parse(&self.input)
    }

    pub(crate) fn rates_config(&self) -> RatesConfig {
        RatesConfig {
            path: self.rates.clone(),
            currency: self.currency.as_ref().map(|c| c.trim().to_string()),
        }
    }

    pub(crate) fn watch_interval(&self) -> Option<Duration> {
        self.watch.map(Duration::from_secs)
    }
}
