use std::io;
use std::path::PathBuf;

use quote_core::{QuoteCoreError, RateTable, RawQuote};

pub(crate) const STDIN_MARKER: &str = "-";

pub(crate) const DEFAULT_WORKERS: usize = 1;
pub(crate) const MAX_WORKERS: usize = 64;

/// Откуда читать ответ провайдера
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub(crate) fn parse(raw: &str) -> Self {
        if raw == STDIN_MARKER {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    pub(crate) fn read_quotes(&self) -> Result<Vec<RawQuote>, QuoteCoreError> {
        let quotes = match self {
            Self::Stdin => quote_core::read_response(io::stdin().lock())?,
            Self::File(path) => quote_core::read_response_from_path(path)?,
        };
        Ok(quotes)
    }
}

/// Настройки пересчёта валют
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RatesConfig {
    pub(crate) path: Option<PathBuf>,
    pub(crate) currency: Option<String>,
}

impl RatesConfig {
    /// `None` — пересчёт не нужен (нет ни файла, ни валюты)
    pub(crate) fn load(&self) -> Result<Option<RateTable>, QuoteCoreError> {
        let table = match (&self.path, &self.currency) {
            (None, None) => return Ok(None),
            (None, Some(code)) => RateTable::empty(code.as_str())?,
            (Some(path), None) => RateTable::from_path(path)?,
            (Some(path), Some(code)) => RateTable::from_path(path)?.with_target(code.as_str())?,
        };
        Ok(Some(table))
    }
}
