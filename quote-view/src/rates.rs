use log::{debug, info};
use quote_core::{CurrencyRate, CurrencyRateProvider, IdentityRates, QuoteCoreError, SharedRates};

use crate::config::RatesConfig;

/// Активный источник курсов
#[derive(Debug, Clone)]
pub(crate) enum RateSource {
    Identity(IdentityRates),
    Table(SharedRates),
}

impl RateSource {
    pub(crate) fn load(cfg: &RatesConfig) -> Result<Self, QuoteCoreError> {
        match cfg.load()? {
            Some(table) => {
                info!(
                    "display currency {} ({} rates)",
                    table.target(),
                    table.len()
                );
                Ok(Self::Table(SharedRates::new(table)))
            }
            None => {
                info!("no display currency; prices stay in their own currency");
                Ok(Self::Identity(IdentityRates))
            }
        }
    }

    /// Перечитывает таблицу из файла и подменяет снимок.
    ///
    /// При ошибке старый снимок остаётся в силе.
    pub(crate) fn refresh(&self, cfg: &RatesConfig) -> Result<(), QuoteCoreError> {
        let Self::Table(shared) = self else {
            return Ok(());
        };
        if cfg.path.is_none() {
            return Ok(());
        }

        if let Some(table) = cfg.load()? {
            debug!("rates reloaded: {} -> {} rates", table.target(), table.len());
            shared.replace(table);
        }
        Ok(())
    }
}

impl CurrencyRateProvider for RateSource {
    fn resolve(&self, currency_code: &str) -> CurrencyRate {
        match self {
            Self::Identity(p) => p.resolve(currency_code),
            Self::Table(p) => p.resolve(currency_code),
        }
    }
}
