use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::{Arc, RwLock};

use log::debug;
use serde::Deserialize;

use crate::error::RateError;
use crate::types::CurrencyRate;

/// Источник курсов для пересчёта в валюту отображения.
///
/// Не падает: для неизвестной валюты возвращает курс 1.0 и тот же код.
pub trait CurrencyRateProvider: Send + Sync {
    /// Курс и код валюты отображения для `currency_code`
    fn resolve(&self, currency_code: &str) -> CurrencyRate;
}

impl<P: CurrencyRateProvider + ?Sized> CurrencyRateProvider for &P {
    fn resolve(&self, currency_code: &str) -> CurrencyRate {
        (**self).resolve(currency_code)
    }
}

impl<P: CurrencyRateProvider + ?Sized> CurrencyRateProvider for Arc<P> {
    fn resolve(&self, currency_code: &str) -> CurrencyRate {
        (**self).resolve(currency_code)
    }
}

/// Без пересчёта: всё остаётся в своей валюте
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRates;

impl CurrencyRateProvider for IdentityRates {
    fn resolve(&self, currency_code: &str) -> CurrencyRate {
        CurrencyRate::identity(currency_code)
    }
}

/// Неизменяемый снимок курсов к одной целевой валюте.
///
/// `rates[code]` — множитель, переводящий сумму в `code` в сумму в `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    target: String,
    rates: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct RateTableFile {
    target: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Таблица курсов к `target`; курсы должны быть конечными и положительными
    pub fn new(
        target: impl Into<String>,
        rates: impl IntoIterator<Item = (String, f64)>,
    ) -> Result<Self, RateError> {
        let target = target.into().trim().to_string();
        if target.is_empty() {
            return Err(RateError::EmptyTarget);
        }

        let mut map = HashMap::new();
        for (code, rate) in rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(RateError::InvalidRate { code, rate });
            }
            map.insert(code, rate);
        }

        Ok(Self { target, rates: map })
    }

    /// Пустая таблица: всё, кроме `target`, проходит без пересчёта
    pub fn empty(target: impl Into<String>) -> Result<Self, RateError> {
        Self::new(target, std::iter::empty())
    }

    /// Формат: `{ "target": "EUR", "rates": { "USD": 0.92 } }`
    pub fn from_json(s: &str) -> Result<Self, RateError> {
        let file: RateTableFile = serde_json::from_str(s)?;
        Self::new(file.target, file.rates)
    }

    /// Читает таблицу из JSON-потока
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RateError> {
        let file: RateTableFile = serde_json::from_reader(BufReader::new(reader))?;
        Self::new(file.target, file.rates)
    }

    /// Читает таблицу из JSON-файла
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RateError> {
        let f = File::open(path)?;
        Self::from_reader(f)
    }

    /// Заменяет целевую валюту, сохраняя курсы
    pub fn with_target(self, target: impl Into<String>) -> Result<Self, RateError> {
        Self::new(target, self.rates)
    }

    /// Целевая валюта
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Число курсов
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Нет ни одного курса
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl CurrencyRateProvider for RateTable {
    fn resolve(&self, currency_code: &str) -> CurrencyRate {
        if currency_code == self.target {
            return CurrencyRate::identity(&self.target);
        }

        match self.rates.get(currency_code) {
            Some(&rate) => CurrencyRate::new(rate, self.target.as_str()),
            None => {
                debug!("no rate for {currency_code:?} -> {}; leaving as is", self.target);
                CurrencyRate::identity(currency_code)
            }
        }
    }
}

/// Общая таблица курсов, обновляемая снаружи.
///
/// Читатели берут `Arc`-снимок целиком, писатель подменяет таблицу целиком,
/// так что пара (курс, код) всегда читается из одной версии.
#[derive(Debug, Clone)]
pub struct SharedRates {
    current: Arc<RwLock<Arc<RateTable>>>,
}

impl SharedRates {
    /// Общая таблица с начальным снимком
    pub fn new(table: RateTable) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Текущий снимок
    pub fn snapshot(&self) -> Arc<RateTable> {
        let guard = match self.current.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(), // таблица заменяется целиком, poison не страшен
        };
        guard.clone()
    }

    /// Подменяет таблицу, возвращает предыдущую
    pub fn replace(&self, table: RateTable) -> Arc<RateTable> {
        let mut guard = match self.current.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, Arc::new(table))
    }
}

impl CurrencyRateProvider for SharedRates {
    fn resolve(&self, currency_code: &str) -> CurrencyRate {
        self.snapshot().resolve(currency_code)
    }
}
