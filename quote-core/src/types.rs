use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Котировка в том виде, в каком её отдаёт провайдер.
///
/// Отсутствующие поля и явный `null` превращаются в значение по умолчанию
/// (`0.0` для чисел, пустая строка для текста).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawQuote {
    /// Короткое название инструмента
    #[serde(deserialize_with = "null_as_default")]
    pub short_name: String,
    /// Тикер
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    /// Фаза торгов как строка провайдера: `REGULAR`, `PRE`, `POST`, ...
    #[serde(deserialize_with = "null_as_default")]
    pub market_state: String,
    /// Валюта котировки
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// Полное название биржи
    #[serde(rename = "fullExchangeName", deserialize_with = "null_as_default")]
    pub exchange_name: String,
    /// Задержка данных биржи, минуты
    #[serde(rename = "exchangeDataDelayedBy", deserialize_with = "null_as_default")]
    pub exchange_delay: f64,

    /// Изменение за основную сессию
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_change: f64,
    /// Изменение за основную сессию, %
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_change_percent: f64,
    /// Цена основной сессии
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_price: f64,
    /// Закрытие предыдущего дня
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_previous_close: f64,
    /// Цена открытия
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_open: f64,
    /// Диапазон дня текстом, например `"148.1 - 151.2"`
    #[serde(deserialize_with = "null_as_default")]
    pub regular_market_day_range: String,

    /// Изменение после закрытия
    #[serde(deserialize_with = "null_as_default")]
    pub post_market_change: f64,
    /// Изменение после закрытия, %
    #[serde(deserialize_with = "null_as_default")]
    pub post_market_change_percent: f64,
    /// Цена после закрытия
    #[serde(deserialize_with = "null_as_default")]
    pub post_market_price: f64,

    /// Изменение до открытия
    #[serde(deserialize_with = "null_as_default")]
    pub pre_market_change: f64,
    /// Изменение до открытия, %
    #[serde(deserialize_with = "null_as_default")]
    pub pre_market_change_percent: f64,
    /// Цена до открытия
    #[serde(deserialize_with = "null_as_default")]
    pub pre_market_price: f64,
}

impl RawQuote {
    /// Разобранная фаза торгов
    pub fn state(&self) -> MarketState {
        MarketState::from(self.market_state.as_str())
    }
}

/// Явный `null` читается как значение по умолчанию
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Фаза торгов инструмента.
///
/// Сравнение точное и регистрозависимое: `"regular"` это `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketState {
    /// `REGULAR`
    Regular,
    /// `PRE`
    Pre,
    /// `POST`
    Post,
    /// Любая другая строка, включая пустую (`CLOSED`, `PREPRE`, `POSTPOST`, ...)
    Unknown(String),
}

impl MarketState {
    /// Разбирает строку провайдера
    pub fn parse(raw: &str) -> Self {
        match raw {
            "REGULAR" => Self::Regular,
            "PRE" => Self::Pre,
            "POST" => Self::Post,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Строка в виде провайдера
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regular => "REGULAR",
            Self::Pre => "PRE",
            Self::Post => "POST",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for MarketState {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Курс пересчёта в валюту отображения
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRate {
    /// Множитель пересчёта
    pub rate: f64,
    /// Код валюты отображения
    pub display_code: String,
}

impl CurrencyRate {
    /// Курс и код валюты отображения
    pub fn new(rate: f64, display_code: impl Into<String>) -> Self {
        Self {
            rate,
            display_code: display_code.into(),
        }
    }

    /// Нейтральный курс: 1.0 и тот же код
    pub fn identity(code: &str) -> Self {
        Self::new(1.0, code)
    }
}

/// Котировка, готовая к показу: исходные поля + вычисленные.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuote {
    /// Исходная котировка без изменений
    #[serde(flatten)]
    pub quote: RawQuote,
    /// Цена в валюте отображения
    pub price: f64,
    /// Абсолютное изменение в валюте отображения
    pub change: f64,
    /// Изменение в процентах, курсом не масштабируется
    pub change_percent: f64,
    /// Идут ли торги (основная, пре- или постсессия)
    pub is_active: bool,
    /// Только основная сессия
    pub is_regular_trading_session: bool,
    /// Код валюты отображения
    pub currency_converted: String,
}
