//! # quote-core
//!
//! Нормализация котировок провайдера с учётом фазы торгов и валюты отображения.
//!
//! Этот крейт содержит:
//!
//! - [`types`] — сырые и нормализованные котировки, фаза торгов, курс
//! - [`session`] — таблица правил сессии и нормализация одной котировки
//! - [`batch`] — нормализация последовательности с сохранением порядка
//! - [`currency`] — источники курсов (таблица, общий снимок, без пересчёта)
//! - [`response`] — разбор конверта `quoteResponse` от провайдера
//! - [`error`] — типы ошибок граничных операций
//!
//! ## Быстрый пример: одна котировка
//!
//! ```rust
//! use quote_core::{normalize, RawQuote};
//!
//! let raw = RawQuote {
//!     symbol: "AAPL".to_string(),
//!     market_state: "POST".to_string(),
//!     regular_market_price: 150.0,
//!     regular_market_change: 2.0,
//!     post_market_price: 151.0,
//!     post_market_change: 1.0,
//!     ..RawQuote::default()
//! };
//!
//! let q = normalize(raw, 1.0, "USD");
//! assert_eq!(q.price, 151.0);
//! assert_eq!(q.change, 3.0);
//! assert!(q.is_active);
//! assert!(!q.is_regular_trading_session);
//! ```
//!
//! ## Пример: ответ провайдера + таблица курсов
//!
//! ```rust
//! use quote_core::{normalize_all, parse_response, RateTable};
//!
//! let body = r#"{"quoteResponse":{"result":[
//!     {"symbol":"AAPL","currency":"USD","marketState":"REGULAR","regularMarketPrice":100.0},
//!     {"symbol":"SAP.DE","currency":"EUR","marketState":"CLOSED","regularMarketPrice":200.0}
//! ],"error":null}}"#;
//!
//! let quotes = parse_response(body).unwrap();
//! let rates = RateTable::new("EUR", [("USD".to_string(), 0.5)]).unwrap();
//!
//! let out = normalize_all(quotes, &rates);
//! assert_eq!(out[0].price, 50.0);
//! assert_eq!(out[1].price, 200.0);
//! assert!(out.iter().all(|q| q.currency_converted == "EUR"));
//! ```
//!
//! ## Дизайн
//!
//! Нормализация — чистая функция без ошибок и без I/O: неизвестная фаза торгов
//! уходит в правило по умолчанию, отсутствующие числа считаются нулями.
//! Ошибки бывают только на границах: разбор JSON ответа и загрузка таблицы курсов.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Доменные типы.
pub mod types;

/// Правила сессии и нормализация одной котировки.
pub mod session;

/// Нормализация пачки котировок.
pub mod batch;

/// Курсы валют.
pub mod currency;

/// Разбор ответа провайдера.
pub mod response;

/// Ошибки `quote-core`.
pub mod error;

// --- Re-exports (публичный фасад API) ---

pub use crate::batch::{normalize_all, normalize_all_parallel};
pub use crate::currency::{CurrencyRateProvider, IdentityRates, RateTable, SharedRates};
pub use crate::error::{QuoteCoreError, RateError, ResponseError};
pub use crate::response::{parse_response, read_response, read_response_from_path};
pub use crate::session::{SessionRule, normalize, normalize_with};
pub use crate::types::{CurrencyRate, MarketState, NormalizedQuote, RawQuote};
