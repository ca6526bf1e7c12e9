use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum QuoteCoreError {
    /// Ошибки разбора ответа провайдера
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Ошибки таблицы курсов
    #[error(transparent)]
    Rate(#[from] RateError),
}

/// Ошибки разбора конверта `quoteResponse`
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Невалидный JSON или неожиданная форма
    #[error("malformed quote response: {0}")]
    Json(#[from] serde_json::Error),

    /// Провайдер вернул непустое поле `error`
    #[error("provider error: {0}")]
    Provider(String),

    /// Ошибка чтения источника
    #[error("failed to read quote response: {0}")]
    Io(#[from] std::io::Error),
}

/// Ошибки построения таблицы курсов
#[derive(Debug, Error)]
pub enum RateError {
    /// Не задана целевая валюта
    #[error("target currency is empty")]
    EmptyTarget,

    /// Курс должен быть конечным и положительным
    #[error("invalid rate for {code}: {rate}")]
    InvalidRate {
        /// код валюты
        code: String,
        /// переданный курс
        rate: f64,
    },

    /// Невалидный JSON таблицы
    #[error("malformed rate table: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка чтения файла
    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),
}
