use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ResponseError;
use crate::types::{RawQuote, null_as_default};

/// Конверт ответа провайдера:
/// `{ "quoteResponse": { "result": [...], "error": null } }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteResponseEnvelope {
    /// Тело ответа; `null` = пустой ответ
    #[serde(deserialize_with = "null_as_default")]
    pub quote_response: QuoteResponse,
}

/// Содержимое `quoteResponse`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuoteResponse {
    /// Котировки; `null` = пустой список
    #[serde(rename = "result", deserialize_with = "null_as_default")]
    pub quotes: Vec<RawQuote>,
    /// Произвольное значение; `null` или отсутствие = нет ошибки
    pub error: Option<Value>,
}

impl QuoteResponseEnvelope {
    /// Котировки, если провайдер не сообщил об ошибке.
    ///
    /// Непустое `error` побеждает: возвращается `ResponseError::Provider`,
    /// котировки из `result` при этом отбрасываются.
    pub fn into_quotes(self) -> Result<Vec<RawQuote>, ResponseError> {
        match self.quote_response.error {
            None | Some(Value::Null) => Ok(self.quote_response.quotes),
            Some(Value::String(s)) => Err(ResponseError::Provider(s)),
            Some(other) => Err(ResponseError::Provider(other.to_string())),
        }
    }
}

/// Разбирает ответ провайдера из строки
pub fn parse_response(body: &str) -> Result<Vec<RawQuote>, ResponseError> {
    let envelope: QuoteResponseEnvelope = serde_json::from_str(body)?;
    envelope.into_quotes()
}

/// Разбирает ответ провайдера из потока
pub fn read_response<R: io::Read>(reader: R) -> Result<Vec<RawQuote>, ResponseError> {
    let envelope: QuoteResponseEnvelope = serde_json::from_reader(BufReader::new(reader))?;
    envelope.into_quotes()
}

/// Разбирает ответ провайдера из файла
pub fn read_response_from_path(path: impl AsRef<Path>) -> Result<Vec<RawQuote>, ResponseError> {
    let f = File::open(path)?;
    read_response(f)
}
