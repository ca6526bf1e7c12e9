use std::thread;

use log::debug;

use crate::currency::CurrencyRateProvider;
use crate::session::normalize_with;
use crate::types::{NormalizedQuote, RawQuote};

/// Нормализует последовательность котировок, сохраняя порядок.
///
/// Курс берётся у `rates` отдельно для валюты каждой котировки.
pub fn normalize_all<P>(quotes: Vec<RawQuote>, rates: &P) -> Vec<NormalizedQuote>
where
    P: CurrencyRateProvider + ?Sized,
{
    let out: Vec<NormalizedQuote> = quotes
        .into_iter()
        .map(|q| {
            let rate = rates.resolve(&q.currency);
            normalize_with(q, &rate)
        })
        .collect();

    debug!("normalized {} quotes", out.len());
    out
}

/// То же, что [`normalize_all`], но по `workers` потокам.
///
/// Вход режется на непрерывные куски, результаты склеиваются в исходном порядке.
/// `workers == 0` трактуется как 1.
pub fn normalize_all_parallel<P>(
    quotes: Vec<RawQuote>,
    rates: &P,
    workers: usize,
) -> Vec<NormalizedQuote>
where
    P: CurrencyRateProvider + ?Sized,
{
    let workers = workers.max(1);
    if workers == 1 || quotes.len() < 2 {
        return normalize_all(quotes, rates);
    }

    let total = quotes.len();
    let chunk_size = total.div_ceil(workers);

    let mut chunks: Vec<Vec<RawQuote>> = Vec::with_capacity(workers);
    let mut rest = quotes;
    while rest.len() > chunk_size {
        let tail = rest.split_off(chunk_size);
        chunks.push(rest);
        rest = tail;
    }
    chunks.push(rest);

    debug!("normalizing {total} quotes on {} threads", chunks.len());

    thread::scope(|s| {
        // хэндлы в порядке кусков => join в том же порядке
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| s.spawn(move || normalize_all(chunk, rates)))
            .collect();

        let mut out = Vec::with_capacity(total);
        for h in handles {
            match h.join() {
                Ok(part) => out.extend(part),
                // нормализация не паникует; если паника всё же случилась, пробрасываем её
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        out
    })
}
