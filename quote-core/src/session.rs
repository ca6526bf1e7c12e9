use log::trace;

use crate::types::{CurrencyRate, MarketState, NormalizedQuote, RawQuote};

/// Какое правило сессии сработало для котировки.
///
/// Порядок вариантов совпадает с приоритетом правил: срабатывает первое подходящее.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRule {
    /// Основная сессия
    Regular,
    /// `POST`, но сделок после закрытия ещё нет (цена 0)
    PostWithoutTrade,
    /// `PRE`, но сделок до открытия ещё нет (цена 0)
    PreWithoutTrade,
    /// `POST` с данными постмаркета
    Post,
    /// `PRE` с данными премаркета
    Pre,
    /// Фаза неизвестна, но остались данные постмаркета
    StalePost,
    /// Всё остальное
    Closed,
}

/// Источник цены/изменения до пересчёта курсом
#[derive(Debug, Clone, Copy, PartialEq)]
struct DisplayFields {
    price: f64,
    change: f64,
    change_percent: f64,
}

impl SessionRule {
    /// Выбирает правило для котировки.
    ///
    /// Нулевая цена пре/постмаркета означает "сделок ещё не было". Настоящая нулевая
    /// цена от этого не отличима и тоже уходит на поля основной сессии.
    pub fn select(quote: &RawQuote) -> Self {
        match quote.state() {
            MarketState::Regular => Self::Regular,
            MarketState::Post if quote.post_market_price == 0.0 => Self::PostWithoutTrade,
            MarketState::Pre if quote.pre_market_price == 0.0 => Self::PreWithoutTrade,
            MarketState::Post => Self::Post,
            MarketState::Pre => Self::Pre,
            MarketState::Unknown(_) if quote.post_market_price != 0.0 => Self::StalePost,
            MarketState::Unknown(_) => Self::Closed,
        }
    }

    /// Идут ли сейчас торги
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::Regular | Self::PostWithoutTrade | Self::Post | Self::Pre
        )
    }

    /// Только для `REGULAR`
    pub fn is_regular_trading_session(self) -> bool {
        self == Self::Regular
    }

    fn display_fields(self, q: &RawQuote) -> DisplayFields {
        match self {
            Self::Regular | Self::PostWithoutTrade | Self::PreWithoutTrade | Self::Closed => {
                DisplayFields {
                    price: q.regular_market_price,
                    change: q.regular_market_change,
                    change_percent: q.regular_market_change_percent,
                }
            }
            // процент постмаркета считается от закрытия основной сессии, поэтому суммируем
            Self::Post | Self::StalePost => DisplayFields {
                price: q.post_market_price,
                change: q.post_market_change + q.regular_market_change,
                change_percent: q.post_market_change_percent + q.regular_market_change_percent,
            },
            Self::Pre => DisplayFields {
                price: q.pre_market_price,
                change: q.pre_market_change,
                change_percent: q.pre_market_change_percent,
            },
        }
    }
}

/// Нормализует одну котировку.
///
/// Тотальная функция: любая фаза торгов (включая пустую строку) даёт результат.
/// Цена и изменение умножаются на `rate`, процент — нет.
pub fn normalize(quote: RawQuote, rate: f64, display_code: &str) -> NormalizedQuote {
    let rule = SessionRule::select(&quote);
    let fields = rule.display_fields(&quote);

    trace!(
        "{} state={} rule={:?} rate={}",
        quote.symbol,
        quote.state(),
        rule,
        rate
    );

    NormalizedQuote {
        price: fields.price * rate,
        change: fields.change * rate,
        change_percent: fields.change_percent,
        is_active: rule.is_active(),
        is_regular_trading_session: rule.is_regular_trading_session(),
        currency_converted: display_code.to_string(),
        quote,
    }
}

/// То же, что [`normalize`], но с уже разрешённым курсом
pub fn normalize_with(quote: RawQuote, rate: &CurrencyRate) -> NormalizedQuote {
    normalize(quote, rate.rate, &rate.display_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn mk_quote(state: &str) -> RawQuote {
        RawQuote {
            symbol: "AAPL".to_string(),
            short_name: "Apple Inc.".to_string(),
            currency: "USD".to_string(),
            market_state: state.to_string(),
            regular_market_price: 150.0,
            regular_market_change: 2.0,
            regular_market_change_percent: 1.35,
            post_market_price: 151.0,
            post_market_change: 1.0,
            post_market_change_percent: 0.5,
            pre_market_price: 149.0,
            pre_market_change: -1.0,
            pre_market_change_percent: -0.67,
            ..RawQuote::default()
        }
    }

    #[test]
    fn rule_1_regular_uses_regular_fields() {
        let q = mk_quote("REGULAR");
        assert_eq!(SessionRule::select(&q), SessionRule::Regular);

        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 150.0);
        assert_eq!(n.change, 2.0);
        assert_eq!(n.change_percent, 1.35);
        assert!(n.is_active);
        assert!(n.is_regular_trading_session);
    }

    #[test]
    fn rule_2_post_without_trade_falls_back_to_regular_and_stays_active() {
        let mut q = mk_quote("POST");
        q.post_market_price = 0.0;
        assert_eq!(SessionRule::select(&q), SessionRule::PostWithoutTrade);

        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 150.0);
        assert_eq!(n.change, 2.0);
        assert_eq!(n.change_percent, 1.35);
        assert!(n.is_active);
        assert!(!n.is_regular_trading_session);
    }

    #[test]
    fn rule_3_pre_without_trade_falls_back_to_regular_and_is_inactive() {
        let mut q = mk_quote("PRE");
        q.pre_market_price = 0.0;
        assert_eq!(SessionRule::select(&q), SessionRule::PreWithoutTrade);

        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 150.0);
        assert_eq!(n.change, 2.0);
        assert_eq!(n.change_percent, 1.35);
        assert!(!n.is_active);
        assert!(!n.is_regular_trading_session);
    }

    #[test]
    fn rule_4_post_accumulates_change_over_regular_session() {
        let q = mk_quote("POST");
        assert_eq!(SessionRule::select(&q), SessionRule::Post);

        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 151.0);
        assert_eq!(n.change, 3.0);
        assert!(approx(n.change_percent, 1.85));
        assert!(n.is_active);
        assert!(!n.is_regular_trading_session);
    }

    #[test]
    fn rule_5_pre_uses_pre_fields_only() {
        let q = mk_quote("PRE");
        assert_eq!(SessionRule::select(&q), SessionRule::Pre);

        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 149.0);
        assert_eq!(n.change, -1.0);
        assert_eq!(n.change_percent, -0.67);
        assert!(n.is_active);
        assert!(!n.is_regular_trading_session);
    }

    #[test]
    fn rule_6_unknown_state_recovers_stale_post_data() {
        let q = mk_quote("");
        assert_eq!(SessionRule::select(&q), SessionRule::StalePost);

        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 151.0);
        assert_eq!(n.change, 3.0);
        assert!(approx(n.change_percent, 1.85));
        assert!(!n.is_active);
        assert!(!n.is_regular_trading_session);
    }

    #[test]
    fn rule_7_closed_uses_regular_fields() {
        let mut q = mk_quote("CLOSED");
        q.post_market_price = 0.0;
        assert_eq!(SessionRule::select(&q), SessionRule::Closed);

        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 150.0);
        assert_eq!(n.change, 2.0);
        assert_eq!(n.change_percent, 1.35);
        assert!(!n.is_active);
        assert!(!n.is_regular_trading_session);
    }

    #[test]
    fn regular_wins_even_with_post_and_pre_data_present() {
        let q = mk_quote("REGULAR");
        assert_eq!(SessionRule::select(&q), SessionRule::Regular);
    }

    #[test]
    fn pre_without_trade_ignores_post_data() {
        // постмаркет прошлого дня не должен подменять цену в PRE
        let mut q = mk_quote("PRE");
        q.pre_market_price = 0.0;
        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 150.0);
    }

    #[test]
    fn lowercase_state_is_unknown() {
        let mut q = mk_quote("regular");
        q.post_market_price = 0.0;
        assert_eq!(SessionRule::select(&q), SessionRule::Closed);
    }

    #[test]
    fn arbitrary_states_always_produce_a_quote() {
        for state in ["", " ", "PREPRE", "POSTPOST", "CLOSED", "Regular", "🙂", "POST "] {
            let n = normalize(mk_quote(state), 1.0, "USD");
            assert!(!n.is_regular_trading_session, "state {state:?}");
            assert!(!n.is_active, "state {state:?}");
        }
    }

    #[test]
    fn zero_post_price_is_treated_as_no_trade() {
        // известная неоднозначность: реальная нулевая цена тоже считается "нет сделок"
        let mut q = mk_quote("POST");
        q.post_market_price = 0.0;
        q.post_market_change = -150.0;
        let n = normalize(q, 1.0, "USD");
        assert_eq!(n.price, 150.0);
        assert_eq!(n.change, 2.0);
    }

    #[test]
    fn negative_zero_counts_as_zero() {
        let mut q = mk_quote("POST");
        q.post_market_price = -0.0;
        assert_eq!(SessionRule::select(&q), SessionRule::PostWithoutTrade);
    }

    #[test]
    fn currency_rate_scales_price_and_change_only() {
        let n = normalize(mk_quote("REGULAR"), 0.92, "EUR");
        assert!(approx(n.price, 138.0));
        assert!(approx(n.change, 1.84));
        assert_eq!(n.change_percent, 1.35);
        assert_eq!(n.currency_converted, "EUR");
    }

    #[test]
    fn percent_is_rate_invariant_for_every_rule() {
        for state in ["REGULAR", "POST", "PRE", "", "CLOSED"] {
            let a = normalize(mk_quote(state), 1.0, "USD");
            let b = normalize(mk_quote(state), 3.7, "XYZ");
            assert_eq!(a.change_percent, b.change_percent, "state {state:?}");
            assert!(approx(b.price, a.price * 3.7), "state {state:?}");
        }
    }

    #[test]
    fn currency_converted_is_set_for_every_rule() {
        for state in ["REGULAR", "POST", "PRE", "", "CLOSED"] {
            let n = normalize(mk_quote(state), 1.0, "GBP");
            assert_eq!(n.currency_converted, "GBP");
        }
    }

    #[test]
    fn raw_fields_are_preserved() {
        let q = mk_quote("POST");
        let n = normalize(q.clone(), 2.0, "EUR");
        assert_eq!(n.quote, q);
    }

    #[test]
    fn normalize_with_uses_resolved_rate() {
        let n = normalize_with(mk_quote("REGULAR"), &CurrencyRate::new(2.0, "CHF"));
        assert_eq!(n.price, 300.0);
        assert_eq!(n.currency_converted, "CHF");
    }
}
