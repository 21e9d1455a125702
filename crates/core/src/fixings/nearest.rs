use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use spotfix_market_data::Quote;

/// Bar closest to midnight of `target`, compared in exchange-local wall-clock
/// time. On a tie the earlier bar in slice order wins.
pub fn select_nearest(quotes: &[Quote], target: NaiveDate) -> Option<&Quote> {
    let target = target.and_time(NaiveTime::MIN);
    quotes
        .iter()
        .min_by_key(|q| (q.local_datetime() - target).num_seconds().abs())
}

/// Close of the bar nearest to `target`.
pub fn select_nearest_close(quotes: &[Quote], target: NaiveDate) -> Option<Decimal> {
    select_nearest(quotes, target).map(|q| q.close)
}
