//! Scalar summaries over a (usually filtered) list of records.
//!
//! Ratios return `None` instead of dividing by zero.

use crate::model::Amount;
use rust_decimal::Decimal;

/// Adds up `amount` over every record.
pub fn sum<'a, R, I, F>(records: I, amount: F) -> Amount
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> Amount,
{
    records.into_iter().map(amount).sum()
}

/// Adds up `amount` over the records that satisfy `predicate`.
pub fn sum_where<'a, R, I, P, F>(records: I, predicate: P, amount: F) -> Amount
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    P: Fn(&R) -> bool,
    F: Fn(&R) -> Amount,
{
    records
        .into_iter()
        .filter(|r| predicate(r))
        .map(amount)
        .sum()
}

/// Counts the records that satisfy `predicate`.
pub fn count_where<'a, R, I, P>(records: I, predicate: P) -> usize
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    P: Fn(&R) -> bool,
{
    records.into_iter().filter(|r| predicate(r)).count()
}

/// `part / whole`, or `None` when `whole` is zero.
pub fn ratio(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        None
    } else {
        part.checked_div(whole)
    }
}

/// `part / whole * 100`, or `None` when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Option<Decimal> {
    ratio(part, whole).and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
}

/// The mean of `count` values adding up to `total`, or `None` for no values.
pub fn average(total: Amount, count: usize) -> Option<Amount> {
    ratio(total.value(), Decimal::from(count)).map(Amount::new)
}
