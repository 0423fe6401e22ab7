use rust_decimal::Decimal;

/// Arithmetic mean, `None` for an empty slice.
///
/// A sum that would overflow `Decimal` is retried by dividing each value by
/// the count first, which stays within range at the cost of rounding.
pub(crate) fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let count = Decimal::from(values.len());
    match values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
    {
        Some(sum) => sum.checked_div(count),
        None => values
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v.checked_div(count)?)),
    }
}

pub(crate) fn maximum(values: &[Decimal]) -> Option<Decimal> {
    values.iter().copied().max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mean_and_maximum() {
        let values = [dec!(10), dec!(20), dec!(30)];
        assert_eq!(mean(&values), Some(dec!(20)));
        assert_eq!(maximum(&values), Some(dec!(30)));
        assert_eq!(mean(&[]), None);
        assert_eq!(maximum(&[]), None);
    }

    #[test]
    fn mean_near_the_decimal_limit_does_not_overflow() {
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        assert_eq!(mean(&[huge, huge]), Some(huge));
        assert_eq!(mean(&[Decimal::MAX, -Decimal::MAX]), Some(Decimal::ZERO));
    }

    #[test]
    fn maximum_of_negatives_is_negative() {
        assert_eq!(maximum(&[dec!(-5), dec!(-2.5)]), Some(dec!(-2.5)));
    }
}
