
use fundme_types::{FundMeError, PriceData, Result, Usd, Wei};

/// USD value of `amount` at `price`: `amount * answer / 10^decimals`, floored.
///
/// Both factors are split around `10^decimals` so the product never needs
/// more than 128 bits unless the result itself does.
pub fn conversion_rate(amount: Wei, price: &PriceData) -> Result<Usd> {
    let answer = price.validate()?;
    let scale = price.scale();
    let raw = amount.as_wei();

    let overflow = || {
        FundMeError::ArithmeticOverflow(format!(
            "{} wei at price {} ({} decimals)",
            raw, answer, price.decimals
        ))
    };

    let (amount_whole, amount_frac) = (raw / scale, raw % scale);
    let (price_whole, price_frac) = (answer / scale, answer % scale);

    // amount * answer = scale * (amount_whole * answer + amount_frac * price_whole)
    //                 + amount_frac * price_frac
    let whole = amount_whole.checked_mul(answer).ok_or_else(overflow)?;
    let cross = amount_frac.checked_mul(price_whole).ok_or_else(overflow)?;
    let frac = amount_frac * price_frac / scale;

    let usd = whole
        .checked_add(cross)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(overflow)?;

    tracing::debug!(%amount, %answer, decimals = price.decimals, usd = %Usd::from_raw(usd), "converted");
    Ok(Usd::from_raw(usd))
}

/// USD price of one whole native unit
pub fn unit_price(price: &PriceData) -> Result<Usd> {
    conversion_rate(Wei::from_ether(1), price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_decimal_feed() {
        let price = PriceData::new(2000_00000000, 8);

        assert_eq!(
            conversion_rate(Wei::from_ether(1), &price).unwrap(),
            Usd::from_dollars(2000)
        );
        assert_eq!(
            conversion_rate(Wei::parse_ether("0.025").unwrap(), &price).unwrap(),
            Usd::from_dollars(50)
        );
        assert_eq!(conversion_rate(Wei::ZERO, &price).unwrap(), Usd::ZERO);
    }

    #[test]
    fn test_eighteen_decimal_feed_does_not_overflow() {
        let price = PriceData::new(2000 * 10i128.pow(18), 18);

        assert_eq!(
            conversion_rate(Wei::from_ether(1), &price).unwrap(),
            Usd::from_dollars(2000)
        );
        assert_eq!(
            conversion_rate(Wei::from_ether(1_000_000), &price).unwrap(),
            Usd::from_dollars(2_000_000_000)
        );
        assert_eq!(unit_price(&price).unwrap(), Usd::from_dollars(2000));
    }

    #[test]
    fn test_result_is_floored() {
        // 1 wei at 2000.5 USD with 1 decimal: 20005 / 10 = 2000.5 -> 2000
        let price = PriceData::new(20005, 1);
        assert_eq!(
            conversion_rate(Wei::from_wei(1), &price).unwrap(),
            Usd::from_raw(2000)
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let price = PriceData::new(i128::MAX, 0);
        assert!(matches!(
            conversion_rate(Wei::from_wei(u128::MAX), &price),
            Err(FundMeError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn test_invalid_price_rejected() {
        assert!(matches!(
            conversion_rate(Wei::from_ether(1), &PriceData::new(0, 8)),
            Err(FundMeError::InvalidPrice(_))
        ));
    }
}
