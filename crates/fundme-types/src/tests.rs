
// Cross-module tests for the types crate

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;

    #[test]
    fn test_roundtrip_serialization() {
        let price = PriceData {
            answer: 2000_00000000,
            decimals: 8,
            round_id: 3,
            updated_at: 42,
        };

        let json = serde_json::to_string(&price).unwrap();
        let deserialized: PriceData = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
    }

    #[test]
    fn test_amounts_serialize_as_strings() {
        let value = Wei::parse_ether("0.1").unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"0.1\"");

        let minimum: Usd = serde_json::from_str("\"50\"").unwrap();
        assert_eq!(minimum, Usd::from_dollars(50));

        assert!(serde_json::from_str::<Wei>("\"abc\"").is_err());
    }

    #[test]
    fn test_address_serializes_as_hex() {
        let addr = Address::new([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_price_validation() {
        assert_eq!(PriceData::new(2000_00000000, 8).validate().unwrap(), 2000_00000000);
        assert!(matches!(
            PriceData::new(0, 8).validate(),
            Err(FundMeError::InvalidPrice(_))
        ));
        assert!(matches!(
            PriceData::new(-1, 8).validate(),
            Err(FundMeError::InvalidPrice(_))
        ));
        assert!(matches!(
            PriceData::new(1, 19).validate(),
            Err(FundMeError::InvalidPrice(_))
        ));
        assert_eq!(PriceData::new(1, 8).scale(), 100_000_000);
    }

    #[test]
    fn test_error_messages() {
        let err = FundMeError::InsufficientValue {
            sent_usd: Usd::parse("12.5").unwrap(),
            minimum_usd: Usd::from_dollars(50),
        };
        assert!(err.to_string().starts_with("Did not send enough"));

        let err = FundMeError::IndexOutOfRange { index: 3, len: 1 };
        assert_eq!(err.to_string(), "Index out of range: 3 >= 1");
    }

    proptest! {
        #[test]
        fn prop_wei_display_parse_is_exact(raw in any::<u128>()) {
            let wei = Wei::from_wei(raw);
            prop_assert_eq!(wei.to_string().parse::<Wei>().unwrap(), wei);
        }
    }
}
