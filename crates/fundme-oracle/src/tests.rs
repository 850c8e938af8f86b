
// Integration tests for the oracle crate

#[cfg(test)]
mod tests {
    use crate::*;
    use fundme_types::{Address, FundMeError, PriceData, Result, Usd, Wei};
    use std::sync::Arc;

    /// Feed that always errors, standing in for an unreachable oracle
    struct DownFeed;

    impl PriceOracle for DownFeed {
        fn address(&self) -> Address {
            Address::from_label("down")
        }

        fn latest_price(&self) -> Result<PriceData> {
            Err(FundMeError::Oracle("feed unreachable".to_string()))
        }
    }

    #[test]
    fn test_trait_objects_delegate() {
        let feed = MockV3Aggregator::with_defaults(Address::from_label("feed"));

        let boxed: Box<dyn PriceOracle> = Box::new(feed.clone());
        let shared: Arc<dyn PriceOracle> = Arc::new(feed.clone());

        assert_eq!(boxed.address(), feed.address());
        assert_eq!(shared.latest_price().unwrap(), feed.latest_price().unwrap());
        assert_eq!((&feed).latest_price().unwrap().answer, DEFAULT_INITIAL_ANSWER);
    }

    #[test]
    fn test_live_price_changes_are_visible_through_handles() {
        let feed = MockV3Aggregator::with_defaults(Address::from_label("feed"));
        let held: Box<dyn PriceOracle> = Box::new(feed.clone());

        let before = unit_price(&held.latest_price().unwrap()).unwrap();
        feed.update_answer(4000_00000000);
        let after = unit_price(&held.latest_price().unwrap()).unwrap();

        assert_eq!(before, Usd::from_dollars(2000));
        assert_eq!(after, Usd::from_dollars(4000));
    }

    #[test]
    fn test_registry_lookup() {
        let sepolia: Address = "0x694AA1769357215DE4FAC081bf1f309aDC325306".parse().unwrap();
        let mut registry = FeedRegistry::new();
        registry.register(Arc::new(MockV3Aggregator::with_defaults(sepolia)));
        registry.register(Arc::new(DownFeed));

        assert_eq!(registry.addresses().len(), 2);
        assert!(registry.get(&sepolia).is_some());
        assert!(registry.get(&Address::ZERO).is_none());

        let down = registry.get(&Address::from_label("down")).unwrap();
        assert!(matches!(down.latest_price(), Err(FundMeError::Oracle(_))));
    }

    #[test]
    fn test_threshold_at_default_price() {
        // 50 USD at 2000 USD/ETH is exactly 0.025 ETH
        let price = MockV3Aggregator::with_defaults(Address::ZERO)
            .latest_price()
            .unwrap();
        let minimum = Usd::from_dollars(50);

        let exact = Wei::parse_ether("0.025").unwrap();
        let short = Wei::from_wei(exact.as_wei() - 1);

        assert!(conversion_rate(exact, &price).unwrap() >= minimum);
        assert!(conversion_rate(short, &price).unwrap() < minimum);
    }
}
