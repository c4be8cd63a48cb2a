#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    use crate::{
        api::FeedRegistry,
        app::Portfolio,
        error::PortfolioError,
        models::{AssetType, FeedType, Lot, Metric},
        store::PortfolioSource,
        test::{StaticFeed, date, lot, series, sold_lot},
    };

    fn registry() -> FeedRegistry {
        FeedRegistry::new().with(Box::new(
            StaticFeed::new(FeedType::Yahoo)
                .with(
                    "Apple",
                    series(
                        "AAPL",
                        &[("2009-12-01", dec!(30.10)), ("2018-01-02", dec!(150.00))],
                    ),
                )
                .with(
                    "MFC",
                    series(
                        "MFC.TO",
                        &[("2018-02-23", dec!(24.50)), ("2018-06-01", dec!(23.80))],
                    ),
                ),
        ))
    }

    #[tokio::test]
    async fn failed_lot_matches_run_without_it() {
        let priced = vec![
            lot("Apple", "2009-12-01", dec!(30.20), 1000),
            lot("MFC", "2018-02-23", dec!(24.609), 700),
        ];
        let mut with_failure = priced.clone();
        with_failure.insert(1, lot("Delisted", "2010-05-03", dec!(12.00), 100));

        let registry = registry();
        let as_of = date("2018-06-30");
        let without = Portfolio::build("regular", priced, &registry, as_of).await;
        let with = Portfolio::build("regular", with_failure, &registry, as_of).await;

        assert!(with.performance("Delisted").unwrap().is_empty());
        assert!(!with.summary().row("Delisted").unwrap().has_metrics());

        for asset_id in ["Apple", "MFC"] {
            assert_eq!(with.performance(asset_id), without.performance(asset_id));
            assert_eq!(with.summary().row(asset_id), without.summary().row(asset_id));
        }
        assert_eq!(with.summary().total(), without.summary().total());
    }

    #[tokio::test]
    async fn sale_after_as_of_is_not_realized() {
        let registry = FeedRegistry::new().with(Box::new(StaticFeed::new(FeedType::Yahoo).with(
            "Telus",
            series(
                "T.TO",
                &[
                    ("2016-01-04", dec!(35.00)),
                    ("2016-02-01", dec!(37.50)),
                    ("2016-04-01", dec!(42.00)),
                ],
            ),
        )));
        let telus = sold_lot("Telus", "2016-01-04", dec!(34.80), 1000, "2016-03-02", dec!(40.00));
        let as_of = date("2016-02-15");

        let portfolio = Portfolio::build("regular", vec![telus], &registry, as_of).await;

        let table = portfolio.performance("Telus").unwrap();
        assert!(table.rows().iter().all(|row| *row.date() <= as_of));
        let latest = table.latest().unwrap();
        assert!(!*latest.realized());
        assert_eq!(*latest.close(), dec!(37.50));

        let row = portfolio.summary().row("Telus").unwrap();
        assert_eq!(*row.market(), Some(dec!(37500)));
        assert_eq!(*portfolio.summary().total().market(), Some(dec!(37500)));
    }

    #[tokio::test]
    async fn as_of_date_bounds_the_history() {
        let lots = vec![lot("Apple", "2009-12-01", dec!(30.20), 1000)];

        let portfolio = Portfolio::build("regular", lots, &registry(), date("2015-01-01")).await;

        let latest = portfolio.performance("Apple").unwrap().latest().unwrap();
        assert_eq!(*latest.date(), date("2009-12-01"));
    }

    #[tokio::test]
    async fn unregistered_feed_type_yields_no_data() {
        let house = Lot::new(
            "1748".to_string(),
            AssetType::Real,
            date("2008-08-01"),
            dec!(375000),
            None,
            1,
            dec!(0.5),
            FeedType::Archived,
            "1748market.csv".to_string(),
        );

        let portfolio =
            Portfolio::build("fiducie Amelie", vec![house], &registry(), date("2020-01-01"))
                .await;

        let row = portfolio.summary().row("1748").unwrap();
        assert_eq!(*row.acquisition(), Some(dec!(187500)));
        assert_eq!(*row.market(), None);
        assert_eq!(*portfolio.summary().total().acquisition(), Some(dec!(0)));
    }

    #[tokio::test]
    async fn queries_address_lots_by_asset_id() {
        let lots = vec![
            lot("Apple", "2009-12-01", dec!(30.20), 1000),
            lot("MFC", "2018-02-23", dec!(24.609), 700),
        ];
        let portfolio = Portfolio::build("regular", lots, &registry(), date("2018-06-30")).await;

        let menu = portfolio.asset_menu();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[1].label(), "MFC");
        assert_eq!(portfolio.asset_index("MFC"), Some(1));
        assert_eq!(portfolio.lot("Apple").unwrap().volume(), &1000);

        let closes = portfolio.series("MFC", Metric::Close).unwrap();
        assert_eq!(
            closes,
            vec![
                (date("2018-02-23"), dec!(24.50)),
                (date("2018-06-01"), dec!(23.80))
            ]
        );

        assert!(matches!(
            portfolio.series("Rogers", Metric::Market),
            Err(PortfolioError::UnknownAsset(id)) if id == "Rogers"
        ));
    }

    #[tokio::test]
    async fn refresh_lot_rebuilds_the_summary() {
        let lots = vec![
            lot("Apple", "2009-12-01", dec!(30.20), 1000),
            lot("MFC", "2018-02-23", dec!(24.609), 700),
        ];
        let empty = FeedRegistry::new();
        let mut portfolio = Portfolio::build("regular", lots, &empty, date("2018-06-30")).await;
        assert!(!portfolio.summary().row("MFC").unwrap().has_metrics());

        portfolio.refresh_lot("MFC", &registry()).await.unwrap();

        assert!(portfolio.summary().row("MFC").unwrap().has_metrics());
        assert!(!portfolio.summary().row("Apple").unwrap().has_metrics());
        assert_eq!(*portfolio.summary().total().market(), Some(dec!(16660)));

        assert!(portfolio.refresh_lot("Rogers", &registry()).await.is_err());
    }

    #[tokio::test]
    async fn loading_twice_gives_identical_results() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reg.json");
        fs::write(
            &path,
            r#"{"_default": {
                "1": {"assetID": "Apple", "assetType": "COMMON", "purchaseDate": "2009-12-01",
                      "purchasePrice": 30.2, "volume": 1000, "priceFeedType": "YAHOO",
                      "priceFeedRef": "Apple", "percentOwnership": 1.0},
                "2": {"assetID": "MFC", "assetType": "COMMON", "purchaseDate": "2018-02-23",
                      "purchasePrice": 24.609, "volume": 700, "priceFeedType": "YAHOO",
                      "priceFeedRef": "MFC", "percentOwnership": 1.0}
            }}"#,
        )
        .unwrap();
        let source = PortfolioSource::new("regular".to_string(), path);
        let registry = registry();

        let first = Portfolio::load(&source, &registry, date("2018-06-30")).await.unwrap();
        let second = Portfolio::load(&source, &registry, date("2018-06-30")).await.unwrap();

        assert_eq!(first.summary(), second.summary());
        assert_eq!(first.tables(), second.tables());
        assert_eq!(
            *first.summary().row("Apple").unwrap().pct_est_profit(),
            Some(dec!(119800) / dec!(30200))
        );
    }

    #[tokio::test]
    async fn invalid_source_fails_the_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reg.json");
        fs::write(
            &path,
            r#"[{"assetID": "Apple", "assetType": "COMMON", "purchaseDate": "2009-12-01",
                 "purchasePrice": 30.2, "volume": 0, "priceFeedType": "YAHOO",
                 "priceFeedRef": "AAPL", "percentOwnership": 1.0}]"#,
        )
        .unwrap();
        let source = PortfolioSource::new("regular".to_string(), path);

        let result = Portfolio::load(&source, &registry(), date("2018-06-30")).await;

        assert!(matches!(result, Err(PortfolioError::Configuration(_))));
    }
}
