#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        error::ConfigurationError,
        models::{AssetType, FeedType},
        store::{LotRecord, build_lots, parse_records},
        test::date,
    };

    fn record(asset_id: &str) -> LotRecord {
        LotRecord {
            asset_id: asset_id.to_string(),
            asset_type: "COMMON".to_string(),
            purchase_date: "2018-02-16".to_string(),
            purchase_price: dec!(41.486),
            volume: 410,
            sale_date: None,
            sale_price: None,
            price_feed_type: "YAHOO".to_string(),
            price_feed_ref: "PPL.TO".to_string(),
            debt_feed_type: None,
            debt_feed_ref: None,
            percent_ownership: dec!(1),
            thresholds: Vec::new(),
        }
    }

    fn reason(err: ConfigurationError) -> String {
        match err {
            ConfigurationError::InvalidLot { reason, .. } => reason,
            other => panic!("expected InvalidLot, got {:?}", other),
        }
    }

    #[test]
    fn document_table_keeps_id_order() {
        let text = r#"{"_default": {
            "10": {"assetID": "Telus", "assetType": "COMMON", "purchaseDate": "2016-01-04",
                   "purchasePrice": 34.8, "volume": 1000, "saleDate": "2016-03-02", "salePrice": 40.0,
                   "priceFeedType": "YAHOO", "priceFeedRef": "T.TO", "percentOwnership": 1.0},
            "2": {"assetID": "1748", "assetType": "REAL", "purchaseDate": "2008-08-01",
                  "purchasePrice": 375000, "volume": 1, "saleDate": null, "salePrice": null,
                  "priceFeedType": "ARCHIVED", "priceFeedRef": "1748market.csv",
                  "debtFeedType": "ARCHIVED", "debtFeedRef": "1748debt.csv",
                  "percentOwnership": 0.5, "thresholds": []},
            "1": {"assetID": "Apple", "assetType": "COMMON", "purchaseDate": "2009-12-01",
                  "purchasePrice": 30.2, "volume": 1000, "saleDate": null, "salePrice": null,
                  "priceFeedType": "YAHOO", "priceFeedRef": "AAPL", "percentOwnership": 1.0}
        }}"#;

        let records = parse_records(text).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["Apple", "1748", "Telus"]);

        let lots = build_lots(records).unwrap();
        assert_eq!(*lots[1].asset_type(), AssetType::Real);
        assert_eq!(*lots[1].price_feed_type(), FeedType::Archived);
        assert_eq!(lots[1].acquisition_value(), dec!(187500));

        let sale = lots[2].sale().unwrap();
        assert_eq!(*sale.date(), date("2016-03-02"));
        assert_eq!(*sale.price(), dec!(40));
    }

    #[test]
    fn plain_list_is_accepted() {
        let text = r#"[{"assetID": "MFC", "assetType": "common", "purchaseDate": "2018-02-23",
            "purchasePrice": 24.609, "volume": 700, "priceFeedType": "yahoo",
            "priceFeedRef": "MFC.TO", "percentOwnership": 1}]"#;

        let lots = build_lots(parse_records(text).unwrap()).unwrap();

        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].asset_id(), "MFC");
        assert!(!lots[0].is_sold());
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(parse_records("{not json").is_err());
        assert!(parse_records(r#"[{"assetID": "MFC"}]"#).is_err());
    }

    #[test]
    fn field_errors_keep_serde_detail() {
        let list = r#"[
            {"assetID": "MFC", "assetType": "COMMON", "purchaseDate": "2018-02-23",
             "purchasePrice": 24.609, "volume": 1.5, "priceFeedType": "YAHOO",
             "priceFeedRef": "MFC.TO", "percentOwnership": 1}
        ]"#;
        let message = parse_records(list).unwrap_err().to_string();
        assert!(message.contains("expected i64"), "{}", message);
        assert!(message.contains("line 3"), "{}", message);
        assert!(!message.contains("untagged"), "{}", message);

        let tables = r#"{"_default": {"1": {"assetID": "MFC", "purchaseDate": "2018-02-23"}}}"#;
        let message = parse_records(tables).unwrap_err().to_string();
        assert!(message.contains("missing field `assetType`"), "{}", message);
    }

    #[test]
    fn duplicate_asset_ids_are_rejected() {
        let result = build_lots(vec![record("Pembina"), record("Rogers"), record("Pembina")]);

        assert!(matches!(
            result,
            Err(ConfigurationError::DuplicateAsset(id)) if id == "Pembina"
        ));
    }

    #[test]
    fn real_assets_need_an_archived_feed() {
        let mut house = record("1748");
        house.asset_type = "REAL".to_string();

        let err = house.clone().into_lot().unwrap_err();
        assert!(reason(err).contains("REAL"));

        house.price_feed_type = "ARCHIVED".to_string();
        house.price_feed_ref = "1748market.csv".to_string();
        assert!(house.into_lot().is_ok());
    }

    #[test]
    fn sale_fields_come_in_pairs() {
        let mut half_sold = record("Telus");
        half_sold.sale_date = Some("2016-03-02".to_string());
        assert!(reason(half_sold.into_lot().unwrap_err()).contains("together"));

        let mut early = record("Telus");
        early.sale_date = Some("2017-01-03".to_string());
        early.sale_price = Some(dec!(40));
        early.purchase_date = "2018-01-02".to_string();
        assert!(reason(early.into_lot().unwrap_err()).contains("before purchase"));
    }

    #[test]
    fn field_values_are_validated() {
        let mut bad_type = record("X");
        bad_type.asset_type = "BOND".to_string();
        assert!(reason(bad_type.into_lot().unwrap_err()).contains("asset type"));

        let mut bad_feed = record("X");
        bad_feed.price_feed_type = "BLOOMBERG".to_string();
        assert!(reason(bad_feed.into_lot().unwrap_err()).contains("price feed type"));

        let mut bad_date = record("X");
        bad_date.purchase_date = "16/02/2018".to_string();
        assert!(reason(bad_date.into_lot().unwrap_err()).contains("purchase date"));

        let mut no_volume = record("X");
        no_volume.volume = 0;
        assert!(reason(no_volume.into_lot().unwrap_err()).contains("volume"));

        let mut negative = record("X");
        negative.purchase_price = dec!(-1);
        assert!(reason(negative.into_lot().unwrap_err()).contains("purchase price"));

        let mut over_owned = record("X");
        over_owned.percent_ownership = dec!(1.5);
        assert!(reason(over_owned.into_lot().unwrap_err()).contains("ownership"));

        let mut blank = record("  ");
        blank.price_feed_ref = "PPL.TO".to_string();
        assert!(reason(blank.into_lot().unwrap_err()).contains("asset id"));
    }
}
