#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::{
        error::ConfigurationError,
        store::{CATALOG_FILE, SourceCatalog},
    };

    #[test]
    fn catalog_file_sets_labels_and_order() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CATALOG_FILE),
            r#"[{"label": "regular", "file": "reg.json"},
                {"label": "fiducie Amelie", "file": "fidAmelie.json"}]"#,
        )
        .unwrap();

        let catalog = SourceCatalog::load(dir.path()).unwrap();

        assert_eq!(catalog.labels(), vec!["regular", "fiducie Amelie"]);
        assert_eq!(catalog.first().unwrap().label(), "regular");
        assert_eq!(
            catalog.get("fiducie Amelie").unwrap().path(),
            &dir.path().join("fidAmelie.json")
        );
        assert_eq!(catalog.position("fiducie Amelie"), Some(1));
        assert!(catalog.get("Regular").is_none());

        let menu = catalog.menu();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].label(), "regular");
    }

    #[test]
    fn without_catalog_json_files_are_sources() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("reg.json"), "[]").unwrap();
        fs::write(dir.path().join("fidAmelie.json"), "[]").unwrap();
        fs::write(dir.path().join("1748market.csv"), "Date,Close\n").unwrap();

        let catalog = SourceCatalog::load(dir.path()).unwrap();

        assert_eq!(catalog.labels(), vec!["fidAmelie", "reg"]);
    }

    #[test]
    fn empty_directory_has_no_sources() {
        let dir = tempdir().unwrap();

        assert!(matches!(
            SourceCatalog::load(dir.path()),
            Err(ConfigurationError::NoSources(_))
        ));
    }

    #[test]
    fn malformed_catalog_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CATALOG_FILE), r#"{"regular": "reg.json"}"#).unwrap();

        assert!(matches!(
            SourceCatalog::load(dir.path()),
            Err(ConfigurationError::Malformed { .. })
        ));
    }
}
