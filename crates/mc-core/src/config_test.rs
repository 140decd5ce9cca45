use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("name: shop_catalog").unwrap();
    assert_eq!(config.name, "shop_catalog");
    assert_eq!(config.version, "1.0.0");
    assert_eq!(config.database.path, "target/catalog.duckdb");
    assert_eq!(config.read.default_include, Include::NonDeleted);
    assert!(config.read.request_cache);
    assert!(config.read.field_includes.is_empty());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: shop_catalog
version: "2.1.0"
database:
  path: ./catalog.duckdb
read:
  default_include: all
  request_cache: false
  field_includes:
    owners: non-deleted
    domains: deleted
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.version, "2.1.0");
    assert_eq!(config.read.default_include, Include::All);
    assert!(!config.read.request_cache);

    let includes = config.relation_includes();
    assert_eq!(includes.include_for("owners"), Include::NonDeleted);
    assert_eq!(includes.include_for("domains"), Include::Deleted);
    assert_eq!(includes.include_for("followers"), Include::All);
}

#[test]
fn test_unknown_top_level_key_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("name: x\nmodel_paths: [models]");
    assert!(result.is_err());
}

#[test]
fn test_validate_empty_name() {
    let config = Config::with_name("  ");
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("E003"));
}

#[test]
fn test_validate_unknown_field_include() {
    let yaml = r#"
name: shop_catalog
read:
  field_includes:
    tags: all
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("tags"));
}

#[test]
fn test_database_path_absolute() {
    let root = PathBuf::from("/srv/catalog");
    let config = Config::with_name("c");
    assert_eq!(
        config.database_path_absolute(&root),
        root.join("target/catalog.duckdb")
    );

    let mut memory = Config::with_name("c");
    memory.database.path = ":memory:".to_string();
    assert!(memory.is_memory_database());
    assert_eq!(memory.database_path_absolute(&root), PathBuf::from(":memory:"));
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("metacat.yml"), "name: from_yml\n").unwrap();
    std::fs::write(dir.path().join("metacat.yaml"), "name: from_yaml\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "from_yml");
}

#[test]
fn test_load_from_dir_falls_back_to_yaml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("metacat.yaml"), "name: from_yaml\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "from_yaml");
}

#[test]
fn test_load_from_dir_missing() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metacat.yml");
    std::fs::write(&path, "name: [unterminated\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
fn test_to_yaml_round_trips() {
    let config = Config::with_name("shop_catalog");
    let yaml = config.to_yaml().unwrap();
    let back: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back.name, "shop_catalog");
    assert_eq!(back.read.default_include, Include::NonDeleted);
}
