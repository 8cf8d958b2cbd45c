use qan_config::constants::*;
use qan_config::{
    get_mysql_config, get_mysql_config_by_name, validate_config, Baseline, ConfigError,
};
use std::collections::HashMap;

#[test]
fn test_slowlog_enable_order() {
    let set = get_mysql_config_by_name("slowlog").unwrap();

    assert_eq!(
        set.enable,
        vec![
            "SET GLOBAL slow_query_log=OFF",
            "SET GLOBAL log_output='file'",
            "SET GLOBAL slow_query_log=ON",
            "SET time_zone='+0:00'",
        ]
    );
    assert_eq!(set.disable, vec!["SET GLOBAL slow_query_log=OFF"]);
}

#[test]
fn test_slowlog_output_switched_while_log_is_off() {
    let set = get_mysql_config_by_name("slowlog").unwrap();
    let position = |stmt: &str| set.enable.iter().position(|s| s == stmt).unwrap();

    assert!(position(SQL_SLOW_LOG_OFF) < position(SQL_LOG_OUTPUT_FILE));
    assert!(position(SQL_LOG_OUTPUT_FILE) < position(SQL_SLOW_LOG_ON));
}

#[test]
fn test_perfschema_only_pins_time_zone() {
    let set = get_mysql_config_by_name("perfschema").unwrap();

    assert_eq!(set.enable, vec![SQL_TIME_ZONE_UTC]);
    assert!(set.disable.is_empty());
}

#[test]
fn test_unknown_strategy_is_rejected() {
    for name in ["binlog", "SLOWLOG", ""] {
        let err = get_mysql_config_by_name(name).unwrap_err();
        assert!(
            matches!(&err, ConfigError::UnsupportedStrategy(value) if value == name),
            "name {:?} gave {:?}",
            name,
            err
        );
    }
}

#[test]
fn test_resolved_config_drives_directives() {
    let overrides: HashMap<String, String> =
        [("CollectFrom".to_string(), "perfschema".to_string())].into();
    let config = validate_config(&overrides, &Baseline::default()).unwrap();

    assert_eq!(
        get_mysql_config(&config),
        get_mysql_config_by_name("perfschema").unwrap()
    );
}

#[test]
fn test_directives_are_fresh_each_call() {
    let config = validate_config(&HashMap::new(), &Baseline::default()).unwrap();

    let mut first = get_mysql_config(&config);
    first.enable.clear();

    assert_eq!(get_mysql_config(&config).enable.len(), 4);
}
