use super::*;

#[test]
fn test_builtin_literals() {
    let registry = DialectRegistry::builtin();
    let cases = [
        ("sqlite", "strftime('%s','now')"),
        ("mysql", "NOW()"),
        ("mssql", "DATEDIFF(s, '19700101', GETDATE())"),
        ("pgsql", "NOW()"),
        ("duckdb", "now()"),
    ];
    for (scheme, expected) in cases {
        let syntax = registry.resolve(scheme).unwrap();
        assert_eq!(syntax.current_timestamp_literal(), expected, "scheme {scheme}");
    }
}

#[test]
fn test_odbc_shares_mssql_syntax() {
    let registry = DialectRegistry::builtin();
    assert_eq!(
        registry.resolve("odbc").unwrap().current_timestamp_literal(),
        registry.resolve("mssql").unwrap().current_timestamp_literal()
    );
}

#[test]
fn test_oracle_literal_is_epoch_seconds() {
    let syntax = DialectRegistry::builtin().resolve("oci").unwrap();
    assert!(syntax.current_timestamp_literal().contains("86400"));
}

#[test]
fn test_unknown_scheme_is_unsupported() {
    let Err(err) = DialectRegistry::builtin().resolve("informix") else {
        panic!("informix should not resolve");
    };
    match err {
        CoreError::UnsupportedDialect { scheme, supported } => {
            assert_eq!(scheme, "informix");
            assert!(supported.contains("pgsql"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_scheme_lookup_is_case_sensitive() {
    assert!(DialectRegistry::builtin().resolve("MySQL").is_err());
}

#[test]
fn test_register_custom_dialect() {
    struct Frozen;
    impl TimestampSyntax for Frozen {
        fn current_timestamp_literal(&self) -> String {
            "TIMESTAMP '2024-01-01 00:00:00'".to_string()
        }
    }

    let mut registry = DialectRegistry::new();
    assert!(registry.resolve("frozen").is_err());
    registry.register("frozen", Arc::new(Frozen));
    assert_eq!(
        registry.resolve("frozen").unwrap().current_timestamp_literal(),
        "TIMESTAMP '2024-01-01 00:00:00'"
    );
    assert_eq!(registry.supported(), vec!["frozen"]);
}
