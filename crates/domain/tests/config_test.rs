use acme_zonefile_domain::config::DnsConfig;
use acme_zonefile_domain::{AddressFamily, Config, ValidatedDomainName};
use std::path::PathBuf;

#[test]
fn test_config_default_values() {
    let config = DnsConfig::default();

    assert!(config.resolvers.is_empty());
    assert_eq!(config.query_timeout, 60);
    assert_eq!(config.query_pause, 2);
    assert_eq!(config.per_query_timeout_ms, 3000);
    assert!(!config.dnssec);
    assert!(!config.debug);
    assert_eq!(config.address_family, AddressFamily::Both);
}

#[test]
fn test_config_deserialization_with_all_fields() {
    let toml_str = r#"
        [logging]
        level = "debug"

        [dns]
        resolvers = ["127.0.0.1"]
        query_timeout = 90
        query_pause = 5
        dnssec = true
        address_family = "v4only"

        [[domain]]
        name = "www.example.com"
        zone = "example.com"
        base_name = "/var/named/example.com"
        host_suffix = "www"
        nameservers = ["ns1.example.com", "192.0.2.53"]
        query_timeout = 120
        reload_command = "/usr/sbin/rndc reload"
        old_file_suffix = ".old"
        ttl = 5
    "#;

    let config = Config::from_toml(toml_str).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.dns.resolvers, vec!["127.0.0.1".to_string()]);
    assert_eq!(config.dns.query_pause, 5);
    assert!(config.dns.dnssec);
    assert_eq!(config.dns.address_family, AddressFamily::V4Only);

    let domain = &config.domains[0];
    assert_eq!(domain.base_name, PathBuf::from("/var/named/example.com"));
    assert_eq!(domain.nameservers.len(), 2);
    assert_eq!(domain.query_timeout, Some(120));
    assert_eq!(domain.challenge_suffix, ".acme.");
    assert_eq!(domain.soa_suffix, ".soa");
    assert_eq!(domain.old_file_suffix.as_deref(), Some(".old"));
    assert_eq!(domain.ttl, 5);
    assert!(config.validate().is_ok());
}

#[test]
fn test_domain_lookup_is_case_insensitive() {
    let config = Config::from_toml(
        r#"
        [[domain]]
        name = "WWW.Example.com"
        zone = "example.com"
        base_name = "/var/named/example.com"
        host_suffix = "www"
    "#,
    )
    .unwrap();

    let fqdn = ValidatedDomainName::new("www.example.com.").unwrap();
    assert!(config.domain(&fqdn).is_some());
    let other = ValidatedDomainName::new("mail.example.com").unwrap();
    assert!(config.domain(&other).is_none());
}

#[test]
fn test_validate_rejects_bad_host_suffix() {
    let config = Config::from_toml(
        r#"
        [[domain]]
        name = "www.example.com"
        zone = "example.com"
        base_name = "/var/named/example.com"
        host_suffix = "../www"
    "#,
    )
    .unwrap();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_duplicate_domains() {
    let config = Config::from_toml(
        r#"
        [[domain]]
        name = "www.example.com"
        zone = "example.com"
        base_name = "/a"
        host_suffix = "www"

        [[domain]]
        name = "WWW.example.com"
        zone = "example.com"
        base_name = "/b"
        host_suffix = "www"
    "#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.dns.query_timeout = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_parse_error_is_reported() {
    assert!(Config::from_toml("[dns]\nquery_timeout = \"soon\"").is_err());
}
