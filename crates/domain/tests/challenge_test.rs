use acme_zonefile_domain::{
    challenge_record_name, encode_challenge, untaint_fqdn, untaint_ip, DomainError,
};

const NAMES: &[&str] = &[
    "example.com",
    "WWW.Example.COM",
    "a.b.c.d.example.org",
    "xn--bcher-kva.example",
    "0day.example.net",
    "host-1.sub-2.example",
];

#[test]
fn test_record_name_for_all_valid_names() {
    for name in NAMES {
        let expected = format!("_acme-challenge.{}.", name.to_lowercase());
        let first = challenge_record_name(name).unwrap();
        let second = challenge_record_name(name).unwrap();
        assert_eq!(first, expected, "name {}", name);
        assert_eq!(first, second, "name {}", name);
    }
}

#[test]
fn test_encoding_is_deterministic_and_url_safe() {
    // Enough inputs to hit digests containing '+' and '/' in standard Base64.
    for i in 0..256 {
        let token = format!("token-{}.thumbprint", i);
        let first = encode_challenge(&token).unwrap();
        let second = encode_challenge(&token).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains('+') && !first.contains('/'), "{}", first);
        assert_eq!(first.len(), 44);
    }
}

#[test]
fn test_codec_rejects_missing_input() {
    assert!(matches!(
        challenge_record_name(""),
        Err(DomainError::InvalidInput(_))
    ));
    assert!(matches!(
        encode_challenge(""),
        Err(DomainError::InvalidInput(_))
    ));
}

#[test]
fn test_untaint_examples() {
    assert_eq!(
        untaint_fqdn(Some("  Example.COM  ")).map(|n| n.to_string()),
        Some("example.com".to_string())
    );
    assert_eq!(untaint_fqdn(Some("bad!name")), None);
    assert_eq!(untaint_fqdn(None), None);
    assert_eq!(
        untaint_ip(Some("192.168.1.1")).map(|ip| ip.to_string()),
        Some("192.168.1.1".to_string())
    );
    assert_eq!(untaint_ip(Some("not-an-ip")), None);
}
