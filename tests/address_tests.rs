//! Integration tests for address parsing and formatting

use surface_navigator::*;

#[derive(Debug, PartialEq)]
struct AlertDescriptor {
    title: &'static str,
    destructive: bool,
}

#[test]
fn test_deep_link_uses_host_as_identifier() {
    let address = Address::parse("myapp://host/path?x=1", Some("myapp")).expect("deep link");

    assert_eq!(address.identifier(), "host");
    assert_eq!(address.parameters().get_str("x"), Some("1"));
}

#[test]
fn test_foreign_scheme_falls_back_to_universal_link() {
    assert!(Address::parse("myapp://host/path?x=1", Some("other")).is_none());
    assert!(Address::parse("myapp://host/path?x=1", None).is_none());
}

#[test]
fn test_universal_link_uses_path_as_identifier() {
    let parser = AddressParser::new().app_scheme("myapp");
    let (address, family) = parser
        .parse_with_family("https://example.com/settings/privacy?tab=2")
        .expect("universal link");

    assert_eq!(family, AddressFamily::UniversalLink);
    assert_eq!(address.identifier(), "settings/privacy");
    assert_eq!(address.parameters().get_as::<u8>("tab"), Some(2));
}

#[test]
fn test_universal_link_without_path_is_rejected() {
    assert!(Address::parse("https://example.com", None).is_none());
    assert!(Address::parse("https://example.com/", None).is_none());
}

#[test]
fn test_deep_link_without_host_is_rejected() {
    assert!(Address::parse("myapp:///settings", Some("myapp")).is_none());
}

#[test]
fn test_malformed_input_is_rejected() {
    assert!(Address::parse("not a url", Some("myapp")).is_none());
    assert!(Address::parse("", None).is_none());
}

#[test]
fn test_scheme_match_ignores_case() {
    let parser = AddressParser::new().app_scheme("MyApp");
    let (address, family) = parser.parse_with_family("myapp://inbox").expect("deep link");

    assert_eq!(family, AddressFamily::DeepLink);
    assert_eq!(address.identifier(), "inbox");
}

#[test]
fn test_query_transformation_can_be_disabled() {
    let parser = AddressParser::new()
        .app_scheme("myapp")
        .transform_query_items(false);

    let address = parser.parse("myapp://inbox?folder=archive").expect("deep link");

    assert_eq!(address.identifier(), "inbox");
    assert!(address.parameters().is_empty());
}

#[test]
fn test_repeated_query_keys_keep_last_value() {
    let address = Address::parse("myapp://search?q=first&page=1&q=second&flag", Some("myapp"))
        .expect("deep link");

    assert_eq!(address.parameters().get_str("q"), Some("second"));
    assert_eq!(address.parameters().get_str("page"), Some("1"));
    assert!(!address.parameters().contains("flag"));
}

#[test]
fn test_deep_link_round_trip() {
    let built = Address::new(
        "profile",
        Parameters::new().with("user", "ada lovelace").with("tab", 3_i64),
    );

    let link = built.to_deep_link("myapp");
    let parsed = Address::parse(&link, Some("myapp")).expect("round trip");

    assert_eq!(link, "myapp://profile?tab=3&user=ada%20lovelace");
    assert_eq!(parsed, built);
    assert_eq!(parsed.parameters().get_str("user"), Some("ada lovelace"));
    assert_eq!(parsed.parameters().get_as::<i64>("tab"), Some(3));
}

#[test]
fn test_universal_link_round_trip() {
    let built = Address::new("orders", Parameters::new().with("status", "open"));

    let link = built.to_universal_link("https://shop.example.com/");
    let parsed = Address::parse(&link, None).expect("round trip");

    assert_eq!(link, "https://shop.example.com/orders?status=open");
    assert_eq!(parsed.identifier(), "orders");
    assert_eq!(parsed.parameters(), built.parameters());
}

#[test]
fn test_alert_address_carries_payload() {
    let address = Address::alert(AlertDescriptor {
        title: "Delete draft?",
        destructive: true,
    });

    assert!(address.is_reserved());
    assert_eq!(address.identifier(), APP_ALERT);
    assert_eq!(
        address.parameters().payload::<AlertDescriptor>(ALERT_PARAMETER),
        Some(&AlertDescriptor {
            title: "Delete draft?",
            destructive: true,
        })
    );
    assert!(address.parameters().payload::<String>(ALERT_PARAMETER).is_none());
    assert_eq!(address.to_deep_link("myapp"), "myapp://appAlert");
}

#[test]
fn test_split_detail_address() {
    let address = Address::split_detail_at(4);

    assert!(address.is_reserved());
    assert_eq!(address.identifier(), SPLIT_DETAILS_AT_INDEX);
    assert_eq!(address.parameters().get_as::<usize>(INDEX_PARAMETER), Some(4));
    assert!(!Address::named("split").is_reserved());
}

#[test]
fn test_plus_in_query_is_not_a_space() {
    let address = Address::parse("myapp://search?q=c++&tag=%2B1", Some("myapp")).expect("deep link");

    assert_eq!(address.parameters().get_str("q"), Some("c++"));
    assert_eq!(address.parameters().get_str("tag"), Some("+1"));
}

#[test]
fn test_non_ascii_identifiers_are_decoded() {
    let deep = Address::named("café").to_deep_link("myapp");
    assert_eq!(
        Address::parse(&deep, Some("myapp")).map(|a| a.identifier().to_string()),
        Some("café".to_string())
    );

    let universal = Address::parse("https://example.com/café", None).expect("universal link");
    assert_eq!(universal.identifier(), "café");
}
