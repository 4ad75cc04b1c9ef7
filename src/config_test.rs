use super::*;

fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = HostConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.client, ClientConfig::default());
}

#[test]
fn reads_port_and_trims_base_url() {
    let config = HostConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("PLACIFY_API_BASE_URL", "https://api.placify.test//"),
        ("PLACIFY_REFERRAL_FORM_URL", "https://forms.test/apply"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.client.api_base_url.as_deref(), Some("https://api.placify.test"));
    assert_eq!(config.client.referral_form_url.as_deref(), Some("https://forms.test/apply"));
}

#[test]
fn blank_base_url_counts_as_unset() {
    let config = HostConfig::from_lookup(lookup(&[("PLACIFY_API_BASE_URL", "   ")])).unwrap();
    assert_eq!(config.client.api_base_url, None);
}

#[test]
fn bad_port_is_rejected() {
    let err = HostConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, HostError::InvalidPort(ref raw) if raw == "eighty"));
    assert_eq!(err.to_string(), "invalid PORT \"eighty\"");
}
