use super::*;

use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.site_root, None);
    assert_eq!(config.static_dir, PathBuf::from("public"));
}

#[test]
fn reads_every_variable() {
    let config =
        ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("SITE_ROOT", "dist"), ("STATIC_DIR", "/srv/www")]))
            .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.site_root, Some(PathBuf::from("dist")));
    assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
}

#[test]
fn port_tolerates_surrounding_whitespace() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", " 4000\n")])).unwrap();
    assert_eq!(config.port, 4000);
}

#[test]
fn rejects_bad_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort("http".to_owned()));
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}

#[test]
fn rejects_empty_paths() {
    let err = ServerConfig::from_lookup(lookup(&[("STATIC_DIR", "  ")])).unwrap_err();
    assert_eq!(err, ConfigError::Empty { name: "STATIC_DIR" });
}

#[test]
fn binds_all_interfaces() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", "3100")])).unwrap();
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3100");
}
