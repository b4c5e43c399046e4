use nova_param_names::config::{ClasspathEntryKind, ConfigError};
use nova_param_names::{
    ClasspathEntry, ConstructorRef, DiscovererConfig, ParameterNameDiscoverer,
};
use tempfile::TempDir;

use super::fixtures::{names, shapes_class};

#[test]
fn load_from_path_resolves_relative_entries() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("param-names.toml");
    std::fs::write(
        &config_path,
        r#"
[[classpath]]
kind = "dir"
path = "build/classes"

[[classpath]]
kind = "jar"
path = "lib/dep.jar"

[logging]
level = "warning"
"#,
    )
    .unwrap();

    let config = DiscovererConfig::load_from_path(&config_path).unwrap();
    assert_eq!(config.classpath[0].kind, ClasspathEntryKind::Dir);
    assert_eq!(
        config.classpath().entries(),
        [
            ClasspathEntry::ClassDir(tmp.path().join("build/classes")),
            ClasspathEntry::Jar(tmp.path().join("lib/dep.jar")),
        ]
    );
    assert_eq!(config.logging.level, "warning");
    assert!(!config.logging.json);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = DiscovererConfig::load_from_path(tmp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
}

#[test]
fn unknown_keys_are_rejected() {
    let err = DiscovererConfig::load_from_str("[logging]\nlevle = \"debug\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn discoverer_from_config_uses_the_classpath() {
    let tmp = TempDir::new().unwrap();
    let classes = tmp.path().join("classes");
    std::fs::create_dir_all(classes.join("demo")).unwrap();
    std::fs::write(classes.join("demo/Shapes.class"), shapes_class()).unwrap();

    let config = DiscovererConfig::load_from_str(&format!(
        "[[classpath]]\nkind = \"dir\"\npath = {:?}\n",
        classes.display().to_string()
    ))
    .unwrap();
    let discoverer = ParameterNameDiscoverer::from_config(&config);

    let ctor = ConstructorRef::from_binary_names("demo.Shapes", &["java.lang.String", "double"])
        .unwrap();
    assert_eq!(
        discoverer.resolve_constructor_parameter_names(&ctor),
        names(&["label", "scale"])
    );
}
