use utf8config::{Config, Section, Utf8ConfigError, Value};

const FIXTURE: &str = include_str!("fixtures/config.txt");

fn s(text: &str) -> Value {
    Value::String(text.to_string())
}

// ============================================================================
// Add / remove
// ============================================================================

#[test]
fn add_and_remove_sections() {
    let mut config = Config::new();
    config.add_section(Section::new("a").unwrap()).unwrap();
    assert!(matches!(
        config.add_section(Section::new("a").unwrap()),
        Err(Utf8ConfigError::DuplicateSection(ref n)) if n == "a"
    ));

    config
        .add_sections([Section::new("b").unwrap(), Section::new("c").unwrap()])
        .unwrap();
    assert_eq!(config.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(config.section("b").unwrap().name(), "b");

    assert!(matches!(
        config.remove_section("d"),
        Err(Utf8ConfigError::MissingSection(_))
    ));

    config.remove_sections(["a", "b", "c"]).unwrap();
    assert!(config.is_empty());
    assert_eq!(config.values().count(), 0);
    assert_eq!(config.items().count(), 0);
}

#[test]
fn batch_section_edits_are_all_or_nothing() {
    let mut config = Config::new();
    config.add_section(Section::new("a").unwrap()).unwrap();

    assert!(config
        .add_sections([Section::new("b").unwrap(), Section::new("a").unwrap()])
        .is_err());
    assert_eq!(config.len(), 1);

    assert!(config.remove_sections(["a", "zzz"]).is_err());
    assert!(config.contains_section("a"));
}

// ============================================================================
// Load
// ============================================================================

#[test]
fn load_fixture_sections_in_order() {
    let config = Config::load(FIXTURE).unwrap();
    assert_eq!(config.keys().collect::<Vec<_>>(), ["DEFAULT", "TEST"]);
    assert_eq!(config.section("DEFAULT").unwrap().upper_comment(), "DEFAULT是默认Section");
    assert_eq!(
        config.section("TEST").unwrap().upper_comment(),
        "TEST是用来测试各种数据类型是否能被成功解析的"
    );
}

#[test]
fn load_fixture_typed_values() {
    let config = Config::load(FIXTURE).unwrap();
    let v = |key: &str| config.value("TEST", key).unwrap().clone();

    assert_eq!(v("int"), Value::Int(1));
    assert_eq!(v("float"), Value::Float(3.14));
    assert_eq!(v("str"), s("Hello World!"));
    assert_eq!(v("bool_yes"), Value::Bool(true));
    assert_eq!(v("bool_no"), Value::Bool(false));
    assert_eq!(v("none"), Value::Null);
    assert_eq!(
        v("int_list"),
        Value::List(vec![Value::Int(1), Value::Int(-2), Value::Int(3)])
    );
    assert_eq!(
        v("str_list"),
        Value::List(vec![
            s("a"),
            s("1"),
            s("3.14"),
            s("True"),
            s("no"),
            Value::Null,
            s("None"),
        ])
    );
    assert_eq!(v("path"), s(r"C:\用户\管理员"));

    let section = config.section("TEST").unwrap();
    assert_eq!(section.field("int").unwrap().upper_comment(), "整数");
    assert_eq!(section.field("path").unwrap().side_comment(), "Windows 路径");
}

#[test]
fn load_empty_or_comment_only_text() {
    assert!(Config::load("").unwrap().is_empty());
    assert!(Config::load("# nothing here\n\n# still nothing\n")
        .unwrap()
        .is_empty());
}

#[test]
fn load_rejects_field_before_first_section() {
    let err = Config::load("# intro\n\nloose = 1\n[a]\n").unwrap_err();
    assert!(matches!(err, Utf8ConfigError::Format { line: 3, .. }), "{err}");
}

#[test]
fn load_rejects_duplicate_section() {
    let err = Config::load("[a]\nx = 1\n\n[a]\ny = 2\n").unwrap_err();
    assert!(matches!(err, Utf8ConfigError::DuplicateSection(ref n) if n == "a"));
}

#[test]
fn load_reports_error_line_inside_later_section() {
    let err = Config::load("[a]\nx = 1\n[b]\nnot a field\n").unwrap_err();
    assert!(matches!(err, Utf8ConfigError::Format { line: 4, .. }), "{err}");
}

#[test]
fn value_lookup_errors() {
    let config = Config::load(FIXTURE).unwrap();
    assert!(matches!(
        config.value("NOPE", "int"),
        Err(Utf8ConfigError::MissingSection(_))
    ));
    assert!(matches!(
        config.value("TEST", "nope"),
        Err(Utf8ConfigError::MissingKey(_))
    ));
}

// ============================================================================
// Dump
// ============================================================================

#[test]
fn dump_joins_sections_with_blank_line() {
    let config = Config::load("[a]\nx = 1\n[b]\ny = 2\n").unwrap();
    assert_eq!(config.dump(false).unwrap(), "[a]\nx = 1\n\n[b]\ny = 2\n");
}

#[test]
fn dump_without_comments_has_no_hash_lines() {
    let config = Config::load(FIXTURE).unwrap();
    let text = config.dump(true).unwrap();
    assert!(text.lines().all(|line| !line.trim_start().starts_with('#')));
    assert!(!text.contains(" # "));
    assert_eq!(Config::load(&text).unwrap().keys().count(), 2);
}

#[test]
fn edited_config_dumps_edits() {
    let mut config = Config::load(FIXTURE).unwrap();
    config
        .get_mut("DEFAULT")
        .unwrap()
        .get_mut("port")
        .unwrap()
        .set_value(9090i64);
    let reloaded = Config::load(&config.dump(false).unwrap()).unwrap();
    assert_eq!(reloaded.value("DEFAULT", "port").unwrap(), &Value::Int(9090));
    assert_eq!(
        reloaded
            .section("DEFAULT")
            .unwrap()
            .field("port")
            .unwrap()
            .side_comment(),
        "端口号"
    );
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn to_json_nests_sections() {
    let config = Config::load("[a]\nx = 1\nnames = a, b\n\n[b]\nflag = yes\nnothing =\n").unwrap();
    let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "a": { "x": 1, "names": ["a", "b"] },
            "b": { "flag": true, "nothing": null }
        })
    );
}

#[test]
fn to_json_keeps_document_order() {
    let config = Config::load("[z]\nb = 1\na = 2\n[y]\n").unwrap();
    let json = config.to_json().unwrap();
    let z = json.find("\"z\"").unwrap();
    let y = json.find("\"y\"").unwrap();
    let b = json.find("\"b\"").unwrap();
    let a = json.find("\"a\"").unwrap();
    assert!(z < y && b < a, "{json}");
}
