// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use std::io::Cursor;

use tempfile::TempDir;

use crate::codec::DecodeMode;

const FILE_ONE: &str = r#"[DEFAULT]
extends = {extends}

[one]
foo = bar
num = -12
st = "o=k"
lines = 1
        two
        3

env = some ${__KONFIG_STUFF__}
location = ${HERE}

[two]
a = b
"#;

const FILE_TWO: &str = r#"[one]
foo = baz
two = "a"

[three]
more = stuff
location = ${HERE}
"#;

const FILE_THREE: &str = r#"[DEFAULT]
extends = no-no,no-no-no-no,no-no-no-no,theresnolimit

[one]
foo = bar
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

fn file_one(dir: &TempDir) -> String {
    let two = write(dir, "two.ini", FILE_TWO);
    FILE_ONE.replace("{extends}", &two.to_string_lossy())
}

fn env(pairs: &[(&str, &str)]) -> Options {
    Options::default().with_environment(pairs.iter().map(|(k, v)| (*k, *v)))
}

#[test]
fn test_reader() {
    let dir = TempDir::new().unwrap();
    unsafe {
        std::env::set_var("__KONFIG_STUFF__", "stuff");
    }
    let config = Config::from_str(&file_one(&dir)).expect("Failed to load config");

    // values conversion
    assert_eq!(config.get("one", "foo").unwrap(), Value::from("bar"));
    assert_eq!(config.get("one", "num").unwrap(), Value::Integer(-12));
    assert_eq!(config.get("one", "st").unwrap(), Value::from("o=k"));
    assert_eq!(
        config.get("one", "lines").unwrap(),
        Value::from(vec![Value::Integer(1), Value::from("two"), Value::Integer(3)])
    );
    assert_eq!(config.get("one", "env").unwrap(), Value::from("some stuff"));

    // getting a map
    let map = config.export_flat(None).unwrap();
    assert_eq!(map["one.foo"], Value::from("bar"));
    let map = config.export_flat(Some("one")).unwrap();
    assert_eq!(map["foo"], Value::from("bar"));

    // the environment was captured at load time
    unsafe {
        std::env::remove_var("__KONFIG_STUFF__");
    }
    assert_eq!(config.get("one", "env").unwrap(), Value::from("some stuff"));

    // extends
    assert_eq!(config.get("three", "more").unwrap(), Value::from("stuff"));
    assert_eq!(config.get("one", "two").unwrap(), Value::from("a"));
}

#[test]
fn test_nofile() {
    match Config::from_str(FILE_THREE) {
        Err(KonfigError::FileNotFound { path, code, .. }) => {
            assert_eq!(path, "no-no,no-no-no-no,no-no-no-no,theresnolimit");
            assert_eq!(code, Some(301));
        }
        other => panic!("Expected FileNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_missing_load_target() {
    let dir = TempDir::new().unwrap();
    let err = Config::from_file(dir.path().join("absent.ini")).unwrap_err();
    assert!(matches!(err, KonfigError::FileNotFound { .. }));

    // a directory is not a config file either
    let err = Config::from_file(dir.path()).unwrap_err();
    assert!(matches!(err, KonfigError::FileNotFound { .. }));
}

#[test]
fn test_location_interpolation() {
    let dir = TempDir::new().unwrap();
    let config = Config::from_str_with_options(&file_one(&dir), env(&[])).unwrap();

    // the primary text has no location
    assert_eq!(config.get("one", "location").unwrap(), Value::from("${HERE}"));
    // the extended file does
    let two_dir = dir.path().to_string_lossy().to_string();
    assert_eq!(config.get("three", "location").unwrap(), Value::from(two_dir));
}

#[test]
fn test_here_from_real_file() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("x");
    fs::create_dir(&nested).unwrap();
    let path = nested.join("y.conf");
    fs::write(&path, "[one]\nlocation = ${HERE}\nlog = ${HERE}/app.log\n").unwrap();

    let config = Config::from_file_with_options(&path, env(&[])).unwrap();
    let expected = nested.to_string_lossy().to_string();
    assert_eq!(config.get("one", "location").unwrap(), Value::from(expected.clone()));
    assert_eq!(
        config.get("one", "log").unwrap(),
        Value::from(format!("{}/app.log", expected))
    );
    assert_eq!(config.location(), Some(path.as_path()));
}

#[test]
fn test_extension_precedence_and_additivity() {
    let dir = TempDir::new().unwrap();
    let base = write(
        &dir,
        "base.ini",
        "[DEFAULT]\ntimeout = 30\n\n[server]\nhost = base.example\nport = 80\n\n[extra]\nonly = here\n",
    );
    let main = write(
        &dir,
        "main.ini",
        &format!("[DEFAULT]\nextends = {}\n\n[server]\nhost = main.example\n", base.display()),
    );

    let config = Config::from_file_with_options(&main, env(&[])).unwrap();

    assert_eq!(config.get("server", "host").unwrap(), Value::from("main.example"));
    assert_eq!(config.get("server", "port").unwrap(), Value::Integer(80));
    assert_eq!(config.get("extra", "only").unwrap(), Value::from("here"));
    assert_eq!(config.get("server", "timeout").unwrap(), Value::Integer(30));
    assert_eq!(config.sections(), vec!["server", "extra"]);
}

#[test]
fn test_multiple_extends_first_listed_wins() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.ini", "[s]\nx = from-a\ny = from-a\n");
    write(&dir, "b.ini", "[s]\nx = from-b\nz = from-b\n");
    let main = write(
        &dir,
        "main.ini",
        "[DEFAULT]\nextends = ${HERE}/a.ini\n          ${HERE}/b.ini\n\n[s]\ny = main\n",
    );

    let config = Config::from_file_with_options(&main, env(&[])).unwrap();
    assert_eq!(config.get("s", "x").unwrap(), Value::from("from-a"));
    assert_eq!(config.get("s", "y").unwrap(), Value::from("main"));
    assert_eq!(config.get("s", "z").unwrap(), Value::from("from-b"));
}

#[test]
fn test_extends_chain_is_resolved_recursively() {
    let dir = TempDir::new().unwrap();
    write(&dir, "c.ini", "[s]\ndepth = c\nfrom_c = true\n");
    write(&dir, "b.ini", "[DEFAULT]\nextends = ${HERE}/c.ini\n\n[s]\ndepth = b\n");
    let a = write(&dir, "a.ini", "[DEFAULT]\nextends = ${HERE}/b.ini\n\n[s]\nname = a\n");

    let config = Config::from_file_with_options(&a, env(&[])).unwrap();
    assert_eq!(config.get("s", "depth").unwrap(), Value::from("b"));
    assert_eq!(config.get("s", "from_c").unwrap(), Value::Bool(true));
    assert_eq!(config.get("s", "name").unwrap(), Value::from("a"));
}

#[test]
fn test_extends_cycle_terminates() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.ini", "[DEFAULT]\nextends = ${HERE}/a.ini\n\n[s]\nfrom_b = 1\n");
    let a = write(&dir, "a.ini", "[DEFAULT]\nextends = ${HERE}/b.ini\n\n[s]\nfrom_a = 1\n");

    let config = Config::from_file_with_options(&a, env(&[])).unwrap();
    assert_eq!(config.get("s", "from_a").unwrap(), Value::Integer(1));
    assert_eq!(config.get("s", "from_b").unwrap(), Value::Integer(1));
}

#[test]
fn test_primary_default_beats_extended_section() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.ini", "[one]\nfoo = from-extension\nbar = from-extension\n");
    let main = write(
        &dir,
        "main.ini",
        "[DEFAULT]\nextends = ${HERE}/base.ini\nfoo = from-primary\n\n[one]\nother = 1\n",
    );

    let config = Config::from_file_with_options(&main, env(&[])).unwrap();
    assert_eq!(config.get("one", "foo").unwrap(), Value::from("from-primary"));
    assert_eq!(config.get("one", "bar").unwrap(), Value::from("from-extension"));
}

#[test]
fn test_extended_defaults_do_not_shadow_extended_sections() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.ini", "[DEFAULT]\nfoo = base-default\n\n[one]\nfoo = base-one\n");
    let main = write(&dir, "main.ini", "[DEFAULT]\nextends = ${HERE}/base.ini\n\n[one]\nother = 1\n");

    let config = Config::from_file_with_options(&main, env(&[])).unwrap();
    assert_eq!(config.get("one", "foo").unwrap(), Value::from("base-one"));
    assert_eq!(config.get("DEFAULT", "foo").unwrap(), Value::from("base-default"));
}

#[test]
fn test_strict_decoding_of_extended_values_waits_for_get() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.ini", "[s]\nbad = 12x\ngood = 7\n");
    let main = write(&dir, "main.ini", "[DEFAULT]\nextends = ${HERE}/base.ini\n");

    let config = Config::from_file_with_options(&main, env(&[]).strict_decoding(true)).unwrap();
    assert_eq!(config.get("s", "good").unwrap(), Value::Integer(7));
    assert_eq!(config.get("s", "bad").unwrap_err().code(), Some(401));
}

#[test]
fn test_cyclic_value_in_extension_fails_on_read() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.ini", "[s]\na = ${b}\nb = ${a}\nc = fine\n");
    let main = write(&dir, "main.ini", "[DEFAULT]\nextends = ${HERE}/base.ini\n");

    let config = Config::from_file_with_options(&main, env(&[])).unwrap();
    assert_eq!(config.get("s", "c").unwrap(), Value::from("fine"));
    assert_eq!(config.get("s", "a").unwrap_err().code(), Some(303));
}

#[test]
fn test_missing_nested_extension_aborts_load() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.ini", "[DEFAULT]\nextends = ${HERE}/gone.ini\n");
    let a = write(&dir, "a.ini", "[DEFAULT]\nextends = ${HERE}/b.ini\n");

    let err = Config::from_file_with_options(&a, env(&[])).unwrap_err();
    match err {
        KonfigError::FileNotFound { path, .. } => assert!(path.ends_with("gone.ini")),
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_copied_values_keep_their_meaning() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "base.ini",
        "[s]\nprice = ${PRICE}\ncode = \"0042\"\nflag = \"true\"\nunset = ${NOT_DEFINED}\n",
    );
    let main = write(&dir, "main.ini", "[DEFAULT]\nextends = ${HERE}/base.ini\n");

    let config = Config::from_file_with_options(&main, env(&[("PRICE", "$5")])).unwrap();
    assert_eq!(config.get("s", "price").unwrap(), Value::from("$5"));
    assert_eq!(config.get("s", "code").unwrap(), Value::from("0042"));
    assert_eq!(config.get("s", "flag").unwrap(), Value::from("true"));
    assert_eq!(config.get("s", "unset").unwrap(), Value::from("${NOT_DEFINED}"));
}

#[test]
fn test_extends_home_expansion() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    if !home.is_dir() {
        return;
    }
    let dir = tempfile::Builder::new().prefix(".konfig-test").tempdir_in(&home);
    let Ok(dir) = dir else {
        return;
    };
    let base = dir.path().join("base.ini");
    fs::write(&base, "[s]\nfrom = home\n").unwrap();
    let relative = base.strip_prefix(&home).unwrap().to_string_lossy().to_string();

    let config = Config::from_str_with_options(
        &format!("[DEFAULT]\nextends = ~/{}\n", relative),
        env(&[]),
    )
    .unwrap();
    assert_eq!(config.get("s", "from").unwrap(), Value::from("home"));
}

#[test]
fn test_environment_interpolation_from_options() {
    let config = Config::from_str_with_options("[one]\nenv = some ${FOO}\n", env(&[("FOO", "stuff")])).unwrap();
    assert_eq!(config.get("one", "env").unwrap(), Value::from("some stuff"));

    let config = Config::from_str_with_options("[one]\nenv = some ${FOO}\n", env(&[])).unwrap();
    assert_eq!(config.get("one", "env").unwrap(), Value::from("some ${FOO}"));
}

#[test]
fn test_interpolation_happens_before_decoding() {
    let config = Config::from_str_with_options(
        "[s]\nport = ${PORT}\ndebug = ${DEBUG}\nquoted = \"${PORT}\"\n",
        env(&[("PORT", "8080"), ("DEBUG", "True")]),
    )
    .unwrap();
    assert_eq!(config.get("s", "port").unwrap(), Value::Integer(8080));
    assert_eq!(config.get("s", "debug").unwrap(), Value::Bool(true));
    assert_eq!(config.get("s", "quoted").unwrap(), Value::from("8080"));
}

#[test]
fn test_missing_option_and_section() {
    let config = Config::from_str("[DEFAULT]\nshared = 1\n[one]\nfoo = bar\n").unwrap();

    match config.get("one", "nope") {
        Err(KonfigError::OptionNotFound { section, option, code, .. }) => {
            assert_eq!(section, "one");
            assert_eq!(option, "nope");
            assert_eq!(code, Some(201));
        }
        other => panic!("Expected OptionNotFound, got {:?}", other),
    }
    assert_eq!(config.get("nope", "foo").unwrap_err().code(), Some(202));

    // defaults are visible everywhere, including the default section itself
    assert_eq!(config.get("one", "shared").unwrap(), Value::Integer(1));
    assert_eq!(config.get("DEFAULT", "shared").unwrap(), Value::Integer(1));
}

#[test]
fn test_typed_getters() {
    let config = Config::from_str(
        "[app]\nport = 8080\ndebug = true\nname = demo\nhosts = a\n    b\nsingle = only\n",
    )
    .unwrap();

    let port: u16 = config.get_as("app", "port").unwrap();
    assert_eq!(port, 8080);
    let debug: bool = config.get_as("app", "debug").unwrap();
    assert!(debug);
    let hosts: Vec<String> = config.get_as("app", "hosts").unwrap();
    assert_eq!(hosts, vec!["a", "b"]);

    let err = config.get_as::<i64>("app", "name").unwrap_err();
    match err {
        KonfigError::TypeError { message, .. } => assert!(message.contains("app.name")),
        other => panic!("Expected TypeError, got {:?}", other),
    }

    assert_eq!(config.get_optional::<String>("app", "missing").unwrap(), None);
    assert_eq!(config.get_optional::<String>("app", "name").unwrap(), Some("demo".into()));
    assert_eq!(config.get_or("app", "timeout", 30i64), 30);

    assert_eq!(config.get_list("app", "single").unwrap(), vec![Value::from("only")]);
    assert_eq!(config.get_list("app", "hosts").unwrap().len(), 2);
}

#[test]
fn test_strict_decoding() {
    let lenient = Config::from_str("[s]\nv = 12x\n").unwrap();
    assert_eq!(lenient.get("s", "v").unwrap(), Value::from("12x"));

    let strict = Config::from_str_with_options("[s]\nv = 12x\nok = 12\n", Options::new().strict_decoding(true)).unwrap();
    assert_eq!(strict.load_options().decode_mode, DecodeMode::Strict);
    assert_eq!(strict.get("s", "v").unwrap_err().code(), Some(401));
    assert_eq!(strict.get("s", "ok").unwrap(), Value::Integer(12));
}

#[test]
fn test_from_reader_and_source() {
    let config = Config::from_reader(Cursor::new("[one]\nlocation = ${HERE}\n")).unwrap();
    assert_eq!(config.get("one", "location").unwrap(), Value::from("${HERE}"));
    assert!(config.location().is_none());

    let config = Config::load(Source::Text("[one]\nfoo = bar\n")).unwrap();
    assert_eq!(config.get("one", "foo").unwrap(), Value::from("bar"));

    let dir = TempDir::new().unwrap();
    let path = write(&dir, "c.ini", "[one]\nfoo = baz\n");
    let config = Config::load(Source::Path(&path)).unwrap();
    assert_eq!(config.get("one", "foo").unwrap(), Value::from("baz"));
}

#[test]
fn test_set_encodes_values() {
    let mut config = Config::from_str("[one]\n").unwrap();

    config.set("one", "flag", true).unwrap();
    config.set("one", "count", 3i64).unwrap();
    config.set("one", "items", vec![Value::Integer(1), Value::from("two")]).unwrap();

    assert_eq!(config.document().sections["one"]["flag"], "true");
    assert_eq!(config.document().sections["one"]["items"], "1\n    two");
    assert_eq!(config.get("one", "flag").unwrap(), Value::Bool(true));
    assert_eq!(config.get("one", "count").unwrap(), Value::Integer(3));
    assert_eq!(
        config.get("one", "items").unwrap(),
        Value::from(vec![Value::Integer(1), Value::from("two")])
    );

    assert_eq!(config.set("nope", "x", 1i64).unwrap_err().code(), Some(202));
}

#[test]
fn test_section_management() {
    let mut config = Config::from_str("[DEFAULT]\nd = 1\n[one]\na = 1\n").unwrap();

    assert!(config.add_section("two"));
    assert!(!config.add_section("two"));
    assert!(!config.add_section("DEFAULT"));
    assert_eq!(config.sections(), vec!["one", "two"]);

    assert_eq!(config.options("one").unwrap(), vec!["a", "d"]);
    assert!(config.has_option("two", "d"));
    assert!(config.remove_option("one", "a"));
    assert!(!config.remove_option("one", "a"));
    assert!(!config.has_option("one", "a"));
}

#[test]
fn test_custom_default_section() {
    let options = Options::new().default_section("common").comment_prefixes(&["#", ";"]);
    let config = Config::from_str_with_options("[common]\nx = 1\n; note\n[app]\ny = 2\n", options).unwrap();

    assert_eq!(config.get("app", "x").unwrap(), Value::Integer(1));
    assert_eq!(config.sections(), vec!["app"]);
    assert_eq!(config.default_section_name(), "common");
}

#[test]
fn test_cross_section_reference() {
    let config = Config::from_str_with_options(
        "[paths]\nroot = /srv\n[app]\ndata = ${paths:root}/data\n",
        env(&[]),
    )
    .unwrap();
    assert_eq!(config.get("app", "data").unwrap(), Value::from("/srv/data"));
}

#[test]
fn test_syntax_error_aborts_load() {
    let err = Config::from_str("[one]\nno delimiter here\n").unwrap_err();
    assert!(matches!(err, KonfigError::SyntaxError { line: 2, .. }));
}
