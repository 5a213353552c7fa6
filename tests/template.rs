// tests/template.rs

use pkgowner::errors::PkgownerError;
use pkgowner::exec::CommandSpec;

#[test]
fn renders_named_placeholders() {
    let cmd = CommandSpec::new("{dpkg-query} -S {files}")
        .with("dpkg-query", "/usr/bin/dpkg-query")
        .with("files", "/bin/ls /bin/cat")
        .render()
        .unwrap();

    assert_eq!(cmd, "/usr/bin/dpkg-query -S /bin/ls /bin/cat");
}

#[test]
fn same_placeholder_can_repeat() {
    let cmd = CommandSpec::new("{x} and {x}")
        .with("x", "y")
        .render()
        .unwrap();
    assert_eq!(cmd, "y and y");
}

#[test]
fn with_all_adds_every_entry() {
    let cmd = CommandSpec::new("{a}-{b}")
        .with_all([("a", "1"), ("b", "2")])
        .render()
        .unwrap();
    assert_eq!(cmd, "1-2");
}

#[test]
fn doubled_braces_are_literal() {
    let cmd = CommandSpec::new("awk '{{print $1}}' {file}")
        .with("file", "data.txt")
        .render()
        .unwrap();
    assert_eq!(cmd, "awk '{print $1}' data.txt");
}

#[test]
fn missing_substitution_is_a_format_error() {
    let result = CommandSpec::new("{dpkg-query} -S {files}")
        .with("files", "/bin/ls")
        .render();

    match result {
        Err(PkgownerError::CommandFormat { template, reason }) => {
            assert_eq!(template, "{dpkg-query} -S {files}");
            assert!(reason.contains("dpkg-query"), "reason was: {reason}");
        }
        other => panic!("Expected CommandFormat error, got: {:?}", other),
    }
}

#[test]
fn unterminated_placeholder_is_a_format_error() {
    let result = CommandSpec::new("echo {oops").with("oops", "x").render();
    assert!(matches!(result, Err(PkgownerError::CommandFormat { .. })));
}

#[test]
fn stray_closing_brace_is_a_format_error() {
    let result = CommandSpec::new("echo oops}").render();
    assert!(matches!(result, Err(PkgownerError::CommandFormat { .. })));
}

#[test]
fn extra_substitutions_are_ignored() {
    let cmd = CommandSpec::new("true")
        .with("unused", "value")
        .render()
        .unwrap();
    assert_eq!(cmd, "true");
}
