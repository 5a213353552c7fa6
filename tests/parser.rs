// tests/parser.rs

use pkgowner::resolve::{
    extract_package_names, parse_query_output, parse_query_output_with, ParseEvent,
};

#[test]
fn plain_line_maps_file_to_package() {
    let map = parse_query_output("coreutils: /bin/ls\n");
    assert_eq!(map.len(), 1);
    assert_eq!(map["/bin/ls"], "coreutils");
}

#[test]
fn diversion_line_yields_diverting_package() {
    let map = parse_query_output(
        "diversion by libfoo to /usr/lib/libfoo.so.real: /usr/lib/libfoo.so\n",
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map["/usr/lib/libfoo.so"], "libfoo");
}

#[test]
fn diversion_from_is_recognised() {
    let map = parse_query_output("diversion by dash from /bin/sh.distrib: /bin/sh\n");
    assert_eq!(map["/bin/sh"], "dash");
}

#[test]
fn multi_package_line_keeps_last_candidate() {
    let map = parse_query_output("pkg-a, pkg-b: /usr/bin/tool\n");
    assert_eq!(map.len(), 1);
    assert_eq!(map["/usr/bin/tool"], "pkg-b");
}

#[test]
fn later_lines_overwrite_earlier_owners() {
    let out = "\
diversion by libc6 from /lib/ld.so.orig: /lib/ld.so
libc6-dev: /lib/ld.so
";
    let map = parse_query_output(out);
    assert_eq!(map["/lib/ld.so"], "libc6-dev");
}

#[test]
fn malformed_lines_are_skipped() {
    let out = "\
coreutils: /bin/ls
this line has no separator
bash: /bin/bash
";
    let map = parse_query_output(out);
    assert_eq!(map.len(), 2);
    assert_eq!(map["/bin/ls"], "coreutils");
    assert_eq!(map["/bin/bash"], "bash");
}

#[test]
fn separator_needs_the_space() {
    // "libc6:amd64" contains a colon but not ": ", so the split happens later.
    let map = parse_query_output("libc6:amd64: /lib/x86_64-linux-gnu/libc.so.6\n");
    assert_eq!(map["/lib/x86_64-linux-gnu/libc.so.6"], "libc6:amd64");
}

#[test]
fn file_path_is_everything_after_first_separator() {
    let map = parse_query_output("weird-pkg: /opt/odd: name\n");
    assert_eq!(map["/opt/odd: name"], "weird-pkg");
}

#[test]
fn empty_output_gives_empty_map() {
    assert!(parse_query_output("").is_empty());
    assert!(parse_query_output("\n\n").is_empty());
}

#[test]
fn blank_lines_are_reported_as_malformed() {
    let mut events = Vec::new();
    let map = parse_query_output_with("coreutils: /bin/ls\n\nbash: /bin/bash\n", |e| {
        events.push(e)
    });

    assert_eq!(map.len(), 2);
    assert!(events.contains(&ParseEvent::Malformed {
        line_no: 2,
        line: ""
    }));
}

#[test]
fn crlf_line_endings_are_handled() {
    let map = parse_query_output("coreutils: /bin/ls\r\nbash: /bin/bash\r\n");
    assert_eq!(map["/bin/ls"], "coreutils");
    assert_eq!(map["/bin/bash"], "bash");
}

#[test]
fn trailing_comma_leaves_empty_owner() {
    let map = parse_query_output("pkg-a, : /usr/bin/tool\n");
    assert_eq!(map["/usr/bin/tool"], "");
}

#[test]
fn missing_package_spec_maps_to_empty_name() {
    let map = parse_query_output(": /usr/bin/orphan\n");
    assert_eq!(map.len(), 1);
    assert_eq!(map["/usr/bin/orphan"], "");
}

#[test]
fn real_dpkg_diversion_lines_map_to_diverting_package() {
    let out = "\
diversion by dash from: /bin/sh
diversion by dash to: /bin/sh.distrib
";
    let map = parse_query_output(out);
    assert_eq!(map.len(), 2);
    assert_eq!(map["/bin/sh"], "dash");
    assert_eq!(map["/bin/sh.distrib"], "dash");
}

#[test]
fn reparsing_is_idempotent() {
    let out = "\
pkg-a, pkg-b: /usr/bin/tool
diversion by libfoo to /usr/lib/libfoo.so.real: /usr/lib/libfoo.so
garbage
";
    assert_eq!(parse_query_output(out), parse_query_output(out));
}

#[test]
fn sink_receives_events_in_order() {
    let out = "\
nonsense
diversion by a, b to /x.real: /x
";
    let mut events = Vec::new();
    let map = parse_query_output_with(out, |e| events.push(e));

    assert_eq!(
        events,
        vec![
            ParseEvent::Malformed {
                line_no: 1,
                line: "nonsense"
            },
            ParseEvent::Diversion { names: "a, b" },
            ParseEvent::Mapped {
                file: "/x",
                package: "a"
            },
            ParseEvent::Mapped {
                file: "/x",
                package: "b"
            },
        ]
    );
    assert_eq!(map["/x"], "b");
}

#[test]
fn extract_package_names_handles_both_shapes() {
    assert_eq!(
        extract_package_names("diversion by libfoo to /usr/lib/libfoo.so.real"),
        "libfoo"
    );
    assert_eq!(extract_package_names("diversion by a, b from /x"), "a, b");
    assert_eq!(extract_package_names("  pkg-a, pkg-b "), "pkg-a, pkg-b");
}

#[test]
fn diversion_match_is_case_sensitive() {
    assert_eq!(
        extract_package_names("Diversion by libfoo to /x"),
        "Diversion by libfoo to /x"
    );
}
