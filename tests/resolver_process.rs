// tests/resolver_process.rs
//
// Runs the resolver against fake `dpkg-query` scripts.

#![cfg(unix)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Duration;

use pkgowner::errors::PkgownerError;
use pkgowner::resolve::dpkg::REQUIRED_TOOLS;
use pkgowner::resolve::DpkgFileResolver;
use pkgowner::tools::require_executables;
use pkgowner_test_utils::fake_tool::{arg_recording_tool, fake_tool};
use pkgowner_test_utils::{init_tracing, with_timeout};

fn files(paths: &[&str]) -> BTreeSet<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

fn resolver_for(tool: PathBuf, timeout: Duration) -> DpkgFileResolver {
    let overrides = BTreeMap::from([("dpkg-query".to_string(), tool)]);
    let tools = require_executables(REQUIRED_TOOLS, &overrides).unwrap();
    DpkgFileResolver::new(&tools, timeout).unwrap()
}

#[tokio::test]
async fn resolves_through_a_real_process() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let stdout = "\
coreutils: /bin/ls
diversion by libfoo to /usr/lib/libfoo.so.real: /usr/lib/libfoo.so
pkg-a, pkg-b: /usr/bin/tool
no separator here
";
    let tool = fake_tool(dir.path(), "dpkg-query", stdout, 1);
    let r = resolver_for(tool, Duration::from_secs(5));

    let wanted = files(&["/bin/ls", "/usr/bin/tool", "/usr/lib/libfoo.so", "/missing"]);
    let map = with_timeout(r.resolve(&wanted)).await.unwrap();

    assert_eq!(map["/bin/ls"], "coreutils");
    assert_eq!(map["/usr/lib/libfoo.so"], "libfoo");
    assert_eq!(map["/usr/bin/tool"], "pkg-b");
    assert!(!map.contains_key("/missing"));
}

#[tokio::test]
async fn paths_with_spaces_reach_the_tool_intact() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let (tool, args_file) = arg_recording_tool(dir.path(), "dpkg-query");
    let r = resolver_for(tool, Duration::from_secs(5));

    let map = with_timeout(r.resolve(&files(&["/opt/my app/run", "/bin/$HOME;ls"])))
        .await
        .unwrap();
    assert!(map.is_empty());

    let seen = std::fs::read_to_string(args_file).unwrap();
    assert_eq!(seen, "-S\n/bin/$HOME;ls\n/opt/my app/run\n");
}

#[tokio::test]
async fn slow_tool_times_out() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let tool = dir.path().join("dpkg-query");
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(&tool, "#!/bin/sh\nexec sleep 30\n").unwrap();
        let mut perms = std::fs::metadata(&tool).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&tool, perms).unwrap();
    }
    let r = resolver_for(tool, Duration::from_millis(200));

    let err = with_timeout(r.resolve(&files(&["/bin/ls"])))
        .await
        .unwrap_err();
    assert!(matches!(err, PkgownerError::Timeout { .. }), "got: {err:?}");
}
