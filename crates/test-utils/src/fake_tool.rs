use std::fs;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script named `name` into `dir` that prints
/// `stdout` verbatim and exits with `exit_code`.
///
/// Stands in for `dpkg-query` and friends in tests. Unix only.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, stdout: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let data_path = dir.join(format!("{name}.stdout"));
    fs::write(&data_path, stdout).expect("write fake tool output");

    let script = format!(
        "#!/bin/sh\ncat '{}'\nexit {}\n",
        data_path.display(),
        exit_code
    );
    let path = dir.join(name);
    fs::write(&path, script).expect("write fake tool script");

    let mut perms = fs::metadata(&path).expect("stat fake tool").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake tool");

    path
}

/// Write an executable script that records its arguments, one per line, into
/// `<dir>/<name>.args` and prints nothing.
#[cfg(unix)]
pub fn arg_recording_tool(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let args_path = dir.join(format!("{name}.args"));
    let script = format!(
        "#!/bin/sh\nfor a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{}'\n",
        args_path.display()
    );
    let path = dir.join(name);
    fs::write(&path, script).expect("write recording tool script");

    let mut perms = fs::metadata(&path).expect("stat recording tool").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod recording tool");

    (path, args_path)
}
