use std::process::Command;

fn main() {
    // Re-run when the checked-out commit or the index changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let on_tag = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
        .is_some_and(|out| !out.is_empty());

    println!("cargo:rustc-env=FOLIO_GIT_HASH={hash}");
    println!("cargo:rustc-env=FOLIO_ON_RELEASE_TAG={on_tag}");
    println!("cargo:rustc-env=FOLIO_GIT_DIRTY={dirty}");
}

/// Run a git command, returning trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}
