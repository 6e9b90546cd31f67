use std::process::Command;

fn main() {
    // Prefer LLVM_DOCSET_VERSION if set (e.g., by a release workflow),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("LLVM_DOCSET_VERSION") {
        println!("cargo:rustc-env=LLVM_DOCSET_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=LLVM_DOCSET_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=LLVM_DOCSET_VERSION");
}
