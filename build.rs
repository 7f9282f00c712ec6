use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output();

    let version = match output {
        Ok(o) if o.status.success() => {
            let git_output = String::from_utf8(o.stdout)
                .unwrap_or_default()
                .trim()
                .to_string();

            // Strip 'v' prefix if present (e.g., "v1.0.0" -> "1.0.0")
            git_output
                .strip_prefix('v')
                .unwrap_or(&git_output)
                .to_string()
        }
        _ => String::new(),
    };

    let version = if version.is_empty() {
        std::env::var("CARGO_PKG_VERSION").unwrap_or_default()
    } else {
        version
    };

    println!("cargo:rustc-env=FORM3_ACCOUNTS_VERSION={}", version);
}
