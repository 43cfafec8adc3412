//! Build script for storefront crate.
//!
//! Fingerprints the static stylesheet and script so templates can reference
//! them by content hash (`main.<hash>.css`, `storefront.<hash>.js`).

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    fingerprint(&static_dir, "css", "main", "CSS_HASH");
    fingerprint(&static_dir, "js", "storefront", "JS_HASH");
}

/// Copy `<kind>/<stem>.<kind>` to `<kind>/derived/<stem>.<hash>.<kind>` and
/// export the short hash as `env_var`.
fn fingerprint(static_dir: &Path, kind: &str, stem: &str, env_var: &str) {
    let source = static_dir.join(kind).join(format!("{stem}.{kind}"));
    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(&source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", source.display());
            println!("cargo:rustc-env={env_var}=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = &digest[..8];
    println!("cargo:rustc-env={env_var}={short_hash}");

    let derived_dir = static_dir.join(kind).join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");
    fs::copy(&source, derived_dir.join(format!("{stem}.{short_hash}.{kind}")))
        .expect("Failed to copy asset to derived directory");
}
