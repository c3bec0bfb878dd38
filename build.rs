// build.rs

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_WS2811");

    // The headless driver needs no native code; only the hardware driver links.
    if std::env::var_os("CARGO_FEATURE_WS2811").is_none() {
        return;
    }

    // Prefer pkg-config. rpi_ws281x installs `libws2811.pc` on most
    // distributions, but a plain `make install` of the upstream sources does
    // not, so fall back to manual linking.
    match pkg_config::probe_library("libws2811") {
        Ok(_) => {
            eprintln!("pkg-config found libws2811. Linking configured automatically.");
        }
        Err(e) => {
            eprintln!(
                "pkg-config failed for 'libws2811' ({}). Falling back to manual linking.",
                e
            );
            println!("cargo:rustc-link-lib=ws2811");
            println!("cargo:rustc-link-search=/usr/local/lib");
            println!("cargo:rustc-link-search=/usr/lib");
            eprintln!("Manual linking flags applied. Ensure rpi_ws281x is installed.");
        }
    }
}
