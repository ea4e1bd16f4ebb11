fn main() {
    println!("cargo:rerun-if-env-changed=MOTIONAC_CONFIG_JSON");

    // Host builds (tests) have no ESP-IDF toolchain to link against.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
