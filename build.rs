fn main() {
    println!("cargo:rerun-if-changed=sdkconfig.defaults");

    // Host builds (tests, simulation) have no ESP-IDF toolchain to propagate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
