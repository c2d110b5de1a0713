//! dwall binary - one pass of parse, extract, link, set.

// Symlinked frames and setter processes assume a Unix-like system
#[cfg(not(unix))]
compile_error!("dwall only supports Unix-like systems.");

fn main() {
    dwall_lib::utils::logging::init();

    if let Err(err) = dwall_lib::cli::run() {
        eprintln!("dwall: {err}");
        std::process::exit(1);
    }
}
