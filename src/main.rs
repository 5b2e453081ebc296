//! Kodegen Bundler PyEmbed - embedded Python distribution bundler.
//!
//! This binary builds a ready-to-ship folder containing an embeddable Python
//! runtime, your project trees and a first-run bootstrap for the end user.

use kodegen_bundler_pyembed::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
