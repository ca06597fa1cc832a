//! `pald` CLI binary
//!
//! This is the minimal entrypoint for the `pald` CLI. All logic is in the
//! library; `main.rs` only invokes `cli::run()`.

#[tokio::main]
async fn main() {
    if let Err(code) = pald::cli::run().await {
        std::process::exit(code);
    }
}
