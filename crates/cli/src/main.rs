//! Command-line entry point for `assistkit`.

mod app;
mod cli;

fn main() -> anyhow::Result<()> {
    app::run()
}
