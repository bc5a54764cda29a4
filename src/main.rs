mod ansi;
mod args;
mod config;
mod entry;
mod error;
mod logger;
mod output;
mod report;
mod runner;
mod shutdown;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
