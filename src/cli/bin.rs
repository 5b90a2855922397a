#![deny(warnings)]

//! Remote-administration client for a gitscope server.
//!
//! Everything here is thin plumbing over the library: key generation,
//! local repository create/delete, and signed request envelopes.

use std::io::{self, Write};

mod app;
pub(crate) use app::App;

mod cmds;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[allow(unused_must_use)]
fn main() {
    env_logger::init();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut app = App {
        arg_matches: app::clap_app().get_matches(),
        stdout: &mut stdout,
    };

    let r = app.run();

    app.flush();

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("gitscope: {}", err);
            1
        }
    });
}
