use crate::{App, Result};

mod init;
mod keygen;
mod request;
mod rm;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(init::subcommand())
        .subcommand(keygen::subcommand())
        .subcommand(request::subcommand())
        .subcommand(rm::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("init", Some(m)) => init::run(app, &m),
        ("keygen", Some(m)) => keygen::run(app, &m),
        ("request", Some(m)) => request::run(app, &m),
        ("rm", Some(m)) => rm::run(app, &m),
        _ => unreachable!(),
        // unreachable: clap exits with help or an error message
        // when no subcommand was given.
    }
}
