use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use serde_json::json;

use gitscope::auth::AuthRequest;
use gitscope::keyring::Keyring;

use crate::Result;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("request")
        .about("Emit a signed create-repository request envelope on stdout")
        .arg(Arg::with_name("name").required(true).help("Repository name"))
}

pub(crate) fn run(cli: &mut crate::App, matches: &ArgMatches) -> Result<()> {
    let config = cli.config(matches)?;
    let private_path = config
        .private_keyring
        .as_deref()
        .ok_or("no private_keyring configured")?;
    let private = Keyring::load(private_path)?;

    let name = matches.value_of("name").unwrap();
    let request = AuthRequest::create(json!({ "Name": name }), &private)?;

    writeln!(cli, "{}", serde_json::to_string(&request)?)?;
    Ok(())
}
