use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use gitscope::admin;

use crate::Result;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty repository under the configured root")
        .arg(Arg::with_name("name").required(true).help("Repository name"))
}

pub(crate) fn run(cli: &mut crate::App, matches: &ArgMatches) -> Result<()> {
    let config = cli.config(matches)?;
    let name = matches.value_of("name").unwrap();

    let path = admin::create_repository(&config.repo_root, name)?;

    writeln!(cli, "Initialized empty repository in {}", path.display())?;
    Ok(())
}
