use std::io::Write;
use std::path::PathBuf;

#[cfg(test)]
use std::ffi::OsString;

use clap::{crate_version, AppSettings, Arg, ArgMatches};

use gitscope::config::{self, Config};

use crate::{cmds, Result};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("gitscope")
        .version(crate_version!())
        .about("gitscope administration client")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .global(true)
                .takes_value(true)
                .help("Path to the configuration file"),
        );

    cmds::add_subcommands(app)
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    /// The configuration named by `--config`, defaulting to the per-user
    /// client config file.
    pub fn config(&self, matches: &ArgMatches<'_>) -> Result<Config> {
        let path = matches
            .value_of("config")
            .map(PathBuf::from)
            .unwrap_or_else(config::client_config_path);
        Ok(Config::load(&path)?)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("gitscope"));

        let mut stdout = Vec::new();

        App {
            arg_matches: clap_app().get_matches_from_safe(args)?,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}
