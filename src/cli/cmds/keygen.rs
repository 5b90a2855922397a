use std::io::Write;
use std::path::Path;

use clap::{App, Arg, ArgMatches, SubCommand};

use gitscope::keyring::{KeyEntry, Keyring};

use crate::Result;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("keygen")
        .about("Generate a signing keypair and add it to the configured keyrings")
        .arg(
            Arg::with_name("identity")
                .required(true)
                .help("Identity to bind the key to, e.g. \"Alice <alice@example.com>\""),
        )
}

pub(crate) fn run(cli: &mut crate::App, matches: &ArgMatches) -> Result<()> {
    let config = cli.config(matches)?;
    let private_path = config
        .private_keyring
        .as_deref()
        .ok_or("no private_keyring configured")?;

    let identity = matches.value_of("identity").unwrap();
    let entry = KeyEntry::generate(identity);

    append(private_path, entry.clone())?;
    append(&config.public_keyring, entry.public_entry())?;

    writeln!(cli, "generated key for {}", identity)?;
    writeln!(cli, "public key: {}", entry.public_key)?;

    Ok(())
}

/// Add an entry to a keyring file, creating the file if needed.
fn append(path: &Path, entry: KeyEntry) -> Result<()> {
    let mut keyring = if path.exists() {
        Keyring::load(path)?
    } else {
        Keyring::default()
    };
    keyring.entries.push(entry);
    keyring.save(path)?;
    Ok(())
}
