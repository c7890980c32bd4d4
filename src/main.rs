//! repopack: clones git repositories matching a name pattern and packages
//! them into a single archive for transport.

use anyhow::Result;
use clap::{Arg, ArgAction, Command as ClapCommand};
use std::path::PathBuf;

use repopack::commands::pack::{handle_pack_command, PackOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapCommand::new("repopack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Clones git repositories matching a name pattern and packages them into a portable archive")
        .arg(
            Arg::new("pattern")
                .value_name("PATTERN")
                .required(true)
                .allow_hyphen_values(true)
                .help("Regular expression matched against repository directory names"),
        )
        .arg(
            Arg::new("aux")
                .value_name("FILE")
                .num_args(0..)
                .help("Auxiliary files copied into the staging directory before archiving"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .help("Directory to scan (defaults to the current directory)"),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .short('j')
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Number of concurrent clone workers"),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .action(ArgAction::SetTrue)
                .conflicts_with("jobs")
                .help("Clone repositories one at a time"),
        )
        .get_matches();

    let options = PackOptions {
        pattern: matches
            .get_one::<String>("pattern")
            .expect("pattern is required")
            .clone(),
        aux_files: matches
            .get_many::<String>("aux")
            .unwrap_or_default()
            .map(PathBuf::from)
            .collect(),
        root: matches.get_one::<String>("root").map(PathBuf::from),
        jobs: matches.get_one::<usize>("jobs").copied(),
        sequential: matches.get_flag("sequential"),
    };

    handle_pack_command(options).await
}
