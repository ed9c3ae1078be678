//! Renders `rollbook.1` plus one page per visible subcommand into
//! `$OUT_DIR/man`.

use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

use clap::CommandFactory;

// cli.rs needs nothing beyond the clap build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = env::var_os("OUT_DIR").ok_or("OUT_DIR is unset")?;
    let man_dir = PathBuf::from(out_dir).join("man");
    fs::create_dir_all(&man_dir)?;

    let mut pending = vec![cli::Cli::command()];
    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();
        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| sub.clone().name(format!("{name}-{}", sub.get_name()))),
        );

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd).render(&mut page)?;
        fs::write(man_dir.join(format!("{name}.1")), page)?;
    }
    Ok(())
}
