//! Build helpers for the lexdiv workspace.
//!
//! ```text
//! cargo run -p xtask -- completions [--out-dir DIR]
//! cargo run -p xtask -- man [--out-dir DIR]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

const BIN_NAME: &str = "lexdiv";

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for lexdiv")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate shell completion scripts for every supported shell
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
    /// Generate man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Completions { out_dir } => completions(&out_dir),
        Task::Man { out_dir } => man_pages(&out_dir),
    }
}

fn completions(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = lexdiv::command();
    for &shell in Shell::value_variants() {
        let path = clap_complete::generate_to(shell, &mut cmd, BIN_NAME, out_dir)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn man_pages(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = lexdiv::command();
    write_man(cmd.clone(), &out_dir.join(format!("{BIN_NAME}.1")))?;

    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let name = format!("{BIN_NAME}-{}", sub.get_name());
        let page = sub.clone().name(name.clone());
        write_man(page, &out_dir.join(format!("{name}.1")))?;
    }
    Ok(())
}

fn write_man(cmd: clap::Command, path: &Path) -> io::Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buffer)?;
    fs::write(path, buffer)?;
    println!("wrote {}", path.display());
    Ok(())
}
