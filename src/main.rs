#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
#![allow(clippy::exit)]
#![allow(clippy::single_call_fn)]
#![allow(clippy::missing_docs_in_private_items)]

use assetio::{
    ASSET_ROOT_ENV, AppContext, CandidateKind, IoError, create_save_folder, file_exists,
    list_files_matching, read_file, read_text, write_file,
};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint, value_parser};
use clap_complete::aot::{Shell, generate};
use env_logger::Env;
use std::io::{Write as _, stdout};

//mimalloc keeps the many small path strings cheap
#[cfg(all(
    feature = "mimalloc",
    any(target_os = "linux", target_os = "macos", target_os = "android")
))]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"), about = "Resolve, list and read game assets")]
///generate our arguments and parse them.
pub struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(
        short = 'r',
        long = "root",
        global = true,
        value_hint = ValueHint::DirPath,
        help = format!("Asset root (defaults to ${ASSET_ROOT_ENV}, then {})", assetio::DEFAULT_ASSET_ROOT)
    )]
    root: Option<String>,

    #[arg(
        long = "data-subdir",
        global = true,
        help = format!("Logical data sub-directory, defaults to {}", assetio::DEFAULT_DATA_SUBDIR)
    )]
    data_subdir: Option<String>,

    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        help = "Log every candidate tried (same as RUST_LOG=debug)"
    )]
    verbose: bool,

    #[arg(
        long = "generate",
        action = ArgAction::Set,
        value_parser = value_parser!(Shell),
        help = "Generate shell completions"
    )]
    generate: Option<Shell>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the path an asset name resolves to
    Resolve {
        name: String,
        #[arg(short = 'c', long = "candidates", help = "Print every candidate instead of resolving")]
        candidates: bool,
    },
    /// List the visible entries of an asset directory, sorted
    List {
        dir: String,
        #[arg(short = 'p', long = "pattern", help = "Only entries matching this glob, eg '*.json'")]
        pattern: Option<String>,
    },
    /// Write an asset's contents to stdout
    Read {
        name: String,
        #[arg(short = 't', long = "text", help = "Decode as UTF-8 text")]
        text: bool,
    },
    /// Write DATA and a newline to a literal path
    Write {
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
        data: Option<String>,
    },
    /// Exit successfully if FILE is a regular file
    Exists {
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
    },
    /// Pick a writable save directory and print it
    SaveDir {
        #[arg(help = "Candidates to try in order (defaults to the platform list)")]
        candidates: Vec<String>,
    },
}

fn main() -> Result<(), IoError> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(if args.verbose {
        "debug"
    } else {
        "warn"
    }))
    .init();

    if let Some(generator) = args.generate {
        let mut cmd = Args::command();
        let cmd_clone = cmd.clone();
        generate(
            generator,
            &mut cmd,
            cmd_clone.get_name().to_owned(),
            &mut stdout(),
        );
        return Ok(());
    }

    let Some(command) = args.command else {
        eprintln!("Error: No command provided, see --help. Exiting.");
        std::process::exit(2);
    };

    let mut ctx = build_context(args.root, args.data_subdir)?;
    let mut out = stdout().lock();

    let ok = match command {
        Command::Resolve { name, candidates } if candidates => {
            for (kind, path) in ctx.resolver().candidates(&name) {
                writeln!(out, "{:<18} {path}", kind.label())?;
            }
            true
        }
        Command::Resolve { name, .. } => ctx.resolve(&name).is_some_and(|found| {
            let note = if found.kind() == CandidateKind::AsGiven {
                String::new()
            } else {
                format!("\t({})", found.kind())
            };
            writeln!(out, "{found}{note}").is_ok()
        }),
        Command::List { dir, pattern } => {
            let list = match pattern {
                Some(glob) => list_files_matching(&ctx.resolver(), &dir, &glob),
                None => ctx.list_files(&dir),
            };
            match list {
                Some(list) => {
                    for name in &list {
                        writeln!(out, "{name}")?;
                    }
                    true
                }
                None => false,
            }
        }
        Command::Read { name, text } if text => match read_text(&ctx.resolver(), &name) {
            Some(contents) => {
                out.write_all(contents.as_bytes())?;
                true
            }
            None => false,
        },
        Command::Read { name, .. } => match read_file(&ctx.resolver(), &name) {
            Some(mut bytes) => {
                bytes.pop(); // terminator
                out.write_all(&bytes)?;
                true
            }
            None => false,
        },
        Command::Write { file, data } => write_file(&file, data.as_deref()),
        Command::Exists { file } => {
            let exists = file_exists(&file);
            writeln!(out, "{exists}")?;
            exists
        }
        Command::SaveDir { candidates } => {
            if !candidates.is_empty() {
                ctx = AppContext::builder()
                    .asset_root(ctx.asset_root())
                    .data_subdir(ctx.data_subdir())
                    .save_candidates(candidates)
                    .build()?;
            }
            let chosen = create_save_folder(&mut ctx);
            writeln!(out, "{}", if chosen { ctx.save_dir() } else { "." })?;
            chosen
        }
    };

    out.flush()?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Command line flags win over the environment, which wins over the compiled in defaults.
fn build_context(root: Option<String>, data_subdir: Option<String>) -> Result<AppContext, IoError> {
    let mut builder = AppContext::builder();
    if let Some(root) = root.or_else(|| {
        std::env::var(ASSET_ROOT_ENV)
            .ok()
            .filter(|root| !root.is_empty())
    }) {
        builder = builder.asset_root(root);
    }
    if let Some(subdir) = data_subdir {
        builder = builder.data_subdir(subdir);
    }
    builder.build()
}
