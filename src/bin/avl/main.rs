//! Interactive console for the AVL tree.
//!
//! Shows a numbered menu on stdout and reads choices and values from stdin, one per line:
//!
//! ```text
//! 1. Insert              (then a value)
//! 2. Insert from array   (then values, ended by a letter, a blank line or end of input)
//! 3. Delete              (then a value)
//! 5. Display
//! 6. Exit
//! ```
//!
//! Set `RUST_LOG=avl=trace` to watch the rotations as they happen.

use std::io;

use clap::Parser;

use avl::Tree;

mod console;
mod logger;

#[derive(Parser, Debug)]
#[command(version, about = "Insert into, delete from and draw an AVL tree of integers")]
struct CliOpts {
    /// Values to insert before the menu starts, separated by commas or spaces.
    #[arg(long, num_args = 1.., value_delimiter = ',', allow_negative_numbers = true)]
    load: Vec<i32>,

    /// Don't print the menu or prompts. Useful when piping a script in.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    logger::initialize_logger();
    let options = CliOpts::parse();
    log::debug!("{options:?}");

    let tree: Tree = options.load.into_iter().collect();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = console::Console::new(stdin.lock(), stdout.lock(), tree, options.quiet);
    console.run()?;

    let tree = console.into_tree();
    log::info!("exiting with {} values in the tree", tree.len());
    Ok(())
}
