//! The interactive menu. It owns a [`Tree`] and drives it through `insert`, `delete` and
//! `render` only; everything here is about reading and reporting user input.

use std::io::{BufRead, Write};
use std::num::ParseIntError;
use std::str::FromStr;

use anyhow::Context;
use avl::Tree;

const MENU: &str = "Menu\n1. Insert\n2. Insert from array\n3. Delete\n5. Display\n6. Exit";

/// An entry of the menu, picked by number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    Insert,
    InsertMany,
    Delete,
    Display,
    Exit,
    /// A number with no menu entry. These are ignored.
    Unknown(i64),
}

impl FromStr for Choice {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>()? {
            1 => Choice::Insert,
            2 => Choice::InsertMany,
            3 => Choice::Delete,
            5 => Choice::Display,
            6 => Choice::Exit,
            n => Choice::Unknown(n),
        })
    }
}

/// Leading integers of `line`. Returns them along with whether a non-integer token cut the
/// line short.
fn leading_values(line: &str) -> (Vec<i32>, bool) {
    let mut values = Vec::new();
    for token in line.split_whitespace() {
        match token.parse() {
            Ok(value) => values.push(value),
            Err(_) => return (values, true),
        }
    }
    (values, false)
}

pub struct Console<R, W> {
    input: R,
    output: W,
    tree: Tree,
    /// Skip prompts, for scripted input.
    quiet: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, tree: Tree, quiet: bool) -> Self {
        Self {
            input,
            output,
            tree,
            quiet,
        }
    }

    /// Shows the menu and handles choices until `Exit` or the end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.prompt(MENU)?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match line.parse::<Choice>() {
                Ok(Choice::Exit) => return Ok(()),
                Ok(choice) => self.dispatch(choice)?,
                Err(err) => self.report(&line, err)?,
            }
        }
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    fn dispatch(&mut self, choice: Choice) -> anyhow::Result<()> {
        match choice {
            Choice::Insert => {
                self.prompt("Enter node value")?;
                if let Some(value) = self.read_value()? {
                    self.tree.insert(value);
                }
            }
            Choice::InsertMany => {
                self.prompt("Enter nodes as a list, enter a letter to stop")?;
                let values = self.read_values()?;
                log::info!("bulk inserting {} values", values.len());
                self.tree.extend(values);
            }
            Choice::Delete => {
                self.prompt("Enter node value to delete")?;
                if let Some(value) = self.read_value()? {
                    if !self.tree.delete(value) {
                        log::info!("{value} is not in the tree");
                    }
                }
            }
            Choice::Display => {
                write!(self.output, "{}", self.tree.render()).context("writing the tree")?;
            }
            Choice::Unknown(n) => log::debug!("ignoring menu choice {n}"),
            Choice::Exit => {}
        }
        Ok(())
    }

    /// Reads one integer. Malformed input is reported and yields `None`; so does the end of
    /// input.
    fn read_value(&mut self) -> anyhow::Result<Option<i32>> {
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.report(&line, err)?;
                Ok(None)
            }
        }
    }

    /// Reads integers across lines until a token that isn't one, a blank line, or the end of
    /// input.
    fn read_values(&mut self) -> anyhow::Result<Vec<i32>> {
        let mut values = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                break;
            }
            let (leading, stopped) = leading_values(&line);
            values.extend(leading);
            if stopped {
                break;
            }
        }
        Ok(values)
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading from input")?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim_end().to_owned()))
        }
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<()> {
        if !self.quiet {
            writeln!(self.output, "{text}").context("writing a prompt")?;
        }
        Ok(())
    }

    fn report(&mut self, input: &str, err: ParseIntError) -> anyhow::Result<()> {
        log::warn!("could not parse {input:?}: {err}");
        writeln!(self.output, "error: {input:?} is not a number ({err})")
            .context("reporting an error")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Runs a quiet console over `script` and returns the tree and everything printed.
    fn run(script: &str, tree: Tree) -> (Tree, String) {
        let mut output = Vec::new();
        let mut console = Console::new(Cursor::new(script), &mut output, tree, true);
        console.run().unwrap();
        let tree = console.into_tree();

        (tree, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parse_choices() {
        assert_eq!("1".parse(), Ok(Choice::Insert));
        assert_eq!(" 2 ".parse(), Ok(Choice::InsertMany));
        assert_eq!("3".parse(), Ok(Choice::Delete));
        assert_eq!("5".parse(), Ok(Choice::Display));
        assert_eq!("6".parse(), Ok(Choice::Exit));
        assert_eq!("4".parse(), Ok(Choice::Unknown(4)));
        assert!("x".parse::<Choice>().is_err());
    }

    #[test]
    fn leading_values_stop_at_a_letter() {
        assert_eq!(leading_values("1 -2 3"), (vec![1, -2, 3], false));
        assert_eq!(leading_values("1 2 q 3"), (vec![1, 2], true));
        assert_eq!(leading_values(""), (vec![], false));
    }

    #[test]
    fn insert_delete_display() {
        let (tree, output) = run("1\n10\n1\n20\n1\n30\n3\n10\n5\n6\n", Tree::new());

        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![20, 30]);
        assert_eq!(output, tree.render());
    }

    #[test]
    fn bulk_insert_spans_lines_until_a_letter() {
        let (tree, _) = run("2\n5 3 8\n1 4\n7 x 9\n6\n", Tree::new());

        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8]);
        tree.assert_invariants();
    }

    #[test]
    fn bulk_insert_stops_at_blank_line() {
        let (tree, _) = run("2\n1 2\n\n1\n3\n", Tree::new());

        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn bad_input_is_reported_and_the_menu_continues() {
        let (tree, output) = run("one\n1\nten\n1\n10\n6\n", Tree::new());

        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![10]);
        assert_eq!(output.lines().count(), 2);
        assert!(output.lines().all(|line| line.starts_with("error: ")));
    }

    #[test]
    fn end_of_input_exits() {
        let (tree, output) = run("1\n", [1, 2].into_iter().collect());

        assert_eq!(tree.len(), 2);
        assert_eq!(output, "");
    }

    #[test]
    fn deleting_a_missing_value_changes_nothing() {
        let start: Tree = [2, 1, 3].into_iter().collect();
        let before = start.render();

        let (tree, output) = run("3\n42\n5\n", start);

        assert_eq!(output, before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn prompts_unless_quiet() {
        let mut output = Vec::new();
        let mut console = Console::new(Cursor::new("6\n"), &mut output, Tree::new(), false);
        console.run().unwrap();
        drop(console);

        assert_eq!(String::from_utf8(output).unwrap(), format!("{MENU}\n"));
    }
}
