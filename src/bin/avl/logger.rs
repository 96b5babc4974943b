use std::io::Write;

use env_logger::{Builder, Env};

/// Initialize the logger. We use a custom initialization to add some
/// useful debugging information, including the line number in the file.
///
/// The level comes from `RUST_LOG` and defaults to `warn` so the menu
/// isn't drowned out by the tree's own logging.
pub fn initialize_logger() {
    let env = Env::default().default_filter_or("warn");
    let mut builder = Builder::from_env(env);

    builder.format(|buf, record| {
        // Retrieve the path (CRATE::MODULE) and the line number
        let path = record.module_path().unwrap_or("");
        let line = match record.line() {
            Some(l) => l.to_string(),
            None => "".to_string(),
        };

        writeln!(
            buf,
            "[{} {}:{}] {}",
            record.level(),
            path,
            line,
            record.args()
        )
    });

    builder.init();
}
