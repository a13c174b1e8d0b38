//! # Help Text
//!
//! Banner for the interactive shell and the command overview returned by
//! `help`. Plugin commands are appended from the registry at runtime.

pub const BANNER: &str = concat!(
    "╭──────────────────────────────────────────╮\n",
    "│                 GenDevCli                │\n",
    "│  Advanced Terminal Agent for Developers  │\n",
    "╰──────────────────────────────────────────╯\n",
    "Type `help` to see available commands, `exit` to quit.\n"
);

pub const NAME: &str = "GenDevCli";
pub const USAGE: &str = "gendev <command> [args...]";

/// Built-in commands as `(usage, description)`.
pub const COMMANDS: &[(&str, &str)] = &[
    ("ai '<json>'", "Send a JSON prompt to the model; preview or apply returned actions"),
    ("apply <actions.json>", "Validate and apply a batch of actions from a file"),
    ("read <path>", "Read a file"),
    ("ls [dir]", "List a directory"),
    ("mkfile <path> [content]", "Create a file"),
    ("mkdir <path>", "Create a directory"),
    ("rm <path>", "Delete a file or directory"),
    ("project [dir]", "List project files, skipping build output and VCS folders"),
    ("search <term>", "Find files containing a term"),
    ("config get|set|list|reset", "Manage persistent settings"),
    ("template <type> <framework> <name> [dir]", "Scaffold a component, API or test file"),
    ("help", "Show this overview"),
];
