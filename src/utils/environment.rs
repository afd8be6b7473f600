use std::env;
use std::path::PathBuf;

/// Variable lookup handed to code that reads the environment.
///
/// Production passes [`process_env`]; tests pass a closure over a map.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read `name` from the process environment. Blank values count as unset.
pub fn process_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Home directory, from `HOME` when set, else the platform default.
pub fn home_dir(env: EnvLookup<'_>) -> Option<PathBuf> {
    env("HOME").map(PathBuf::from).or_else(dirs::home_dir)
}
