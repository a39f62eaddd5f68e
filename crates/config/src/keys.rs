//! Configuration keys read by the hook engine

/// Hookdir policy (`yes`, `no`, `warn`, `error`, `interactive`)
pub const RUN_HOOKDIR: &str = "hook.runHookDir";

/// Default number of parallel hook jobs
pub const JOBS: &str = "hook.jobs";

/// Whether to show the advisory for non-executable hookdir scripts
pub const ADVICE_IGNORED_HOOK: &str = "advice.ignoredHook";

/// Override for the legacy hooks directory
pub const HOOKS_PATH: &str = "core.hooksPath";

/// Multi-valued list of commands for an event: `hook.<event>.command`
#[must_use]
pub fn hook_command(event: &str) -> String {
    format!("hook.{event}.command")
}

/// Alias target for a command name: `hookcmd.<name>.command`
#[must_use]
pub fn hookcmd_command(name: &str) -> String {
    format!("hookcmd.{name}.command")
}

/// Normalize a key for comparison
///
/// Section and variable names are case-insensitive; the subsection (the
/// middle part of a three-part key) keeps its case.
#[must_use]
pub fn normalize(key: &str) -> String {
    let (Some(first_dot), Some(last_dot)) = (key.find('.'), key.rfind('.')) else {
        return key.to_ascii_lowercase();
    };

    let section = key[..first_dot].to_ascii_lowercase();
    let variable = key[last_dot + 1..].to_ascii_lowercase();
    if first_dot == last_dot {
        format!("{section}.{variable}")
    } else {
        format!("{section}{}{variable}", &key[first_dot..=last_dot])
    }
}
