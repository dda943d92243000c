//! Package-manager argument inspection

use std::sync::LazyLock;

use regex::Regex;

use crate::version::types::{LATEST, PackageSpec};

/// Subcommands that install packages and therefore need validation
pub const INSTALL_COMMANDS: [&str; 3] = ["install", "i", "add"];

/// `name[@version]`, where name may be scoped (`@scope/name`)
static PACKAGE_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(@?[^@]+)(?:@(.+))?$").expect("valid package argument pattern"));

pub fn is_install_command(args: &[String]) -> bool {
    args.iter().any(|arg| INSTALL_COMMANDS.contains(&arg.as_str()))
}

/// Package specs named after the first install subcommand.
///
/// Flags are skipped. A package without an explicit version requests "latest".
pub fn extract_packages(args: &[String]) -> Vec<PackageSpec> {
    let Some(install_pos) = args
        .iter()
        .position(|arg| INSTALL_COMMANDS.contains(&arg.as_str()))
    else {
        return Vec::new();
    };

    args[install_pos + 1..]
        .iter()
        .filter(|arg| !arg.starts_with('-'))
        .filter(|arg| !INSTALL_COMMANDS.contains(&arg.as_str()))
        .filter_map(|arg| {
            let captures = PACKAGE_ARG.captures(arg)?;
            let name = captures.get(1)?.as_str();
            let version = captures.get(2).map_or(LATEST, |m| m.as_str());
            Some(PackageSpec::new(name, version))
        })
        .collect()
}
