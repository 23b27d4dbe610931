use std::fmt;

use crate::error::DispatchError;

const ACCEPT_PACKAGE_AGREEMENTS: &str = "--accept-package-agreements";
const ACCEPT_SOURCE_AGREEMENTS: &str = "--accept-source-agreements";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Install,
    Uninstall,
    Search,
    List,
    Upgrade,
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Operation::Install => "install",
            Operation::Uninstall => "uninstall",
            Operation::Search => "search",
            Operation::List => "list",
            Operation::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built invocation of the package manager: program, subcommand,
/// arguments and flags, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PackageCommand {
    fn new(tool: &str, operation: Operation) -> Self {
        Self {
            program: tool.to_string(),
            args: vec![operation.as_str().to_string()],
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn argv(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(|s| s.as_str()))
    }
}

impl fmt::Display for PackageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().collect::<Vec<_>>().join(" "))
    }
}

/// What the user asked for, kept alongside the command so the UI can
/// describe it while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub operation: Operation,
    pub subject: String,
    pub command: PackageCommand,
}

fn split_packages(operation: Operation, text: &str) -> Result<Vec<String>, DispatchError> {
    let packages: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    if packages.is_empty() {
        return Err(DispatchError::EmptyInput(operation));
    }
    Ok(packages)
}

pub fn install(tool: &str, text: &str) -> Result<Request, DispatchError> {
    let packages = split_packages(Operation::Install, text)?;
    let subject = packages.join(" ");
    let command = PackageCommand::new(tool, Operation::Install)
        .args(packages)
        .arg(ACCEPT_PACKAGE_AGREEMENTS)
        .arg(ACCEPT_SOURCE_AGREEMENTS);
    Ok(Request { operation: Operation::Install, subject, command })
}

pub fn uninstall(tool: &str, text: &str) -> Result<Request, DispatchError> {
    let packages = split_packages(Operation::Uninstall, text)?;
    let subject = packages.join(" ");
    let command = PackageCommand::new(tool, Operation::Uninstall)
        .args(packages)
        .arg(ACCEPT_SOURCE_AGREEMENTS);
    Ok(Request { operation: Operation::Uninstall, subject, command })
}

/// The query goes through as a single token, spaces included.
pub fn search(tool: &str, text: &str) -> Result<Request, DispatchError> {
    if text.trim().is_empty() {
        return Err(DispatchError::EmptyInput(Operation::Search));
    }
    let command = PackageCommand::new(tool, Operation::Search).arg(text);
    Ok(Request { operation: Operation::Search, subject: text.to_string(), command })
}

pub fn list_installed(tool: &str) -> Request {
    Request {
        operation: Operation::List,
        subject: String::new(),
        command: PackageCommand::new(tool, Operation::List),
    }
}

pub fn upgrade_all(tool: &str) -> Request {
    let command = PackageCommand::new(tool, Operation::Upgrade)
        .arg("--all")
        .arg(ACCEPT_PACKAGE_AGREEMENTS)
        .arg(ACCEPT_SOURCE_AGREEMENTS);
    Request { operation: Operation::Upgrade, subject: String::new(), command }
}

/// Builds the request for `operation` from whatever is in the input field.
/// List and Upgrade ignore the text.
pub fn build(operation: Operation, tool: &str, text: &str) -> Result<Request, DispatchError> {
    match operation {
        Operation::Install => install(tool, text),
        Operation::Uninstall => uninstall(tool, text),
        Operation::Search => search(tool, text),
        Operation::List => Ok(list_installed(tool)),
        Operation::Upgrade => Ok(upgrade_all(tool)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(request: &Request) -> Vec<&str> {
        request.command.argv().collect()
    }

    #[test]
    fn install_splits_and_keeps_order() {
        let request = install("winget", "  Microsoft.PowerToys \t Git.Git\n7zip.7zip ").unwrap();
        assert_eq!(
            argv(&request),
            vec![
                "winget",
                "install",
                "Microsoft.PowerToys",
                "Git.Git",
                "7zip.7zip",
                "--accept-package-agreements",
                "--accept-source-agreements",
            ]
        );
        assert_eq!(request.subject, "Microsoft.PowerToys Git.Git 7zip.7zip");
    }

    #[test]
    fn uninstall_only_accepts_source_agreements() {
        let request = uninstall("winget", "Git.Git").unwrap();
        assert_eq!(
            argv(&request),
            vec!["winget", "uninstall", "Git.Git", "--accept-source-agreements"]
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        for text in ["", "   ", "\t\n"] {
            assert!(matches!(install("winget", text), Err(DispatchError::EmptyInput(Operation::Install))));
            assert!(matches!(uninstall("winget", text), Err(DispatchError::EmptyInput(Operation::Uninstall))));
            assert!(matches!(search("winget", text), Err(DispatchError::EmptyInput(Operation::Search))));
        }
    }

    #[test]
    fn search_passes_query_as_one_token() {
        let request = search("winget", " microsoft visualstudio ").unwrap();
        assert_eq!(argv(&request), vec!["winget", "search", " microsoft visualstudio "]);
    }

    #[test]
    fn list_and_upgrade_ignore_input() {
        let list = build(Operation::List, "winget", "ignored text").unwrap();
        assert_eq!(argv(&list), vec!["winget", "list"]);

        let upgrade = build(Operation::Upgrade, "winget", "").unwrap();
        assert_eq!(
            argv(&upgrade),
            vec![
                "winget",
                "upgrade",
                "--all",
                "--accept-package-agreements",
                "--accept-source-agreements",
            ]
        );
    }

    #[test]
    fn display_joins_tokens() {
        let request = install("winget", "a b").unwrap();
        assert_eq!(
            request.command.to_string(),
            "winget install a b --accept-package-agreements --accept-source-agreements"
        );
    }
}
