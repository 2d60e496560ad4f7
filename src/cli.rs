//! Command-line parsing — one positional verb plus an optional
//! auto-confirm flag for `install`.

pub const USAGE: &str = "usage: wikistack [start|stop|restart|install] [-y|--yes]";

/// The action selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Restart,
    Install { assume_yes: bool },
}

/// Parse the argument list (without the program name).
///
/// An omitted verb means `install`, matching the original operator workflow
/// where running the tool bare performs first-time setup.
pub fn parse(args: &[String]) -> Result<Command, String> {
    let mut assume_yes = false;
    let mut verb: Option<&str> = None;

    for arg in args {
        match arg.as_str() {
            "-y" | "--yes" => assume_yes = true,
            other if verb.is_none() => verb = Some(other),
            _ => return Err(USAGE.to_string()),
        }
    }

    match verb.unwrap_or("install") {
        "start" => Ok(Command::Start),
        "stop" => Ok(Command::Stop),
        "restart" => Ok(Command::Restart),
        "install" => Ok(Command::Install { assume_yes }),
        _ => Err(USAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_args_default_to_install() {
        assert_eq!(
            parse(&[]),
            Ok(Command::Install { assume_yes: false })
        );
    }

    #[test]
    fn each_verb_parses() {
        assert_eq!(parse(&args(&["start"])), Ok(Command::Start));
        assert_eq!(parse(&args(&["stop"])), Ok(Command::Stop));
        assert_eq!(parse(&args(&["restart"])), Ok(Command::Restart));
        assert_eq!(
            parse(&args(&["install"])),
            Ok(Command::Install { assume_yes: false })
        );
    }

    #[test]
    fn yes_flag_sets_auto_confirm() {
        assert_eq!(
            parse(&args(&["install", "-y"])),
            Ok(Command::Install { assume_yes: true })
        );
        assert_eq!(
            parse(&args(&["--yes"])),
            Ok(Command::Install { assume_yes: true })
        );
    }

    #[test]
    fn unknown_verb_is_rejected_with_usage() {
        let err = parse(&args(&["frobnicate"])).unwrap_err();
        assert!(err.contains("usage:"));
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(parse(&args(&["start", "stop"])).is_err());
    }
}
