use std::path::PathBuf;

use crate::error::TermError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub help: bool,
}

pub fn print_help() {
    println!("starwish-term - holiday countdown and wish launcher");
    println!();
    println!("USAGE:");
    println!("  starwish-term [--config <path>] [--seed <n>]");
    println!();
    println!("Type a wish and press enter. Ctrl-C quits.");
    println!("Config defaults to <config dir>/starwish/config.json when present.");
    println!("Set RUST_LOG=debug for scheduler logs.");
}

pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Options, TermError> {
    let mut opts = Options::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => opts.help = true,
            "--config" => {
                let v = it
                    .next()
                    .ok_or_else(|| TermError::Args("--config needs a path".into()))?;
                opts.config = Some(PathBuf::from(v));
            }
            "--seed" => {
                let v = it
                    .next()
                    .ok_or_else(|| TermError::Args("--seed needs a number".into()))?;
                let n = v
                    .parse::<u64>()
                    .map_err(|_| TermError::Args(format!("invalid --seed: {v}")))?;
                opts.seed = Some(n);
            }
            other => return Err(TermError::Args(format!("unknown argument: {other}"))),
        }
    }
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let o = parse(args(&["--config", "/tmp/c.json", "--seed", "7"])).unwrap();
        assert_eq!(o.config, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(o.seed, Some(7));
        assert!(!o.help);
        assert!(parse(args(&["-h"])).unwrap().help);
        assert_eq!(parse(Vec::new()).unwrap(), Options::default());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse(args(&["--seed"])), Err(TermError::Args(_))));
        assert!(matches!(parse(args(&["--seed", "x"])), Err(TermError::Args(_))));
        assert!(matches!(parse(args(&["--fast"])), Err(TermError::Args(_))));
    }
}
