use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tias",
    about = "Quickly run code in almost any language.",
    after_help = "Type `help` at the prompt for the list of commands.",
    version
)]
pub struct Cli {
    /// Base URL of a Piston-compatible execution API.
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds to wait for the execution service.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Wrap code in a language's jargon without asking first.
    #[arg(long = "no-confirm")]
    pub no_confirm: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log debug information to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from(["tias", "--api-url", "http://localhost:2000", "--timeout", "5", "-v"])
            .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:2000"));
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.verbose && !cli.no_color && !cli.no_confirm);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["tias", "--timeout", "0"]).is_err());
    }
}
