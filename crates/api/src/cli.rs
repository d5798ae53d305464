//! Command-line interface of the server binary.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "coffeeshop-api", version, about = "Coffee shop drinks API server")]
pub struct Cli {
    /// Apply pending database migrations and exit without serving.
    #[arg(long, default_value_t = false)]
    pub migrate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_serves() {
        let cli = Cli::try_parse_from(["coffeeshop-api"]).unwrap();
        assert!(!cli.migrate);
    }

    #[test]
    fn migrate_flag_is_recognised() {
        let cli = Cli::try_parse_from(["coffeeshop-api", "--migrate"]).unwrap();
        assert!(cli.migrate);
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["coffeeshop-api", "migrate"]).is_err());
        assert!(Cli::try_parse_from(["coffeeshop-api", "--migrations"]).is_err());
    }
}
