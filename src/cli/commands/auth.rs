use clap::{Arg, Command};

pub const ARG_JWT_SECRET: &str = "jwt-secret";
pub const ARG_TOKEN_TTL_HOURS: &str = "token-ttl-hours";
pub const ARG_BCRYPT_COST: &str = "bcrypt-cost";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_JWT_SECRET)
                .long(ARG_JWT_SECRET)
                .help("Symmetric secret used to sign session tokens")
                .env("JITEN_JWT_SECRET")
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL_HOURS)
                .long(ARG_TOKEN_TTL_HOURS)
                .help("Session token lifetime in hours")
                .default_value("72")
                .env("JITEN_TOKEN_TTL_HOURS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_BCRYPT_COST)
                .long(ARG_BCRYPT_COST)
                .help("bcrypt cost factor for password hashing")
                .default_value("12")
                .env("JITEN_BCRYPT_COST")
                .value_parser(clap::value_parser!(u32).range(4..=18)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("JITEN_TOKEN_TTL_HOURS", None::<&str>),
                ("JITEN_BCRYPT_COST", None::<&str>),
            ],
            || {
                let command = with_args(Command::new("test"));
                let matches =
                    command.get_matches_from(vec!["test", "--jwt-secret", "s3cret"]);
                assert_eq!(
                    matches.get_one::<u64>(ARG_TOKEN_TTL_HOURS).copied(),
                    Some(72)
                );
                assert_eq!(matches.get_one::<u32>(ARG_BCRYPT_COST).copied(), Some(12));
            },
        );
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        let command = with_args(Command::new("test"));
        let result = command.try_get_matches_from(vec![
            "test",
            "--jwt-secret",
            "s3cret",
            "--bcrypt-cost",
            "32",
        ]);
        assert!(result.is_err());
    }
}
