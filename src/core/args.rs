use clap::Parser;
use log::kv::{ToValue, Value};

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<String>,
    /// Overrides `data.dir` from the config
    #[arg(short, long)]
    pub data_dir: Option<String>,
    /// Print the dashboard for this query as JSON and exit instead of serving
    #[arg(short, long)]
    pub query: Option<String>,
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = CliArgs::parse_from(["self", "--config", "foo"]);
        assert_eq!(
            args,
            CliArgs {
                config: Some("foo".to_string()),
                data_dir: None,
                query: None,
            }
        );
    }

    #[test]
    fn test_one_shot_query_args() {
        let args = CliArgs::parse_from(["self", "-d", "/tmp/data", "-q", "2330"]);
        assert_eq!(args.data_dir.as_deref(), Some("/tmp/data"));
        assert_eq!(args.query.as_deref(), Some("2330"));
        assert_eq!(args.config, None);
    }
}
