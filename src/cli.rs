use clap::Parser;

use crate::navigation::Route;

#[derive(Parser, Debug)]
#[command(
    name = "lazyview",
    version,
    about = "Terminal UI demonstrating view locking and awaitable dialogs"
)]
pub struct Args {
    /// Page to start on (index, counter, fetch-data)
    #[arg(short, long, default_value_t = Route::Index)]
    pub page: Route,

    /// Theme name, overriding the config file (e.g., "Catppuccin Latte")
    #[arg(short, long)]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lazyview"]);
        assert_eq!(args.page, Route::Index);
        assert!(args.theme.is_none());
    }

    #[test]
    fn test_page_and_theme() {
        let args = Args::parse_from(["lazyview", "--page", "fetch-data", "-t", "latte"]);
        assert_eq!(args.page, Route::FetchData);
        assert_eq!(args.theme.as_deref(), Some("latte"));
    }

    #[test]
    fn test_unknown_page_is_rejected() {
        assert!(Args::try_parse_from(["lazyview", "--page", "weather"]).is_err());
    }
}
