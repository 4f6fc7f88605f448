use clap::Parser;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "campusdesk", version, about = "Terminal admin console for the campus platform")]
pub struct Args {
    /// Base URL of the platform API (e.g., "https://admin.example.edu/api")
    #[arg(short, long)]
    pub api_url: Option<Url>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Page to open on start (e.g., "users", "fees")
    #[arg(short, long)]
    pub page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_overrides() {
        let args = Args::try_parse_from([
            "campusdesk",
            "--api-url",
            "https://admin.example.edu/api",
            "-t",
            "30",
            "--page",
            "fees",
        ])
        .unwrap();
        assert_eq!(args.api_url.map(|u| u.to_string()).as_deref(), Some("https://admin.example.edu/api"));
        assert_eq!(args.timeout, Some(30));
        assert_eq!(args.page.as_deref(), Some("fees"));
    }

    #[test]
    fn test_rejects_malformed_url() {
        assert!(Args::try_parse_from(["campusdesk", "--api-url", "not a url"]).is_err());
    }
}
