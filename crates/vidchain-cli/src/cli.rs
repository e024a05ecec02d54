use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use vidchain_shared::{encode_category, Category, Int, Nat, Principal};

#[derive(Parser, Debug)]
#[command(name = "vidchain", about = "Command-line client for the VidChain canister")]
pub struct Cli {
    /// Gateway base URL (overrides VIDCHAIN_GATEWAY_URL)
    #[arg(long, global = true)]
    pub gateway: Option<String>,

    /// Backend canister id (overrides VIDCHAIN_CANISTER_ID)
    #[arg(long, global = true)]
    pub canister: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List trending videos
    Trending,

    /// Search videos by text, optionally within a category
    Search {
        query: String,
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },

    /// List every video in a category
    Category {
        #[arg(value_parser = parse_category)]
        category: Category,
    },

    /// Show a single video
    Video {
        #[arg(value_parser = parse_nat)]
        id: Nat,
    },

    /// List videos uploaded by a principal
    Uploads {
        #[arg(value_parser = parse_principal)]
        user: Principal,
    },

    /// Show your profile, or another user's
    Profile {
        #[arg(value_parser = parse_principal)]
        user: Option<Principal>,
    },

    /// Update your profile
    SetProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Date of birth, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        birthday: Option<NaiveDate>,
    },

    /// Show your token balance
    Balance,

    /// Show analytics for your channel
    Analytics,

    /// Upload a video file
    Upload {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_category, default_value = "LongForm")]
        category: Category,
        #[arg(long)]
        channel: String,
        /// Duration in seconds
        #[arg(long)]
        duration: u64,
        /// Thumbnail image
        #[arg(long)]
        thumbnail: Option<PathBuf>,
        /// Force the short-form flag instead of deriving it from the file size
        #[arg(long)]
        short: Option<bool>,
        media: PathBuf,
    },

    /// Soft-delete one of your videos
    Delete {
        #[arg(value_parser = parse_nat)]
        id: Nat,
    },

    /// Record a view
    Watch {
        #[arg(value_parser = parse_nat)]
        id: Nat,
    },

    /// Like a video
    Like {
        #[arg(value_parser = parse_nat)]
        id: Nat,
    },

    /// Dislike a video
    Dislike {
        #[arg(value_parser = parse_nat)]
        id: Nat,
    },

    /// Report a video
    Report {
        #[arg(value_parser = parse_nat)]
        id: Nat,
        reason: String,
    },

    /// Stake tokens
    Stake {
        #[arg(value_parser = parse_nat)]
        amount: Nat,
    },

    /// Mint an NFT for one of your videos
    Mint {
        #[arg(value_parser = parse_nat)]
        id: Nat,
        contract: String,
    },
}

fn parse_nat(s: &str) -> Result<Nat, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected a non-negative integer, got {s:?}"));
    }
    s.parse::<Nat>().map_err(|e| e.to_string())
}

fn parse_principal(s: &str) -> Result<Principal, String> {
    Principal::from_text(s).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{s:?}: {e}"))
}

/// Midnight UTC of `date`, in seconds since the Unix epoch.
pub fn birthday_secs(date: NaiveDate) -> Int {
    Int::from(date.and_time(NaiveTime::default()).and_utc().timestamp())
}

fn parse_category(s: &str) -> Result<Category, String> {
    Ok(encode_category(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nat_wide() {
        let n = parse_nat("123456789012345678901234567890").unwrap();
        assert_eq!(n.0.to_string(), "123456789012345678901234567890");
        assert!(parse_nat("-4").is_err());
        assert!(parse_nat("4.5").is_err());
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "vidchain",
            "--canister",
            "rrkah-fqaaa-aaaaa-aaaaq-cai",
            "upload",
            "--title",
            "Sunset",
            "--channel",
            "skies",
            "--duration",
            "12",
            "--category",
            "Podcast",
            "sunset.mp4",
        ])
        .unwrap();

        assert_eq!(cli.canister.as_deref(), Some("rrkah-fqaaa-aaaaa-aaaaq-cai"));
        match cli.command {
            Command::Upload { category, duration, media, .. } => {
                assert_eq!(category, Category::Other);
                assert_eq!(duration, 12);
                assert_eq!(media, PathBuf::from("sunset.mp4"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_set_profile() {
        let cli = Cli::try_parse_from([
            "vidchain",
            "set-profile",
            "--name",
            "Ada",
            "--birthday",
            "1990-12-10",
        ])
        .unwrap();
        match cli.command {
            Command::SetProfile { name, email, birthday, .. } => {
                assert_eq!(name, "Ada");
                assert_eq!(email, None);
                assert_eq!(birthday, NaiveDate::from_ymd_opt(1990, 12, 10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["vidchain", "set-profile", "--name", "A", "--birthday", "10/12/1990"]).is_err());
    }

    #[test]
    fn test_birthday_is_epoch_seconds() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(birthday_secs(day(2000, 1, 1)), Int::from(946_684_800i64));
        assert_eq!(birthday_secs(day(1970, 1, 1)), Int::from(0i64));
        assert_eq!(birthday_secs(day(1600, 1, 1)), Int::from(-11_676_096_000i64));
    }

    #[test]
    fn test_parse_search_with_category() {
        let cli = Cli::try_parse_from(["vidchain", "search", "rust", "--category", "Technology"])
            .unwrap();
        match cli.command {
            Command::Search { query, category } => {
                assert_eq!(query, "rust");
                assert_eq!(category, Some(Category::Technology));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
