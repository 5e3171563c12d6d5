use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::prompt::Language;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(name = "openai", alias = "open-ai")]
    OpenAI,
    #[value(name = "gemini", alias = "google")]
    Gemini,
}

impl ProviderKind {
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_models(&self) -> Vec<String> {
        match self {
            ProviderKind::OpenAI => vec!["gpt-4o-mini".into(), "gpt-3.5-turbo".into()],
            ProviderKind::Gemini => vec!["gemini-1.5-flash".into(), "gemini-pro".into()],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "trip_planner", version, about = "Generate a day-by-day travel itinerary with a generative-language API")]
pub struct Args {
    /// City or region to visit
    #[arg(long, short = 'd')]
    pub destination: String,

    /// First day of the trip (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long, default_value_t = 3)]
    pub days: u32,

    /// Preference tag; repeat or comma-separate. Defaults depend on --language
    #[arg(long = "prefer", value_delimiter = ',')]
    pub preferences: Vec<String>,

    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Candidate model, highest priority first; repeat or comma-separate
    #[arg(long = "model", value_delimiter = ',')]
    pub models: Vec<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long, value_enum)]
    pub language: Option<Language>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<String>,

    /// Print the prompt and exit without calling the API
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Explicit tags win; otherwise the language's preselected tags.
    pub fn preferences_for(&self, lang: Language) -> Vec<String> {
        if self.preferences.is_empty() {
            crate::prompt::default_preferences(lang)
        } else {
            self.preferences.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_and_comma_lists() {
        let args = Args::try_parse_from([
            "trip_planner",
            "--destination", "Kyoto",
            "--date", "2024-05-01",
            "--prefer", "food,photography",
            "--prefer", "culture",
            "--model", "a,b",
            "--provider", "gemini",
            "--language", "zh-tw",
        ])
        .unwrap();
        assert_eq!(args.destination, "Kyoto");
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(args.days, 3);
        assert_eq!(args.preferences, vec!["food", "photography", "culture"]);
        assert_eq!(args.models, vec!["a", "b"]);
        assert_eq!(args.provider, Some(ProviderKind::Gemini));
        assert_eq!(args.language, Some(Language::TraditionalChinese));
    }

    #[test]
    fn destination_is_required() {
        assert!(Args::try_parse_from(["trip_planner"]).is_err());
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Args::try_parse_from(["trip_planner", "-d", "Kyoto", "--date", "May 1st"]).is_err());
    }

    #[test]
    fn chinese_output_preselects_tags_unless_given() {
        let args = Args::try_parse_from(["trip_planner", "-d", "Taipei"]).unwrap();
        assert_eq!(args.preferences_for(Language::TraditionalChinese), vec!["美食", "拍照"]);
        assert!(args.preferences_for(Language::English).is_empty());

        let args = Args::try_parse_from(["trip_planner", "-d", "Taipei", "--prefer", "文化"]).unwrap();
        assert_eq!(args.preferences_for(Language::TraditionalChinese), vec!["文化"]);
    }
}
