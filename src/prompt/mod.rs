use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::trip::TripRequest;

const PREFERENCE_SEPARATOR: &str = ", ";

/// Same names on the command line and in the config file.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[value(name = "en", alias = "english")]
    #[serde(rename = "en", alias = "english")]
    English,
    #[value(name = "zh-tw", alias = "zh-hant")]
    #[serde(rename = "zh-tw", alias = "zh-hant")]
    TraditionalChinese,
}

/// Rendered instruction text, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptText(String);

impl PromptText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn system_prompt(lang: Language) -> String {
    match lang {
        Language::English => "You are a professional travel-planning AI.".to_string(),
        Language::TraditionalChinese => "你是專業旅遊規劃 AI".to_string(),
    }
}

fn template_en() -> &'static str {
r#"You are a professional travel-planning AI agent.

Destination: {destination}
Start date: {date}
Trip length: {days} day(s)
Preferences: {preferences}

Produce a day-by-day itinerary with a Morning / Afternoon / Evening plan for each day,
then finish with a short list of practical travel tips. Format the answer as Markdown."#
}

fn template_zh_tw() -> &'static str {
r#"你是一個專業的旅遊規劃 AI Agent。

城市：{destination}
日期：{date}
天數：{days}
偏好：{preferences}

請產生每天「早上 / 下午 / 晚上」的旅遊行程，
並附上旅遊小提醒，使用繁體中文。"#
}

// Newlines and tabs survive; other control characters would only corrupt the template.
fn clean(field: &str) -> String {
    field
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Fill `{name}` placeholders in one left-to-right pass. Substituted text is
/// never scanned again, so braces in user input stay literal.
fn render(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| lookup(&after[..close]).map(|v| (close, v))) {
            Some((close, value)) => {
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render a trip into prompt text. Pure; the same request always yields the same bytes.
pub fn build_prompt(req: &TripRequest, lang: Language) -> PromptText {
    let template = match lang {
        Language::English => template_en(),
        Language::TraditionalChinese => template_zh_tw(),
    };
    let text = render(template, |name| match name {
        "destination" => Some(clean(req.destination())),
        "date" => Some(req.start_date().format("%Y-%m-%d").to_string()),
        "days" => Some(req.duration_days().to_string()),
        "preferences" => Some(
            req.preferences()
                .iter()
                .map(|p| clean(p))
                .collect::<Vec<_>>()
                .join(PREFERENCE_SEPARATOR),
        ),
        _ => None,
    });
    PromptText(text)
}

/// Tags used when none are given. The Chinese form preselects food and photography.
pub fn default_preferences(lang: Language) -> Vec<String> {
    match lang {
        Language::English => Vec::new(),
        Language::TraditionalChinese => vec!["美食".to_string(), "拍照".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kyoto(prefs: &[&str]) -> TripRequest {
        TripRequest::new(
            "Kyoto",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            3,
            prefs.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn same_request_same_bytes() {
        let req = kyoto(&["food", "photography"]);
        for lang in [Language::English, Language::TraditionalChinese] {
            assert_eq!(build_prompt(&req, lang), build_prompt(&req, lang));
        }
    }

    #[test]
    fn substitutes_every_field() {
        let text = build_prompt(&kyoto(&["food", "photography"]), Language::English);
        let s = text.as_str();
        assert!(s.contains("Kyoto"));
        assert!(s.contains("2024-05-01"));
        assert!(s.contains("3 day"));
        assert!(s.contains("food, photography"));
        assert!(!s.contains('{'));
    }

    #[test]
    fn chinese_template_keeps_fields() {
        let text = build_prompt(&kyoto(&["美食", "拍照"]), Language::TraditionalChinese);
        assert!(text.as_str().contains("城市：Kyoto"));
        assert!(text.as_str().contains("天數：3"));
        assert!(text.as_str().contains("偏好：美食, 拍照"));
    }

    #[test]
    fn empty_preferences_still_render() {
        let text = build_prompt(&kyoto(&[]), Language::English);
        assert!(!text.as_str().is_empty());
        assert!(text.as_str().contains("Preferences: \n"));
    }

    #[test]
    fn placeholders_in_user_text_stay_literal() {
        let req = TripRequest::new(
            "Café {days} {date}",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            3,
            vec!["{destination}".into(), "food".into()],
        )
        .unwrap();
        let text = build_prompt(&req, Language::English);
        assert!(text.as_str().contains("Destination: Café {days} {date}\n"));
        assert!(text.as_str().contains("Preferences: {destination}, food\n"));
        assert!(text.as_str().contains("Trip length: 3 day(s)"));
    }

    #[test]
    fn unknown_and_unclosed_braces_are_copied() {
        let out = render("a {x} {y b {", |n| (n == "x").then(|| "1".to_string()));
        assert_eq!(out, "a 1 {y b {");
    }

    #[test]
    fn chinese_defaults_to_food_and_photos() {
        assert!(default_preferences(Language::English).is_empty());
        assert_eq!(default_preferences(Language::TraditionalChinese), vec!["美食", "拍照"]);
    }

    #[test]
    fn language_names_match_cli_values() {
        let en: Language = serde_json::from_str("\"en\"").unwrap();
        let zh: Language = serde_json::from_str("\"zh-tw\"").unwrap();
        assert_eq!(en, Language::English);
        assert_eq!(zh, Language::TraditionalChinese);
        assert_eq!(serde_json::to_string(&Language::TraditionalChinese).unwrap(), "\"zh-tw\"");
        let alias: Language = serde_json::from_str("\"english\"").unwrap();
        assert_eq!(alias, Language::English);
    }

    #[test]
    fn control_characters_are_stripped() {
        let req = TripRequest::new(
            "Ky\u{0007}oto\u{001b}",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            1,
            vec!["fo\u{0000}od".into()],
        )
        .unwrap();
        let text = build_prompt(&req, Language::English);
        assert!(text.as_str().contains("Destination: Kyoto\n"));
        assert!(text.as_str().contains("Preferences: food\n"));
    }
}
