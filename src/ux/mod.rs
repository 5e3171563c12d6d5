use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::errors::PlannerError;
use crate::trip::TripRequest;
use crate::wire::CompletionResult;

pub fn show_request(req: &TripRequest, models: &[String]) {
    println!("\n=== TRIP ===");
    println!("{} {}", "Destination:".bold(), req.destination());
    println!("{} {}", "Start date: ".bold(), req.start_date().format("%Y-%m-%d"));
    println!("{} {}", "Days:       ".bold(), req.duration_days());
    if req.preferences().is_empty() {
        println!("{} (none)", "Preferences:".bold());
    } else {
        println!("{} {}", "Preferences:".bold(), req.preferences().join(", "));
    }
    println!("{} {}", "Models:     ".bold(), models.join(" → ").dimmed());
    println!();
}

pub fn spinner(enabled: bool, msg: &str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Markdown headings in bold, everything else as-is.
pub fn render_markdown(text: &str) -> String {
    text.lines()
        .map(|l| {
            if l.trim_start().starts_with('#') {
                l.bold().to_string()
            } else {
                l.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_itinerary(res: &CompletionResult) {
    println!("{}", "┏━━━━━━━━━━━━━━━━━━━━━━━━ Itinerary ━━━━━━━━━━━━━━━━━━━━━━━┓".bold());
    println!("{}\n", render_markdown(&res.text));
    println!("{}", format!("generated by {}", res.model_used).dimmed());
}

pub fn print_failure(err: &PlannerError) {
    println!("\n{} {}", "✗".red().bold(), err.user_message().red());

    if let PlannerError::Exhausted(failure) = err {
        println!("\n{}", "Attempts:".bold());
        for (i, e) in failure.errors.iter().enumerate() {
            println!("[{}] {}  {}", i + 1, e.model.bold(), e.kind.label().yellow());
            println!("{}", indent(&e.message, 4));
        }
    } else {
        println!("{}", err.to_string().dimmed());
    }
}

fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", pad, l))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_are_kept_and_body_untouched() {
        colored::control::set_override(false);
        let out = render_markdown("## Day 1\nMorning: market\n  # nested");
        assert_eq!(out, "## Day 1\nMorning: market\n  # nested");
    }

    #[test]
    fn indent_pads_each_line() {
        assert_eq!(indent("a\nb", 2), "  a\n  b");
    }
}
