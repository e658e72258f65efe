use crate::models::ViewState;
use colored::*;
use std::fmt;

pub const LOADING_TEXT: &str = "Loading data...";
pub const IDLE_PROMPT: &str = "Enter a repository to get started.";

/// The single block shown for a view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBlock {
    LoadingIndicator,
    ErrorMessage(String),
    SummaryCard(SummaryCard),
    IdlePrompt,
}

/// Success card with counters already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub stars: String,
    pub forks: String,
    pub open_issues: String,
}

impl SummaryCard {
    pub fn stars_line(&self) -> String {
        format!("⭐ {} Stars", self.stars)
    }

    pub fn forks_line(&self) -> String {
        format!("🍴 {} Forks", self.forks)
    }

    pub fn open_issues_line(&self) -> String {
        format!("🐞 {} Open Issues", self.open_issues)
    }
}

impl ViewBlock {
    pub fn from_state(state: &ViewState) -> Self {
        match state {
            ViewState::Loading => ViewBlock::LoadingIndicator,
            ViewState::Error(message) => ViewBlock::ErrorMessage(message.clone()),
            ViewState::Success(summary) => ViewBlock::SummaryCard(SummaryCard {
                title: summary.name.clone(),
                link: summary.html_url.clone(),
                description: summary.description.clone(),
                stars: format_count(summary.stargazers_count),
                forks: format_count(summary.forks_count),
                open_issues: format_count(summary.open_issues_count),
            }),
            ViewState::Idle => ViewBlock::IdlePrompt,
        }
    }

    /// Uncoloured text, one line per visual row
    pub fn to_plain_text(&self) -> String {
        match self {
            ViewBlock::LoadingIndicator => LOADING_TEXT.to_string(),
            ViewBlock::ErrorMessage(message) => message.clone(),
            ViewBlock::IdlePrompt => IDLE_PROMPT.to_string(),
            ViewBlock::SummaryCard(card) => {
                let mut lines = vec![format!("{} <{}>", card.title, card.link)];
                if let Some(description) = &card.description {
                    lines.push(description.clone());
                }
                lines.push(format!(
                    "{}  {}  {}",
                    card.stars_line(),
                    card.forks_line(),
                    card.open_issues_line()
                ));
                lines.join("\n")
            }
        }
    }
}

impl fmt::Display for ViewBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewBlock::LoadingIndicator => write!(f, "{}", LOADING_TEXT.dimmed()),
            ViewBlock::ErrorMessage(message) => write!(f, "{}", message.red().bold()),
            ViewBlock::IdlePrompt => write!(f, "{}", IDLE_PROMPT.dimmed()),
            ViewBlock::SummaryCard(card) => {
                writeln!(f, "{} {}", card.title.bold(), format!("<{}>", card.link).underline())?;
                if let Some(description) = &card.description {
                    writeln!(f, "{}", description)?;
                }
                write!(
                    f,
                    "⭐ {} Stars  🍴 {} Forks  🐞 {} Open Issues",
                    card.stars.bold(),
                    card.forks.bold(),
                    card.open_issues.bold()
                )
            }
        }
    }
}

/// Formats a counter with comma thousands separators (`1234567` -> `1,234,567`).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
