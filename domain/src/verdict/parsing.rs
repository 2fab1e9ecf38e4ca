//! Judge response parsing.
//!
//! The judge is asked to answer in a fixed grammar:
//!
//! ```text
//! - User Score: <number>
//! - AI Score: <number>
//! - Winner: <User or AI>
//!
//! Feedback:
//! <3-6 sentences>
//! ```
//!
//! Models drift from it in small ways (markdown bold, `8/10`, a trailing
//! period), so labels are matched case-insensitively and decoration is
//! stripped. A labelled line whose value does not parse is skipped, so a
//! later well-formed line for the same field still counts. A field that never
//! parses is a [`VerdictParseError`].

use super::entities::{Verdict, Winner};
use thiserror::Error;

/// Why a judge response could not be turned into a [`Verdict`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerdictParseError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid score for {field}: {value}")]
    InvalidScore { field: &'static str, value: String },

    #[error("Invalid winner: {0}")]
    InvalidWinner(String),
}

/// Parse a judge response that follows the verdict grammar.
///
/// # Examples
///
/// ```
/// use arena_domain::verdict::parsing::parse_verdict;
/// use arena_domain::Winner;
///
/// let text = "- User Score: 7\n- AI Score: 8\n- Winner: AI\n\nFeedback:\nSolid rebuttals.";
/// let verdict = parse_verdict(text).unwrap();
/// assert_eq!(verdict.winner, Winner::Opponent);
/// assert_eq!(verdict.user_score, 7.0);
/// ```
pub fn parse_verdict(response: &str) -> Result<Verdict, VerdictParseError> {
    let mut user_score = None;
    let mut opponent_score = None;
    let mut winner = None;
    let mut feedback: Option<Vec<&str>> = None;

    for line in response.lines() {
        if let Some(lines) = feedback.as_mut() {
            lines.push(line);
            continue;
        }

        let Some((label, value)) = split_labelled(line) else {
            continue;
        };

        match label.as_str() {
            "user score" => record(&mut user_score, parse_score("user score", value)),
            "ai score" | "opponent score" | "assistant score" => {
                record(&mut opponent_score, parse_score("ai score", value))
            }
            "winner" => record(&mut winner, parse_winner(value)),
            "feedback" => feedback = Some(vec![value]),
            _ => {}
        }
    }

    let feedback = feedback
        .map(|lines| lines.join("\n").trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(VerdictParseError::MissingField("feedback"))?;

    Ok(Verdict {
        user_score: settle(user_score, "user score")?,
        opponent_score: settle(opponent_score, "ai score")?,
        winner: settle(winner, "winner")?,
        feedback,
        raw: response.to_string(),
    })
}

type Slot<T> = Option<Result<T, VerdictParseError>>;

/// Store a parse attempt. A failure never replaces a value already parsed.
fn record<T>(slot: &mut Slot<T>, parsed: Result<T, VerdictParseError>) {
    if parsed.is_ok() || !matches!(slot, Some(Ok(_))) {
        *slot = Some(parsed);
    }
}

/// The parsed value, else the last failure for the field, else `MissingField`.
fn settle<T>(slot: Slot<T>, field: &'static str) -> Result<T, VerdictParseError> {
    slot.unwrap_or(Err(VerdictParseError::MissingField(field)))
}

/// Split `- **Label:** value` into a normalized label and the raw value.
fn split_labelled(line: &str) -> Option<(String, &str)> {
    let line = line
        .trim()
        .trim_start_matches(['-', '*', '•', '#'])
        .trim_start();
    let (label, value) = line.split_once(':')?;
    let label = label.replace("**", "").trim().to_lowercase();
    if label.is_empty() {
        return None;
    }
    let value = value.trim().trim_start_matches("**").trim();
    Some((label, value))
}

fn parse_score(field: &'static str, value: &str) -> Result<f64, VerdictParseError> {
    let invalid = || VerdictParseError::InvalidScore {
        field,
        value: value.to_string(),
    };
    let token = value
        .replace("**", "")
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(invalid)?;
    let number = token.split('/').next().unwrap_or_default();
    let number = number.trim_end_matches(['.', ',', ';']);
    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(invalid)
}

fn parse_winner(value: &str) -> Result<Winner, VerdictParseError> {
    let word = value
        .replace("**", "")
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    match word.as_str() {
        "user" | "human" => Ok(Winner::User),
        "ai" | "opponent" | "assistant" => Ok(Winner::Opponent),
        _ => Err(VerdictParseError::InvalidWinner(value.to_string())),
    }
}
