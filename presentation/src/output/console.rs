//! Console output formatter for debate sessions and results

use arena_domain::{DebateResult, DebateSession, Message, OutputFormat, Role, Verdict};
use colored::Colorize;
use serde_json::json;

/// Formats debate sessions and results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a session in the requested format.
    pub fn format(session: &DebateSession, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format_full(session),
            OutputFormat::Verdict => match session.result() {
                Some(result) => Self::format_result(result),
                None => Self::format_status(session),
            },
            OutputFormat::Json => Self::format_json(session),
        }
    }

    /// Header, transcript and (when available) the result.
    pub fn format_full(session: &DebateSession) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate Arena"));
        output.push('\n');
        output.push_str(&Self::format_status(session));

        output.push_str(&Self::section_header("Transcript"));
        output.push_str(&Self::format_transcript(session));

        if let Some(result) = session.result() {
            output.push_str(&Self::section_header("Result"));
            output.push('\n');
            output.push_str(&Self::format_result(result));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Topic, difficulty, participant and round progress.
    pub fn format_status(session: &DebateSession) -> String {
        let mut output = String::new();
        let unset = || "(not chosen)".to_string();

        output.push_str(&format!(
            "{} {}\n",
            "Participant:".cyan().bold(),
            session
                .participant_name()
                .map(|n| n.to_string())
                .unwrap_or_else(unset)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Topic:".cyan().bold(),
            session
                .topic()
                .map(|t| t.to_string())
                .unwrap_or_else(unset)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Difficulty:".cyan().bold(),
            session
                .difficulty()
                .map(|d| d.to_string())
                .unwrap_or_else(unset)
        ));
        output.push_str(&format!(
            "{} {}/{} ({})\n",
            "Rounds:".cyan().bold(),
            session.round_count(),
            session.rules().max_rounds,
            session.phase().display_name()
        ));

        output
    }

    /// The visible transcript, one block per message.
    pub fn format_transcript(session: &DebateSession) -> String {
        let mut output = String::new();
        let transcript = session.transcript();

        if transcript.dropped_count() > 0 {
            output.push_str(&format!(
                "\n{}\n",
                format!(
                    "({} earlier messages are no longer kept)",
                    transcript.dropped_count()
                )
                .dimmed()
            ));
        }

        let participant = session
            .participant_name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "You".to_string());

        let mut visible = transcript.visible_messages().peekable();
        if visible.peek().is_none() {
            output.push_str(&format!("\n{}\n", "No statements yet.".dimmed()));
            return output;
        }

        for message in visible {
            output.push_str(&Self::format_message(message, &participant));
        }
        output
    }

    fn format_message(message: &Message, participant: &str) -> String {
        let label = match message.role {
            Role::User => format!("── {} ──", participant).green().bold(),
            Role::Assistant => "── AI ──".to_string().yellow().bold(),
            Role::System => "── system ──".to_string().dimmed(),
        };
        format!("\n{}\n{}\n", label, Self::indent(&message.content, "  "))
    }

    /// Scores, winner and feedback, or the judge's raw text.
    pub fn format_result(result: &DebateResult) -> String {
        match result {
            DebateResult::Scored(verdict) => Self::format_verdict(verdict),
            DebateResult::Unstructured { raw } => {
                let mut output = String::new();
                output.push_str(&format!("{}\n\n", "=== Debate Result ===".cyan().bold()));
                output.push_str(&format!(
                    "{}\n\n",
                    "The judge's answer did not follow the scoring format; shown as received:"
                        .yellow()
                ));
                output.push_str(raw.trim());
                output.push('\n');
                output
            }
        }
    }

    fn format_verdict(verdict: &Verdict) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Debate Result ===".cyan().bold()));
        output.push_str(&format!(
            "{} {}\n",
            "User Score:".bold(),
            Self::format_score(verdict.user_score)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "AI Score:".bold(),
            Self::format_score(verdict.opponent_score)
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Winner:".bold(),
            verdict.winner.to_string().green().bold()
        ));
        output.push_str(&format!("{}\n", "Feedback:".cyan().bold()));
        output.push_str(verdict.feedback.trim());
        output.push('\n');

        output
    }

    /// Format as JSON
    pub fn format_json(session: &DebateSession) -> String {
        let transcript: Vec<_> = session
            .transcript()
            .visible_messages()
            .map(|m| json!({ "role": m.role, "content": m.content }))
            .collect();

        let document = json!({
            "participant": session.participant_name().map(|n| n.as_str()),
            "topic": session.topic(),
            "difficulty": session.difficulty(),
            "phase": session.phase(),
            "rounds": session.round_count(),
            "max_rounds": session.rules().max_rounds,
            "dropped_messages": session.transcript().dropped_count(),
            "transcript": transcript,
            "result": session.result(),
        });

        serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
    }

    /// Whole scores print without a fractional part.
    pub fn format_score(score: f64) -> String {
        if score.fract() == 0.0 {
            format!("{:.0}", score)
        } else {
            format!("{}", score)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::{Difficulty, Topic, Winner, parse_verdict};

    fn plain() {
        colored::control::set_override(false);
    }

    fn finished_session() -> DebateSession {
        let mut session = DebateSession::new();
        session.set_participant_name("Ada").unwrap();
        session.choose_topic(Topic::RecreationalDrugs).unwrap();
        session.choose_difficulty(Difficulty::Hard).unwrap();
        session.start().unwrap();
        while session.rounds_remaining() > 0 {
            let n = session.round_count() + 1;
            let pending = session.begin_round(&format!("argument {n}")).unwrap();
            session.commit_round(pending, format!("rebuttal {n}")).unwrap();
        }
        session
    }

    fn judged_session(result: DebateResult) -> DebateSession {
        let mut session = finished_session();
        let request = session.begin_evaluation().unwrap();
        session.complete_evaluation(request, result).unwrap();
        session
    }

    fn scored() -> DebateResult {
        let verdict = parse_verdict(
            "- User Score: 7\n- AI Score: 8.5\n- Winner: AI\n\nFeedback:\nTighter rebuttals won it.",
        )
        .unwrap();
        assert_eq!(verdict.winner, Winner::Opponent);
        DebateResult::Scored(verdict)
    }

    #[test]
    fn test_verdict_output() {
        plain();
        let output = ConsoleFormatter::format_result(&scored());
        assert!(output.contains("User Score: 7\n"));
        assert!(output.contains("AI Score: 8.5\n"));
        assert!(output.contains("Winner: Opponent"));
        assert!(output.contains("Feedback:\nTighter rebuttals won it."));
    }

    #[test]
    fn test_unstructured_result_shows_raw_text() {
        plain();
        let result = DebateResult::Unstructured {
            raw: "Both sides did fine.".to_string(),
        };
        let output = ConsoleFormatter::format_result(&result);
        assert!(output.contains("shown as received"));
        assert!(output.contains("Both sides did fine."));
    }

    #[test]
    fn test_full_output_hides_system_prompt() {
        plain();
        let session = judged_session(scored());
        let output = ConsoleFormatter::format(&session, OutputFormat::Full);
        assert!(output.contains("Participant: Ada"));
        assert!(output.contains("Rounds: 5/5 (Result ready)"));
        assert!(output.contains("── Ada ──\n  argument 1"));
        assert!(output.contains("── AI ──\n  rebuttal 5"));
        assert!(output.contains("Winner: Opponent"));
        assert!(!output.contains("── system ──"));
    }

    #[test]
    fn test_verdict_format_without_result_falls_back_to_status() {
        plain();
        let session = finished_session();
        let output = ConsoleFormatter::format(&session, OutputFormat::Verdict);
        assert!(output.contains("Topic: Should recreational drugs be legalised?"));
        assert!(output.contains("Rounds: 5/5 (Rounds complete)"));
    }

    #[test]
    fn test_empty_transcript() {
        plain();
        let mut session = DebateSession::new();
        session.set_participant_name("Ada").unwrap();
        session.choose_topic(Topic::Democracy).unwrap();
        session.choose_difficulty(Difficulty::Easy).unwrap();
        session.start().unwrap();
        let output = ConsoleFormatter::format_transcript(&session);
        assert!(output.contains("No statements yet."));
    }

    #[test]
    fn test_json_output() {
        let session = judged_session(scored());
        let output = ConsoleFormatter::format_json(&session);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["participant"], "Ada");
        assert_eq!(value["topic"], "Should recreational drugs be legalised?");
        assert_eq!(value["difficulty"], "Hard");
        assert_eq!(value["phase"], "result_ready");
        assert_eq!(value["rounds"], 5);
        assert_eq!(value["transcript"].as_array().unwrap().len(), 10);
        assert_eq!(value["transcript"][0]["role"], "user");
        assert_eq!(value["result"]["kind"], "scored");
        assert_eq!(value["result"]["winner"], "Opponent");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(ConsoleFormatter::format_score(7.0), "7");
        assert_eq!(ConsoleFormatter::format_score(8.5), "8.5");
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
