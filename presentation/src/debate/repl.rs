//! REPL (Read-Eval-Print Loop) for an interactive debate

use crate::config::{OutputConfig, ReplConfig};
use crate::debate::command::ReplCommand;
use crate::debate::setup::{SetupPreset, difficulty_menu, parse_difficulty_choice, topic_menu};
use crate::{ConsoleFormatter, ProgressReporter, SimpleProgress};
use arena_application::{
    DebateProgressNotifier, EvaluateDebateError, EvaluateDebateUseCase, ModelConfig,
    PlayRoundError, PlayRoundUseCase,
};
use arena_domain::{DebatePhase, DebateRules, DebateSession, DomainError, PromptTemplate, Topic};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 500;

/// What the REPL does after a debate loop returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Reset,
    Quit,
}

/// Interactive debate REPL
///
/// Owns nothing but configuration; the [`DebateSession`] lives on the stack
/// of [`DebateRepl::run`] and is handed to the use cases explicitly.
pub struct DebateRepl {
    play_round: PlayRoundUseCase,
    evaluate: EvaluateDebateUseCase,
    models: ModelConfig,
    rules: DebateRules,
    config: ReplConfig,
    output: OutputConfig,
    preset: SetupPreset,
}

impl DebateRepl {
    /// Create a new DebateRepl
    pub fn new(
        play_round: PlayRoundUseCase,
        evaluate: EvaluateDebateUseCase,
        models: ModelConfig,
    ) -> Self {
        Self {
            play_round,
            evaluate,
            models,
            rules: DebateRules::default(),
            config: ReplConfig::default(),
            output: OutputConfig::default(),
            preset: SetupPreset::default(),
        }
    }

    pub fn with_rules(mut self, rules: DebateRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Answers applied to the first debate's setup.
    pub fn with_preset(mut self, preset: SetupPreset) -> Self {
        self.preset = preset;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> io::Result<()> {
        if !self.output.color {
            colored::control::set_override(false);
        }

        let mut editor = self.build_editor();
        let mut session = DebateSession::with_rules(self.rules.clone());
        let mut preset = Some(&self.preset);

        self.print_welcome();

        loop {
            if let Some(preset) = preset.take().filter(|p| !p.is_empty()) {
                debug!("Applying setup preset: {:?}", preset);
                for e in preset.apply(&mut session) {
                    Self::print_error(&e);
                }
            }

            if self.run_setup(&mut editor, &mut session)? == LoopControl::Quit {
                break;
            }

            match self.run_debate(&mut editor, &mut session).await? {
                LoopControl::Quit => break,
                LoopControl::Reset | LoopControl::Continue => {
                    session.reset();
                    println!();
                    println!("{}", "Debate discarded. Starting over.".cyan());
                    println!();
                }
            }
        }

        println!("Bye!");
        Ok(())
    }

    fn build_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.config.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                Debate Arena                 │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Opponent: {}   Judge: {}",
            self.models.opponent, self.models.judge
        );
        println!();
        println!("{}", ReplCommand::help());
        println!();
    }

    fn print_error(error: &dyn std::fmt::Display) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Read one non-empty line. `None` means the participant wants to leave.
    fn ask(editor: &mut Reedline, label: &str) -> io::Result<Option<String>> {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(label.to_string()),
            DefaultPromptSegment::Empty,
        );
        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if ReplCommand::parse(line) == Some(ReplCommand::Quit) {
                        return Ok(None);
                    }
                    return Ok(Some(line.to_string()));
                }
                Signal::CtrlD => return Ok(None),
                _ => println!("^C"),
            }
        }
    }

    // ==================== Setup ====================

    fn run_setup(
        &self,
        editor: &mut Reedline,
        session: &mut DebateSession,
    ) -> io::Result<LoopControl> {
        while session.participant_name().is_none() {
            let Some(name) = Self::ask(editor, "Your name")? else {
                return Ok(LoopControl::Quit);
            };
            if let Err(e) = session.set_participant_name(&name) {
                Self::print_error(&e);
            }
        }

        if session.topic().is_none() {
            println!();
            print!("{}", topic_menu());
        }
        while session.topic().is_none() {
            let Some(choice) = Self::ask(editor, "Topic")? else {
                return Ok(LoopControl::Quit);
            };
            match choice.parse::<Topic>() {
                Ok(topic) => {
                    if let Err(e) = session.choose_topic(topic) {
                        Self::print_error(&e);
                    }
                }
                Err(e) => Self::print_error(&e),
            }
        }

        if session.difficulty().is_none() {
            println!();
            print!("{}", difficulty_menu());
        }
        while session.difficulty().is_none() {
            let Some(choice) = Self::ask(editor, "Difficulty")? else {
                return Ok(LoopControl::Quit);
            };
            match parse_difficulty_choice(&choice) {
                Ok(difficulty) => {
                    if let Err(e) = session.choose_difficulty(difficulty) {
                        Self::print_error(&e);
                    }
                }
                Err(e) => Self::print_error(&e),
            }
        }

        if let Err(e) = session.start() {
            Self::print_error(&e);
            return Ok(LoopControl::Quit);
        }

        println!();
        print!("{}", ConsoleFormatter::format_status(session));
        println!();
        println!("{}", PromptTemplate::rules_summary(session.rules()));
        if let Some(topic) = session.topic() {
            println!();
            println!("{}", PromptTemplate::opening_banner(topic).cyan());
        }
        println!();

        Ok(LoopControl::Continue)
    }

    // ==================== Debate ====================

    fn prompt_label(session: &DebateSession) -> String {
        let name = session
            .participant_name()
            .map(|n| n.to_string())
            .unwrap_or_default();
        match session.phase() {
            DebatePhase::Active => format!(
                "{} · round {}/{}",
                name,
                session.round_count() + 1,
                session.rules().max_rounds
            ),
            DebatePhase::ResultReady => format!("{} · /reset or /quit", name),
            _ => format!("{} · /result", name),
        }
    }

    async fn run_debate(
        &self,
        editor: &mut Reedline,
        session: &mut DebateSession,
    ) -> io::Result<LoopControl> {
        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(Self::prompt_label(session)),
                DefaultPromptSegment::Empty,
            );
            let line = match editor.read_line(&prompt)? {
                Signal::Success(line) => line,
                Signal::CtrlD => return Ok(LoopControl::Quit),
                _ => {
                    println!("^C");
                    continue;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(command) = ReplCommand::parse(line) else {
                self.play(session, line).await;
                continue;
            };

            match command {
                ReplCommand::Quit => return Ok(LoopControl::Quit),
                ReplCommand::Reset => return Ok(LoopControl::Reset),
                ReplCommand::Help => {
                    println!();
                    println!("{}", ReplCommand::help());
                    println!();
                }
                ReplCommand::Status => {
                    println!();
                    print!("{}", ConsoleFormatter::format_status(session));
                    println!();
                }
                ReplCommand::Transcript => {
                    println!("{}", ConsoleFormatter::format_transcript(session));
                }
                ReplCommand::Result => self.request_result(session).await,
                ReplCommand::Unknown(cmd) => {
                    println!("Unknown command: {}", cmd);
                    println!("Type /help for available commands");
                }
            }
        }
    }

    fn progress(&self) -> Box<dyn DebateProgressNotifier> {
        if self.config.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress::new())
        }
    }

    /// Play one round; Ctrl-C while the opponent replies cancels it.
    async fn play(&self, session: &mut DebateSession, statement: &str) {
        let progress = self.progress();

        let result = tokio::select! {
            result = self.play_round.execute(session, statement, progress.as_ref()) => result,
            _ = tokio::signal::ctrl_c() => {
                progress.on_opponent_stream_end(false);
                println!("{}", "Round cancelled. Your statement was not counted.".yellow());
                return;
            }
        };

        match result {
            Ok(outcome) => {
                debug!("Round {} done, phase {}", outcome.round, outcome.phase);
                if outcome.phase == DebatePhase::RoundsComplete {
                    println!(
                        "{}",
                        format!(
                            "All {} rounds are done. Type /result to hear the judge.",
                            outcome.round
                        )
                        .cyan()
                    );
                } else {
                    println!(
                        "{}",
                        format!("{} round(s) left.", session.rounds_remaining()).dimmed()
                    );
                }
            }
            Err(e) => {
                Self::print_error(&e);
                match &e {
                    PlayRoundError::Domain(DomainError::RoundLimitExceeded { .. }) => {
                        println!("Type /result for the verdict, or /reset to start over.");
                    }
                    e if e.is_retryable() => {
                        println!("Nothing was recorded; send your statement again.");
                    }
                    _ => {}
                }
            }
        }
    }

    /// Ask the judge, or show the stored result again.
    async fn request_result(&self, session: &mut DebateSession) {
        if session.phase() == DebatePhase::ResultReady {
            println!();
            println!("{}", ConsoleFormatter::format(session, self.output.format));
            return;
        }

        let progress = self.progress();

        let result = tokio::select! {
            result = self.evaluate.execute(session, progress.as_ref()) => result,
            _ = tokio::signal::ctrl_c() => {
                progress.on_evaluation_end(false);
                println!("{}", "Evaluation cancelled. Type /result to try again.".yellow());
                return;
            }
        };

        match result {
            Ok(_) => {
                println!();
                println!("{}", ConsoleFormatter::format(session, self.output.format));
            }
            Err(e) => {
                Self::print_error(&e);
                if session.phase() == DebatePhase::Evaluating {
                    if let EvaluateDebateError::MalformedVerdict { .. } = e {
                        println!("The judge can be asked again with /result.");
                    } else {
                        println!("Type /result to try again.");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_application::{EvaluationParams, GatewayError, LlmGateway};
    use arena_domain::{Difficulty, Message, Model};
    use async_trait::async_trait;
    use std::sync::Arc;

    const VERDICT: &str =
        "- User Score: 8\n- AI Score: 6\n- Winner: User\n\nFeedback:\nClear and well supported.";

    /// Answers rounds with a fixed rebuttal and the judge with [`VERDICT`].
    struct FixedGateway;

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn complete(&self, model: &Model, _messages: &[Message]) -> Result<String, GatewayError> {
            if model.as_str() == "gpt-4o" {
                Ok(VERDICT.to_string())
            } else {
                Ok("A rebuttal.".to_string())
            }
        }
    }

    struct DownGateway;

    #[async_trait]
    impl LlmGateway for DownGateway {
        async fn complete(&self, _model: &Model, _messages: &[Message]) -> Result<String, GatewayError> {
            Err(GatewayError::ConnectionError("refused".to_string()))
        }
    }

    fn repl(gateway: Arc<dyn LlmGateway>) -> DebateRepl {
        let models = ModelConfig::default();
        DebateRepl::new(
            PlayRoundUseCase::new(gateway.clone(), models.clone()),
            EvaluateDebateUseCase::new(gateway, models.clone(), EvaluationParams::default()),
            models,
        )
        .with_config(ReplConfig {
            show_progress: false,
            history_file: None,
        })
    }

    fn started_session() -> DebateSession {
        let mut session = DebateSession::new();
        let preset = SetupPreset {
            name: Some("Ada".to_string()),
            topic: Some(Topic::RecreationalDrugs),
            difficulty: Some(Difficulty::Hard),
        };
        assert!(preset.apply(&mut session).is_empty());
        session.start().unwrap();
        session
    }

    #[tokio::test]
    async fn test_full_debate_through_repl_actions() {
        let repl = repl(Arc::new(FixedGateway));
        let mut session = started_session();

        for n in 1..=5 {
            repl.play(&mut session, &format!("argument {n}")).await;
        }
        assert_eq!(session.phase(), DebatePhase::RoundsComplete);
        assert_eq!(session.transcript().len(), 11);

        repl.play(&mut session, "one more").await;
        assert_eq!(session.round_count(), 5);

        repl.request_result(&mut session).await;
        assert_eq!(session.phase(), DebatePhase::ResultReady);
        assert!(session.result().unwrap().is_scored());
    }

    #[tokio::test]
    async fn test_gateway_failure_keeps_session() {
        let repl = repl(Arc::new(DownGateway));
        let mut session = started_session();

        repl.play(&mut session, "opening").await;

        assert_eq!(session.round_count(), 0);
        assert_eq!(session.phase(), DebatePhase::Active);
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_result_before_last_round_is_rejected() {
        let repl = repl(Arc::new(FixedGateway));
        let mut session = started_session();
        repl.play(&mut session, "opening").await;

        repl.request_result(&mut session).await;

        assert_eq!(session.phase(), DebatePhase::Active);
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_prompt_follows_phase() {
        let repl = repl(Arc::new(FixedGateway));
        let mut session = started_session();
        assert_eq!(DebateRepl::prompt_label(&session), "Ada · round 1/5");

        repl.play(&mut session, "opening").await;
        assert_eq!(DebateRepl::prompt_label(&session), "Ada · round 2/5");

        for n in 2..=5 {
            repl.play(&mut session, &format!("argument {n}")).await;
        }
        assert_eq!(DebateRepl::prompt_label(&session), "Ada · /result");

        repl.request_result(&mut session).await;
        assert_eq!(DebateRepl::prompt_label(&session), "Ada · /reset or /quit");
    }
}
