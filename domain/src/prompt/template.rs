//! Prompt templates for the debate flow

use crate::debate::difficulty::Difficulty;
use crate::debate::rules::DebateRules;
use crate::debate::topic::Topic;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt that frames the opponent for the whole debate.
    pub fn opponent_system(topic: Topic, difficulty: Difficulty, rounds: usize) -> String {
        format!(
            "You are debating the user on the topic: {topic}. \
The user is arguing the topic {lower}; you must take the opposite stance. \
The debate difficulty is {difficulty}, so tailor your vocabulary, logic, and depth accordingly. \
The debate lasts exactly {rounds} rounds. Keep each turn concise, logical, and respectful.",
            topic = topic.as_str(),
            lower = topic.as_str().to_lowercase(),
            difficulty = difficulty,
            rounds = rounds,
        )
    }

    /// Banner shown before the opening statement.
    pub fn opening_banner(topic: Topic) -> String {
        format!(
            "The debate topic is: {}. Please share your opening statement. \
Make sure you present your position clearly: are you for or against this topic?",
            topic.as_str()
        )
    }

    /// Short rules summary shown during setup.
    pub fn rules_summary(rules: &DebateRules) -> String {
        format!(
            "Debate rules:\n\
- There will be {} rounds (you and the AI will alternate turns).\n\
- Keep your arguments clear and concise (at most {} characters per statement).\n\
- The AI will automatically evaluate both sides at the end. Good luck!",
            rules.max_rounds, rules.max_statement_chars
        )
    }

    /// System prompt for the judge.
    pub fn judge_system(topic: Topic, difficulty: Difficulty, rounds: usize) -> String {
        format!(
            r#"You are an impartial, expert debate judge evaluating a {rounds}-round debate between a human user and an AI assistant.
Your task:
1. Read the entire debate transcript carefully.
2. Evaluate both participants on these criteria:
- Clarity of argument
- Logical coherence and reasoning
- Use of evidence or examples
- Rebuttal quality (ability to address opponent's points)
- Persuasiveness and style consistency
- Relevance to the selected difficulty level ({difficulty})

3. Consider the declared topic and the debate transcript:
- Topic: {topic}
- Debate transcript: (provided separately below)
- The "user" represents the human debater.
- The "assistant" represents the AI debater.
- The debate lasted {rounds} rounds.

4. Finally, decide the winner: either "User" or "AI".

Be fair, objective, and professional.
Do not engage in further debate; only judge based on the transcript.

{format}"#,
            rounds = rounds,
            difficulty = difficulty,
            topic = topic.as_str(),
            format = Self::verdict_format(),
        )
    }

    /// The output grammar the judge must follow.
    pub fn verdict_format() -> &'static str {
        r#"Output Format (follow exactly):

- User Score: <number>
- AI Score: <number>
- Winner: <User or AI>

Feedback:
<3-6 sentences explaining your reasoning and overall assessment>"#
    }

    /// User message carrying the serialized transcript to the judge.
    pub fn judge_transcript(transcript_text: &str) -> String {
        format!(
            "This is the debate transcript to evaluate:\n\n{}",
            transcript_text
        )
    }

    /// Follow-up sent when the judge's answer did not match the grammar.
    pub fn verdict_correction(reason: &str) -> String {
        format!(
            "Your answer could not be read ({}). Reply again using only the required format.\n\n{}",
            reason,
            Self::verdict_format()
        )
    }
}
