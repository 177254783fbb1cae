// ********* Input data structures ***********

/// One multiple-choice question, as compiled from a poll history.
///
/// The responses are kept in display order. `correct` holds the responses
/// marked as correct in the export; it may be empty (surveys, opinion polls)
/// or contain more than one entry.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub title: String,
    pub responses: Vec<String>,
    pub correct: Vec<String>,
}

impl Question {
    pub fn is_correct(&self, response: &str) -> bool {
        self.correct.iter().any(|c| c == response)
    }

    /// A question only counts toward the maximum score when at least one of
    /// its responses is correct.
    pub fn is_scorable(&self) -> bool {
        self.responses.iter().any(|r| self.is_correct(r))
    }
}

// ********* Markup contract **********

// Class names and attributes shared by the renderer, the engine and the
// client script in resources/html-js.js. Changing one means changing all three.

/// Marker class of the container holding the options of one question.
pub const QUESTION_GROUP_CLASS: &str = "options";
pub const CORRECT_CLASS: &str = "correct";
pub const INCORRECT_CLASS: &str = "incorrect";
pub const SELECTED_CORRECT_CLASS: &str = "selected-correct";
pub const SELECTED_INCORRECT_CLASS: &str = "selected-incorrect";
pub const SCORE_COUNTER_ID: &str = "score-counter";
pub const SCORE_CURR_ATTR: &str = "data-curr";
pub const SCORE_MAXIMUM_ATTR: &str = "data-maximum";
pub const RESET_CLASS: &str = "reset-quiz";

// ******** Output data structures *********

/// Snapshot of the score counter.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Score {
    pub curr: u32,
    pub maximum: u32,
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.curr, self.maximum)
    }
}

/// How the viewport moves when the engine scrolls it.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// The outcome shown on an option once it has been clicked.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Selection {
    Correct,
    Incorrect,
}

impl Selection {
    pub fn class(&self) -> &'static str {
        match self {
            Selection::Correct => SELECTED_CORRECT_CLASS,
            Selection::Incorrect => SELECTED_INCORRECT_CLASS,
        }
    }
}

/// Per question group state during one round.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum GroupState {
    Unanswered,
    AnsweredCorrect,
    AnsweredIncorrect,
}
