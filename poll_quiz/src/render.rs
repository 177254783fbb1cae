//! Builds the browsable report for a list of questions.

use log::debug;

use crate::config::*;
use crate::document::{escape_html, Document, NodeId};

/// Stylesheet shipped next to every HTML report.
pub const REPORT_STYLES: &str = include_str!("../resources/html-styles.css");
/// Client-side quiz engine, shipped next to quiz-mode reports.
pub const QUIZ_SCRIPT: &str = include_str!("../resources/html-js.js");

pub const STYLES_FILE_NAME: &str = "html-styles.css";
pub const SCRIPT_FILE_NAME: &str = "html-js.js";

/// Options for rendering a report.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Title of the page (shown in the browser tab).
    pub title: String,
    /// Heading displayed at the top of the report.
    pub heading: String,
    /// Whether the correct responses are tagged in the markup.
    pub show_correct: bool,
    /// Adds the score counter, the reset controls and the script reference.
    pub quiz_mode: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "PollEverywhere Report".to_string(),
            heading: "PollEverywhere Report".to_string(),
            show_correct: true,
            quiz_mode: false,
        }
    }
}

impl RenderOptions {
    pub fn show_correct(mut self, show: bool) -> Self {
        self.show_correct = show;
        self
    }

    pub fn quiz_mode(mut self, quiz: bool) -> Self {
        self.quiz_mode = quiz;
        self
    }
}

/// Number of question groups that will carry at least one `correct` option.
pub fn maximum_score(questions: &[Question], options: &RenderOptions) -> u32 {
    if !options.show_correct {
        return 0;
    }
    questions.iter().filter(|q| q.is_scorable()).count() as u32
}

/// Renders the body of the report as a document tree.
pub fn render_report(questions: &[Question], options: &RenderOptions) -> Document {
    let mut doc = Document::new("div");
    let root = doc.root();
    doc.add_class(root, "center-container");
    if options.quiz_mode {
        doc.add_class(root, "quiz");
    }

    let header = doc.append_element(root, "div");
    doc.add_class(header, "center-div");
    let h1 = doc.append_element(header, "h1");
    doc.append_text(h1, &options.heading);

    if options.quiz_mode {
        let maximum = maximum_score(questions, options);
        let bar = doc.append_element(root, "div");
        doc.add_class(bar, "score-bar");
        let counter = doc.append_element(bar, "span");
        doc.set_attribute(counter, "id", SCORE_COUNTER_ID);
        doc.set_attribute(counter, SCORE_CURR_ATTR, "0");
        doc.set_attribute(counter, SCORE_MAXIMUM_ATTR, &maximum.to_string());
        let score = Score { curr: 0, maximum };
        doc.append_text(counter, &score.to_string());
    }

    let list = doc.append_element(root, "ol");
    doc.add_class(list, "questions");
    for q in questions.iter() {
        render_question(&mut doc, list, q, options);
    }

    if options.quiz_mode {
        let button = doc.append_element(root, "button");
        doc.set_attribute(button, "type", "button");
        doc.add_class(button, RESET_CLASS);
        doc.append_text(button, "Reset quiz");
    }
    doc
}

fn render_question(doc: &mut Document, list: NodeId, question: &Question, options: &RenderOptions) {
    debug!("render_question: {:?}", question.title);
    let item = doc.append_element(list, "li");
    doc.add_class(item, "question");
    let title = doc.append_element(item, "p");
    doc.add_class(title, "question-title");
    doc.append_text(title, &question.title);

    let group = doc.append_element(item, "ol");
    doc.set_attribute(group, "type", "a");
    doc.add_class(group, QUESTION_GROUP_CLASS);
    for resp in question.responses.iter() {
        let opt = doc.append_element(group, "li");
        if question.is_correct(resp) {
            // Without solutions the option stays untagged, and a click on it does nothing.
            if options.show_correct {
                doc.add_class(opt, CORRECT_CLASS);
            }
        } else {
            doc.add_class(opt, INCORRECT_CLASS);
        }
        doc.append_text(opt, resp);
    }
}

/// Wraps a rendered report into a complete HTML page referencing the
/// stylesheet, and the quiz script when in quiz mode.
pub fn to_html_page(doc: &Document, options: &RenderOptions) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(
        "  <link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/css?family=Raleway&display=swap\">\n",
    );
    html.push_str(&format!("  <link rel=\"stylesheet\" href=\"{}\">\n", STYLES_FILE_NAME));
    if options.quiz_mode {
        html.push_str(&format!("  <script src=\"{}\" defer></script>\n", SCRIPT_FILE_NAME));
    }
    html.push_str(&format!("  <title>{}</title>\n", escape_html(&options.title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&doc.to_html());
    html.push_str("</body>\n</html>\n");
    html
}
