use crate::pollev::*;

/// Renders the questions as a complete HTML page. In quiz mode the page
/// references the quiz script written next to it.
pub fn to_html_report(questions: &[Question], options: &RenderOptions, show_correct: bool) -> String {
    let options = options.clone().show_correct(show_correct);
    let doc = render_report(questions, &options);
    debug!(
        "to_html_report: {} questions, maximum score {}",
        questions.len(),
        maximum_score(questions, &options)
    );
    to_html_page(&doc, &options)
}
