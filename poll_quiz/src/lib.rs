/*!
Quiz markup and interaction engine for compiled poll histories.

The crate renders a list of multiple-choice [`Question`]s into a report
[`Document`], and drives the quiz behaviour of that report through
[`QuizEngine`]: one attempt per question, immediate feedback, a running
score and a global reset.

```
use poll_quiz::*;

let questions = vec![Question {
    title: "2 + 2?".to_string(),
    responses: vec!["4".to_string(), "5".to_string()],
    correct: vec!["4".to_string()],
}];
let doc = render_report(&questions, &RenderOptions::default().quiz_mode(true));
let mut engine = QuizEngine::on_ready(doc);
let group = engine.groups()[0];
let first = engine.group_options(group)[0];
engine.click(first);
assert_eq!(engine.score().to_string(), "1/1");
```

See the [manual] for the markup contract shared with the browser script.
*/

mod config;
pub mod document;
pub mod engine;
pub mod manual;
pub mod render;

pub use crate::config::*;
pub use crate::document::{Document, NodeId, Viewport};
pub use crate::engine::{Event, QuizEngine};
pub use crate::render::{
    maximum_score, render_report, to_html_page, RenderOptions, QUIZ_SCRIPT, REPORT_STYLES,
    SCRIPT_FILE_NAME, STYLES_FILE_NAME,
};
