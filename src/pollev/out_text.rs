// Plain text and markdown reports.

use crate::pollev::*;

const OPTION_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Letter of the option at the given position: `a`, `b`, ... then `aa`, `ab`...
fn option_letter(idx: usize) -> String {
    let letters: Vec<char> = OPTION_LETTERS.chars().collect();
    let n = letters.len();
    if idx < n {
        letters[idx].to_string()
    } else {
        format!("{}{}", option_letter(idx / n - 1), letters[idx % n])
    }
}

pub fn to_txt_exam(questions: &[Question], show_correct: bool) -> String {
    questions
        .iter()
        .map(|q| txt_question(q, show_correct))
        .collect::<Vec<String>>()
        .join("\n")
}

fn txt_question(question: &Question, show_correct: bool) -> String {
    let mut lines: Vec<String> = vec![format!("Question:\n{}\n\nOptions:\n", question.title)];
    lines.extend(question.responses.iter().map(|r| format!("\t- {}", r)));
    lines.push("\n".to_string());
    if show_correct {
        lines.push("Correct:\n".to_string());
        lines.extend(question.correct.iter().map(|r| format!("\t- {}", r)));
    }
    lines.push("\n\n".to_string());
    lines.join("\n")
}

// Characters with a meaning in inline markdown.
const MARKDOWN_CHARS_ESCAPE: [char; 6] = ['\\', '*', '_', '`', '[', ']'];

fn escape_markdown(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        if MARKDOWN_CHARS_ESCAPE.contains(&c) {
            res.push('\\');
        }
        res.push(c);
    }
    res
}

/// The markdown version of the HTML report: numbered questions, lettered
/// options, and the correct options in bold when the solutions are shown.
pub fn to_markdown_report(questions: &[Question], show_correct: bool) -> String {
    let mut md = String::from("# PollEverywhere Report\n");
    for (idx, q) in questions.iter().enumerate() {
        md.push_str(&format!("\n## {}. {}\n\n", idx + 1, escape_markdown(&q.title)));
        for (o_idx, resp) in q.responses.iter().enumerate() {
            let text = escape_markdown(resp);
            if show_correct && q.is_correct(resp) {
                md.push_str(&format!("- {}) **{}**\n", option_letter(o_idx), text));
            } else {
                md.push_str(&format!("- {}) {}\n", option_letter(o_idx), text));
            }
        }
    }
    md
}
