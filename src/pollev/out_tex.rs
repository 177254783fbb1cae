use crate::pollev::{io_common::escape_tex, *};

/// Renders the questions as a LaTeX document using the `exam` class.
pub fn to_tex_exam(questions: &[Question], opts: &TexOptions, show_correct: bool) -> String {
    let blocks: Vec<String> = questions
        .iter()
        .map(|q| tex_question(q, opts, show_correct))
        .collect();
    format!(
        "\\documentclass{{exam}}\n\\begin{{document}}\n\n\\begin{{questions}}\n{}\n\\end{{questions}}\n\n\\end{{document}}\n",
        blocks.join("\n")
    )
}

fn tex_question(question: &Question, opts: &TexOptions, show_correct: bool) -> String {
    let mut lines: Vec<String> = vec![
        format!("\\begin{{{}}}", opts.block_type),
        escape_tex(&question.title),
        format!("\\end{{{}}}\\\\", opts.block_type),
        format!("\\begin{{{}}}", opts.resp_block_type),
    ];
    for resp in question.responses.iter() {
        let block = if show_correct && question.is_correct(resp) {
            &opts.resp_opt_correct_block_type
        } else {
            &opts.resp_opt_block_type
        };
        lines.push(format!(
            "\\{} {}\\\\[{}{}]",
            block,
            escape_tex(resp),
            opts.end_spacing,
            opts.end_spacing_metric
        ));
    }
    lines.push(format!("\\end{{{}}}\n", opts.resp_block_type));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            title: "Who gets 100% of the points?".to_string(),
            responses: vec!["A_1".to_string(), "B".to_string()],
            correct: vec!["A_1".to_string()],
        }
    }

    #[test]
    fn question_block() {
        let block = tex_question(&question(), &TexOptions::default(), true);
        assert_eq!(
            block,
            "\\begin{question}\n\
             Who gets 100\\% of the points?\n\
             \\end{question}\\\\\n\
             \\begin{oneparcheckboxes}\n\
             \\CorrectChoice A\\_1\\\\[4pt]\n\
             \\choice B\\\\[4pt]\n\
             \\end{oneparcheckboxes}\n"
        );
    }

    #[test]
    fn hidden_solutions_use_plain_choices() {
        let block = tex_question(&question(), &TexOptions::default(), false);
        assert!(!block.contains("CorrectChoice"));
        assert_eq!(block.matches("\\choice").count(), 2);
    }

    #[test]
    fn custom_blocks_and_wrapper() {
        let opts = TexOptions {
            block_type: "titledquestion".to_string(),
            end_spacing: 2,
            end_spacing_metric: "mm".to_string(),
            ..TexOptions::default()
        };
        let doc = to_tex_exam(&[question()], &opts, true);
        assert!(doc.starts_with("\\documentclass{exam}\n\\begin{document}\n"));
        assert!(doc.contains("\\begin{titledquestion}"));
        assert!(doc.contains("\\choice B\\\\[2mm]"));
        assert!(doc.trim_end().ends_with("\\end{document}"));
    }
}
