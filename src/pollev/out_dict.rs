// The tree-shaped reports: YAML, JSON and TOML.
//
// All of them share the same layout: a root key holding one entry per
// question, keyed by its position ("1", "2", ...) in the order of the export.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::pollev::*;

#[derive(Serialize, Debug)]
struct QuestionEntry<'a> {
    title: &'a str,
    responses: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    correct: Option<&'a [String]>,
}

// Numbered entries, serialized in the order of the questions.
struct NumberedQuestions<'a> {
    questions: &'a [Question],
    show_correct: bool,
}

impl<'a> Serialize for NumberedQuestions<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.questions.len()))?;
        for (idx, q) in self.questions.iter().enumerate() {
            let entry = QuestionEntry {
                title: &q.title,
                responses: &q.responses,
                correct: if self.show_correct {
                    Some(q.correct.as_slice())
                } else {
                    None
                },
            };
            map.serialize_entry(&(idx + 1).to_string(), &entry)?;
        }
        map.end()
    }
}

struct Report<'a> {
    root_name: &'a str,
    questions: NumberedQuestions<'a>,
}

impl<'a> Serialize for Report<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.root_name, &self.questions)?;
        map.end()
    }
}

fn report<'a>(questions: &'a [Question], root_name: &'a str, show_correct: bool) -> Report<'a> {
    Report {
        root_name,
        questions: NumberedQuestions {
            questions,
            show_correct,
        },
    }
}

pub fn to_yaml_report(
    questions: &[Question],
    root_name: &str,
    show_correct: bool,
) -> PollevResult<String> {
    serde_yaml::to_string(&report(questions, root_name, show_correct)).context(SerializingYamlSnafu {})
}

pub fn to_json_report(
    questions: &[Question],
    root_name: &str,
    show_correct: bool,
) -> PollevResult<String> {
    serde_json::to_string_pretty(&report(questions, root_name, show_correct))
        .context(SerializingJsonSnafu {})
}

/// TOML has no top-level sequence, so the questions end up as the tables
/// `[<prefix>.1]`, `[<prefix>.2]`...
pub fn to_toml_report(
    questions: &[Question],
    question_prefix: &str,
    show_correct: bool,
) -> PollevResult<String> {
    toml::to_string(&report(questions, question_prefix, show_correct))
        .context(SerializingTomlSnafu {})
}
