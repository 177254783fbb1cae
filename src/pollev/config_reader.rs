use crate::pollev::*;

use serde::{Deserialize, Serialize};

use encoding_rs::{Encoding, UTF_8};
use poll_quiz::RenderOptions;

// The configuration file mirrors the command line: every field is optional,
// and the flags passed on the command line take precedence.

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(rename = "presenterColumn")]
    pub presenter_column: Option<String>,
    #[serde(rename = "questionColumn")]
    pub question_column: Option<String>,
    #[serde(rename = "activityTypeColumn")]
    pub activity_type_column: Option<String>,
    #[serde(rename = "responseColumn")]
    pub response_column: Option<String>,
    #[serde(rename = "multipleChoiceType")]
    pub multiple_choice_type: Option<String>,
    #[serde(rename = "responseDelimiter")]
    pub response_delimiter: Option<String>,
    #[serde(rename = "correctMarker")]
    pub correct_marker: Option<String>,
    #[serde(rename = "imageMarker")]
    pub image_marker: Option<String>,
    #[serde(rename = "hiddenTitle")]
    pub hidden_title: Option<String>,
    #[serde(rename = "removeStartLen")]
    pub remove_start_len: Option<usize>,
    pub presenter: Option<String>,
    #[serde(rename = "removeHidden")]
    pub remove_hidden: Option<bool>,
    #[serde(rename = "removeImages")]
    pub remove_images: Option<bool>,
    pub encoding: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    pub transform: Option<String>,
    #[serde(rename = "showSolutions")]
    pub show_solutions: Option<bool>,
    #[serde(rename = "shuffleResponses")]
    pub shuffle_responses: Option<bool>,
    pub seed: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TexSettings {
    #[serde(rename = "blockType")]
    pub block_type: Option<String>,
    #[serde(rename = "respBlockType")]
    pub resp_block_type: Option<String>,
    #[serde(rename = "respOptBlockType")]
    pub resp_opt_block_type: Option<String>,
    #[serde(rename = "respOptCorrectBlockType")]
    pub resp_opt_correct_block_type: Option<String>,
    #[serde(rename = "endSpacing")]
    pub end_spacing: Option<u32>,
    #[serde(rename = "endSpacingMetric")]
    pub end_spacing_metric: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct HtmlSettings {
    #[serde(rename = "quizMode")]
    pub quiz_mode: Option<bool>,
    pub title: Option<String>,
    pub heading: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictSettings {
    #[serde(rename = "rootName")]
    pub root_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlSettings {
    #[serde(rename = "questionPrefix")]
    pub question_prefix: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollevConfig {
    pub input: Option<InputSettings>,
    pub output: Option<OutputSettings>,
    pub tex: Option<TexSettings>,
    pub html: Option<HtmlSettings>,
    pub yaml: Option<DictSettings>,
    pub json: Option<DictSettings>,
    pub toml: Option<TomlSettings>,
}

pub fn read_config(path: &str) -> BPollevResult<PollevConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: PollevConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

// ********* Resolved settings **********

/// How the export is read and filtered.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InputOptions {
    pub presenter_column: String,
    pub question_column: String,
    pub activity_type_column: String,
    pub response_column: String,
    pub multiple_choice_type: String,
    pub response_delimiter: String,
    pub correct_marker: String,
    pub image_marker: String,
    pub hidden_title: String,
    pub remove_start_len: usize,
    pub presenter: Option<String>,
    pub remove_hidden: bool,
    pub remove_images: bool,
    pub shuffle: bool,
    pub seed: Option<u64>,
    /// Encoding of the export and of the written output.
    pub encoding: &'static Encoding,
}

impl Default for InputOptions {
    fn default() -> Self {
        InputOptions {
            presenter_column: "Presenter".to_string(),
            question_column: "Activity title".to_string(),
            activity_type_column: "Activity type".to_string(),
            response_column: "Response options".to_string(),
            multiple_choice_type: "Multiple choice".to_string(),
            response_delimiter: " | ".to_string(),
            correct_marker: "(Correct)".to_string(),
            image_marker: "(an image)".to_string(),
            hidden_title: "~hidden~".to_string(),
            remove_start_len: 5,
            presenter: None,
            remove_hidden: false,
            remove_images: false,
            shuffle: true,
            seed: None,
            encoding: UTF_8,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TexOptions {
    pub block_type: String,
    pub resp_block_type: String,
    pub resp_opt_block_type: String,
    pub resp_opt_correct_block_type: String,
    pub end_spacing: u32,
    pub end_spacing_metric: String,
}

impl Default for TexOptions {
    fn default() -> Self {
        TexOptions {
            block_type: "question".to_string(),
            resp_block_type: "oneparcheckboxes".to_string(),
            resp_opt_block_type: "choice".to_string(),
            resp_opt_correct_block_type: "CorrectChoice".to_string(),
            end_spacing: 4,
            end_spacing_metric: "pt".to_string(),
        }
    }
}

// The units accepted by \\[<length>].
const TEX_UNITS: [&str; 9] = ["pt", "mm", "cm", "in", "em", "ex", "bp", "pc", "sp"];

#[derive(Debug, Clone)]
pub struct CompileSettings {
    pub input: InputOptions,
    pub transform: Transform,
    pub output_directory: PathBuf,
    pub show_solutions: bool,
    pub tex: TexOptions,
    pub html: RenderOptions,
    pub root_name: String,
    pub question_prefix: String,
}

/// Merges the defaults, the configuration file and the command line.
pub fn resolve_settings(args: &Args, config: Option<&PollevConfig>) -> PollevResult<CompileSettings> {
    let default_config = PollevConfig::default();
    let config = config.unwrap_or(&default_config);

    let cin = config.input.clone().unwrap_or_default();
    let cout = config.output.clone().unwrap_or_default();
    let ctex = config.tex.clone().unwrap_or_default();
    let chtml = config.html.clone().unwrap_or_default();

    let d = InputOptions::default();
    let mut encoding = d.encoding;
    if let Some(label) = args.encoding.clone().or(cin.encoding) {
        match Encoding::for_label(label.trim().as_bytes()) {
            Some(e) => encoding = e,
            None => {
                whatever!("Unknown encoding {:?}", label);
            }
        }
    }
    let input = InputOptions {
        presenter_column: cin.presenter_column.unwrap_or(d.presenter_column),
        question_column: cin.question_column.unwrap_or(d.question_column),
        activity_type_column: cin.activity_type_column.unwrap_or(d.activity_type_column),
        response_column: cin.response_column.unwrap_or(d.response_column),
        multiple_choice_type: cin.multiple_choice_type.unwrap_or(d.multiple_choice_type),
        response_delimiter: cin.response_delimiter.unwrap_or(d.response_delimiter),
        correct_marker: cin.correct_marker.unwrap_or(d.correct_marker),
        image_marker: cin.image_marker.unwrap_or(d.image_marker),
        hidden_title: cin.hidden_title.unwrap_or(d.hidden_title),
        remove_start_len: args
            .remove_start_len
            .or(cin.remove_start_len)
            .unwrap_or(d.remove_start_len),
        presenter: args.presenter.clone().or(cin.presenter),
        remove_hidden: args.remove_hidden || cin.remove_hidden.unwrap_or(d.remove_hidden),
        remove_images: args.remove_images || cin.remove_images.unwrap_or(d.remove_images),
        shuffle: !args.no_shuffle && cout.shuffle_responses.unwrap_or(d.shuffle),
        seed: args.seed.or(cout.seed),
        encoding,
    };
    if input.response_delimiter.is_empty() {
        whatever!("The response delimiter cannot be empty");
    }

    let transform_name = args
        .transform
        .clone()
        .or(cout.transform)
        .unwrap_or_else(|| "csv".to_string());
    let transform = Transform::from_str(transform_name.as_str())?;

    let dt = TexOptions::default();
    let tex = TexOptions {
        block_type: ctex.block_type.unwrap_or(dt.block_type),
        resp_block_type: ctex.resp_block_type.unwrap_or(dt.resp_block_type),
        resp_opt_block_type: ctex.resp_opt_block_type.unwrap_or(dt.resp_opt_block_type),
        resp_opt_correct_block_type: ctex
            .resp_opt_correct_block_type
            .unwrap_or(dt.resp_opt_correct_block_type),
        end_spacing: ctex.end_spacing.unwrap_or(dt.end_spacing),
        end_spacing_metric: ctex.end_spacing_metric.unwrap_or(dt.end_spacing_metric),
    };
    if !TEX_UNITS.contains(&tex.end_spacing_metric.as_str()) {
        whatever!(
            "Failed to understand endSpacingMetric {:?}, expected one of {:?}",
            tex.end_spacing_metric,
            TEX_UNITS
        );
    }

    let show_solutions = !args.no_solutions && cout.show_solutions.unwrap_or(true);

    let dh = RenderOptions::default();
    let html = RenderOptions {
        title: chtml.title.unwrap_or_else(|| io_common::file_stem(&args.input)),
        heading: chtml.heading.unwrap_or(dh.heading),
        show_correct: show_solutions,
        quiz_mode: args.quiz_mode || chtml.quiz_mode.unwrap_or(dh.quiz_mode),
    };

    let root_name = match transform {
        Transform::Yaml => config.yaml.clone().and_then(|c| c.root_name),
        Transform::Json => config.json.clone().and_then(|c| c.root_name),
        _ => None,
    };
    let root_name = args
        .root_name
        .clone()
        .or(root_name)
        .unwrap_or_else(|| "questions".to_string());

    let question_prefix = args
        .question_prefix
        .clone()
        .or(config.toml.clone().and_then(|c| c.question_prefix))
        .unwrap_or_else(|| "question".to_string());

    let output_directory: PathBuf = args
        .out
        .clone()
        .or(cout.output_directory)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(CompileSettings {
        input,
        transform,
        output_directory,
        show_solutions,
        tex,
        html,
        root_name,
        question_prefix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pollev-compiler", "history.csv"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_follow_the_export_format() {
        let s = resolve_settings(&args(&[]), None).unwrap();
        assert_eq!(s.transform, Transform::Csv);
        assert_eq!(s.input, InputOptions::default());
        assert_eq!(s.tex, TexOptions::default());
        assert_eq!(s.root_name, "questions");
        assert_eq!(s.question_prefix, "question");
        assert_eq!(s.output_directory, PathBuf::from("."));
        assert_eq!(s.html.title, "history");
        assert!(s.show_solutions);
        assert!(!s.html.quiz_mode);
    }

    #[test]
    fn command_line_overrides_config() {
        let config: PollevConfig = serde_json::from_str(
            r#"{
                "input": {"removeStartLen": 3, "presenter": "Ada", "questionColumn": "Title"},
                "output": {"transform": "yaml", "shuffleResponses": true, "seed": 7},
                "yaml": {"rootName": "poll"},
                "html": {"quizMode": true}
            }"#,
        )
        .unwrap();
        let s = resolve_settings(&args(&[]), Some(&config)).unwrap();
        assert_eq!(s.transform, Transform::Yaml);
        assert_eq!(s.root_name, "poll");
        assert_eq!(s.input.remove_start_len, 3);
        assert_eq!(s.input.presenter.as_deref(), Some("Ada"));
        assert_eq!(s.input.question_column, "Title");
        assert_eq!(s.input.seed, Some(7));
        assert!(s.html.quiz_mode);

        let s = resolve_settings(
            &args(&[
                "-t",
                "json",
                "--remove-start-len",
                "8",
                "--presenter",
                "Grace",
                "--no-shuffle",
            ]),
            Some(&config),
        )
        .unwrap();
        assert_eq!(s.transform, Transform::Json);
        // The yaml section does not apply to json.
        assert_eq!(s.root_name, "questions");
        assert_eq!(s.input.remove_start_len, 8);
        assert_eq!(s.input.presenter.as_deref(), Some("Grace"));
        assert!(!s.input.shuffle);
    }

    #[test]
    fn encoding_labels() {
        let s = resolve_settings(&args(&["--encoding", "latin1"]), None).unwrap();
        assert_eq!(s.input.encoding, encoding_rs::WINDOWS_1252);
        let config: PollevConfig =
            serde_json::from_str(r#"{"input": {"encoding": "utf-16le"}}"#).unwrap();
        let s = resolve_settings(&args(&[]), Some(&config)).unwrap();
        assert_eq!(s.input.encoding, encoding_rs::UTF_16LE);
        assert!(resolve_settings(&args(&["--encoding", "klingon"]), None).is_err());
    }

    #[test]
    fn no_solutions_hides_correct_tags() {
        let s = resolve_settings(&args(&["--no-solutions", "-t", "html"]), None).unwrap();
        assert!(!s.show_solutions);
        assert!(!s.html.show_correct);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(resolve_settings(&args(&["-t", "pdf"]), None).is_err());
        let config: PollevConfig =
            serde_json::from_str(r#"{"tex": {"endSpacingMetric": "furlong"}}"#).unwrap();
        assert!(resolve_settings(&args(&["-t", "tex"]), Some(&config)).is_err());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.json");
        fs::write(&p, r#"{"tex": {"endSpacing": 6, "blockType": "titledquestion"}}"#).unwrap();
        let config = read_config(p.to_str().unwrap()).unwrap();
        let tex = config.tex.unwrap();
        assert_eq!(tex.end_spacing, Some(6));
        assert_eq!(tex.block_type.as_deref(), Some("titledquestion"));

        fs::write(&p, "{not json").unwrap();
        let err = read_config(p.to_str().unwrap()).unwrap_err();
        assert!(matches!(*err, PollevError::ParsingConfig { .. }));
    }
}
