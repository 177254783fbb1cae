use encoding_rs::Encoding;
use log::{debug, info, warn};

use poll_quiz::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use text_diff::print_diff;

use crate::args::Args;
use crate::pollev::config_reader::*;
use crate::pollev::io_csv::{read_poll_history, PollHistory};

mod config_reader;
mod io_common;
mod io_csv;
mod out_dict;
mod out_html;
mod out_tex;
mod out_text;

#[derive(Debug, Snafu)]
pub enum PollevError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Column {column:?} is missing from {path}"))]
    CsvMissingColumn { column: String, path: String },
    #[snafu(display("Error writing the CSV output"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error opening the configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing to JSON"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error serializing to YAML"))]
    SerializingYaml { source: serde_yaml::Error },
    #[snafu(display("Error serializing to TOML"))]
    SerializingToml { source: toml::ser::Error },
    #[snafu(display("Unknown output transform {name:?}, expected one of tex, txt, markdown, yaml, json, toml, csv, html"))]
    UnknownTransform { name: String },
    #[snafu(display("Error opening the reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the generated output and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type PollevResult<T> = Result<T, PollevError>;
type BPollevResult<T> = Result<T, Box<PollevError>>;

/// The output formats.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Transform {
    Tex,
    Txt,
    Markdown,
    Yaml,
    Json,
    Toml,
    Csv,
    Html,
}

impl Transform {
    pub fn extension(&self) -> &'static str {
        match self {
            Transform::Tex => "tex",
            Transform::Txt => "txt",
            Transform::Markdown => "md",
            Transform::Yaml => "yaml",
            Transform::Json => "json",
            Transform::Toml => "toml",
            Transform::Csv => "csv",
            Transform::Html => "html",
        }
    }
}

impl FromStr for Transform {
    type Err = PollevError;

    fn from_str(s: &str) -> PollevResult<Transform> {
        match s.to_lowercase().as_str() {
            "tex" | "latex" => Ok(Transform::Tex),
            "txt" | "text" => Ok(Transform::Txt),
            "markdown" | "md" => Ok(Transform::Markdown),
            "yaml" | "yml" => Ok(Transform::Yaml),
            "json" => Ok(Transform::Json),
            "toml" => Ok(Transform::Toml),
            "csv" => Ok(Transform::Csv),
            "html" => Ok(Transform::Html),
            _ => UnknownTransformSnafu { name: s }.fail(),
        }
    }
}

/// Renders the main output file for the given transform.
fn render_output(history: &PollHistory, settings: &CompileSettings) -> BPollevResult<String> {
    let questions: Vec<Question> = history.questions();
    let show = settings.show_solutions;
    let res = match settings.transform {
        Transform::Tex => out_tex::to_tex_exam(&questions, &settings.tex, show),
        Transform::Txt => out_text::to_txt_exam(&questions, show),
        Transform::Markdown => out_text::to_markdown_report(&questions, show),
        Transform::Yaml => out_dict::to_yaml_report(&questions, &settings.root_name, show)?,
        Transform::Json => out_dict::to_json_report(&questions, &settings.root_name, show)?,
        Transform::Toml => out_dict::to_toml_report(&questions, &settings.question_prefix, show)?,
        Transform::Csv => history.to_csv()?,
        Transform::Html => out_html::to_html_report(&questions, &settings.html, show),
    };
    Ok(res)
}

fn write_file(path: &Path, contents: &str, encoding: &'static Encoding) -> BPollevResult<()> {
    info!("Writing {:?}", path);
    let (bytes, used, had_errors) = encoding.encode(contents);
    if had_errors {
        warn!(
            "Some characters of {:?} cannot be written as {}, they were replaced",
            path,
            used.name()
        );
    }
    fs::write(path, &bytes).context(WritingOutputSnafu {
        path: path.display().to_string(),
    })?;
    Ok(())
}

/// Writes the compiled output and returns the path of the main output file.
fn write_output(contents: &str, settings: &CompileSettings, stem: &str) -> BPollevResult<PathBuf> {
    let file_name = format!("{}.{}", stem, settings.transform.extension());
    let encoding = settings.input.encoding;
    if settings.transform != Transform::Html {
        let p: PathBuf = settings.output_directory.join(file_name);
        write_file(&p, contents, encoding)?;
        return Ok(p);
    }

    // HTML reports go into their own directory, next to their assets.
    let dir = settings.output_directory.join(format!("{}-html", stem));
    fs::create_dir_all(&dir).context(WritingOutputSnafu {
        path: dir.display().to_string(),
    })?;
    let p = dir.join(file_name);
    write_file(&p, contents, encoding)?;
    write_file(&dir.join(STYLES_FILE_NAME), REPORT_STYLES, encoding)?;
    if settings.html.quiz_mode {
        write_file(&dir.join(SCRIPT_FILE_NAME), QUIZ_SCRIPT, encoding)?;
    }
    Ok(p)
}

fn check_reference(
    contents: &str,
    reference_path: &str,
    encoding: &'static Encoding,
) -> BPollevResult<()> {
    let bytes = fs::read(reference_path).context(OpeningReferenceSnafu {
        path: reference_path,
    })?;
    let (reference, _, _) = encoding.decode(&bytes);
    if reference != contents {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(&reference, contents, "\n");
        return Err(Box::new(PollevError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("Output matches the reference {}", reference_path);
    Ok(())
}

pub fn run_compile(args: &Args) -> BPollevResult<()> {
    let config = match args.config.as_deref() {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    let settings = resolve_settings(args, config.as_ref())?;
    debug!("run_compile: settings: {:?}", settings);

    let history = read_poll_history(&args.input, &settings.input)?;
    info!(
        "Read {} multiple choice questions from {}",
        history.len(),
        args.input
    );
    if history.is_empty() {
        warn!("No question left after filtering {}", args.input);
    }

    let contents = render_output(&history, &settings)?;
    let stem = io_common::file_stem(&args.input);
    let out_path = write_output(&contents, &settings, &stem)?;
    info!("Compiled {} into {}", args.input, out_path.display());

    if let Some(reference) = args.reference.as_deref() {
        check_reference(&contents, reference, settings.input.encoding)?;
    }
    Ok(())
}
