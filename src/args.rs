use clap::Parser;

/// This program compiles PollEverywhere history exports into other formats.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The CSV export of the poll history.
    #[clap(value_parser)]
    pub input: String,

    /// (default csv) The output transform: tex, txt, markdown, yaml, json, toml, csv or html.
    #[clap(short, long, value_parser)]
    pub transform: Option<String>,

    /// (file path, optional) A JSON configuration file. Command line flags override its values.
    /// For more information about the file format, read the documentation of the manual.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (optional) Only keep the questions asked by this presenter.
    #[clap(long, value_parser)]
    pub presenter: Option<String>,

    /// (default utf-8) Encoding of the export, also used for writing the output.
    /// Accepts the WHATWG labels, such as latin1, windows-1252 or utf-16le.
    #[clap(short, long, value_parser)]
    pub encoding: Option<String>,

    /// (directory, default: current directory) Where the output is written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// Remove the questions whose title is hidden.
    #[clap(long, takes_value = false)]
    pub remove_hidden: bool,

    /// Remove the questions with images in their title or responses.
    #[clap(long, takes_value = false)]
    pub remove_images: bool,

    /// Do not include the solutions in the output.
    #[clap(long, takes_value = false)]
    pub no_solutions: bool,

    /// Keep the response options in the order of the export.
    #[clap(long, takes_value = false)]
    pub no_shuffle: bool,

    /// (integer, optional) Seed for shuffling the response options, for reproducible outputs.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (integer, default 5) How far into a title or response to look for a prefix such as `a)`.
    #[clap(long, value_parser)]
    pub remove_start_len: Option<usize>,

    /// (html only) Turn the report into an interactive quiz.
    #[clap(long, takes_value = false)]
    pub quiz_mode: bool,

    /// (yaml and json only, default questions) The key at the root of the output.
    #[clap(long, value_parser)]
    pub root_name: Option<String>,

    /// (toml only, default question) The table holding the questions.
    #[clap(long, value_parser)]
    pub question_prefix: Option<String>,

    /// (file path) A reference file containing the expected output. If provided, the
    /// generated output is checked against it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
