// Reading the poll history exports.

use csv::StringRecord;
use encoding_rs_io::DecodeReaderBytesBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::pollev::{io_common::remove_question_start, *};

/// A multiple-choice question kept from the export, with the raw CSV fields
/// it was read from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollRecord {
    pub lineno: usize,
    pub fields: Vec<String>,
    pub question: Question,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollHistory {
    pub headers: Vec<String>,
    pub records: Vec<PollRecord>,
}

impl PollHistory {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn questions(&self) -> Vec<Question> {
        self.records.iter().map(|r| r.question.clone()).collect()
    }

    /// The filtered export, with the original columns.
    pub fn to_csv(&self) -> BPollevResult<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.headers).context(CsvWriteSnafu {})?;
        for r in self.records.iter() {
            wtr.write_record(&r.fields).context(CsvWriteSnafu {})?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| e.into_error())
            .context(WritingOutputSnafu { path: "<csv>" })?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}

fn column_index(headers: &[String], name: &str, path: &str) -> PollevResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .context(CsvMissingColumnSnafu { column: name, path })
}

pub fn read_poll_history(path: &str, opts: &InputOptions) -> BPollevResult<PollHistory> {
    let file = fs::File::open(path)
        .map_err(csv::Error::from)
        .context(CsvOpenSnafu { path })?;
    // A byte order mark, when present, takes precedence over the configured encoding.
    let decoded = DecodeReaderBytesBuilder::new()
        .encoding(Some(opts.encoding))
        .build(file);
    debug!("read_poll_history: reading {} as {}", path, opts.encoding.name());
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(decoded);
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvOpenSnafu { path })?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    debug!("read_poll_history: headers: {:?}", headers);

    let columns = Columns {
        question: column_index(&headers, &opts.question_column, path)?,
        activity_type: column_index(&headers, &opts.activity_type_column, path)?,
        response: column_index(&headers, &opts.response_column, path)?,
        presenter: match opts.presenter {
            Some(_) => Some(column_index(&headers, &opts.presenter_column, path)?),
            None => None,
        },
    };

    let mut rng: StdRng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut records: Vec<PollRecord> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // Line 1 holds the headers.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        if let Some(record) = read_record(&line, lineno, &columns, opts, &mut rng) {
            records.push(record);
        }
    }
    Ok(PollHistory { headers, records })
}

// Positions of the columns in the export.
struct Columns {
    question: usize,
    activity_type: usize,
    response: usize,
    presenter: Option<usize>,
}

fn read_record(
    line: &StringRecord,
    lineno: usize,
    columns: &Columns,
    opts: &InputOptions,
    rng: &mut StdRng,
) -> Option<PollRecord> {
    let field = |idx: usize| line.get(idx).unwrap_or("");

    if let (Some(p), Some(p_idx)) = (&opts.presenter, columns.presenter) {
        if field(p_idx) != p {
            debug!("read_record: line {}: other presenter {:?}", lineno, field(p_idx));
            return None;
        }
    }
    let activity_type = field(columns.activity_type);
    if activity_type != opts.multiple_choice_type {
        debug!(
            "read_record: line {}: skipping activity type {:?}",
            lineno, activity_type
        );
        return None;
    }

    let raw_title = field(columns.question);
    let raw_responses = field(columns.response);
    let title = remove_question_start(raw_title, opts.remove_start_len);

    if opts.remove_hidden && title == opts.hidden_title {
        debug!("read_record: line {}: hidden question", lineno);
        return None;
    }
    if opts.remove_images
        && (title.contains(&opts.image_marker) || raw_responses.contains(&opts.image_marker))
    {
        debug!("read_record: line {}: question with images", lineno);
        return None;
    }

    let mut split: Vec<String> = raw_responses
        .split(opts.response_delimiter.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(|s| remove_question_start(s, opts.remove_start_len))
        .collect();
    if split.is_empty() {
        warn!("read_record: line {}: question {:?} has no responses", lineno, title);
    }
    if opts.shuffle {
        split.shuffle(rng);
    }

    let correct: Vec<String> = split
        .iter()
        .filter(|s| s.contains(&opts.correct_marker))
        .map(|s| s.replace(&opts.correct_marker, "").trim().to_string())
        .collect();
    let responses: Vec<String> = split
        .iter()
        .map(|s| s.replace(&opts.correct_marker, "").trim().to_string())
        .collect();

    let mut fields: Vec<String> = line.iter().map(|s| s.to_string()).collect();
    if let Some(f) = fields.get_mut(columns.question) {
        *f = title.clone();
    }

    Some(PollRecord {
        lineno,
        fields,
        question: Question {
            title,
            responses,
            correct,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\u{feff}Activity type,Activity title,Presenter,Response options,Total responses
Multiple choice,1) Capital of France?,Ada,a) Paris (Correct) | b) Lyon | c) Nice,12
Word cloud,Describe the course,Ada,,30
Multiple choice,~hidden~,Ada,Yes | No,3
Multiple choice,2) Which chart?,Grace,(an image) | Bar chart (Correct),8
Multiple choice,3) Pick all primes,Grace,2 (Correct) | 3 (Correct) | 4,5
";

    fn read(opts: &InputOptions) -> PollHistory {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("history.csv");
        fs::write(&p, EXPORT).unwrap();
        read_poll_history(p.to_str().unwrap(), opts).unwrap()
    }

    fn unshuffled() -> InputOptions {
        InputOptions {
            shuffle: false,
            ..InputOptions::default()
        }
    }

    #[test]
    fn keeps_multiple_choice_questions() {
        let h = read(&unshuffled());
        assert_eq!(h.len(), 4);
        let q = &h.records[0].question;
        assert_eq!(q.title, "Capital of France?");
        assert_eq!(q.responses, vec!["Paris", "Lyon", "Nice"]);
        assert_eq!(q.correct, vec!["Paris"]);
        assert_eq!(h.records[0].lineno, 2);
        assert_eq!(h.headers[0], "Activity type");
    }

    #[test]
    fn multiple_correct_responses() {
        let h = read(&unshuffled());
        let q = &h.records[3].question;
        assert_eq!(q.correct, vec!["2", "3"]);
        assert_eq!(q.responses, vec!["2", "3", "4"]);
    }

    #[test]
    fn filters() {
        let opts = InputOptions {
            remove_hidden: true,
            remove_images: true,
            presenter: Some("Ada".to_string()),
            ..unshuffled()
        };
        let h = read(&opts);
        assert_eq!(h.len(), 1);
        assert_eq!(h.records[0].question.title, "Capital of France?");
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let opts = InputOptions {
            seed: Some(42),
            ..InputOptions::default()
        };
        let a = read(&opts);
        let b = read(&opts);
        assert_eq!(a, b);
        let mut sorted = a.records[0].question.responses.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["Lyon", "Nice", "Paris"]);
    }

    #[test]
    fn csv_output_keeps_columns() {
        let h = read(&InputOptions {
            remove_hidden: true,
            ..unshuffled()
        });
        let out = h.to_csv().unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Activity type,Activity title,Presenter,Response options,Total responses")
        );
        assert_eq!(
            lines.next(),
            Some("Multiple choice,Capital of France?,Ada,a) Paris (Correct) | b) Lyon | c) Nice,12")
        );
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn reads_latin1_exports() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("history.csv");
        let mut bytes: Vec<u8> = b"Activity type,Activity title,Response options\n".to_vec();
        bytes.extend_from_slice(b"Multiple choice,1) Caf\xe9 ou th\xe9?,Caf\xe9 (Correct) | Th\xe9\n");
        fs::write(&p, &bytes).unwrap();
        let opts = InputOptions {
            encoding: encoding_rs::WINDOWS_1252,
            ..unshuffled()
        };
        let h = read_poll_history(p.to_str().unwrap(), &opts).unwrap();
        let q = &h.records[0].question;
        assert_eq!(q.title, "Café ou thé?");
        assert_eq!(q.correct, vec!["Café"]);
        assert_eq!(q.responses, vec!["Café", "Thé"]);
    }

    #[test]
    fn missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("history.csv");
        fs::write(&p, "Activity type,Presenter\nMultiple choice,Ada\n").unwrap();
        let err = read_poll_history(p.to_str().unwrap(), &InputOptions::default()).unwrap_err();
        assert!(matches!(*err, PollevError::CsvMissingColumn { .. }));
    }
}
