/*!

This is the long-form manual for `poll_quiz` and `pollev-compiler`.

## Markup contract

The renderer, the [`QuizEngine`](crate::QuizEngine) and the browser script
(`html-js.js`) agree on the following markup:

| Element | Marker |
|---------|--------|
| question group | `<ol class="options">` wrapping the options of one question |
| option | `<li class="correct">` or `<li class="incorrect">` |
| feedback | `selected-correct` / `selected-incorrect` class added on the clicked option |
| score counter | `<span id="score-counter" data-curr=".." data-maximum="..">curr/maximum</span>` |
| reset control | any element with class `reset-quiz` |

`data-maximum` is the number of questions having at least one correct
response. It is written once by the renderer and never changes.

## Quiz rounds

A round starts when the page finishes loading, or after a reset.

- The first click in a question group shows the feedback on the clicked
  option and locks the group until the next reset. A correct option adds one
  point.
- A click on an option that carries neither `correct` nor `incorrect` does
  nothing. This is the case of correct responses when the report is compiled
  without solutions.
- A reset sets the score back to zero, removes every feedback class, reopens
  all the groups and scrolls back to the top of the page.

## Output formats

`pollev-compiler` supports the following transforms:
* `tex` LaTeX `exam` document
* `txt` plain text
* `markdown`
* `yaml`, `json`, `toml` question dictionaries
* `csv` the filtered export
* `html` browsable report (add `--quiz-mode` for the interactive quiz)

## Configuration file

`pollev-compiler --config <file>` reads a JSON file. All the sections and
fields are optional, and the command line flags take precedence.

```json
{
  "input": {
    "questionColumn": "Activity title",
    "responseColumn": "Response options",
    "correctMarker": "(Correct)",
    "removeStartLen": 5,
    "presenter": "Ada",
    "removeHidden": true,
    "encoding": "windows-1252"
  },
  "output": {
    "transform": "html",
    "outputDirectory": "reports",
    "showSolutions": true,
    "shuffleResponses": true,
    "seed": 42
  },
  "tex": {
    "blockType": "question",
    "respBlockType": "oneparcheckboxes",
    "endSpacing": 4,
    "endSpacingMetric": "pt"
  },
  "html": { "quizMode": true, "heading": "Week 3" },
  "yaml": { "rootName": "questions" },
  "json": { "rootName": "questions" },
  "toml": { "questionPrefix": "question" }
}
```

*/
