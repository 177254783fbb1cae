//! The quiz interaction engine.
//!
//! Turns a rendered report into a single-attempt quiz: the first click in a
//! question group locks in the feedback for that group and updates the score,
//! and a reset brings every group back to its unanswered state.
//!
//! The engine collects handles to the options, groups, score counter and
//! reset controls once, when the document is ready. Malformed markup never
//! produces an error: the offending click is ignored.

use log::{debug, info};
use std::collections::{HashMap, HashSet};

use crate::config::*;
use crate::document::{Document, NodeId};

#[derive(Eq, PartialEq, Debug, Clone)]
struct QuestionGroup {
    options: Vec<NodeId>,
    // Set by the first answer of a round, cleared by reset.
    locked: bool,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct ScoreCounter {
    node: Option<NodeId>,
    curr: u32,
    maximum: u32,
}

/// Events delivered by the host.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Event {
    /// A click on any node of the document. Clicks bubble up to the nearest
    /// option or reset control.
    Click(NodeId),
}

#[derive(Debug, Clone)]
pub struct QuizEngine {
    doc: Document,
    options: HashSet<NodeId>,
    groups: HashMap<NodeId, QuestionGroup>,
    // Insertion order of the groups, for reporting.
    group_order: Vec<NodeId>,
    resets: HashSet<NodeId>,
    counter: ScoreCounter,
}

impl QuizEngine {
    /// Attaches the engine to a fully loaded document.
    pub fn on_ready(doc: Document) -> QuizEngine {
        let mut options: HashSet<NodeId> = HashSet::new();
        let mut groups: HashMap<NodeId, QuestionGroup> = HashMap::new();
        let mut group_order: Vec<NodeId> = Vec::new();

        let mut tagged = doc.elements_by_class(CORRECT_CLASS);
        tagged.extend(doc.elements_by_class(INCORRECT_CLASS));
        tagged.sort();
        tagged.dedup();
        for opt in tagged {
            options.insert(opt);
            match doc.closest(opt, QUESTION_GROUP_CLASS) {
                Some(g) => {
                    if !groups.contains_key(&g) {
                        group_order.push(g);
                    }
                    groups
                        .entry(g)
                        .or_insert_with(|| QuestionGroup {
                            options: Vec::new(),
                            locked: false,
                        })
                        .options
                        .push(opt);
                }
                None => {
                    debug!("on_ready: option {:?} is outside of any question group", opt);
                }
            }
        }

        let resets: HashSet<NodeId> = doc.elements_by_class(RESET_CLASS).into_iter().collect();

        let node = doc.element_by_id(SCORE_COUNTER_ID);
        let maximum = node
            .and_then(|n| doc.attribute(n, SCORE_MAXIMUM_ATTR))
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or_else(|| count_scorable_groups(&doc, &groups));

        info!(
            "Quiz ready: {} options in {} groups, {} reset controls, maximum score {}",
            options.len(),
            groups.len(),
            resets.len(),
            maximum
        );

        let mut engine = QuizEngine {
            doc,
            options,
            groups,
            group_order,
            resets,
            counter: ScoreCounter {
                node,
                curr: 0,
                maximum,
            },
        };
        engine.display_score();
        engine
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn score(&self) -> Score {
        Score {
            curr: self.counter.curr,
            maximum: self.counter.maximum,
        }
    }

    /// Question groups in document order.
    pub fn groups(&self) -> Vec<NodeId> {
        self.group_order.clone()
    }

    /// The options of a group, in document order.
    pub fn group_options(&self, group: NodeId) -> &[NodeId] {
        self.groups
            .get(&group)
            .map(|g| g.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn group_state(&self, group: NodeId) -> Option<GroupState> {
        let g = self.groups.get(&group)?;
        if !g.locked {
            return Some(GroupState::Unanswered);
        }
        let answered_correct = g
            .options
            .iter()
            .any(|o| self.doc.has_class(*o, SELECTED_CORRECT_CLASS));
        if answered_correct {
            Some(GroupState::AnsweredCorrect)
        } else {
            Some(GroupState::AnsweredIncorrect)
        }
    }

    /// Whether a click on this option would currently be processed.
    pub fn is_clickable(&self, option: NodeId) -> bool {
        self.options.contains(&option)
            && self
                .doc
                .closest(option, QUESTION_GROUP_CLASS)
                .and_then(|g| self.groups.get(&g))
                .map(|g| !g.locked)
                .unwrap_or(false)
    }

    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::Click(target) => self.click(target),
        }
    }

    /// Routes a click on any node to the option or reset control it belongs to.
    pub fn click(&mut self, target: NodeId) {
        let hit = self
            .doc
            .closest_where(target, |id| self.options.contains(&id) || self.resets.contains(&id));
        match hit {
            Some(id) if self.resets.contains(&id) => self.reset(),
            Some(id) => self.handle_selection(id),
            None => debug!("click: {:?} has no responder", target),
        }
    }

    /// Records the answer given by clicking `option`.
    pub fn handle_selection(&mut self, option: NodeId) {
        // Resolved per click: the group is whatever encloses the option now.
        let group_id = match self.doc.closest(option, QUESTION_GROUP_CLASS) {
            Some(g) => g,
            None => {
                debug!("handle_selection: {:?} is not in a question group", option);
                return;
            }
        };
        let members: Vec<NodeId> = match self.groups.get(&group_id) {
            Some(g) if g.locked => {
                debug!("handle_selection: group {:?} already answered", group_id);
                return;
            }
            Some(g) => g.options.clone(),
            None => {
                debug!("handle_selection: group {:?} has no registered options", group_id);
                return;
            }
        };

        for o in members.iter() {
            self.doc.remove_class(*o, SELECTED_CORRECT_CLASS);
            self.doc.remove_class(*o, SELECTED_INCORRECT_CLASS);
        }

        let selection = if self.doc.has_class(option, CORRECT_CLASS) {
            Selection::Correct
        } else if self.doc.has_class(option, INCORRECT_CLASS) {
            Selection::Incorrect
        } else {
            debug!("handle_selection: {:?} is neither correct nor incorrect", option);
            return;
        };

        self.doc.add_class(option, selection.class());
        if selection == Selection::Correct {
            if self.counter.curr < self.counter.maximum {
                self.counter.curr += 1;
            } else {
                debug!(
                    "handle_selection: score already at maximum {}",
                    self.counter.maximum
                );
            }
        }
        self.display_score();

        if let Some(g) = self.groups.get_mut(&group_id) {
            g.locked = true;
        }
        debug!(
            "handle_selection: group {:?} answered {:?}, score {}",
            group_id,
            selection,
            self.score()
        );
    }

    /// Starts a new round: zero score, no feedback shown, every group open.
    pub fn reset(&mut self) {
        self.counter.curr = 0;
        self.display_score();

        for class in [SELECTED_CORRECT_CLASS, SELECTED_INCORRECT_CLASS] {
            for node in self.doc.elements_by_class(class) {
                self.doc.remove_class(node, class);
            }
        }

        for g in self.groups.values_mut() {
            g.locked = false;
        }

        self.doc.scroll_to(0, ScrollBehavior::Smooth);
        info!("Quiz reset, score {}", self.score());
    }

    fn display_score(&mut self) {
        let score = self.score();
        if let Some(node) = self.counter.node {
            self.doc
                .set_attribute(node, SCORE_CURR_ATTR, &score.curr.to_string());
            self.doc
                .set_attribute(node, SCORE_MAXIMUM_ATTR, &score.maximum.to_string());
            self.doc.set_text_content(node, &score.to_string());
        }
    }
}

fn count_scorable_groups(doc: &Document, groups: &HashMap<NodeId, QuestionGroup>) -> u32 {
    groups
        .values()
        .filter(|g| g.options.iter().any(|o| doc.has_class(*o, CORRECT_CLASS)))
        .count() as u32
}
