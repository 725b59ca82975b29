//! Compiles endpoint templates into a [`DfaMatcher`].
//!
//! # Algorithm
//!
//! The builder first grows a node tree one depth at a time. Every endpoint carries the set
//! of nodes it currently occupies; at each depth three passes run over the endpoints in
//! registration order:
//!
//! 1. literal requirements create (case-insensitively keyed) literal children
//! 2. parameter requirements create the parameter child
//! 3. every endpoint moves on:
//!    - a literal moves to its literal child
//!    - a parameter moves to the parameter child **and every literal sibling**, so a path
//!      never has to back out of a literal branch to try the parameter
//!    - a catch-all matches here, fills a catch-all child that ends the walk, and keeps
//!      following the literal and parameter children so deeper siblings still see it
//!
//! An endpoint also matches at a node once every requirement it has left may be absent.
//!
//! The tree is then numbered depth first (root = 0) and each node becomes one state whose
//! jump table is picked by the cost model in [`MatcherOptions`].

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::candidate::Candidate;
use super::dfa::{DfaMatcher, DfaState};
use super::error::BuildError;
use super::jump_table::{JumpTable, NO_MATCH};
use super::options::MatcherOptions;
use super::pattern::{RoutePattern, SegmentRequirement};

#[derive(Debug, Default)]
struct Node {
    label: String,
    /// folded key -> (literal as first registered, child)
    literals: BTreeMap<String, (String, usize)>,
    parameter: Option<usize>,
    catch_all: Option<usize>,
    matches: Vec<usize>,
    /// Catch-all nodes consume the rest of the path
    stops: bool,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn new() -> Self {
        Self {
            nodes: vec![Node {
                label: "/".to_string(),
                ..Node::default()
            }],
        }
    }

    fn child_label(&self, parent: usize, segment: &str) -> String {
        let parent = &self.nodes[parent].label;
        if parent == "/" {
            format!("/{segment}")
        } else {
            format!("{parent}/{segment}")
        }
    }

    fn push(&mut self, label: String, stops: bool) -> usize {
        self.nodes.push(Node {
            label,
            stops,
            ..Node::default()
        });
        self.nodes.len() - 1
    }

    fn literal_child(&mut self, parent: usize, text: &str) -> usize {
        let key = text.to_ascii_lowercase();
        if let Some((_, child)) = self.nodes[parent].literals.get(&key) {
            return *child;
        }
        let label = self.child_label(parent, text);
        let child = self.push(label, false);
        self.nodes[parent]
            .literals
            .insert(key, (text.to_string(), child));
        child
    }

    fn parameter_child(&mut self, parent: usize) -> usize {
        if let Some(child) = self.nodes[parent].parameter {
            return child;
        }
        let label = self.child_label(parent, "{}");
        let child = self.push(label, false);
        self.nodes[parent].parameter = Some(child);
        child
    }

    fn catch_all_child(&mut self, parent: usize) -> usize {
        if let Some(child) = self.nodes[parent].catch_all {
            return child;
        }
        let label = self.child_label(parent, "{*}");
        let child = self.push(label, true);
        self.nodes[parent].catch_all = Some(child);
        child
    }

    fn add_match(&mut self, node: usize, endpoint: usize) {
        let matches = &mut self.nodes[node].matches;
        if !matches.contains(&endpoint) {
            matches.push(endpoint);
        }
    }

    fn literal_children(&self, parent: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[parent].literals.values().map(|(_, child)| *child)
    }
}

/// The requirement an endpoint places on segment `depth`.
///
/// A trailing catch-all keeps applying past the end of the template.
fn requirement_at(pattern: &RoutePattern, depth: usize) -> Option<&SegmentRequirement> {
    match pattern.segments().get(depth) {
        Some(requirement) => Some(requirement),
        None => pattern
            .segments()
            .last()
            .filter(|r| matches!(r, SegmentRequirement::CatchAll(_))),
    }
}

fn rest_may_be_absent(pattern: &RoutePattern, depth: usize) -> bool {
    pattern
        .segments()
        .get(depth..)
        .map_or(true, |rest| rest.iter().all(SegmentRequirement::may_be_absent))
}

/// One automaton state in numbering order.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Node(usize),
    Exit(usize),
}

/// Collects endpoints and compiles them into an immutable [`DfaMatcher`].
///
/// Endpoints are matched in registration order: when several reach the same state they
/// appear as candidates in the order they were added.
#[derive(Debug, Clone)]
pub struct MatcherBuilder<T> {
    options: MatcherOptions,
    endpoints: Vec<(RoutePattern, T)>,
}

impl<T: Clone> Default for MatcherBuilder<T> {
    fn default() -> Self {
        Self::new(MatcherOptions::default())
    }
}

impl<T: Clone> MatcherBuilder<T> {
    #[must_use]
    pub fn new(options: MatcherOptions) -> Self {
        Self {
            options,
            endpoints: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Register `endpoint` under an already parsed requirement sequence.
    ///
    /// Structural problems are reported by [`MatcherBuilder::build`].
    pub fn add_endpoint(&mut self, pattern: impl Into<RoutePattern>, endpoint: T) -> &mut Self {
        self.endpoints.push((pattern.into(), endpoint));
        self
    }

    /// Register `endpoint` under a `/a/{id}/{*rest}` style template.
    pub fn add_template(&mut self, template: &str, endpoint: T) -> Result<&mut Self, BuildError> {
        let pattern = RoutePattern::parse(template)?;
        Ok(self.add_endpoint(pattern, endpoint))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Validate every endpoint and compile the automaton.
    pub fn build(&self) -> Result<DfaMatcher<T>, BuildError> {
        for (pattern, _) in &self.endpoints {
            pattern.validate(&pattern.to_string())?;
        }

        let tree = self.build_tree();
        let matcher = self.build_states(&tree);

        info!(
            states = matcher.state_count(),
            endpoints = self.endpoints.len(),
            max_segment_count = matcher.max_segment_count(),
            tables = ?matcher.table_histogram(),
            "dfa matcher built"
        );
        Ok(matcher)
    }

    fn build_tree(&self) -> Tree {
        let mut tree = Tree::new();
        let mut work: Vec<(usize, Vec<usize>)> =
            (0..self.endpoints.len()).map(|e| (e, vec![0])).collect();
        let mut depth = 0;

        while !work.is_empty() {
            for (endpoint, parents) in &work {
                if let Some(SegmentRequirement::Literal(text)) =
                    self.endpoints[*endpoint].0.segments().get(depth)
                {
                    for &parent in parents {
                        tree.literal_child(parent, text);
                    }
                }
            }

            for (endpoint, parents) in &work {
                if let Some(SegmentRequirement::Parameter { .. }) =
                    self.endpoints[*endpoint].0.segments().get(depth)
                {
                    for &parent in parents {
                        tree.parameter_child(parent);
                    }
                }
            }

            let mut next_work = Vec::with_capacity(work.len());
            for (endpoint, parents) in work {
                let pattern = &self.endpoints[endpoint].0;
                let Some(requirement) = requirement_at(pattern, depth) else {
                    for &parent in &parents {
                        tree.add_match(parent, endpoint);
                    }
                    continue;
                };

                if rest_may_be_absent(pattern, depth) {
                    for &parent in &parents {
                        tree.add_match(parent, endpoint);
                    }
                }

                let mut next = Vec::new();
                for &parent in &parents {
                    match requirement {
                        SegmentRequirement::Literal(text) => {
                            next.push(tree.literal_child(parent, text));
                        }
                        SegmentRequirement::Parameter { .. } => {
                            next.push(tree.parameter_child(parent));
                            next.extend(tree.literal_children(parent));
                        }
                        SegmentRequirement::CatchAll(_) => {
                            let catch_all = tree.catch_all_child(parent);
                            tree.add_match(catch_all, endpoint);
                            next.extend(tree.literal_children(parent));
                            next.extend(tree.nodes[parent].parameter);
                        }
                    }
                }
                if !next.is_empty() {
                    next_work.push((endpoint, next));
                }
            }

            work = next_work;
            depth += 1;
        }

        tree
    }

    /// Depth-first slot order: a node, its literal children (by folded key), its parameter
    /// child, its catch-all child, then its exit state.
    fn number(tree: &Tree, node: usize, order: &mut Vec<Slot>) {
        order.push(Slot::Node(node));
        let n = &tree.nodes[node];
        for (_, child) in n.literals.values() {
            Self::number(tree, *child, order);
        }
        if let Some(child) = n.parameter {
            Self::number(tree, child, order);
        }
        if let Some(child) = n.catch_all {
            Self::number(tree, child, order);
        }
        if !n.stops && !n.matches.is_empty() {
            order.push(Slot::Exit(node));
        }
    }

    fn candidates(&self, matches: &[usize]) -> Vec<Candidate<T>> {
        let keys: Vec<Vec<u8>> = matches
            .iter()
            .map(|&e| self.endpoints[e].0.precedence())
            .collect();
        let mut ranks = keys.clone();
        ranks.sort();
        ranks.dedup();

        matches
            .iter()
            .zip(&keys)
            .map(|(&e, key)| {
                let rank = ranks.binary_search(key).unwrap_or(0);
                let score = u32::try_from(rank).unwrap_or(u32::MAX);
                let (pattern, endpoint) = &self.endpoints[e];
                Candidate::new(endpoint.clone(), pattern, score)
            })
            .collect()
    }

    fn build_states(&self, tree: &Tree) -> DfaMatcher<T> {
        let mut order = Vec::with_capacity(tree.nodes.len());
        Self::number(tree, 0, &mut order);

        let mut ids = vec![NO_MATCH; tree.nodes.len()];
        let mut exit_ids = vec![NO_MATCH; tree.nodes.len()];
        for (id, slot) in order.iter().enumerate() {
            match *slot {
                Slot::Node(node) => ids[node] = id,
                Slot::Exit(node) => exit_ids[node] = id,
            }
        }
        let id_of = |child: Option<usize>| child.map_or(NO_MATCH, |c| ids[c]);

        let mut states = Vec::with_capacity(order.len());
        for (id, slot) in order.iter().enumerate() {
            let state = match *slot {
                Slot::Exit(node) => {
                    // A catch-all child still owns whatever follows the empty segment.
                    let n = &tree.nodes[node];
                    let rest = id_of(n.catch_all);
                    DfaState {
                        label: format!("{} (exit)", n.label).into_boxed_str(),
                        candidates: self.candidates(&n.matches).into_boxed_slice(),
                        transitions: Some(JumpTable::build(rest, rest, &[], &self.options)),
                    }
                }
                Slot::Node(node) => {
                    let n = &tree.nodes[node];
                    let transitions = if n.stops {
                        None
                    } else {
                        let default_destination = match n.parameter {
                            Some(_) => id_of(n.parameter),
                            None => id_of(n.catch_all),
                        };
                        let exit_destination = match exit_ids[node] {
                            NO_MATCH => id_of(n.catch_all),
                            exit => exit,
                        };
                        let entries: Vec<(String, usize)> = n
                            .literals
                            .values()
                            .map(|(text, child)| (text.clone(), ids[*child]))
                            .collect();
                        let table = JumpTable::build(
                            default_destination,
                            exit_destination,
                            &entries,
                            &self.options,
                        );
                        debug!(
                            state = id,
                            label = %n.label,
                            kind = %table.kind(),
                            literals = entries.len(),
                            "jump table selected"
                        );
                        Some(table)
                    };
                    DfaState {
                        label: n.label.clone().into_boxed_str(),
                        candidates: self.candidates(&n.matches).into_boxed_slice(),
                        transitions,
                    }
                }
            };
            states.push(state);
        }

        let max_segment_count = self
            .endpoints
            .iter()
            .map(|(pattern, _)| pattern.len())
            .max()
            .unwrap_or(0);
        DfaMatcher::new(states, max_segment_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::jump_table::JumpTableKind;

    fn build(templates: &[(&str, &'static str)]) -> DfaMatcher<&'static str> {
        let mut builder = MatcherBuilder::default();
        for (template, endpoint) in templates {
            builder.add_template(template, *endpoint).expect("template");
        }
        builder.build().expect("build")
    }

    fn state<'m>(matcher: &'m DfaMatcher<&'static str>, label: &str) -> &'m DfaState<&'static str> {
        matcher
            .states()
            .iter()
            .find(|s| s.label() == label)
            .unwrap_or_else(|| panic!("no state labelled {label}"))
    }

    fn endpoints(state: &DfaState<&'static str>) -> Vec<&'static str> {
        state.candidates().iter().map(|c| c.endpoint).collect()
    }

    #[test]
    fn test_single_endpoint_empty() {
        let matcher = build(&[("/", "e")]);
        assert_eq!(endpoints(&matcher.states()[0]), vec!["e"]);
        assert_eq!(matcher.max_segment_count(), 0);
    }

    #[test]
    fn test_single_endpoint_literals() {
        let matcher = build(&[("/a/b/c", "e")]);
        assert!(state(&matcher, "/").candidates().is_empty());
        assert!(state(&matcher, "/a").candidates().is_empty());
        assert!(state(&matcher, "/a/b").candidates().is_empty());
        assert_eq!(endpoints(state(&matcher, "/a/b/c")), vec!["e"]);
        assert_eq!(matcher.max_segment_count(), 3);
        let root = matcher.states()[0].transitions().expect("table");
        assert_eq!(root.kind(), JumpTableKind::SingleEntry);
        assert_eq!(root.default_destination(), NO_MATCH);
    }

    #[test]
    fn test_single_endpoint_parameters() {
        let matcher = build(&[("/{a}/{b}/{c}", "e")]);
        assert_eq!(endpoints(state(&matcher, "/{}/{}/{}")), vec!["e"]);
        let root = matcher.states()[0].transitions().expect("table");
        assert_eq!(root.kind(), JumpTableKind::ZeroEntry);
        assert_eq!(root.default_destination(), 1);
    }

    #[test]
    fn test_single_endpoint_catch_all() {
        let matcher = build(&[("/a/{*b}", "e")]);
        assert!(state(&matcher, "/").candidates().is_empty());
        assert_eq!(endpoints(state(&matcher, "/a")), vec!["e"]);
        let catch_all = state(&matcher, "/a/{*}");
        assert_eq!(endpoints(catch_all), vec!["e"]);
        assert!(catch_all.transitions().is_none());
    }

    #[test]
    fn test_single_endpoint_catch_all_at_root() {
        let matcher = build(&[("/{*path}", "e")]);
        assert_eq!(endpoints(&matcher.states()[0]), vec!["e"]);
        assert_eq!(endpoints(state(&matcher, "/{*}")), vec!["e"]);
    }

    #[test]
    fn test_literal_and_literal() {
        let matcher = build(&[("/a/b1/c", "e1"), ("/a/b2/c", "e2")]);
        let a = state(&matcher, "/a").transitions().expect("table");
        assert_eq!(a.kind(), JumpTableKind::LinearSearch);
        assert_eq!(endpoints(state(&matcher, "/a/b1/c")), vec!["e1"]);
        assert_eq!(endpoints(state(&matcher, "/a/b2/c")), vec!["e2"]);
    }

    #[test]
    fn test_literal_different_case_shares_state() {
        let matcher = build(&[("/a/b/c", "e1"), ("/A/B/c", "e2")]);
        assert_eq!(endpoints(state(&matcher, "/a/b/c")), vec!["e1", "e2"]);
        assert!(matcher.states().iter().all(|s| s.label() != "/A"));
    }

    #[test]
    fn test_literal_and_parameter() {
        let matcher = build(&[("/a/b/c", "e1"), ("/a/{b}/c", "e2")]);
        // The parameter endpoint follows the literal sibling too.
        assert_eq!(endpoints(state(&matcher, "/a/b/c")), vec!["e1", "e2"]);
        assert_eq!(endpoints(state(&matcher, "/a/{}/c")), vec!["e2"]);
        let scores: Vec<u32> = state(&matcher, "/a/b/c")
            .candidates()
            .iter()
            .map(|c| c.score)
            .collect();
        assert_eq!(scores, vec![0, 1]);
    }

    #[test]
    fn test_parameter_and_parameter() {
        let matcher = build(&[("/a/{b1}/c", "e1"), ("/a/{b2}/c", "e2")]);
        let c = state(&matcher, "/a/{}/c");
        assert_eq!(endpoints(c), vec!["e1", "e2"]);
        assert!(c.candidates().iter().all(|c| c.score == 0));
    }

    #[test]
    fn test_literal_and_catch_all() {
        let matcher = build(&[("/a/b/c", "e1"), ("/a/{*b}", "e2")]);
        assert_eq!(endpoints(state(&matcher, "/a")), vec!["e2"]);
        assert_eq!(endpoints(state(&matcher, "/a/b")), vec!["e2"]);
        assert_eq!(endpoints(state(&matcher, "/a/b/c")), vec!["e1", "e2"]);
        assert_eq!(endpoints(state(&matcher, "/a/{*}")), vec!["e2"]);
        assert_eq!(endpoints(state(&matcher, "/a/b/{*}")), vec!["e2"]);
    }

    #[test]
    fn test_parameter_and_catch_all() {
        let matcher = build(&[("/a/{b}/c", "e1"), ("/a/{*b}", "e2")]);
        assert_eq!(endpoints(state(&matcher, "/a")), vec!["e2"]);
        assert_eq!(endpoints(state(&matcher, "/a/{}")), vec!["e2"]);
        assert_eq!(endpoints(state(&matcher, "/a/{}/c")), vec!["e1", "e2"]);
        let a = state(&matcher, "/a").transitions().expect("table");
        // Parameter child wins the default edge; empty segments go through the exit state,
        // which hands anything after them to the catch-all.
        let position = |label: &str| {
            matcher
                .states()
                .iter()
                .position(|s| s.label() == label)
                .expect("state")
        };
        assert_eq!(a.default_destination(), position("/a/{}"));
        assert_eq!(a.exit_destination(), position("/a (exit)"));
        let exit = state(&matcher, "/a (exit)");
        assert_eq!(endpoints(exit), vec!["e2"]);
        let exit_table = exit.transitions().expect("table");
        assert_eq!(exit_table.kind(), JumpTableKind::ZeroEntry);
        assert_eq!(exit_table.default_destination(), position("/a/{*}"));
        assert_eq!(exit_table.exit_destination(), position("/a/{*}"));
    }

    #[test]
    fn test_exit_state_numbered_after_catch_all_child() {
        let matcher = build(&[("/a/b", "ab"), ("/a/{*rest}", "rest")]);
        let labels: Vec<&str> = matcher.states().iter().map(DfaState::label).collect();
        assert_eq!(
            labels,
            vec![
                "/",
                "/a",
                "/a/b",
                "/a/b/{*}",
                "/a/b (exit)",
                "/a/{*}",
                "/a (exit)",
            ]
        );
        assert_eq!(endpoints(state(&matcher, "/a/b (exit)")), vec!["ab", "rest"]);
    }

    #[test]
    fn test_optional_matches_at_parent_and_exit() {
        let matcher = build(&[("/page/{n?}", "e")]);
        assert_eq!(endpoints(state(&matcher, "/page")), vec!["e"]);
        assert_eq!(endpoints(state(&matcher, "/page/{}")), vec!["e"]);
        assert_eq!(endpoints(state(&matcher, "/page (exit)")), vec!["e"]);
    }

    #[test]
    fn test_numbering_is_depth_first() {
        let matcher = build(&[("/b/x", "e1"), ("/a", "e2"), ("/{id}", "e3")]);
        let labels: Vec<&str> = matcher.states().iter().map(DfaState::label).collect();
        assert_eq!(
            labels,
            vec![
                "/",
                "/a",
                "/a (exit)",
                "/b",
                "/b/x",
                "/b/x (exit)",
                "/b (exit)",
                "/{}",
                "/{} (exit)",
            ]
        );
    }

    #[test]
    fn test_invalid_template_reported_at_build() {
        let mut builder = MatcherBuilder::default();
        builder.add_endpoint(
            vec![
                SegmentRequirement::catch_all("rest"),
                SegmentRequirement::literal("tail"),
            ],
            "e",
        );
        assert!(matches!(
            builder.build(),
            Err(BuildError::CatchAllNotLast { .. })
        ));
    }

    #[test]
    fn test_empty_builder_matches_nothing() {
        let matcher = MatcherBuilder::<&str>::default().build().expect("build");
        assert_eq!(matcher.state_count(), 1);
        assert!(matcher.match_path("/").is_empty());
        assert!(matcher.match_path("/anything").is_empty());
    }

    #[test]
    fn test_two_builds_dump_identically() {
        let templates = [
            ("/product", "list"),
            ("/product/{id}", "get"),
            ("/product/{id}/reviews/{*rest}", "reviews"),
            ("/Product/featured", "featured"),
            ("/{page?}", "page"),
        ];
        assert_eq!(build(&templates).to_string(), build(&templates).to_string());
    }
}
