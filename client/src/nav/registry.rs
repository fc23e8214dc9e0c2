//! URL ↔ navigation state resolution.
//!
//! The registry is built once from the static tables in `areas` and never
//! changes afterwards. Resolution picks the most specific matching state,
//! extracts path and query parameters, and turns visits to a parent state
//! into a redirect to its declared default child.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use records::endpoints::encode_segment;

use super::areas::{ControllerKind, DEFAULT_CHILDREN, STATES, StateDef};
use crate::version::VersionSuffix;

/// Navigation failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("no state matches {0}")]
    NoMatch(String),
    #[error("unknown state {0}")]
    UnknownState(String),
    #[error("state {state} needs parameter {param}")]
    MissingParam { state: String, param: String },
    #[error("state {state} has no parent state {parent}")]
    MissingParent { state: String, parent: String },
    #[error("{child} cannot be the default child of {parent}")]
    InvalidDefault { parent: String, child: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Pattern {
    segments: Vec<Segment>,
    query: Vec<String>,
}

impl Pattern {
    /// `/details/{machineid:.*}/{machineresolver}?resolver` style patterns.
    /// The `:regex` part of a parameter is accepted and ignored; a parameter
    /// always spans exactly one path segment.
    fn parse(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
                Some(inner) => Segment::Param(inner.split(':').next().unwrap_or(inner).to_owned()),
                None => Segment::Literal(s.to_owned()),
            })
            .collect();
        let query = query
            .split('&')
            .filter(|q| !q.is_empty())
            .map(str::to_owned)
            .collect();
        Self { segments, query }
    }

    fn join(&self, child: &Self) -> Self {
        Self {
            segments: self.segments.iter().chain(&child.segments).cloned().collect(),
            query: self.query.iter().chain(&child.query).cloned().collect(),
        }
    }

    fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    fn has_params(&self) -> bool {
        self.literal_count() != self.segments.len()
    }

    fn matches(&self, parts: &[&str]) -> Option<BTreeMap<String, String>> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8_lossy().into_owned();
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Param(name) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query.join("&"));
        }
        out
    }
}

/// A state as registered: full URL pattern and cache-busted template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState {
    pub name: String,
    /// Full URL pattern including ancestors, e.g. `/machine/list?resolver`.
    pub url: String,
    /// `<instance>/static/components/<area>/views/<view>.html?v=<suffix>`
    pub template_url: String,
    pub controller: Option<ControllerKind>,
    pattern: Pattern,
}

impl NavigationState {
    /// Dotted parent name, `None` for top-level states.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(parent, _)| parent)
    }
}

/// Outcome of resolving a URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched(StateMatch),
    /// The URL names a parent state; navigate to its default child instead.
    Redirect { from: String, to: String, url: String },
}

/// A matched state with its extracted parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateMatch {
    pub state: String,
    pub controller: Option<ControllerKind>,
    pub params: BTreeMap<String, String>,
}

impl StateMatch {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Immutable table of navigation states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateRegistry {
    states: Vec<NavigationState>,
    defaults: BTreeMap<String, String>,
}

impl StateRegistry {
    /// Registry of every feature area, templates under `instance`.
    #[must_use]
    pub fn new(instance: &str, suffix: &VersionSuffix) -> Self {
        Self::from_defs(instance, suffix, STATES, DEFAULT_CHILDREN)
    }

    /// Build from explicit tables. Parents must be declared before children.
    #[must_use]
    pub fn from_defs(instance: &str, suffix: &VersionSuffix, defs: &[StateDef], defaults: &[(&str, &str)]) -> Self {
        let mut states: Vec<NavigationState> = Vec::with_capacity(defs.len());
        for def in defs {
            let own = Pattern::parse(def.url);
            let parent = def
                .name
                .rsplit_once('.')
                .and_then(|(parent, _)| states.iter().find(|s| s.name == parent));
            let pattern = match parent {
                Some(parent) => parent.pattern.join(&own),
                None => own,
            };
            let template = format!("{instance}/static/components/{}/views/{}.html", def.area, def.view);
            states.push(NavigationState {
                name: def.name.to_owned(),
                url: pattern.render(),
                template_url: suffix.decorate(&template),
                controller: def.controller,
                pattern,
            });
        }
        let defaults = defaults
            .iter()
            .map(|(parent, child)| ((*parent).to_owned(), (*child).to_owned()))
            .collect();
        Self { states, defaults }
    }

    /// Check parent links and the default-child table.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency: a dotted state without a declared
    /// parent, or a default child that is unknown, not a direct child, or
    /// needs path parameters.
    pub fn validate(&self) -> Result<(), NavError> {
        for state in &self.states {
            if let Some(parent) = state.parent() {
                if self.state(parent).is_none() {
                    return Err(NavError::MissingParent {
                        state: state.name.clone(),
                        parent: parent.to_owned(),
                    });
                }
            }
        }
        for (parent, child) in &self.defaults {
            let invalid = || NavError::InvalidDefault {
                parent: parent.clone(),
                child: child.clone(),
            };
            if self.state(parent).is_none() {
                return Err(NavError::UnknownState(parent.clone()));
            }
            let child_state = self.state(child).ok_or_else(invalid)?;
            if child_state.parent() != Some(parent.as_str()) || child_state.pattern.has_params() {
                return Err(invalid());
            }
        }
        Ok(())
    }

    pub fn states(&self) -> impl Iterator<Item = &NavigationState> {
        self.states.iter()
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<&NavigationState> {
        self.states.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn template_url(&self, name: &str) -> Option<&str> {
        self.state(name).map(|s| s.template_url.as_str())
    }

    /// Declared default child of a parent state.
    #[must_use]
    pub fn default_child(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    /// Follow default children until a state without one.
    fn default_target(&self, name: &str) -> Option<&str> {
        let mut current = self.default_child(name)?;
        // Each hop descends one level, so the chain is bounded by the table size.
        for _ in 0..self.defaults.len() {
            match self.default_child(current) {
                Some(next) => current = next,
                None => break,
            }
        }
        Some(current)
    }

    /// Resolve a router URL (path plus optional query) to a state.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NoMatch`] when no state pattern fits the path.
    pub fn resolve(&self, url: &str) -> Result<Resolution, NavError> {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        // `rev` keeps the first declared state on equal specificity.
        let (state, mut params) = self
            .states
            .iter()
            .rev()
            .filter_map(|s| s.pattern.matches(&parts).map(|params| (s, params)))
            .max_by_key(|(s, _)| (s.pattern.segments.len(), s.pattern.literal_count()))
            .ok_or_else(|| NavError::NoMatch(url.to_owned()))?;

        if let Some(target) = self.default_target(&state.name) {
            return Ok(Resolution::Redirect {
                from: state.name.clone(),
                to: target.to_owned(),
                url: self.href(target, &[])?,
            });
        }

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if state.pattern.query.iter().any(|q| *q == key) {
                params.insert(key.into_owned(), value.into_owned());
            }
        }
        Ok(Resolution::Matched(StateMatch {
            state: state.name.clone(),
            controller: state.controller,
            params,
        }))
    }

    /// Concrete URL of a state. Path parameters are required and
    /// percent-encoded; declared query parameters are optional.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnknownState`] or [`NavError::MissingParam`].
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, NavError> {
        let state = self.state(name).ok_or_else(|| NavError::UnknownState(name.to_owned()))?;
        let lookup = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .filter(|v| !v.is_empty())
        };

        let mut out = String::new();
        for segment in &state.pattern.segments {
            out.push('/');
            match segment {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Param(param) => {
                    let value = lookup(param).ok_or_else(|| NavError::MissingParam {
                        state: name.to_owned(),
                        param: param.clone(),
                    })?;
                    out.push_str(&encode_segment(value));
                }
            }
        }
        if out.is_empty() {
            out.push('/');
        }

        let mut query = url::form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for key in &state.pattern.query {
            if let Some(value) = lookup(key) {
                query.append_pair(key, value);
                has_query = true;
            }
        }
        if has_query {
            out.push('?');
            out.push_str(&query.finish());
        }
        Ok(out)
    }
}
